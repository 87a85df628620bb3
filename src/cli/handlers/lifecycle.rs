//! Handlers for `close`, `reopen`, `advance` and `delete`

use super::common::{HandlerContext, parse_ticket_id, ticket_json};
use crate::core::Ticket;
use crate::error::Result;

fn report(ticket: &Ticket, verb: &str, ctx: &HandlerContext) -> Result<()> {
    if ctx.formatter.is_json() {
        return ctx.formatter.print_json(&serde_json::json!({
            "status": "success",
            "ticket": ticket_json(ticket)?,
        }));
    }

    let id = ticket.id().map(|id| id.to_string()).unwrap_or_default();
    ctx.formatter.success(&format!(
        "{verb} ticket #{id}: {} ({})",
        ticket.title(),
        ticket.status()
    ));
    Ok(())
}

/// Close a ticket; closing also marks it `Done`
pub fn handle_close_command(ticket_ref: &str, ctx: &mut HandlerContext) -> Result<()> {
    let id = parse_ticket_id(ticket_ref)?;
    let ticket = ctx.service.close_ticket(id)?;
    report(&ticket, "Closed", ctx)
}

/// Reopen a ticket; a `Done` ticket goes back to `ToDo`
pub fn handle_reopen_command(ticket_ref: &str, ctx: &mut HandlerContext) -> Result<()> {
    let id = parse_ticket_id(ticket_ref)?;
    let ticket = ctx.service.reopen_ticket(id)?;
    report(&ticket, "Reopened", ctx)
}

pub fn handle_advance_command(ticket_ref: &str, ctx: &mut HandlerContext) -> Result<()> {
    let id = parse_ticket_id(ticket_ref)?;
    let ticket = ctx.service.advance_status(id)?;
    report(&ticket, "Advanced", ctx)
}

pub fn handle_delete_command(ticket_ref: &str, ctx: &mut HandlerContext) -> Result<()> {
    let id = parse_ticket_id(ticket_ref)?;
    ctx.service.delete_ticket(id)?;

    if ctx.formatter.is_json() {
        ctx.formatter.print_json(&serde_json::json!({
            "status": "success",
            "deleted": id.value(),
        }))?;
    } else {
        ctx.formatter.success(&format!("Deleted ticket #{id}"));
    }
    Ok(())
}
