//! Handler for the `edit` command
//!
//! An edit starts from the stored ticket, overlays the given flags and then
//! validates the whole form, the same way the interactive edit form does.

use super::common::{HandlerContext, parse_ticket_id, ticket_json};
use crate::cli::forms::{TicketForm, UserInput};
use crate::core::{Priority, Status, Ticket, TicketId};
use crate::error::Result;

/// Flags accepted by the `edit` command
#[derive(Debug, Clone, Default)]
pub struct EditParams {
    pub title: Option<String>,
    pub description: Option<String>,
    pub status: Option<String>,
    pub priority: Option<String>,
    pub assignee_name: Option<String>,
    pub assignee_email: Option<String>,
    pub unassign: bool,
}

impl EditParams {
    fn is_empty(&self) -> bool {
        self.title.is_none()
            && self.description.is_none()
            && self.status.is_none()
            && self.priority.is_none()
            && self.assignee_name.is_none()
            && self.assignee_email.is_none()
            && !self.unassign
    }

    /// Overlay the flags on a form prefilled from the stored ticket
    pub fn apply_to(self, form: &mut TicketForm) -> Result<()> {
        if let Some(title) = self.title {
            form.title = title;
        }
        if let Some(description) = self.description {
            form.description = description;
        }
        if let Some(status) = self.status {
            form.status = Some(status.parse::<Status>()?);
        }
        if let Some(priority) = self.priority {
            form.priority = priority.parse::<Priority>()?;
        }

        if self.unassign {
            form.assigned_to = UserInput::default();
        } else if let Some(name) = self.assignee_name {
            form.assigned_to = form.assigned_to.reentered(name, form.assigned_to.email.clone());
        }
        if let Some(email) = self.assignee_email {
            form.assigned_to.email = email;
        }
        Ok(())
    }
}

/// Validate an edit form and apply it to the stored ticket
pub fn update_from_form(id: TicketId, form: TicketForm, ctx: &mut HandlerContext) -> Result<Ticket> {
    let update = form.into_update()?;
    ctx.service.update_ticket(id, update)
}

/// Handler for the `edit` command
pub fn handle_edit_command(ticket_ref: &str, params: EditParams, ctx: &mut HandlerContext) -> Result<()> {
    let id = parse_ticket_id(ticket_ref)?;
    let current = ctx.service.get_ticket(id)?;

    if params.is_empty() {
        ctx.formatter.warning("No changes given");
        return Ok(());
    }

    let mut form = TicketForm::from_ticket(&current);
    params.apply_to(&mut form)?;
    let ticket = update_from_form(id, form, ctx)?;

    if ctx.formatter.is_json() {
        ctx.formatter.print_json(&serde_json::json!({
            "status": "success",
            "ticket": ticket_json(&ticket)?,
        }))?;
    } else {
        ctx.formatter
            .success(&format!("Updated ticket #{id}: {}", ticket.title()));
    }
    Ok(())
}
