//! Handler for the `show` command

use super::common::{HandlerContext, parse_ticket_id, priority_badge, ticket_json};
use crate::core::{Ticket, User};
use crate::error::Result;
use colored::Colorize;

/// Handler for the `show` command
///
/// # Errors
///
/// Returns `TicketNotFound` when no ticket has the given id.
pub fn handle_show_command(ticket_ref: &str, ctx: &HandlerContext) -> Result<()> {
    let id = parse_ticket_id(ticket_ref)?;
    let ticket = ctx.service.get_ticket(id)?;

    if ctx.formatter.is_json() {
        let mut value = ticket_json(&ticket)?;
        value["color_class"] = ticket.priority().color_class().into();
        value["age_in_days"] = ticket.age_in_days().into();
        value["is_overdue"] = ticket.is_overdue().into();
        return ctx.formatter.print_json(&value);
    }

    for line in detail_lines(&ticket) {
        ctx.formatter.info(&line);
    }
    Ok(())
}

/// Text lines of the ticket detail view
pub fn detail_lines(ticket: &Ticket) -> Vec<String> {
    let id = ticket.id().map_or_else(|| "-".to_string(), |id| id.to_string());
    let state = if ticket.is_open() {
        "open".green()
    } else {
        "closed".dimmed()
    };

    let mut lines = vec![
        format!("{} {}", format!("#{id}").bold(), ticket.title().bold()),
        String::new(),
        format!("Status:      {} ({state})", ticket.status()),
        format!("Priority:    {}", priority_badge(ticket.priority())),
        format!("Created by:  {}", user_label(ticket.created_by())),
        format!("Assigned to: {}", user_label(ticket.assigned_to())),
        format!(
            "Created:     {} ({} days ago)",
            ticket.created_at().format("%Y-%m-%d %H:%M"),
            ticket.age_in_days()
        ),
        format!("Updated:     {}", ticket.updated_at().format("%Y-%m-%d %H:%M")),
    ];

    if ticket.is_overdue() {
        lines.push("Overdue:     yes".red().to_string());
    }

    lines.push(String::new());
    lines.push(ticket.description().to_string());
    lines
}

fn user_label(user: Option<&User>) -> String {
    user.map_or_else(
        || "Unassigned".to_string(),
        |u| format!("{} <{}>", u.name(), u.email()),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{Priority, Status, TicketBuilder, TicketId};
    use chrono::{Duration, Utc};

    #[test]
    fn test_detail_lines() {
        let ticket = TicketBuilder::new()
            .id(TicketId::new(7))
            .title("Fix login bug")
            .description("Users cannot log in")
            .priority(Priority::High)
            .status(Status::ToDo)
            .created_by(User::new(1, "John Doe", "john@example.com"))
            .build();

        let text = detail_lines(&ticket).join("\n");
        assert!(text.contains("Fix login bug"));
        assert!(text.contains("John Doe <john@example.com>"));
        assert!(text.contains("Assigned to: Unassigned"));
        assert!(text.ends_with("Users cannot log in"));
        assert!(!text.contains("Overdue"));
    }

    #[test]
    fn test_detail_lines_flag_overdue() {
        let ticket = TicketBuilder::new()
            .title("Stale")
            .created_at(Utc::now() - Duration::days(10))
            .build();

        let text = detail_lines(&ticket).join("\n");
        assert!(text.contains("Overdue"));
        assert!(text.contains("(10 days ago)"));
    }
}
