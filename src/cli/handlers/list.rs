//! Handler for the `list` command

use super::common::{HandlerContext, ticket_json, ticket_row};
use crate::core::{Priority, Status, Ticket, UserId};
use crate::error::Result;
use crate::storage::{TicketFilter, TicketRepository};

/// Filters accepted by the `list` command
#[derive(Debug, Clone, Default)]
pub struct ListParams {
    pub status: Option<String>,
    pub priority: Option<String>,
    pub open: bool,
    pub closed: bool,
    pub overdue: bool,
    pub assignee: Option<String>,
    pub creator: Option<String>,
}

impl ListParams {
    /// Turn the raw arguments into a repository filter
    pub fn to_filter(&self) -> Result<TicketFilter> {
        let mut filter = TicketFilter::new();

        if let Some(status) = &self.status {
            filter = filter.status(status.parse::<Status>()?);
        }
        if let Some(priority) = &self.priority {
            filter = filter.priority(priority.parse::<Priority>()?);
        }
        if self.open {
            filter = filter.open(true);
        } else if self.closed {
            filter = filter.open(false);
        }
        if let Some(assignee) = &self.assignee {
            filter = filter.assigned_to(UserId::from(assignee.as_str()));
        }
        if let Some(creator) = &self.creator {
            filter = filter.created_by(UserId::from(creator.as_str()));
        }

        Ok(filter)
    }
}

/// Select the tickets for a `list` invocation, highest priority first
pub fn select_tickets(params: &ListParams, ctx: &HandlerContext) -> Result<Vec<Ticket>> {
    let filter = params.to_filter()?;
    let mut tickets = if params.overdue {
        ctx.service.repository().find_overdue_tickets()
    } else {
        ctx.service.list_tickets(&filter)
    };

    if params.overdue && !filter.is_empty() {
        tickets.retain(|ticket| filter.matches(ticket));
    }
    Ok(tickets)
}

/// Handler for the `list` command
pub fn handle_list_command(params: &ListParams, ctx: &HandlerContext) -> Result<()> {
    let tickets = select_tickets(params, ctx)?;

    if ctx.formatter.is_json() {
        let records = tickets
            .iter()
            .map(|ticket| {
                let mut value = ticket_json(ticket)?;
                value["color_class"] = ticket.priority().color_class().into();
                value["is_overdue"] = ticket.is_overdue().into();
                Ok(value)
            })
            .collect::<Result<Vec<_>>>()?;
        return ctx.formatter.print_json(&records);
    }

    if tickets.is_empty() {
        ctx.formatter.info("No tickets found. Create your first ticket!");
        return Ok(());
    }

    for ticket in &tickets {
        ctx.formatter.info(&ticket_row(ticket));
    }
    ctx.formatter.info(&format!("\n{} ticket(s)", tickets.len()));

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::User;
    use crate::test_utils::{TestDataBuilder, sample_context};
    use crate::error::TicketingError;

    fn ids(tickets: &[Ticket]) -> Vec<u64> {
        tickets
            .iter()
            .filter_map(|ticket| ticket.id().map(|id| id.value()))
            .collect()
    }

    #[test]
    fn test_no_filters_lists_everything_by_priority() {
        let ctx = sample_context();
        let tickets = select_tickets(&ListParams::default(), &ctx).unwrap();
        assert_eq!(ids(&tickets), vec![3, 1, 5, 2, 4]);
    }

    #[test]
    fn test_status_and_assignee_filters() {
        let ctx = sample_context();
        let params = ListParams {
            status: Some("in-progress".to_string()),
            assignee: Some("2".to_string()),
            ..ListParams::default()
        };
        let tickets = select_tickets(&params, &ctx).unwrap();
        assert_eq!(ids(&tickets), vec![5]);
    }

    #[test]
    fn test_assignee_filter_matches_text_ids() {
        let ctx = TestDataBuilder::new()
            .with_ticket("Unassigned", Priority::Medium, Status::ToDo)
            .with_assigned_ticket(
                "Assigned",
                User::new(UserId::Text("42".to_string()), "Ann Lee", "ann@example.com"),
            )
            .build_in_store()
            .into_context();
        let params = ListParams {
            assignee: Some("42".to_string()),
            ..ListParams::default()
        };
        assert_eq!(ids(&select_tickets(&params, &ctx).unwrap()), vec![2]);
    }

    #[test]
    fn test_closed_filter() {
        let ctx = sample_context();
        let params = ListParams {
            closed: true,
            ..ListParams::default()
        };
        assert_eq!(ids(&select_tickets(&params, &ctx).unwrap()), vec![3]);
    }

    #[test]
    fn test_fresh_tickets_are_not_overdue() {
        let ctx = sample_context();
        let params = ListParams {
            overdue: true,
            ..ListParams::default()
        };
        assert!(select_tickets(&params, &ctx).unwrap().is_empty());
    }

    #[test]
    fn test_unknown_priority_is_rejected() {
        let params = ListParams {
            priority: Some("urgent".to_string()),
            ..ListParams::default()
        };
        assert!(matches!(
            params.to_filter(),
            Err(TicketingError::InvalidPriority(_))
        ));
    }
}
