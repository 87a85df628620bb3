use crate::core::{Priority, Status, Ticket, UserId};

/// Criteria for selecting tickets
///
/// Every criterion that is set must match (AND semantics); unset criteria do
/// not constrain the result. User criteria compare user ids by their written
/// form, so a numeric `42` and a text `"42"` select the same tickets.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TicketFilter {
    pub status: Option<Status>,
    pub priority: Option<Priority>,
    pub is_open: Option<bool>,
    pub assigned_to: Option<UserId>,
    pub created_by: Option<UserId>,
}

impl TicketFilter {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub const fn status(mut self, status: Status) -> Self {
        self.status = Some(status);
        self
    }

    #[must_use]
    pub const fn priority(mut self, priority: Priority) -> Self {
        self.priority = Some(priority);
        self
    }

    #[must_use]
    pub const fn open(mut self, is_open: bool) -> Self {
        self.is_open = Some(is_open);
        self
    }

    #[must_use]
    pub fn assigned_to(mut self, user_id: impl Into<UserId>) -> Self {
        self.assigned_to = Some(user_id.into());
        self
    }

    #[must_use]
    pub fn created_by(mut self, user_id: impl Into<UserId>) -> Self {
        self.created_by = Some(user_id.into());
        self
    }

    /// True when no criterion is set
    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }

    /// Check if a ticket matches all filter criteria
    pub fn matches(&self, ticket: &Ticket) -> bool {
        if let Some(status) = self.status {
            if ticket.status() != status {
                return false;
            }
        }

        if let Some(priority) = self.priority {
            if ticket.priority() != priority {
                return false;
            }
        }

        if let Some(is_open) = self.is_open {
            if ticket.is_open() != is_open {
                return false;
            }
        }

        if let Some(ref assignee) = self.assigned_to {
            if !ticket.assigned_to().is_some_and(|u| u.id().same_text(assignee)) {
                return false;
            }
        }

        if let Some(ref creator) = self.created_by {
            if !ticket.created_by().is_some_and(|u| u.id().same_text(creator)) {
                return false;
            }
        }

        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{TicketBuilder, User};

    fn ticket(priority: Priority, status: Status, assignee: Option<u64>) -> Ticket {
        let mut builder = TicketBuilder::new()
            .title("t")
            .priority(priority)
            .status(status)
            .created_by(User::new(1, "John Doe", "john@example.com"));
        if let Some(id) = assignee {
            builder = builder.assigned_to(User::new(id, "Someone", "someone@example.com"));
        }
        builder.build()
    }

    #[test]
    fn test_empty_filter_matches_everything() {
        let filter = TicketFilter::new();
        assert!(filter.is_empty());
        assert!(filter.matches(&ticket(Priority::Low, Status::Done, None)));
    }

    #[test]
    fn test_filters_combine_with_and() {
        let filter = TicketFilter::new()
            .status(Status::ToDo)
            .priority(Priority::High);

        assert!(filter.matches(&ticket(Priority::High, Status::ToDo, None)));
        assert!(!filter.matches(&ticket(Priority::High, Status::Done, None)));
        assert!(!filter.matches(&ticket(Priority::Low, Status::ToDo, None)));
    }

    #[test]
    fn test_user_filters_match_by_id() {
        let filter = TicketFilter::new().assigned_to(2u64).created_by(1u64);

        assert!(filter.matches(&ticket(Priority::Medium, Status::ToDo, Some(2))));
        assert!(!filter.matches(&ticket(Priority::Medium, Status::ToDo, Some(3))));
        assert!(!filter.matches(&ticket(Priority::Medium, Status::ToDo, None)));
    }

    #[test]
    fn test_user_filters_accept_text_ids() {
        let ticket = TicketBuilder::new()
            .title("t")
            .created_by(User::new(UserId::Text("7".to_string()), "Jane Smith", "jane@example.com"))
            .assigned_to(User::new(UserId::Text("42".to_string()), "Ann Lee", "ann@example.com"))
            .build();

        assert!(TicketFilter::new().assigned_to("42").matches(&ticket));
        assert!(TicketFilter::new().created_by(7u64).matches(&ticket));
        assert!(!TicketFilter::new().assigned_to("7").matches(&ticket));
    }

    #[test]
    fn test_open_filter() {
        let mut closed = ticket(Priority::Medium, Status::InProgress, None);
        closed.close();

        assert!(TicketFilter::new().open(false).matches(&closed));
        assert!(!TicketFilter::new().open(true).matches(&closed));
    }
}
