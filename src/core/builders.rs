use super::{Priority, Status, Ticket, TicketId, User};
use chrono::{DateTime, Utc};

/// Builder for creating Ticket instances
///
/// Unset fields take the same defaults a freshly created ticket gets: status
/// `ToDo`, priority `Medium`, open, and `updated_at` equal to `created_at`.
#[derive(Default)]
pub struct TicketBuilder {
    id: Option<TicketId>,
    title: Option<String>,
    description: Option<String>,
    priority: Option<Priority>,
    status: Option<Status>,
    is_open: Option<bool>,
    created_at: Option<DateTime<Utc>>,
    updated_at: Option<DateTime<Utc>>,
    created_by: Option<User>,
    assigned_to: Option<User>,
}

impl TicketBuilder {
    /// Create a new ticket builder
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the ticket ID
    #[must_use]
    pub const fn id(mut self, id: TicketId) -> Self {
        self.id = Some(id);
        self
    }

    /// Set the title
    #[must_use]
    pub fn title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    /// Set the description
    #[must_use]
    pub fn description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Set the priority
    #[must_use]
    pub const fn priority(mut self, priority: Priority) -> Self {
        self.priority = Some(priority);
        self
    }

    /// Set the status
    #[must_use]
    pub const fn status(mut self, status: Status) -> Self {
        self.status = Some(status);
        self
    }

    #[must_use]
    pub const fn open(mut self, is_open: bool) -> Self {
        self.is_open = Some(is_open);
        self
    }

    /// Set `created_at` timestamp
    #[must_use]
    pub const fn created_at(mut self, created_at: DateTime<Utc>) -> Self {
        self.created_at = Some(created_at);
        self
    }

    /// Set `updated_at` timestamp
    #[must_use]
    pub const fn updated_at(mut self, updated_at: DateTime<Utc>) -> Self {
        self.updated_at = Some(updated_at);
        self
    }

    /// Set the creator
    #[must_use]
    pub fn created_by(mut self, user: User) -> Self {
        self.created_by = Some(user);
        self
    }

    /// Set the assignee
    #[must_use]
    pub fn assigned_to(mut self, user: User) -> Self {
        self.assigned_to = Some(user);
        self
    }

    /// Build the ticket
    pub fn build(self) -> Ticket {
        let created_at = self.created_at.unwrap_or_else(Utc::now);
        Ticket {
            id: self.id,
            title: self.title.unwrap_or_default(),
            description: self.description.unwrap_or_default(),
            priority: self.priority.unwrap_or_default(),
            status: self.status.unwrap_or_default(),
            is_open: self.is_open.unwrap_or(true),
            created_at,
            updated_at: self.updated_at.unwrap_or(created_at),
            created_by: self.created_by,
            assigned_to: self.assigned_to,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;

    #[test]
    fn test_ticket_builder() {
        let ticket = TicketBuilder::new()
            .id(TicketId::new(3))
            .title("Test Ticket")
            .description("A test ticket")
            .priority(Priority::High)
            .created_by(User::new(1, "John Doe", "john@example.com"))
            .build();

        assert_eq!(ticket.id(), Some(TicketId::new(3)));
        assert_eq!(ticket.title(), "Test Ticket");
        assert_eq!(ticket.description(), "A test ticket");
        assert_eq!(ticket.priority(), Priority::High);
        assert_eq!(ticket.status(), Status::ToDo);
        assert!(ticket.is_open());
        assert_eq!(ticket.created_by().map(User::name), Some("John Doe"));
        assert!(ticket.assigned_to().is_none());
    }

    #[test]
    fn test_builder_backdates_both_timestamps() {
        let created = Utc::now() - Duration::days(10);
        let ticket = TicketBuilder::new().title("Old").created_at(created).build();

        assert_eq!(ticket.created_at(), created);
        assert_eq!(ticket.updated_at(), created);
        assert!(ticket.is_overdue());
    }
}
