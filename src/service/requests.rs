use crate::core::{Priority, Status, User};

/// Input for [`super::TicketService::create_ticket`]
///
/// Status and open state are not part of the request: new tickets always
/// start as open `ToDo` tickets.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewTicket {
    pub title: String,
    pub description: String,
    pub priority: Priority,
    pub created_by: Option<User>,
    pub assigned_to: Option<User>,
}

impl NewTicket {
    /// A request with `Medium` priority and no users attached
    pub fn new(title: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            description: description.into(),
            priority: Priority::default(),
            created_by: None,
            assigned_to: None,
        }
    }

    #[must_use]
    pub const fn priority(mut self, priority: Priority) -> Self {
        self.priority = priority;
        self
    }

    #[must_use]
    pub fn created_by(mut self, user: User) -> Self {
        self.created_by = Some(user);
        self
    }

    #[must_use]
    pub fn assigned_to(mut self, user: User) -> Self {
        self.assigned_to = Some(user);
        self
    }
}

/// Partial update applied by [`super::TicketService::update_ticket`]
///
/// Only fields that are `Some` are written. `assigned_to: Some(None)` removes
/// the assignee.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TicketUpdate {
    pub title: Option<String>,
    pub description: Option<String>,
    pub status: Option<Status>,
    pub priority: Option<Priority>,
    pub is_open: Option<bool>,
    pub assigned_to: Option<Option<User>>,
}

impl TicketUpdate {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    #[must_use]
    pub fn description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
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
    pub fn assigned_to(mut self, user: Option<User>) -> Self {
        self.assigned_to = Some(user);
        self
    }

    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }
}
