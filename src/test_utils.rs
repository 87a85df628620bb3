//! Test utilities for the ticketing system
//!
//! Common fixtures shared by the unit tests across the crate.

#![cfg(test)]

use crate::cli::OutputFormatter;
use crate::cli::handlers::HandlerContext;
use crate::core::{Priority, Status, Ticket, TicketBuilder, User};
use crate::service::TicketService;
use crate::storage::{InMemoryStorage, TicketRepository};

/// Test fixture wrapping a service over a fresh in-memory store
pub struct TestStore {
    pub service: TicketService<InMemoryStorage>,
}

impl TestStore {
    pub fn new() -> Self {
        Self {
            service: TicketService::new(InMemoryStorage::new()),
        }
    }

    /// A store holding three tickets with ids 1, 2 and 3
    pub fn with_sample_tickets() -> Self {
        TestDataBuilder::new()
            .with_ticket("Fix login bug", Priority::High, Status::ToDo)
            .with_ticket("Add search feature", Priority::Medium, Status::InProgress)
            .with_ticket("Update documentation", Priority::Low, Status::Done)
            .build_in_store()
    }

    /// Save a medium-priority `ToDo` ticket and return it with its id
    pub fn create_ticket(&mut self, title: &str) -> Ticket {
        let ticket = create_test_ticket(title, Priority::Medium, Status::ToDo);
        self.service.repository_mut().save(ticket)
    }

    /// Hand the store to the CLI handlers with plain text output
    pub fn into_context(self) -> HandlerContext {
        HandlerContext::with_service(self.service, OutputFormatter::default())
    }
}

/// Handler context over the five demo tickets the binary starts with
pub fn sample_context() -> HandlerContext {
    HandlerContext::with_service(
        TicketService::new(InMemoryStorage::with_sample_data()),
        OutputFormatter::default(),
    )
}

pub fn empty_context() -> HandlerContext {
    TestStore::new().into_context()
}

pub fn john() -> User {
    User::new(1, "John Doe", "john@example.com")
}

pub fn jane() -> User {
    User::new(2, "Jane Smith", "jane@example.com")
}

/// Create an unsaved test ticket created by John
pub fn create_test_ticket(title: &str, priority: Priority, status: Status) -> Ticket {
    TicketBuilder::new()
        .title(title)
        .description(format!("Description for {title}"))
        .priority(priority)
        .status(status)
        .open(status != Status::Done)
        .created_by(john())
        .build()
}

/// Assert that two tickets are equal (ignoring timestamps)
pub fn assert_tickets_equal(left: &Ticket, right: &Ticket) {
    assert_eq!(left.id(), right.id(), "Ticket IDs don't match");
    assert_eq!(left.title(), right.title(), "Ticket titles don't match");
    assert_eq!(
        left.description(),
        right.description(),
        "Ticket descriptions don't match"
    );
    assert_eq!(left.priority(), right.priority(), "Ticket priorities don't match");
    assert_eq!(left.status(), right.status(), "Ticket statuses don't match");
    assert_eq!(left.is_open(), right.is_open(), "Ticket open flags don't match");
    assert_eq!(left.created_by(), right.created_by(), "Ticket creators don't match");
    assert_eq!(left.assigned_to(), right.assigned_to(), "Ticket assignees don't match");
}

/// Test data builder for complex scenarios
pub struct TestDataBuilder {
    tickets: Vec<Ticket>,
}

impl TestDataBuilder {
    pub fn new() -> Self {
        Self {
            tickets: Vec::new(),
        }
    }

    pub fn with_ticket(mut self, title: &str, priority: Priority, status: Status) -> Self {
        self.tickets.push(create_test_ticket(title, priority, status));
        self
    }

    /// Add a medium-priority `ToDo` ticket with an assignee
    pub fn with_assigned_ticket(mut self, title: &str, assignee: User) -> Self {
        let mut ticket = create_test_ticket(title, Priority::Medium, Status::ToDo);
        ticket.set_assigned_to(Some(assignee));
        self.tickets.push(ticket);
        self
    }

    /// Add `count` medium-priority tickets with the same status
    pub fn with_tickets_in_status(mut self, status: Status, count: usize) -> Self {
        for i in 1..=count {
            self.tickets.push(create_test_ticket(
                &format!("{status} ticket {i}"),
                Priority::Medium,
                status,
            ));
        }
        self
    }

    pub fn build(self) -> Vec<Ticket> {
        self.tickets
    }

    /// Save the tickets in order, so ids follow insertion order
    pub fn build_in_store(self) -> TestStore {
        let mut store = TestStore::new();
        for ticket in self.tickets {
            store.service.repository_mut().save(ticket);
        }
        store
    }
}

/// Macro for quickly creating test tickets
#[macro_export]
macro_rules! test_ticket {
    ($title:expr) => {
        $crate::test_utils::create_test_ticket(
            $title,
            $crate::core::Priority::Medium,
            $crate::core::Status::ToDo,
        )
    };
    ($title:expr, $priority:expr) => {
        $crate::test_utils::create_test_ticket($title, $priority, $crate::core::Status::ToDo)
    };
    ($title:expr, $priority:expr, $status:expr) => {
        $crate::test_utils::create_test_ticket($title, $priority, $status)
    };
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_store_with_sample_tickets() {
        let store = TestStore::with_sample_tickets();
        let tickets = store.service.get_all_tickets();
        assert_eq!(tickets.len(), 3);
        assert_eq!(tickets[0].title(), "Fix login bug");
        assert!(!tickets[2].is_open());
    }

    #[test]
    fn test_create_ticket_assigns_ids() {
        let mut store = TestStore::new();
        let first = store.create_ticket("First");
        let second = store.create_ticket("Second");
        assert_eq!(first.id().map(|id| id.value()), Some(1));
        assert_eq!(second.id().map(|id| id.value()), Some(2));
        assert_tickets_equal(&store.service.get_ticket(first.id().unwrap()).unwrap(), &first);
    }

    #[test]
    fn test_data_builder() {
        let tickets = TestDataBuilder::new()
            .with_ticket("Bug fix", Priority::High, Status::ToDo)
            .with_tickets_in_status(Status::InProgress, 2)
            .build();

        assert_eq!(tickets.len(), 3);
        assert_eq!(tickets[0].title(), "Bug fix");
        assert_eq!(tickets[1].status(), Status::InProgress);
        assert_eq!(tickets[2].title(), "InProgress ticket 2");
    }

    #[test]
    fn test_contexts() {
        assert_eq!(sample_context().service.get_all_tickets().len(), 5);
        assert!(empty_context().service.get_all_tickets().is_empty());

        let ctx = TestDataBuilder::new()
            .with_assigned_ticket("Assigned", jane())
            .build_in_store()
            .into_context();
        let tickets = ctx.service.get_all_tickets();
        assert_eq!(tickets[0].assigned_to(), Some(&jane()));
    }

    #[test]
    fn test_ticket_macro() {
        let ticket = crate::test_ticket!("Quick", Priority::Critical);
        assert_eq!(ticket.priority(), Priority::Critical);
        assert_eq!(ticket.status(), Status::ToDo);
        assert_eq!(ticket.created_by(), Some(&john()));
    }
}
