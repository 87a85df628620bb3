//! Ticket service
//!
//! Applies creation defaults and update rules on top of a
//! [`TicketRepository`]. The service never writes ticket fields directly; it
//! goes through the ticket's own setters so timestamps stay consistent.

mod requests;

pub use requests::{NewTicket, TicketUpdate};

use crate::core::{Status, Ticket, TicketId};
use crate::error::{Result, TicketingError};
use crate::storage::{TicketFilter, TicketRepository};

/// Orchestration layer over a ticket repository
#[derive(Debug, Clone, Default)]
pub struct TicketService<R> {
    repository: R,
}

impl<R: TicketRepository> TicketService<R> {
    pub const fn new(repository: R) -> Self {
        Self { repository }
    }

    pub const fn repository(&self) -> &R {
        &self.repository
    }

    pub fn repository_mut(&mut self) -> &mut R {
        &mut self.repository
    }

    pub fn into_repository(self) -> R {
        self.repository
    }

    /// Create an open `ToDo` ticket and store it under a fresh id
    pub fn create_ticket(&mut self, request: NewTicket) -> Ticket {
        let mut ticket = Ticket::new(
            None,
            request.title,
            request.description,
            Status::ToDo,
            request.priority,
            true,
        );
        if let Some(user) = request.created_by {
            ticket.set_created_by(Some(user));
        }
        if let Some(user) = request.assigned_to {
            ticket.set_assigned_to(Some(user));
        }

        let ticket = self.repository.save(ticket);
        tracing::info!(
            id = ?ticket.id(),
            priority = %ticket.priority(),
            "Ticket created - {}",
            ticket.title()
        );
        ticket
    }

    /// All tickets, highest priority first
    pub fn get_all_tickets(&self) -> Vec<Ticket> {
        self.repository.find_all()
    }

    pub fn get_ticket(&self, id: TicketId) -> Result<Ticket> {
        self.repository.find_by_id(id).ok_or_else(|| not_found(id))
    }

    pub fn list_tickets(&self, filter: &TicketFilter) -> Vec<Ticket> {
        self.repository.find_by_filters(filter)
    }

    /// Apply the fields present in `updates` and store the result
    pub fn update_ticket(&mut self, id: TicketId, updates: TicketUpdate) -> Result<Ticket> {
        let ticket = self.modify(id, |ticket| {
            if let Some(title) = updates.title {
                ticket.set_title(title);
            }
            if let Some(description) = updates.description {
                ticket.set_description(description);
            }
            if let Some(status) = updates.status {
                ticket.set_status(status);
            }
            if let Some(priority) = updates.priority {
                ticket.set_priority(priority);
            }
            if let Some(is_open) = updates.is_open {
                ticket.set_open(is_open);
            }
            if let Some(assignee) = updates.assigned_to {
                ticket.set_assigned_to(assignee);
            }
        })?;
        tracing::info!(%id, "Ticket updated - {}", ticket.title());
        Ok(ticket)
    }

    pub fn change_status(&mut self, id: TicketId, status: Status) -> Result<Ticket> {
        let ticket = self.modify(id, |ticket| {
            ticket.update_status(status);
        })?;
        tracing::info!(%id, %status, "Ticket status changed");
        Ok(ticket)
    }

    /// Move the ticket one step along `ToDo -> InProgress -> Done`
    pub fn advance_status(&mut self, id: TicketId) -> Result<Ticket> {
        let current = self.get_ticket(id)?.status();
        self.change_status(id, current.next())
    }

    pub fn close_ticket(&mut self, id: TicketId) -> Result<Ticket> {
        let ticket = self.modify(id, |ticket| {
            ticket.close();
        })?;
        tracing::info!(%id, "Ticket closed");
        Ok(ticket)
    }

    pub fn reopen_ticket(&mut self, id: TicketId) -> Result<Ticket> {
        let ticket = self.modify(id, |ticket| {
            ticket.open();
        })?;
        tracing::info!(%id, "Ticket reopened");
        Ok(ticket)
    }

    pub fn delete_ticket(&mut self, id: TicketId) -> Result<()> {
        if !self.repository.delete_by_id(id) {
            return Err(not_found(id));
        }
        tracing::info!(%id, "Ticket deleted");
        Ok(())
    }

    fn modify<F>(&mut self, id: TicketId, apply: F) -> Result<Ticket>
    where
        F: FnOnce(&mut Ticket),
    {
        let mut ticket = self.get_ticket(id)?;
        apply(&mut ticket);
        Ok(self.repository.save(ticket))
    }
}

fn not_found(id: TicketId) -> TicketingError {
    TicketingError::TicketNotFound { id: id.to_string() }
}
