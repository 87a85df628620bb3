use super::filter::TicketFilter;
use crate::core::{Priority, Status, Ticket, TicketId};

/// Repository trait for ticket storage operations
///
/// Implementors provide the primitive keyed operations; every query that
/// produces a list is built on [`TicketRepository::find`], which returns
/// tickets ordered by priority, highest first.
pub trait TicketRepository {
    /// Stores a ticket, assigning the next id if it has none, and returns the
    /// stored copy
    fn save(&mut self, ticket: Ticket) -> Ticket;

    /// Looks up a ticket by ID
    fn find_by_id(&self, id: TicketId) -> Option<Ticket>;

    /// Loads all tickets in storage order
    fn load_all(&self) -> Vec<Ticket>;

    /// Removes a ticket; returns whether one was stored under `id`
    fn delete_by_id(&mut self, id: TicketId) -> bool;

    /// Number of stored tickets
    fn count(&self) -> usize;

    /// Removes every ticket and resets id assignment
    fn clear(&mut self);

    /// Checks if a ticket exists by ID
    fn exists(&self, id: TicketId) -> bool {
        self.find_by_id(id).is_some()
    }

    /// Finds tickets matching a predicate, highest priority first
    fn find<F>(&self, predicate: F) -> Vec<Ticket>
    where
        F: Fn(&Ticket) -> bool,
    {
        let mut tickets: Vec<Ticket> = self.load_all().into_iter().filter(|t| predicate(t)).collect();
        sort_by_priority(&mut tickets);
        tickets
    }

    /// Counts tickets matching a predicate
    fn count_where<F>(&self, predicate: F) -> usize
    where
        F: Fn(&Ticket) -> bool,
    {
        self.load_all().iter().filter(|t| predicate(t)).count()
    }

    fn find_all(&self) -> Vec<Ticket> {
        self.find(|_| true)
    }

    fn find_by_filters(&self, filter: &TicketFilter) -> Vec<Ticket> {
        let tickets = self.find(|t| filter.matches(t));
        tracing::debug!(?filter, matched = tickets.len(), "Filtered tickets");
        tickets
    }

    fn find_by_priority_sorted(&self) -> Vec<Ticket> {
        self.find_all()
    }

    fn find_overdue_tickets(&self) -> Vec<Ticket> {
        self.find(Ticket::is_overdue)
    }

    fn find_open_tickets(&self) -> Vec<Ticket> {
        self.find(Ticket::is_open)
    }

    fn find_closed_tickets(&self) -> Vec<Ticket> {
        self.find(|t| !t.is_open())
    }

    fn count_by_status(&self, status: Status) -> usize {
        self.count_where(|t| t.status() == status)
    }

    fn count_by_priority(&self, priority: Priority) -> usize {
        self.count_where(|t| t.priority() == priority)
    }
}

/// Orders tickets by priority, highest first
///
/// The sort is stable: tickets of equal priority keep their relative order.
pub fn sort_by_priority(tickets: &mut [Ticket]) {
    tickets.sort_by(|a, b| b.priority().cmp(&a.priority()));
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::TicketBuilder;

    #[test]
    fn test_sort_by_priority_is_stable_and_descending() {
        let mut tickets: Vec<Ticket> = [
            ("a", Priority::Low),
            ("b", Priority::Critical),
            ("c", Priority::Medium),
            ("d", Priority::Critical),
        ]
        .into_iter()
        .map(|(title, priority)| TicketBuilder::new().title(title).priority(priority).build())
        .collect();

        sort_by_priority(&mut tickets);

        let order: Vec<(&str, Priority)> = tickets
            .iter()
            .map(|t| (t.title(), t.priority()))
            .collect();
        assert_eq!(
            order,
            vec![
                ("b", Priority::Critical),
                ("d", Priority::Critical),
                ("c", Priority::Medium),
                ("a", Priority::Low),
            ]
        );
    }
}
