use super::repository::TicketRepository;
use super::snapshot::Snapshot;
use crate::core::{Priority, Status, Ticket, TicketBuilder, TicketId, User};
use crate::error::{Result, TicketingError};
use std::collections::BTreeMap;

const FIRST_ID: u64 = 1;

/// Process-memory ticket store
///
/// Tickets are keyed by id. Ids are handed out from a counter that starts at
/// 1; a ticket saved with an explicit id never advances the counter, and the
/// counter skips ids that are already taken.
#[derive(Debug, Clone)]
pub struct InMemoryStorage {
    tickets: BTreeMap<TicketId, Ticket>,
    next_id: u64,
}

impl Default for InMemoryStorage {
    fn default() -> Self {
        Self::new()
    }
}

impl InMemoryStorage {
    /// Create an empty store
    pub const fn new() -> Self {
        Self {
            tickets: BTreeMap::new(),
            next_id: FIRST_ID,
        }
    }

    /// Create a store seeded with the demo tickets and users
    pub fn with_sample_data() -> Self {
        let mut storage = Self::new();
        storage.seed_sample_data();
        storage
    }

    /// The id the next ticket without one will receive
    pub const fn next_id(&self) -> u64 {
        self.next_id
    }

    /// Take the first free id at or after the counter, or `None` once ids
    /// would pass [`TicketId::MAX`]
    fn allocate_id(&mut self) -> Option<TicketId> {
        let mut candidate = self.next_id;
        while self.tickets.contains_key(&TicketId::new(candidate)) {
            candidate = candidate.checked_add(1)?;
        }
        if candidate > TicketId::MAX {
            return None;
        }
        self.next_id = candidate.checked_add(1)?;
        Some(TicketId::new(candidate))
    }

    fn seed_sample_data(&mut self) {
        let john = User::new(1, "John Doe", "john@example.com");
        let jane = User::new(2, "Jane Smith", "jane@example.com");
        let bob = User::new(3, "Bob Johnson", "bob@example.com");

        let samples = [
            (
                "Fix login bug",
                "Users cannot log in with correct credentials",
                Status::ToDo,
                Priority::High,
                true,
                &john,
                &jane,
            ),
            (
                "Update documentation",
                "API documentation needs to be updated for v2.0",
                Status::InProgress,
                Priority::Medium,
                true,
                &jane,
                &john,
            ),
            (
                "Performance optimization",
                "Database queries are running slow",
                Status::Done,
                Priority::Critical,
                false,
                &bob,
                &john,
            ),
            (
                "Add user roles",
                "Implement role-based access control",
                Status::ToDo,
                Priority::Low,
                true,
                &john,
                &bob,
            ),
            (
                "Fix email notifications",
                "Users not receiving email notifications",
                Status::InProgress,
                Priority::High,
                true,
                &jane,
                &jane,
            ),
        ];

        for (index, (title, description, status, priority, is_open, creator, assignee)) in
            samples.into_iter().enumerate()
        {
            let id = TicketId::new(FIRST_ID + index as u64);
            let ticket = TicketBuilder::new()
                .id(id)
                .title(title)
                .description(description)
                .status(status)
                .priority(priority)
                .open(is_open)
                .created_by(creator.clone())
                .assigned_to(assignee.clone())
                .build();
            self.tickets.insert(id, ticket);
        }
        self.next_id = FIRST_ID + self.tickets.len() as u64;
        tracing::debug!(count = self.tickets.len(), "Seeded sample tickets");
    }

    /// Capture the whole store as a serializable snapshot
    pub fn export_snapshot(&self) -> Snapshot {
        Snapshot {
            tickets: self.tickets.values().map(Ticket::serialize).collect(),
            next_id: Some(self.next_id),
        }
    }

    /// Replace the store's contents with a snapshot
    ///
    /// The replacement is staged and only swapped in once every record has an
    /// id, so a rejected snapshot leaves the current tickets in place. Records
    /// without an id get one from the counter, which resumes after the larger
    /// of the recorded `nextId` and the highest imported id.
    pub fn import_snapshot(&mut self, snapshot: Snapshot) -> Result<()> {
        snapshot.validate()?;

        let mut staged = Self::new();
        let mut pending = Vec::new();
        for record in snapshot.tickets {
            let ticket = Ticket::deserialize(record);
            match ticket.id() {
                Some(id) => {
                    staged.tickets.insert(id, ticket);
                },
                None => pending.push(ticket),
            }
        }

        let highest = staged.tickets.keys().next_back().map_or(0, |id| id.value());
        let after_highest = highest.checked_add(1).ok_or_else(|| {
            TicketingError::MalformedImport(format!("ticket id {highest} leaves no room for more"))
        })?;
        staged.next_id = snapshot
            .next_id
            .unwrap_or(FIRST_ID)
            .max(FIRST_ID)
            .max(after_highest);

        for mut ticket in pending {
            let id = staged.allocate_id().ok_or_else(|| {
                TicketingError::MalformedImport(
                    "No ticket ids left for records without an id".to_string(),
                )
            })?;
            ticket.assign_id(id);
            staged.tickets.insert(id, ticket);
        }

        *self = staged;
        tracing::info!(
            count = self.tickets.len(),
            next_id = self.next_id,
            "Imported ticket snapshot"
        );
        Ok(())
    }

    pub fn export_json(&self) -> Result<String> {
        self.export_snapshot().to_json()
    }

    /// Parse and import a JSON snapshot; on failure the store is unchanged
    pub fn import_json(&mut self, content: &str) -> Result<()> {
        match Snapshot::from_json(content) {
            Ok(snapshot) => self.import_snapshot(snapshot),
            Err(e) => {
                tracing::warn!(error = %e, "Rejected ticket snapshot");
                Err(e)
            },
        }
    }
}

impl TicketRepository for InMemoryStorage {
    fn save(&mut self, mut ticket: Ticket) -> Ticket {
        let id = match ticket.id() {
            Some(id) => id,
            None => match self.allocate_id() {
                Some(id) => {
                    ticket.assign_id(id);
                    tracing::debug!(%id, "Assigned ticket id");
                    id
                },
                None => {
                    tracing::error!(
                        next_id = self.next_id,
                        "No ticket ids left; ticket not stored"
                    );
                    return ticket;
                },
            },
        };
        self.tickets.insert(id, ticket.clone());
        ticket
    }

    fn find_by_id(&self, id: TicketId) -> Option<Ticket> {
        self.tickets.get(&id).cloned()
    }

    fn load_all(&self) -> Vec<Ticket> {
        self.tickets.values().cloned().collect()
    }

    fn delete_by_id(&mut self, id: TicketId) -> bool {
        self.tickets.remove(&id).is_some()
    }

    fn count(&self) -> usize {
        self.tickets.len()
    }

    fn clear(&mut self) {
        self.tickets.clear();
        self.next_id = FIRST_ID;
    }
}
