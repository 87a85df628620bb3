use super::enums::{Priority, Status};
use super::user::{User, UserRecord};
use crate::error::TicketingError;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Open tickets older than this many whole days are overdue
pub const OVERDUE_AFTER_DAYS: i64 = 7;

/// Numeric ticket identifier, assigned by the repository
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TicketId(u64);

impl TicketId {
    /// Largest id a store accepts, so ids stay exact for signed 64-bit readers
    pub const MAX: u64 = i64::MAX as u64;

    pub const fn new(value: u64) -> Self {
        Self(value)
    }

    pub const fn value(self) -> u64 {
        self.0
    }
}

impl From<u64> for TicketId {
    fn from(value: u64) -> Self {
        Self(value)
    }
}

impl fmt::Display for TicketId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for TicketId {
    type Err = TicketingError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim().trim_start_matches('#');
        trimmed
            .parse::<u64>()
            .map(Self)
            .map_err(|_| TicketingError::InvalidInput(format!("Invalid ticket ID: {s}")))
    }
}

/// A unit of tracked work
///
/// Fields are only changed through the setter methods, each of which refreshes
/// `updated_at`. `created_at` is fixed at construction (or restored by
/// [`Ticket::deserialize`]) and the id can be assigned at most once.
#[derive(Debug, Clone, PartialEq)]
pub struct Ticket {
    pub(super) id: Option<TicketId>,
    pub(super) title: String,
    pub(super) description: String,
    pub(super) status: Status,
    pub(super) priority: Priority,
    pub(super) is_open: bool,
    pub(super) created_at: DateTime<Utc>,
    pub(super) updated_at: DateTime<Utc>,
    pub(super) created_by: Option<User>,
    pub(super) assigned_to: Option<User>,
}

/// Plain wire shape of a [`Ticket`], as exchanged with the view and snapshots
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TicketRecord {
    #[serde(default)]
    pub ticket_id: Option<TicketId>,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub status: Status,
    #[serde(default)]
    pub priority: Priority,
    #[serde(default)]
    pub is_open: bool,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub updated_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub created_by: Option<UserRecord>,
    #[serde(default)]
    pub assigned_to: Option<UserRecord>,
}

impl Ticket {
    /// Create a ticket with both timestamps set to now and no users attached
    pub fn new(
        id: Option<TicketId>,
        title: impl Into<String>,
        description: impl Into<String>,
        status: Status,
        priority: Priority,
        is_open: bool,
    ) -> Self {
        let now = Utc::now();
        Self {
            id,
            title: title.into(),
            description: description.into(),
            status,
            priority,
            is_open,
            created_at: now,
            updated_at: now,
            created_by: None,
            assigned_to: None,
        }
    }

    pub const fn id(&self) -> Option<TicketId> {
        self.id
    }

    /// Set the id if none has been assigned yet; returns whether it was set
    pub(crate) fn assign_id(&mut self, id: TicketId) -> bool {
        if self.id.is_some() {
            return false;
        }
        self.id = Some(id);
        true
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn set_title(&mut self, title: impl Into<String>) {
        self.title = title.into();
        self.touch();
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    pub fn set_description(&mut self, description: impl Into<String>) {
        self.description = description.into();
        self.touch();
    }

    pub const fn status(&self) -> Status {
        self.status
    }

    pub fn set_status(&mut self, status: Status) {
        self.status = status;
        self.touch();
    }

    pub const fn priority(&self) -> Priority {
        self.priority
    }

    pub fn set_priority(&mut self, priority: Priority) {
        self.priority = priority;
        self.touch();
    }

    pub const fn is_open(&self) -> bool {
        self.is_open
    }

    pub fn set_open(&mut self, is_open: bool) {
        self.is_open = is_open;
        self.touch();
    }

    pub const fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    pub const fn updated_at(&self) -> DateTime<Utc> {
        self.updated_at
    }

    pub const fn created_by(&self) -> Option<&User> {
        self.created_by.as_ref()
    }

    pub fn set_created_by(&mut self, user: Option<User>) {
        self.created_by = user;
        self.touch();
    }

    pub const fn assigned_to(&self) -> Option<&User> {
        self.assigned_to.as_ref()
    }

    pub fn set_assigned_to(&mut self, user: Option<User>) {
        self.assigned_to = user;
        self.touch();
    }

    /// Refresh `updated_at`
    ///
    /// Never moves the timestamp backwards, so it stays at or after both its
    /// previous value and `created_at` even if the wall clock steps back.
    pub fn touch(&mut self) {
        self.updated_at = Utc::now().max(self.updated_at).max(self.created_at);
    }

    pub fn update_status(&mut self, status: Status) -> &mut Self {
        self.set_status(status);
        self
    }

    /// Mark the ticket closed and done
    pub fn close(&mut self) -> &mut Self {
        self.set_open(false);
        self.set_status(Status::Done);
        self
    }

    /// Reopen the ticket; a done ticket goes back to `ToDo`
    pub fn open(&mut self) -> &mut Self {
        self.set_open(true);
        if self.status == Status::Done {
            self.set_status(Status::ToDo);
        }
        self
    }

    /// Whole days elapsed between creation and `now`
    pub fn age_in_days_at(&self, now: DateTime<Utc>) -> i64 {
        (now - self.created_at).num_days()
    }

    pub fn age_in_days(&self) -> i64 {
        self.age_in_days_at(Utc::now())
    }

    /// Open and older than [`OVERDUE_AFTER_DAYS`] at `now`
    pub fn is_overdue_at(&self, now: DateTime<Utc>) -> bool {
        self.is_open && self.age_in_days_at(now) > OVERDUE_AFTER_DAYS
    }

    pub fn is_overdue(&self) -> bool {
        self.is_overdue_at(Utc::now())
    }

    pub fn serialize(&self) -> TicketRecord {
        TicketRecord {
            ticket_id: self.id,
            title: self.title.clone(),
            description: self.description.clone(),
            status: self.status,
            priority: self.priority,
            is_open: self.is_open,
            created_at: Some(self.created_at),
            updated_at: Some(self.updated_at),
            created_by: self.created_by.as_ref().map(User::serialize),
            assigned_to: self.assigned_to.as_ref().map(User::serialize),
        }
    }

    /// Rebuild a ticket from its wire shape
    ///
    /// Timestamps missing from the record stay at the construction time.
    /// Restoring users does not count as a mutation, so `updated_at` is kept
    /// exactly as recorded.
    pub fn deserialize(record: TicketRecord) -> Self {
        let mut ticket = Self::new(
            record.ticket_id,
            record.title,
            record.description,
            record.status,
            record.priority,
            record.is_open,
        );
        if let Some(created_at) = record.created_at {
            ticket.created_at = created_at;
        }
        if let Some(updated_at) = record.updated_at {
            ticket.updated_at = updated_at;
        }
        ticket.created_by = record.created_by.map(User::deserialize);
        ticket.assigned_to = record.assigned_to.map(User::deserialize);
        ticket
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;

    fn sample() -> Ticket {
        Ticket::new(
            None,
            "Fix login bug",
            "Users cannot log in",
            Status::ToDo,
            Priority::High,
            true,
        )
    }

    #[test]
    fn test_new_ticket_timestamps_match() {
        let ticket = sample();
        assert_eq!(ticket.created_at(), ticket.updated_at());
        assert!(ticket.created_by().is_none());
        assert!(ticket.assigned_to().is_none());
        assert!(ticket.id().is_none());
    }

    #[test]
    fn test_setters_refresh_updated_at() {
        let mut ticket = sample();
        let created = ticket.created_at();
        let mut previous = ticket.updated_at();

        ticket.set_title("Fix login bug on Safari");
        assert!(ticket.updated_at() >= previous);
        previous = ticket.updated_at();

        ticket.set_priority(Priority::Critical);
        assert!(ticket.updated_at() >= previous);
        previous = ticket.updated_at();

        ticket.set_assigned_to(Some(User::new(2, "Jane Smith", "jane@example.com")));
        assert!(ticket.updated_at() >= previous);
        assert!(ticket.updated_at() >= ticket.created_at());
        assert_eq!(ticket.created_at(), created);
    }

    #[test]
    fn test_touch_never_goes_backwards() {
        let mut ticket = sample();
        let future = Utc::now() + Duration::hours(1);
        ticket.updated_at = future;
        ticket.set_description("changed");
        assert_eq!(ticket.updated_at(), future);
    }

    #[test]
    fn test_assign_id_only_once() {
        let mut ticket = sample();
        assert!(ticket.assign_id(TicketId::new(3)));
        assert!(!ticket.assign_id(TicketId::new(9)));
        assert_eq!(ticket.id(), Some(TicketId::new(3)));
    }

    #[test]
    fn test_close_and_open() {
        let mut ticket = sample();
        ticket.close();
        assert!(!ticket.is_open());
        assert_eq!(ticket.status(), Status::Done);

        ticket.open();
        assert!(ticket.is_open());
        assert_eq!(ticket.status(), Status::ToDo);

        ticket.update_status(Status::InProgress).open();
        assert_eq!(ticket.status(), Status::InProgress);
    }

    #[test]
    fn test_overdue_after_seven_days() {
        let mut ticket = sample();
        ticket.created_at = Utc::now() - Duration::days(8);
        assert_eq!(ticket.age_in_days(), 8);
        assert!(ticket.is_overdue());

        let at_seven = ticket.created_at() + Duration::days(7) + Duration::hours(23);
        assert!(!ticket.is_overdue_at(at_seven));

        ticket.close();
        assert!(!ticket.is_overdue());
    }

    #[test]
    fn test_round_trip_preserves_fields() {
        let mut ticket = sample();
        ticket.assign_id(TicketId::new(5));
        ticket.set_created_by(Some(User::new(1, "John Doe", "john@example.com")));
        ticket.set_assigned_to(Some(User::new("user_1_2", "Bob", "bob@example.com")));

        let restored = Ticket::deserialize(ticket.serialize());
        assert_eq!(restored, ticket);
    }

    #[test]
    fn test_record_wire_keys() {
        let mut ticket = sample();
        ticket.assign_id(TicketId::new(1));
        let value = serde_json::to_value(ticket.serialize()).unwrap();

        for key in [
            "ticket_id",
            "title",
            "description",
            "status",
            "priority",
            "is_open",
            "created_at",
            "updated_at",
            "created_by",
            "assigned_to",
        ] {
            assert!(value.get(key).is_some(), "missing key {key}");
        }
        assert_eq!(value["ticket_id"], 1);
        assert_eq!(value["status"], "ToDo");
        assert!(value["created_by"].is_null());
    }

    #[test]
    fn test_deserialize_defaults_missing_fields() {
        let record: TicketRecord =
            serde_json::from_str(r#"{"ticket_id": 4, "title": "Add user roles"}"#).unwrap();
        let before = Utc::now();
        let ticket = Ticket::deserialize(record);

        assert_eq!(ticket.id(), Some(TicketId::new(4)));
        assert_eq!(ticket.description(), "");
        assert_eq!(ticket.status(), Status::ToDo);
        assert_eq!(ticket.priority(), Priority::Medium);
        assert!(!ticket.is_open());
        assert!(ticket.created_at() >= before);
        assert!(ticket.created_by().is_none());
    }

    #[test]
    fn test_deserialize_restores_iso_timestamps() {
        let record: TicketRecord = serde_json::from_str(
            r#"{"ticket_id": 2, "title": "Docs", "created_at": "2024-01-15T10:00:00.000Z",
                "updated_at": "2024-01-16T12:30:00.000Z", "is_open": true}"#,
        )
        .unwrap();
        let ticket = Ticket::deserialize(record);
        assert_eq!(ticket.created_at().to_rfc3339(), "2024-01-15T10:00:00+00:00");
        assert_eq!(ticket.updated_at().to_rfc3339(), "2024-01-16T12:30:00+00:00");
    }

    #[test]
    fn test_ticket_id_parse() {
        assert_eq!("#12".parse::<TicketId>().unwrap(), TicketId::new(12));
        assert!("abc".parse::<TicketId>().is_err());
    }
}
