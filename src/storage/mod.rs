//! Ticket storage
//!
//! [`TicketRepository`] is the storage seam used by the service layer and
//! [`InMemoryStorage`] its implementation. Nothing is written to disk; the
//! only way data leaves the process is an explicit [`Snapshot`] export.

mod filter;
mod memory;
mod repository;
mod snapshot;

pub use filter::TicketFilter;
pub use memory::InMemoryStorage;
pub use repository::{TicketRepository, sort_by_priority};
pub use snapshot::Snapshot;
