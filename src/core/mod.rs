//! Domain model: statuses, priorities, users and tickets
//!
//! Nothing in this module performs I/O. Tickets are plain values mutated only
//! through their own setters; storage and orchestration live in
//! [`crate::storage`] and [`crate::service`].

mod builders;
mod enums;
mod ticket;
mod user;

pub use builders::TicketBuilder;
pub use enums::{
    Priority, Status, compare_priority, is_valid_priority, is_valid_status, next_status_name,
    priority_color_class, priority_weight,
};
pub use ticket::{OVERDUE_AFTER_DAYS, Ticket, TicketId, TicketRecord};
pub use user::{User, UserId, UserRecord};
