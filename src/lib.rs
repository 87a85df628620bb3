//! ticketing-system - an in-memory support ticket tracker
//!
//! The crate is layered bottom-up:
//! - [`core`]: tickets, users and the status/priority enums
//! - [`storage`]: the repository trait and the in-memory store with
//!   whole-store JSON/YAML snapshots
//! - [`service`]: creation defaults and update rules on top of a repository
//! - [`cli`]: argument parsing, form validation, output and command handlers
//!
//! # Example
//!
//! ```rust
//! use ticketing_system::core::{Priority, User};
//! use ticketing_system::service::{NewTicket, TicketService};
//! use ticketing_system::storage::InMemoryStorage;
//!
//! let mut service = TicketService::new(InMemoryStorage::new());
//! let ticket = service.create_ticket(
//!     NewTicket::new("Fix login bug", "Users cannot log in")
//!         .priority(Priority::High)
//!         .created_by(User::new(1, "John Doe", "john@example.com")),
//! );
//!
//! assert_eq!(ticket.id().map(|id| id.value()), Some(1));
//! assert!(ticket.is_open());
//! ```

#![allow(clippy::missing_errors_doc)]
#![allow(clippy::option_if_let_else)]
#![allow(clippy::needless_pass_by_value)]
#![allow(clippy::match_same_arms)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::redundant_closure_for_method_calls)]

pub mod cli;
pub mod config;
pub mod core;
pub mod error;
pub mod service;
pub mod storage;

#[cfg(test)]
pub mod test_utils;

pub use error::{Result, TicketingError};
