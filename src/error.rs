//! Error types for the ticketing system
//!
//! Every fallible operation in the crate returns [`Result`], whose error side is
//! [`TicketingError`]. Domain failures (missing tickets, malformed snapshots)
//! and ambient failures (I/O, configuration, terminal prompts) share one enum so
//! the binary can report them uniformly.

use std::collections::BTreeMap;
use std::fmt;
use thiserror::Error;

/// Result type alias used throughout the crate
pub type Result<T> = std::result::Result<T, TicketingError>;

/// Errors produced by the ticketing system
#[derive(Error, Debug)]
pub enum TicketingError {
    /// No ticket is stored under the requested id
    #[error("Ticket with ID {id} not found")]
    TicketNotFound { id: String },

    /// A snapshot could not be parsed or had the wrong shape
    #[error("Malformed import: {0}")]
    MalformedImport(String),

    /// A snapshot contained the same ticket id more than once
    #[error("Duplicate ticket ID in import: {id}")]
    DuplicateTicket { id: String },

    #[error("Invalid status: {0}")]
    InvalidStatus(String),

    #[error("Invalid priority: {0}")]
    InvalidPriority(String),

    /// Create/edit form input rejected before reaching the service
    #[error("Validation failed: {0}")]
    Validation(FormErrors),

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Serialization error: {0}")]
    SerializationError(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Configuration error: {0}")]
    Config(#[from] config::ConfigError),

    #[error("Prompt error: {0}")]
    Dialog(#[from] dialoguer::Error),

    #[error("{0}")]
    Custom(String),
}

/// Field-keyed validation messages, e.g. `created_by.email -> Invalid email format`
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FormErrors(BTreeMap<&'static str, String>);

impl FormErrors {
    pub fn insert(&mut self, field: &'static str, message: impl Into<String>) {
        self.0.insert(field, message.into());
    }

    pub fn get(&self, field: &str) -> Option<&str> {
        self.0.get(field).map(String::as_str)
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&'static str, &str)> + '_ {
        self.0.iter().map(|(field, message)| (*field, message.as_str()))
    }
}

impl fmt::Display for FormErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let parts: Vec<String> = self
            .iter()
            .map(|(field, message)| format!("{field}: {message}"))
            .collect();
        f.write_str(&parts.join("; "))
    }
}

impl TicketingError {
    /// Create a custom error from any message
    pub fn custom(message: impl Into<String>) -> Self {
        Self::Custom(message.into())
    }

    /// Message shown to the user by the binary
    pub fn user_message(&self) -> String {
        match self {
            Self::Validation(errors) => {
                let mut message = String::from("Please fix the following fields:");
                for (field, problem) in errors.iter() {
                    message.push_str(&format!("\n  {field}: {problem}"));
                }
                message
            },
            _ => self.to_string(),
        }
    }

    /// Hints that may help the user recover from the error
    pub fn suggestions(&self) -> Vec<String> {
        match self {
            Self::TicketNotFound { .. } => vec![
                "Run 'ticketing list' to see the available ticket IDs".to_string(),
            ],
            Self::InvalidStatus(_) => {
                vec!["Valid statuses are: ToDo, InProgress, Done".to_string()]
            },
            Self::InvalidPriority(_) => {
                vec!["Valid priorities are: Low, Medium, High, Critical".to_string()]
            },
            Self::MalformedImport(_) | Self::DuplicateTicket { .. } => vec![
                "Check that the file was produced by 'ticketing export --format json'"
                    .to_string(),
            ],
            Self::Config(_) => vec![
                "Check the configuration file passed with --config".to_string(),
                "Environment overrides use the TICKETING_ prefix".to_string(),
            ],
            _ => Vec::new(),
        }
    }

    /// Whether retrying with different input can succeed
    pub const fn is_recoverable(&self) -> bool {
        matches!(
            self,
            Self::TicketNotFound { .. }
                | Self::InvalidStatus(_)
                | Self::InvalidPriority(_)
                | Self::Validation(_)
                | Self::InvalidInput(_)
        )
    }

    pub const fn is_config_error(&self) -> bool {
        matches!(self, Self::Config(_))
    }
}
