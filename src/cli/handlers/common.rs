use super::import_export::DataFormat;
use crate::cli::OutputFormatter;
use crate::core::{Priority, Ticket, TicketId};
use crate::error::{Result, TicketingError};
use crate::service::TicketService;
use crate::storage::InMemoryStorage;
use colored::{ColoredString, Colorize};
use std::path::{Path, PathBuf};

/// How the store is populated when a session starts
#[derive(Debug, Clone, Default)]
pub struct SessionOptions {
    pub import: Option<PathBuf>,
    pub seed_sample_data: bool,
}

/// Common context for all handler operations
pub struct HandlerContext {
    pub service: TicketService<InMemoryStorage>,
    pub formatter: OutputFormatter,
}

impl HandlerContext {
    /// Create a handler context with a freshly populated store
    ///
    /// An import file takes precedence over the sample data.
    pub fn new(options: &SessionOptions, formatter: OutputFormatter) -> Result<Self> {
        let storage = if let Some(path) = &options.import {
            load_snapshot_file(path)?
        } else if options.seed_sample_data {
            InMemoryStorage::with_sample_data()
        } else {
            InMemoryStorage::new()
        };

        Ok(Self::with_service(TicketService::new(storage), formatter))
    }

    pub const fn with_service(
        service: TicketService<InMemoryStorage>,
        formatter: OutputFormatter,
    ) -> Self {
        Self { service, formatter }
    }
}

/// Read a JSON or YAML snapshot file into a new store
pub fn load_snapshot_file(path: &Path) -> Result<InMemoryStorage> {
    let content = std::fs::read_to_string(path)?;
    let format = DataFormat::from_path(path).unwrap_or(DataFormat::Json);
    let snapshot = format.parse_snapshot(&content)?;

    let mut storage = InMemoryStorage::new();
    storage.import_snapshot(snapshot)?;
    Ok(storage)
}

/// Parse a ticket reference such as `3` or `#3`
pub fn parse_ticket_id(reference: &str) -> Result<TicketId> {
    reference.parse()
}

/// Plain record used for JSON output
pub fn ticket_json(ticket: &Ticket) -> Result<serde_json::Value> {
    serde_json::to_value(ticket.serialize())
        .map_err(|e| TicketingError::SerializationError(format!("Failed to serialize ticket: {e}")))
}

pub fn priority_badge(priority: Priority) -> ColoredString {
    let label = format!("[{priority}]");
    match priority {
        Priority::Low => label.blue(),
        Priority::Medium => label.yellow(),
        Priority::High => label.red(),
        Priority::Critical => label.red().bold(),
    }
}

/// One-line summary as shown in the ticket list
pub fn ticket_row(ticket: &Ticket) -> String {
    let id = ticket.id().map_or_else(|| "-".to_string(), |id| format!("#{id}"));
    let assignee = ticket.assigned_to().map_or("Unassigned", |u| u.name());
    let state = if ticket.is_open() { "open" } else { "closed" };
    let overdue = if ticket.is_overdue() { " (overdue)".red().to_string() } else { String::new() };

    format!(
        "{:>5} {:<12} {:<40} {:<10} {:<6} {:<20} {}{}",
        id,
        priority_badge(ticket.priority()),
        truncate(ticket.title(), 40),
        ticket.status(),
        state,
        assignee,
        ticket.created_at().format("%Y-%m-%d"),
        overdue
    )
}

fn truncate(text: &str, width: usize) -> String {
    if text.chars().count() <= width {
        text.to_string()
    } else {
        let cut: String = text.chars().take(width.saturating_sub(3)).collect();
        format!("{cut}...")
    }
}
