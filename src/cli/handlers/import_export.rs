use super::common::HandlerContext;
use crate::core::Ticket;
use crate::error::{Result, TicketingError};
use crate::storage::{InMemoryStorage, Snapshot, TicketRepository};
use std::fmt::Write as _;
use std::path::{Path, PathBuf};
use std::str::FromStr;

/// Supported data formats
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DataFormat {
    Json,
    Yaml,
    Csv,
    Markdown,
}

impl FromStr for DataFormat {
    type Err = TicketingError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_lowercase().as_str() {
            "json" => Ok(Self::Json),
            "yaml" | "yml" => Ok(Self::Yaml),
            "csv" => Ok(Self::Csv),
            "markdown" | "md" => Ok(Self::Markdown),
            other => Err(TicketingError::InvalidInput(format!(
                "Unsupported format: {other}. Use json, yaml, csv or markdown"
            ))),
        }
    }
}

impl DataFormat {
    /// Guess the format from a file extension
    pub fn from_path(path: &Path) -> Option<Self> {
        path.extension()
            .and_then(|ext| ext.to_str())
            .and_then(|ext| ext.parse().ok())
    }

    /// Get file extension for the format
    pub const fn extension(&self) -> &'static str {
        match self {
            Self::Json => "json",
            Self::Yaml => "yaml",
            Self::Csv => "csv",
            Self::Markdown => "md",
        }
    }

    /// Parse a whole-store snapshot
    pub fn parse_snapshot(&self, content: &str) -> Result<Snapshot> {
        match self {
            Self::Json => Snapshot::from_json(content),
            Self::Yaml => Snapshot::from_yaml(content),
            Self::Csv | Self::Markdown => Err(TicketingError::InvalidInput(format!(
                "Cannot import from {} format",
                self.extension()
            ))),
        }
    }

    /// Render the store; JSON and YAML produce importable snapshots
    pub fn export(&self, storage: &InMemoryStorage) -> Result<String> {
        match self {
            Self::Json => storage.export_snapshot().to_json(),
            Self::Yaml => storage.export_snapshot().to_yaml(),
            Self::Csv => export_csv(&storage.find_all()),
            Self::Markdown => Ok(export_markdown(&storage.find_all())),
        }
    }
}

fn csv_error(e: impl std::fmt::Display) -> TicketingError {
    TicketingError::SerializationError(format!("Failed to write CSV: {e}"))
}

/// Export tickets to CSV
pub fn export_csv(tickets: &[Ticket]) -> Result<String> {
    let mut writer = csv::Writer::from_writer(vec![]);

    writer
        .write_record([
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
        ])
        .map_err(csv_error)?;

    for ticket in tickets {
        writer
            .write_record([
                ticket.id().map(|id| id.to_string()).unwrap_or_default(),
                ticket.title().to_string(),
                ticket.description().to_string(),
                ticket.status().to_string(),
                ticket.priority().to_string(),
                ticket.is_open().to_string(),
                ticket.created_at().to_rfc3339(),
                ticket.updated_at().to_rfc3339(),
                ticket.created_by().map(|u| u.name().to_string()).unwrap_or_default(),
                ticket.assigned_to().map(|u| u.name().to_string()).unwrap_or_default(),
            ])
            .map_err(csv_error)?;
    }

    let bytes = writer.into_inner().map_err(csv_error)?;
    String::from_utf8(bytes).map_err(csv_error)
}

/// Export tickets to Markdown
pub fn export_markdown(tickets: &[Ticket]) -> String {
    let mut output = String::new();

    let _ = writeln!(output, "# Tickets Export\n");
    let _ = writeln!(
        output,
        "Generated: {}\n",
        chrono::Utc::now().format("%Y-%m-%d %H:%M:%S UTC")
    );

    for ticket in tickets {
        let id = ticket.id().map(|id| id.to_string()).unwrap_or_default();
        let _ = writeln!(output, "## #{id} - {}\n", ticket.title());
        let _ = writeln!(output, "- **Status**: {}", ticket.status());
        let _ = writeln!(output, "- **Priority**: {}", ticket.priority());
        let _ = writeln!(
            output,
            "- **Open**: {}",
            if ticket.is_open() { "yes" } else { "no" }
        );
        if let Some(user) = ticket.created_by() {
            let _ = writeln!(output, "- **Created by**: {} <{}>", user.name(), user.email());
        }
        if let Some(user) = ticket.assigned_to() {
            let _ = writeln!(output, "- **Assigned to**: {} <{}>", user.name(), user.email());
        }

        if !ticket.description().is_empty() {
            let _ = writeln!(output, "\n{}", ticket.description());
        }
        let _ = writeln!(output, "\n---\n");
    }

    output
}

/// Handler for the `export` command
pub fn handle_export_command(
    format: Option<&str>,
    output_path: Option<PathBuf>,
    default_format: &str,
    ctx: &HandlerContext,
) -> Result<()> {
    let format: DataFormat = match (format, output_path.as_deref()) {
        (Some(name), _) => name.parse()?,
        (None, Some(path)) => match DataFormat::from_path(path) {
            Some(format) => format,
            None => default_format.parse()?,
        },
        (None, None) => default_format.parse()?,
    };

    let content = format.export(ctx.service.repository())?;

    match output_path {
        Some(path) => {
            std::fs::write(&path, &content)?;
            tracing::info!(path = %path.display(), ?format, "Exported tickets");
            if ctx.formatter.is_json() {
                ctx.formatter.print_json(&serde_json::json!({
                    "status": "success",
                    "path": path.display().to_string(),
                    "format": format.extension(),
                    "count": ctx.service.repository().count(),
                }))?;
            } else {
                ctx.formatter.success(&format!(
                    "Exported {} tickets to {}",
                    ctx.service.repository().count(),
                    path.display()
                ));
            }
        },
        None => println!("{content}"),
    }

    Ok(())
}

/// Write the store to a JSON or YAML snapshot once a command has finished
///
/// The format follows the file extension and defaults to JSON. CSV and
/// Markdown cannot be imported again, so they are refused.
pub fn save_snapshot_file(path: &Path, ctx: &HandlerContext) -> Result<()> {
    let format = DataFormat::from_path(path).unwrap_or(DataFormat::Json);
    if matches!(format, DataFormat::Csv | DataFormat::Markdown) {
        return Err(TicketingError::InvalidInput(format!(
            "Cannot save the store as {}; use a .json or .yaml file",
            format.extension()
        )));
    }

    let content = format.export(ctx.service.repository())?;
    std::fs::write(path, content)?;
    tracing::info!(
        path = %path.display(),
        count = ctx.service.repository().count(),
        "Saved ticket snapshot"
    );
    Ok(())
}
