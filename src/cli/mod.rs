//! Terminal front end
//!
//! Argument definitions, output formatting, form validation and the command
//! handlers. Handlers only read plain ticket records and call the service;
//! they never change ticket fields themselves.

pub mod forms;
pub mod handlers;
mod output;

pub use output::OutputFormatter;

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// In-memory support ticket tracker
#[derive(Parser, Debug)]
#[command(name = "ticketing", version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Print results as JSON
    #[arg(long, global = true)]
    pub json: bool,

    /// Disable colored output
    #[arg(long, global = true)]
    pub no_color: bool,

    /// Enable debug logging on stderr
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Configuration file (YAML)
    #[arg(long, global = true, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Start from a previously exported snapshot (JSON or YAML)
    #[arg(long, global = true, value_name = "FILE")]
    pub import: Option<PathBuf>,

    /// Start with an empty store instead of the demo tickets
    #[arg(long, global = true)]
    pub no_sample_data: bool,

    /// Write the store to a snapshot (JSON or YAML) after the command succeeds.
    /// Without it, changes made by one-shot commands end with the process.
    #[arg(long, global = true, value_name = "FILE")]
    pub save: Option<PathBuf>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// List tickets, highest priority first
    List {
        /// Only tickets with this status (todo, in-progress, done)
        #[arg(long)]
        status: Option<String>,

        /// Only tickets with this priority (low, medium, high, critical)
        #[arg(long)]
        priority: Option<String>,

        /// Only open tickets
        #[arg(long, conflicts_with = "closed")]
        open: bool,

        /// Only closed tickets
        #[arg(long)]
        closed: bool,

        /// Only open tickets older than a week
        #[arg(long)]
        overdue: bool,

        /// Only tickets assigned to this user id
        #[arg(long, value_name = "USER_ID")]
        assignee: Option<String>,

        /// Only tickets created by this user id
        #[arg(long, value_name = "USER_ID")]
        creator: Option<String>,
    },

    /// Show the details of one ticket
    Show {
        /// Ticket ID
        ticket: String,
    },

    /// Create a new ticket
    New {
        #[arg(long)]
        title: Option<String>,

        #[arg(long)]
        description: Option<String>,

        #[arg(long, default_value = "medium")]
        priority: String,

        #[arg(long)]
        creator_name: Option<String>,

        #[arg(long)]
        creator_email: Option<String>,

        #[arg(long)]
        assignee_name: Option<String>,

        #[arg(long)]
        assignee_email: Option<String>,
    },

    /// Edit an existing ticket
    Edit {
        /// Ticket ID
        ticket: String,

        #[arg(long)]
        title: Option<String>,

        #[arg(long)]
        description: Option<String>,

        #[arg(long)]
        status: Option<String>,

        #[arg(long)]
        priority: Option<String>,

        #[arg(long)]
        assignee_name: Option<String>,

        #[arg(long)]
        assignee_email: Option<String>,

        /// Remove the assignee
        #[arg(long, conflicts_with_all = ["assignee_name", "assignee_email"])]
        unassign: bool,
    },

    /// Close a ticket (marks it done)
    Close {
        ticket: String,
    },

    /// Reopen a closed ticket
    Reopen {
        ticket: String,
    },

    /// Move a ticket to its next status
    Advance {
        ticket: String,
    },

    /// Delete a ticket
    Delete {
        ticket: String,
    },

    /// Show ticket counts by status and priority
    Stats,

    /// Export all tickets
    Export {
        /// json, yaml, csv or markdown
        #[arg(short, long)]
        format: Option<String>,

        /// Write to a file instead of stdout
        #[arg(short, long, value_name = "FILE")]
        output: Option<PathBuf>,
    },

    /// Browse and edit tickets in an interactive session
    Interactive,
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition_is_consistent() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_list_filters() {
        let cli = Cli::parse_from(["ticketing", "--json", "list", "--status", "todo", "--open"]);
        assert!(cli.json);
        match cli.command {
            Some(Commands::List { status, open, closed, .. }) => {
                assert_eq!(status.as_deref(), Some("todo"));
                assert!(open);
                assert!(!closed);
            },
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn test_no_command_means_interactive() {
        let cli = Cli::parse_from(["ticketing", "--no-sample-data"]);
        assert!(cli.command.is_none());
        assert!(cli.no_sample_data);
    }

    #[test]
    fn test_open_conflicts_with_closed() {
        let result = Cli::try_parse_from(["ticketing", "list", "--open", "--closed"]);
        assert!(result.is_err());
    }
}
