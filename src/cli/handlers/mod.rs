//! Command handlers
//!
//! Each handler takes its parsed arguments plus a [`HandlerContext`] holding
//! the ticket service and the output formatter.

mod common;
mod create;
mod edit;
mod import_export;
mod interactive;
mod lifecycle;
mod list;
mod show;
mod stats;

pub use common::{
    HandlerContext, SessionOptions, load_snapshot_file, parse_ticket_id, ticket_json, ticket_row,
};
pub use create::{NewParams, create_from_form, handle_new_command};
pub use edit::{EditParams, handle_edit_command, update_from_form};
pub use import_export::{
    DataFormat, export_csv, export_markdown, handle_export_command, save_snapshot_file,
};
pub use interactive::{MenuAction, handle_interactive_command};
pub use lifecycle::{
    handle_advance_command, handle_close_command, handle_delete_command, handle_reopen_command,
};
pub use list::{ListParams, handle_list_command, select_tickets};
pub use show::{detail_lines, handle_show_command};
pub use stats::{TicketStats, handle_stats_command};
