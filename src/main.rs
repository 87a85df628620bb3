//! ticketing - in-memory support ticket tracker
//!
//! Entry point for the `ticketing` binary. Parses arguments, loads the
//! layered configuration, sets up logging and dispatches to the command
//! handlers. Without a subcommand the interactive session starts.

use clap::Parser;
use std::process;
use ticketing_system::cli::handlers::{
    EditParams, HandlerContext, ListParams, NewParams, SessionOptions, handle_advance_command,
    handle_close_command, handle_delete_command, handle_edit_command, handle_export_command,
    handle_interactive_command, handle_list_command, handle_new_command, handle_reopen_command,
    handle_show_command, handle_stats_command, save_snapshot_file,
};
use ticketing_system::cli::{Cli, Commands, OutputFormatter};
use ticketing_system::config::Config;
use ticketing_system::error::{Result, TicketingError};
use tracing_subscriber::EnvFilter;

fn main() {
    let cli = Cli::parse();

    let formatter = OutputFormatter::new(cli.json, cli.no_color);

    if let Err(e) = run(cli, formatter) {
        handle_error(&e, &formatter);
        process::exit(1);
    }
}

/// Load configuration, build the session and run the requested command
///
/// # Errors
///
/// Returns any error that occurs during command execution
fn run(cli: Cli, formatter: OutputFormatter) -> Result<()> {
    let config = Config::load(cli.config.as_deref())?;
    init_logging(cli.verbose, &config.log_level);

    if !config.color {
        colored::control::set_override(false);
    }

    let options = SessionOptions {
        import: cli.import,
        seed_sample_data: config.seed_sample_data && !cli.no_sample_data,
    };
    let mut ctx = HandlerContext::new(&options, formatter)?;

    dispatch_command(cli.command.unwrap_or(Commands::Interactive), &config, &mut ctx)?;

    if let Some(path) = &cli.save {
        save_snapshot_file(path, &ctx)?;
    }
    Ok(())
}

/// Logs go to stderr so JSON output on stdout stays parseable
fn init_logging(verbose: bool, log_level: &str) {
    let filter = if verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(log_level))
    };

    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init();
}

fn dispatch_command(command: Commands, config: &Config, ctx: &mut HandlerContext) -> Result<()> {
    match command {
        Commands::List {
            status,
            priority,
            open,
            closed,
            overdue,
            assignee,
            creator,
        } => handle_list_command(
            &ListParams {
                status,
                priority,
                open,
                closed,
                overdue,
                assignee,
                creator,
            },
            ctx,
        ),
        Commands::Show { ticket } => handle_show_command(&ticket, ctx),
        Commands::New {
            title,
            description,
            priority,
            creator_name,
            creator_email,
            assignee_name,
            assignee_email,
        } => handle_new_command(
            NewParams {
                title,
                description,
                priority,
                creator_name,
                creator_email,
                assignee_name,
                assignee_email,
            },
            ctx,
        ),
        Commands::Edit {
            ticket,
            title,
            description,
            status,
            priority,
            assignee_name,
            assignee_email,
            unassign,
        } => handle_edit_command(
            &ticket,
            EditParams {
                title,
                description,
                status,
                priority,
                assignee_name,
                assignee_email,
                unassign,
            },
            ctx,
        ),
        Commands::Close { ticket } => handle_close_command(&ticket, ctx),
        Commands::Reopen { ticket } => handle_reopen_command(&ticket, ctx),
        Commands::Advance { ticket } => handle_advance_command(&ticket, ctx),
        Commands::Delete { ticket } => handle_delete_command(&ticket, ctx),
        Commands::Stats => handle_stats_command(ctx),
        Commands::Export { format, output } => handle_export_command(
            format.as_deref(),
            output,
            &config.default_export_format,
            ctx,
        ),
        Commands::Interactive => handle_interactive_command(ctx, &config.default_export_format),
    }
}

/// Report an error with its suggestions, as JSON too when `--json` is set
fn handle_error(error: &TicketingError, formatter: &OutputFormatter) {
    formatter.error(&error.user_message());

    let suggestions = error.suggestions();
    if !suggestions.is_empty() && !formatter.is_json() {
        eprintln!("\nSuggestions:");
        for suggestion in &suggestions {
            eprintln!("  • {suggestion}");
        }
    }

    if formatter.is_json() {
        let _ = formatter.print_json(&serde_json::json!({
            "status": "error",
            "error": error.to_string(),
            "suggestions": suggestions,
            "recoverable": error.is_recoverable(),
            "is_config_error": error.is_config_error(),
        }));
    }

    if tracing::enabled!(tracing::Level::DEBUG) {
        eprintln!("\nDebug information:");
        eprintln!("{error:#?}");
    }
}
