//! Interactive session
//!
//! A menu loop over the in-memory store: browse, view, create, edit, close
//! or reopen, advance, delete, export and import. Create and edit prompts are
//! repeated with the entered values until the form validates or the user
//! gives up.

use super::common::{HandlerContext, load_snapshot_file, ticket_row};
use super::create::create_from_form;
use super::edit::update_from_form;
use super::import_export::DataFormat;
use super::show::detail_lines;
use super::stats::handle_stats_command;
use crate::cli::forms::{TicketForm, UserInput};
use crate::core::{Priority, Status, Ticket};
use crate::error::{FormErrors, Result, TicketingError};
use crate::storage::TicketRepository;
use dialoguer::{Confirm, Input, Select, theme::ColorfulTheme};
use std::io::IsTerminal;
use std::path::PathBuf;

/// Entries of the main menu, in display order
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MenuAction {
    List,
    View,
    Create,
    Edit,
    ToggleOpen,
    Advance,
    Delete,
    Stats,
    Export,
    Import,
    Quit,
}

impl MenuAction {
    pub const ALL: [Self; 11] = [
        Self::List,
        Self::View,
        Self::Create,
        Self::Edit,
        Self::ToggleOpen,
        Self::Advance,
        Self::Delete,
        Self::Stats,
        Self::Export,
        Self::Import,
        Self::Quit,
    ];

    pub const fn label(self) -> &'static str {
        match self {
            Self::List => "List tickets",
            Self::View => "View a ticket",
            Self::Create => "Create a ticket",
            Self::Edit => "Edit a ticket",
            Self::ToggleOpen => "Close / reopen a ticket",
            Self::Advance => "Advance a ticket's status",
            Self::Delete => "Delete a ticket",
            Self::Stats => "Show statistics",
            Self::Export => "Export to file",
            Self::Import => "Import from file",
            Self::Quit => "Quit",
        }
    }

    /// Whether the action needs at least one stored ticket
    pub const fn needs_ticket(self) -> bool {
        matches!(
            self,
            Self::View | Self::Edit | Self::ToggleOpen | Self::Advance | Self::Delete
        )
    }
}

/// Handler for the `interactive` command (also the default without a command)
pub fn handle_interactive_command(ctx: &mut HandlerContext, default_format: &str) -> Result<()> {
    if !std::io::stdin().is_terminal() || !std::io::stderr().is_terminal() {
        return Err(TicketingError::InvalidInput(
            "Interactive mode needs a terminal".to_string(),
        ));
    }

    let mut session = InteractiveSession {
        ctx,
        theme: ColorfulTheme::default(),
        default_format: default_format.to_string(),
    };
    session.run()
}

struct InteractiveSession<'a> {
    ctx: &'a mut HandlerContext,
    theme: ColorfulTheme,
    default_format: String,
}

impl InteractiveSession<'_> {
    fn run(&mut self) -> Result<()> {
        println!("Ticketing - {} tickets loaded\n", self.ctx.service.get_all_tickets().len());

        let labels: Vec<&str> = MenuAction::ALL.iter().map(|a| a.label()).collect();
        loop {
            let index = Select::with_theme(&self.theme)
                .with_prompt("What would you like to do?")
                .items(&labels)
                .default(0)
                .interact()?;
            let action = MenuAction::ALL[index];

            if action == MenuAction::Quit {
                return Ok(());
            }

            // A failed prompt ends the session; anything else is reported
            match self.dispatch(action) {
                Err(e @ TicketingError::Dialog(_)) => return Err(e),
                Err(e) => self.ctx.formatter.error(&e.user_message()),
                Ok(()) => {},
            }
            println!();
        }
    }

    fn dispatch(&mut self, action: MenuAction) -> Result<()> {
        if action.needs_ticket() && self.ctx.service.get_all_tickets().is_empty() {
            self.ctx.formatter.info("No tickets found. Create your first ticket!");
            return Ok(());
        }

        match action {
            MenuAction::List => self.list(),
            MenuAction::View => self.view(),
            MenuAction::Create => self.create(),
            MenuAction::Edit => self.edit(),
            MenuAction::ToggleOpen => self.toggle_open(),
            MenuAction::Advance => self.advance(),
            MenuAction::Delete => self.delete(),
            MenuAction::Stats => handle_stats_command(self.ctx),
            MenuAction::Export => self.export(),
            MenuAction::Import => self.import(),
            MenuAction::Quit => Ok(()),
        }
    }

    fn list(&self) -> Result<()> {
        let tickets = self.ctx.service.get_all_tickets();
        if tickets.is_empty() {
            self.ctx.formatter.info("No tickets found. Create your first ticket!");
        }
        for ticket in &tickets {
            self.ctx.formatter.info(&ticket_row(ticket));
        }
        Ok(())
    }

    fn pick_ticket(&self, prompt: &str) -> Result<Ticket> {
        let tickets = self.ctx.service.get_all_tickets();
        let rows: Vec<String> = tickets.iter().map(ticket_row).collect();
        let index = Select::with_theme(&self.theme)
            .with_prompt(prompt)
            .items(&rows)
            .default(0)
            .interact()?;
        Ok(tickets[index].clone())
    }

    fn view(&self) -> Result<()> {
        let ticket = self.pick_ticket("Which ticket?")?;
        println!();
        for line in detail_lines(&ticket) {
            self.ctx.formatter.info(&line);
        }
        Ok(())
    }

    fn create(&mut self) -> Result<()> {
        let mut form = TicketForm::default();
        loop {
            self.prompt_form(&mut form, false)?;
            let errors = form.check();
            if errors.is_empty() {
                break;
            }
            if !self.retry_after(&errors)? {
                return Ok(());
            }
        }

        let ticket = create_from_form(form, self.ctx)?;
        let id = ticket.id().map(|id| id.to_string()).unwrap_or_default();
        self.ctx
            .formatter
            .success(&format!("Created ticket #{id}: {}", ticket.title()));
        Ok(())
    }

    fn edit(&mut self) -> Result<()> {
        let ticket = self.pick_ticket("Edit which ticket?")?;
        let Some(id) = ticket.id() else {
            return Ok(());
        };

        let mut form = TicketForm::from_ticket(&ticket);
        loop {
            self.prompt_form(&mut form, true)?;
            let errors = form.check_edit();
            if errors.is_empty() {
                break;
            }
            if !self.retry_after(&errors)? {
                return Ok(());
            }
        }

        let updated = update_from_form(id, form, self.ctx)?;
        self.ctx
            .formatter
            .success(&format!("Updated ticket #{id}: {}", updated.title()));
        Ok(())
    }

    fn toggle_open(&mut self) -> Result<()> {
        let ticket = self.pick_ticket("Close or reopen which ticket?")?;
        let Some(id) = ticket.id() else {
            return Ok(());
        };

        let updated = if ticket.is_open() {
            self.ctx.service.close_ticket(id)?
        } else {
            self.ctx.service.reopen_ticket(id)?
        };
        let state = if updated.is_open() { "Reopened" } else { "Closed" };
        self.ctx.formatter.success(&format!("{state} ticket #{id}"));
        Ok(())
    }

    fn advance(&mut self) -> Result<()> {
        let ticket = self.pick_ticket("Advance which ticket?")?;
        let Some(id) = ticket.id() else {
            return Ok(());
        };
        let updated = self.ctx.service.advance_status(id)?;
        self.ctx
            .formatter
            .success(&format!("Ticket #{id} is now {}", updated.status()));
        Ok(())
    }

    fn delete(&mut self) -> Result<()> {
        let ticket = self.pick_ticket("Delete which ticket?")?;
        let Some(id) = ticket.id() else {
            return Ok(());
        };

        let confirmed = Confirm::with_theme(&self.theme)
            .with_prompt(format!("Delete #{id} \"{}\"?", ticket.title()))
            .default(false)
            .interact()?;
        if confirmed {
            self.ctx.service.delete_ticket(id)?;
            self.ctx.formatter.success(&format!("Deleted ticket #{id}"));
        }
        Ok(())
    }

    fn export(&self) -> Result<()> {
        let default_name = format!(
            "tickets.{}",
            self.default_format.parse::<DataFormat>()?.extension()
        );
        let path: String = Input::with_theme(&self.theme)
            .with_prompt("Export to file")
            .default(default_name)
            .interact_text()?;
        let path = PathBuf::from(path.trim());

        let format = DataFormat::from_path(&path).unwrap_or(DataFormat::Json);
        let content = format.export(self.ctx.service.repository())?;
        std::fs::write(&path, content)?;
        self.ctx
            .formatter
            .success(&format!("Exported tickets to {}", path.display()));
        Ok(())
    }

    /// Replace the store with a snapshot file; a bad file leaves it untouched
    fn import(&mut self) -> Result<()> {
        let path: String = Input::with_theme(&self.theme)
            .with_prompt("Import from file (JSON or YAML)")
            .interact_text()?;
        let storage = load_snapshot_file(&PathBuf::from(path.trim()))?;

        let count = storage.count();
        *self.ctx.service.repository_mut() = storage;
        self.ctx.formatter.success(&format!("Imported {count} tickets"));
        Ok(())
    }

    fn prompt_form(&self, form: &mut TicketForm, editing: bool) -> Result<()> {
        form.title = self.text("Title", &form.title)?;
        form.description = self.text("Description", &form.description)?;
        form.priority = self.choose("Priority", Priority::values(), form.priority)?;
        if editing {
            let current = form.status.unwrap_or_default();
            form.status = Some(self.choose("Status", Status::values(), current)?);
        }

        if editing {
            self.ctx.formatter.info(&creator_notice(&form.created_by));
        } else {
            form.created_by = self.user("Creator", &form.created_by)?;
        }
        form.assigned_to = self.user("Assignee (leave blank for none)", &form.assigned_to)?;
        Ok(())
    }

    fn user(&self, role: &str, current: &UserInput) -> Result<UserInput> {
        let name = self.text(&format!("{role} name"), &current.name)?;
        let email = self.text(&format!("{role} email"), &current.email)?;
        Ok(current.reentered(name, email))
    }

    fn text(&self, prompt: &str, initial: &str) -> Result<String> {
        let value = Input::<String>::with_theme(&self.theme)
            .with_prompt(prompt)
            .with_initial_text(initial)
            .allow_empty(true)
            .interact_text()?;
        Ok(value)
    }

    fn choose<T>(&self, prompt: &str, options: &[T], current: T) -> Result<T>
    where
        T: Copy + PartialEq + std::fmt::Display,
    {
        let labels: Vec<String> = options.iter().map(ToString::to_string).collect();
        let default = options.iter().position(|&o| o == current).unwrap_or(0);
        let index = Select::with_theme(&self.theme)
            .with_prompt(prompt)
            .items(&labels)
            .default(default)
            .interact()?;
        Ok(options[index])
    }

    fn retry_after(&self, errors: &FormErrors) -> Result<bool> {
        for (field, message) in errors.iter() {
            self.ctx.formatter.warning(&format!("  {field}: {message}"));
        }
        let retry = Confirm::with_theme(&self.theme)
            .with_prompt("Fix the form and try again?")
            .default(true)
            .interact()?;
        Ok(retry)
    }
}

/// Read-only creator line shown by the edit form
fn creator_notice(creator: &UserInput) -> String {
    if creator.name.trim().is_empty() {
        "Creator: none (cannot be changed by an edit)".to_string()
    } else {
        format!(
            "Creator: {} <{}> (cannot be changed by an edit)",
            creator.name, creator.email
        )
    }
}
