//! Handler for the `new` command

use super::common::{HandlerContext, ticket_json};
use crate::cli::forms::{TicketForm, UserInput};
use crate::core::{Priority, Ticket};
use crate::error::Result;

/// Flags accepted by the `new` command
#[derive(Debug, Clone, Default)]
pub struct NewParams {
    pub title: Option<String>,
    pub description: Option<String>,
    pub priority: String,
    pub creator_name: Option<String>,
    pub creator_email: Option<String>,
    pub assignee_name: Option<String>,
    pub assignee_email: Option<String>,
}

impl NewParams {
    /// Fill a create form; missing flags become blank fields
    pub fn into_form(self) -> Result<TicketForm> {
        Ok(TicketForm {
            title: self.title.unwrap_or_default(),
            description: self.description.unwrap_or_default(),
            priority: self.priority.parse::<Priority>()?,
            status: None,
            created_by: UserInput::new(
                self.creator_name.unwrap_or_default(),
                self.creator_email.unwrap_or_default(),
            ),
            assigned_to: UserInput::new(
                self.assignee_name.unwrap_or_default(),
                self.assignee_email.unwrap_or_default(),
            ),
        })
    }
}

/// Validate a create form and store the resulting ticket
pub fn create_from_form(form: TicketForm, ctx: &mut HandlerContext) -> Result<Ticket> {
    let request = form.into_new_ticket()?;
    Ok(ctx.service.create_ticket(request))
}

/// Handler for the `new` command
///
/// # Errors
///
/// Returns a validation error listing every rejected field.
pub fn handle_new_command(params: NewParams, ctx: &mut HandlerContext) -> Result<()> {
    let form = params.into_form()?;
    let ticket = create_from_form(form, ctx)?;

    if ctx.formatter.is_json() {
        ctx.formatter.print_json(&serde_json::json!({
            "status": "success",
            "ticket": ticket_json(&ticket)?,
        }))?;
    } else {
        let id = ticket.id().map(|id| id.to_string()).unwrap_or_default();
        ctx.formatter
            .success(&format!("Created ticket #{id}: {}", ticket.title()));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::empty_context;
    use crate::core::Status;
    use crate::error::TicketingError;

    fn params() -> NewParams {
        NewParams {
            title: Some("Fix login bug".to_string()),
            description: Some("Users cannot log in".to_string()),
            priority: "high".to_string(),
            creator_name: Some("John Doe".to_string()),
            creator_email: Some("john@example.com".to_string()),
            ..NewParams::default()
        }
    }

    #[test]
    fn test_new_ticket_gets_defaults() {
        let mut ctx = empty_context();
        let ticket = create_from_form(params().into_form().unwrap(), &mut ctx).unwrap();

        assert_eq!(ticket.id().map(|id| id.value()), Some(1));
        assert_eq!(ticket.status(), Status::ToDo);
        assert_eq!(ticket.priority(), Priority::High);
        assert!(ticket.is_open());
        assert!(ticket.assigned_to().is_none());
    }

    #[test]
    fn test_invalid_form_stores_nothing() {
        let mut ctx = empty_context();
        let mut bad = params();
        bad.creator_email = Some("john.example.com".to_string());

        let result = handle_new_command(bad, &mut ctx);
        assert!(matches!(result, Err(TicketingError::Validation(_))));
        assert!(ctx.service.get_all_tickets().is_empty());
    }

    #[test]
    fn test_unknown_priority() {
        let mut bad = params();
        bad.priority = "urgent".to_string();
        assert!(matches!(
            bad.into_form(),
            Err(TicketingError::InvalidPriority(_))
        ));
    }
}
