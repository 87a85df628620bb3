//! Create/edit form input and its validation
//!
//! Forms are checked here, before anything is handed to the service. The
//! domain layer itself performs no field validation.

use crate::core::{Priority, Status, Ticket, User, UserId};
use crate::error::{FormErrors, Result, TicketingError};
use crate::service::{NewTicket, TicketUpdate};
use chrono::Utc;

/// Name/email pair entered for a creator or assignee
///
/// `user_id` carries the stored user's id through an edit unchanged.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UserInput {
    pub user_id: Option<UserId>,
    pub name: String,
    pub email: String,
}

impl UserInput {
    pub fn new(name: impl Into<String>, email: impl Into<String>) -> Self {
        Self {
            user_id: None,
            name: name.into(),
            email: email.into(),
        }
    }

    fn from_user(user: Option<&User>) -> Self {
        user.map_or_else(Self::default, |u| Self {
            user_id: Some(u.id().clone()),
            name: u.name().to_string(),
            email: u.email().to_string(),
        })
    }

    /// New name and email for the same slot; the stored id survives only while
    /// the name is unchanged
    pub fn reentered(&self, name: impl Into<String>, email: impl Into<String>) -> Self {
        let name = name.into();
        let user_id = if name.trim() == self.name.trim() {
            self.user_id.clone()
        } else {
            None
        };
        Self {
            user_id,
            name,
            email: email.into(),
        }
    }

    fn is_blank(&self) -> bool {
        self.name.trim().is_empty() && self.email.trim().is_empty()
    }

    /// Build a user, generating `user_<millis>_<suffix>` when no id was given
    fn into_user(self, suffix: u8) -> User {
        let id = self.user_id.unwrap_or_else(|| {
            UserId::Text(format!("user_{}_{suffix}", Utc::now().timestamp_millis()))
        });
        User::new(id, self.name.trim(), self.email.trim())
    }
}

/// Data entered in the create or edit ticket form
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TicketForm {
    pub title: String,
    pub description: String,
    pub priority: Priority,
    pub status: Option<Status>,
    pub created_by: UserInput,
    /// Left blank when the ticket is unassigned
    pub assigned_to: UserInput,
}

impl TicketForm {
    /// Prefill the edit form from an existing ticket
    pub fn from_ticket(ticket: &Ticket) -> Self {
        Self {
            title: ticket.title().to_string(),
            description: ticket.description().to_string(),
            priority: ticket.priority(),
            status: Some(ticket.status()),
            created_by: UserInput::from_user(ticket.created_by()),
            assigned_to: UserInput::from_user(ticket.assigned_to()),
        }
    }

    /// Collect every field problem; an empty result means the form is valid
    pub fn check(&self) -> FormErrors {
        self.check_fields(true)
    }

    /// Problems an edit can fix; the creator is left out since edits keep it
    pub fn check_edit(&self) -> FormErrors {
        self.check_fields(false)
    }

    fn check_fields(&self, with_creator: bool) -> FormErrors {
        let mut errors = FormErrors::default();

        if self.title.trim().is_empty() {
            errors.insert("title", "Title is required");
        }
        if self.description.trim().is_empty() {
            errors.insert("description", "Description is required");
        }
        if with_creator {
            if self.created_by.name.trim().is_empty() {
                errors.insert("created_by.name", "Creator name is required");
            }

            let creator_email = self.created_by.email.trim();
            if creator_email.is_empty() {
                errors.insert("created_by.email", "Creator email is required");
            } else if !creator_email.contains('@') {
                errors.insert("created_by.email", "Invalid email format");
            }
        }

        let assignee_email = self.assigned_to.email.trim();
        if !self.assigned_to.name.trim().is_empty() && assignee_email.is_empty() {
            errors.insert(
                "assigned_to.email",
                "Assignee email is required when name is provided",
            );
        }
        if !assignee_email.is_empty() && !assignee_email.contains('@') {
            errors.insert("assigned_to.email", "Invalid email format");
        }

        errors
    }

    pub fn validate(&self) -> Result<()> {
        into_result(self.check())
    }

    /// Validate and turn the create form into a service request
    pub fn into_new_ticket(self) -> Result<NewTicket> {
        self.validate()?;
        let assignee = (!self.assigned_to.is_blank()).then(|| self.assigned_to.into_user(2));

        let mut request = NewTicket::new(self.title.trim(), self.description.trim())
            .priority(self.priority)
            .created_by(self.created_by.into_user(1));
        if let Some(user) = assignee {
            request = request.assigned_to(user);
        }
        Ok(request)
    }

    /// Validate and turn the edit form into a partial update
    ///
    /// The creator is neither checked nor changed by an edit.
    pub fn into_update(self) -> Result<TicketUpdate> {
        into_result(self.check_edit())?;
        let assignee = (!self.assigned_to.is_blank()).then(|| self.assigned_to.into_user(2));

        let mut update = TicketUpdate::new()
            .title(self.title.trim())
            .description(self.description.trim())
            .priority(self.priority)
            .assigned_to(assignee);
        if let Some(status) = self.status {
            update = update.status(status);
        }
        Ok(update)
    }
}

fn into_result(errors: FormErrors) -> Result<()> {
    if errors.is_empty() {
        Ok(())
    } else {
        Err(TicketingError::Validation(errors))
    }
}
