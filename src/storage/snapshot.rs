//! Whole-store snapshots used for export and import
//!
//! The JSON shape is `{"tickets": [...], "nextId": n}` where each ticket is a
//! [`TicketRecord`]. YAML carries the same structure.

use crate::core::{TicketId, TicketRecord};
use crate::error::{Result, TicketingError};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

/// Serializable contents of a ticket store
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Snapshot {
    #[serde(default)]
    pub tickets: Vec<TicketRecord>,
    #[serde(rename = "nextId", default)]
    pub next_id: Option<u64>,
}

impl Snapshot {
    pub fn to_json(&self) -> Result<String> {
        serde_json::to_string_pretty(self).map_err(|e| {
            TicketingError::SerializationError(format!("Failed to serialize to JSON: {e}"))
        })
    }

    pub fn from_json(content: &str) -> Result<Self> {
        let snapshot: Self = serde_json::from_str(content)
            .map_err(|e| TicketingError::MalformedImport(format!("Invalid JSON: {e}")))?;
        snapshot.validate()?;
        Ok(snapshot)
    }

    pub fn to_yaml(&self) -> Result<String> {
        serde_yaml::to_string(self).map_err(|e| {
            TicketingError::SerializationError(format!("Failed to serialize to YAML: {e}"))
        })
    }

    pub fn from_yaml(content: &str) -> Result<Self> {
        let snapshot: Self = serde_yaml::from_str(content)
            .map_err(|e| TicketingError::MalformedImport(format!("Invalid YAML: {e}")))?;
        snapshot.validate()?;
        Ok(snapshot)
    }

    /// Rejects snapshots that store two tickets under the same id or carry an
    /// id or `nextId` above [`TicketId::MAX`]
    pub fn validate(&self) -> Result<()> {
        if let Some(next_id) = self.next_id.filter(|n| *n > TicketId::MAX) {
            return Err(TicketingError::MalformedImport(format!(
                "nextId {next_id} is larger than {}",
                TicketId::MAX
            )));
        }
        let mut seen_ids = HashSet::new();
        for id in self.tickets.iter().filter_map(|t| t.ticket_id) {
            if id.value() > TicketId::MAX {
                return Err(TicketingError::MalformedImport(format!(
                    "ticket id {id} is larger than {}",
                    TicketId::MAX
                )));
            }
            if !seen_ids.insert(id) {
                return Err(TicketingError::DuplicateTicket { id: id.to_string() });
            }
        }
        Ok(())
    }
}
