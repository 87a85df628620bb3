use crate::error::TicketingError;
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;

/// Lifecycle stage of a ticket
///
/// Progression is linear: `ToDo -> InProgress -> Done`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum Status {
    #[default]
    ToDo,
    InProgress,
    Done,
}

impl Status {
    /// All statuses in progression order
    pub const fn values() -> &'static [Self] {
        &[Self::ToDo, Self::InProgress, Self::Done]
    }

    /// Wire name of the status
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::ToDo => "ToDo",
            Self::InProgress => "InProgress",
            Self::Done => "Done",
        }
    }

    /// The status one step further along; `Done` stays `Done`
    #[must_use]
    pub const fn next(self) -> Self {
        match self {
            Self::ToDo => Self::InProgress,
            Self::InProgress | Self::Done => Self::Done,
        }
    }

    pub const fn is_terminal(self) -> bool {
        matches!(self, Self::Done)
    }
}

impl fmt::Display for Status {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Status {
    type Err = TicketingError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().replace(['_', '-', ' '], "").as_str() {
            "todo" => Ok(Self::ToDo),
            "inprogress" | "doing" => Ok(Self::InProgress),
            "done" => Ok(Self::Done),
            _ => Err(TicketingError::InvalidStatus(s.to_string())),
        }
    }
}

/// Urgency ranking of a ticket, totally ordered `Low < Medium < High < Critical`
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default, Serialize, Deserialize,
)]
pub enum Priority {
    Low,
    #[default]
    Medium,
    High,
    Critical,
}

impl Priority {
    /// All priorities from lowest to highest
    pub const fn values() -> &'static [Self] {
        &[Self::Low, Self::Medium, Self::High, Self::Critical]
    }

    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Low => "Low",
            Self::Medium => "Medium",
            Self::High => "High",
            Self::Critical => "Critical",
        }
    }

    /// Sort weight, 1 (Low) through 4 (Critical)
    pub const fn weight(self) -> u8 {
        match self {
            Self::Low => 1,
            Self::Medium => 2,
            Self::High => 3,
            Self::Critical => 4,
        }
    }

    /// Styling class used when rendering a priority badge
    pub const fn color_class(self) -> &'static str {
        match self {
            Self::Low => "priority-low",
            Self::Medium => "priority-medium",
            Self::High => "priority-high",
            Self::Critical => "priority-critical",
        }
    }
}

impl fmt::Display for Priority {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Priority {
    type Err = TicketingError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "low" => Ok(Self::Low),
            "medium" => Ok(Self::Medium),
            "high" => Ok(Self::High),
            "critical" => Ok(Self::Critical),
            _ => Err(TicketingError::InvalidPriority(s.to_string())),
        }
    }
}

// Helpers over raw wire strings. Unrecognized values fall back instead of failing.

/// Whether `value` is the exact wire name of a status
pub fn is_valid_status(value: &str) -> bool {
    Status::values().iter().any(|s| s.as_str() == value)
}

/// Whether `value` is the exact wire name of a priority
pub fn is_valid_priority(value: &str) -> bool {
    Priority::values().iter().any(|p| p.as_str() == value)
}

fn priority_from_wire(value: &str) -> Option<Priority> {
    Priority::values().iter().copied().find(|p| p.as_str() == value)
}

/// Weight of a wire priority name; 0 when unrecognized
pub fn priority_weight(value: &str) -> u8 {
    priority_from_wire(value).map_or(0, Priority::weight)
}

/// Compares two wire priority names by weight
pub fn compare_priority(left: &str, right: &str) -> Ordering {
    priority_weight(left).cmp(&priority_weight(right))
}

/// Badge class for a wire priority name; medium styling when unrecognized
pub fn priority_color_class(value: &str) -> &'static str {
    priority_from_wire(value).map_or("priority-medium", Priority::color_class)
}

/// Next wire status name; terminal and unrecognized values are returned as-is
pub fn next_status_name(value: &str) -> &str {
    Status::values()
        .iter()
        .find(|s| s.as_str() == value)
        .map_or(value, |s| s.next().as_str())
}
