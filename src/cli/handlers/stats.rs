//! Handler for the `stats` command
//!
//! Summarizes the store the way a board header would: one count per status
//! column, one per priority, plus open/closed/overdue totals.

use super::common::{HandlerContext, priority_badge};
use crate::core::{Priority, Status};
use crate::error::Result;
use crate::storage::{InMemoryStorage, TicketRepository};
use colored::Colorize;
use serde::Serialize;
use std::collections::BTreeMap;

/// Ticket counts across the whole store
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TicketStats {
    pub total: usize,
    pub open: usize,
    pub closed: usize,
    pub overdue: usize,
    pub by_status: BTreeMap<&'static str, usize>,
    pub by_priority: BTreeMap<&'static str, usize>,
}

impl TicketStats {
    pub fn collect(storage: &InMemoryStorage) -> Self {
        Self {
            total: storage.count(),
            open: storage.count_where(|t| t.is_open()),
            closed: storage.count_where(|t| !t.is_open()),
            overdue: storage.count_where(|t| t.is_overdue()),
            by_status: Status::values()
                .iter()
                .map(|&status| (status.as_str(), storage.count_by_status(status)))
                .collect(),
            by_priority: Priority::values()
                .iter()
                .map(|&priority| (priority.as_str(), storage.count_by_priority(priority)))
                .collect(),
        }
    }
}

/// Handler for the `stats` command
pub fn handle_stats_command(ctx: &HandlerContext) -> Result<()> {
    let stats = TicketStats::collect(ctx.service.repository());

    if ctx.formatter.is_json() {
        return ctx.formatter.print_json(&stats);
    }

    ctx.formatter.info(&"Tickets".bold().to_string());
    ctx.formatter.info(&format!(
        "  {} total, {} open, {} closed, {} overdue",
        stats.total, stats.open, stats.closed, stats.overdue
    ));

    ctx.formatter.info(&"\nBy status".bold().to_string());
    for status in Status::values() {
        let count = stats.by_status.get(status.as_str()).copied().unwrap_or(0);
        ctx.formatter.info(&format!("  {:<12} {count}", status.to_string()));
    }

    ctx.formatter.info(&"\nBy priority".bold().to_string());
    for priority in Priority::values().iter().rev() {
        let count = stats.by_priority.get(priority.as_str()).copied().unwrap_or(0);
        ctx.formatter.info(&format!("  {:<12} {count}", priority_badge(*priority)));
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_stats_for_sample_data() {
        let stats = TicketStats::collect(&InMemoryStorage::with_sample_data());

        assert_eq!(stats.total, 5);
        assert_eq!(stats.open, 4);
        assert_eq!(stats.closed, 1);
        assert_eq!(stats.overdue, 0);
        assert_eq!(stats.by_status["ToDo"], 2);
        assert_eq!(stats.by_status["InProgress"], 2);
        assert_eq!(stats.by_status["Done"], 1);
        assert_eq!(stats.by_priority["High"], 2);
        assert_eq!(stats.by_priority["Critical"], 1);
    }

    #[test]
    fn test_stats_for_empty_store() {
        let stats = TicketStats::collect(&InMemoryStorage::new());
        assert_eq!(stats.total, 0);
        assert!(stats.by_status.values().all(|&count| count == 0));
        assert_eq!(stats.by_priority.len(), 4);
    }
}
