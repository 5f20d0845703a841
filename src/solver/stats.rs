use std::collections::HashMap;

use prettytable::{Cell, Row, Table};
use serde::Serialize;

use crate::solver::{
    constraint::Constraint,
    csp::{ConstraintId, Csp},
    value::ValueEquality,
};

/// Counters collected over one `solve` invocation.
#[derive(Debug, Default, Clone, Serialize)]
pub struct SearchStats {
    /// Search-tree nodes entered by systematic search.
    pub nodes_visited: u64,
    /// Candidate values abandoned after a failed branch.
    pub backtracks: u64,
    /// Local-repair steps taken by min-conflicts.
    pub repair_steps: u64,
    /// Propagation counters, keyed by constraint id.
    pub constraint_stats: HashMap<ConstraintId, PerConstraintStats>,
}

#[derive(Debug, Default, Clone, Copy, Serialize)]
pub struct PerConstraintStats {
    pub revisions: u64,
    pub prunings: u64,
    pub time_spent_micros: u64,
}

impl SearchStats {
    /// Folds the counters of another run into this one. Used by restarting
    /// search to accumulate totals across attempts.
    pub fn merge(&mut self, other: &SearchStats) {
        self.nodes_visited += other.nodes_visited;
        self.backtracks += other.backtracks;
        self.repair_steps += other.repair_steps;
        for (id, counters) in &other.constraint_stats {
            let entry = self.constraint_stats.entry(*id).or_default();
            entry.revisions += counters.revisions;
            entry.prunings += counters.prunings;
            entry.time_spent_micros += counters.time_spent_micros;
        }
    }
}

/// Renders a per-constraint summary of the propagation counters.
pub fn render_stats_table<V: ValueEquality>(stats: &SearchStats, csp: &Csp<V>) -> String {
    let mut table = Table::new();
    table.add_row(Row::new(vec![
        Cell::new("Constraint Type"),
        Cell::new("ID"),
        Cell::new("Description"),
        Cell::new("Revise Calls"),
        Cell::new("Prunings"),
        Cell::new("Time / Call (µs)"),
        Cell::new("Total Time (ms)"),
    ]));

    let mut sorted_stats: Vec<(&ConstraintId, &PerConstraintStats)> =
        stats.constraint_stats.iter().collect();
    sorted_stats.sort_by_key(|(_, counters)| counters.time_spent_micros);

    for (constraint_id, counters) in sorted_stats {
        let descriptor = csp.constraint(*constraint_id).descriptor();
        let avg_time = if counters.revisions > 0 {
            counters.time_spent_micros as f64 / counters.revisions as f64
        } else {
            0.0
        };

        table.add_row(Row::new(vec![
            Cell::new(&descriptor.name),
            Cell::new(&constraint_id.to_string()),
            Cell::new(&descriptor.description),
            Cell::new(&counters.revisions.to_string()),
            Cell::new(&counters.prunings.to_string()),
            Cell::new(&format!("{avg_time:.2}")),
            Cell::new(&format!("{:.2}", counters.time_spent_micros as f64 / 1000.0)),
        ]));
    }

    table.to_string()
}
