//! `cobuy stats`: dataset and graph summary.

use crate::cmd::Session;
use crate::output::{OutputMode, emit, pretty_kv, pretty_rule, pretty_section};
use cobuy_graph::GraphStats;
use serde::Serialize;
use std::io::{self, Write};

#[derive(Debug, Serialize)]
pub struct StatsOutput {
    pub products: usize,
    pub orders: usize,
    /// Distinct order ids with no catalog entry.
    pub unknown_order_ids: usize,
    pub graph: GraphStats,
}

impl StatsOutput {
    pub fn from_session(session: &Session) -> Self {
        Self {
            products: session.dataset.catalog.len(),
            orders: session.dataset.orders.len(),
            unknown_order_ids: session.dataset.unknown_order_ids().len(),
            graph: GraphStats::from_graph(&session.graph),
        }
    }
}

/// Execute `cobuy stats`.
///
/// # Errors
///
/// Returns an error if output rendering fails.
pub fn run_stats(session: &Session, output: OutputMode) -> anyhow::Result<()> {
    let report = StatsOutput::from_session(session);
    emit(output, &report, render_stats_text, render_stats_pretty)
}

fn render_stats_text(report: &StatsOutput, w: &mut dyn Write) -> io::Result<()> {
    let g = &report.graph;
    writeln!(w, "products  {}", report.products)?;
    writeln!(w, "orders  {}", report.orders)?;
    writeln!(w, "unknown_order_ids  {}", report.unknown_order_ids)?;
    writeln!(w, "nodes  {}", g.node_count)?;
    writeln!(w, "edges  {}", g.edge_count)?;
    writeln!(w, "density  {:.4}", g.density)?;
    writeln!(w, "components  {}", g.component_count)?;
    writeln!(w, "isolated  {}", g.isolated_node_count)?;
    writeln!(w, "max_degree  {}", g.max_degree)?;
    writeln!(w, "total_weight  {:.1}", g.total_weight)?;
    writeln!(w, "content_hash  {}", g.content_hash)
}

fn render_stats_pretty(report: &StatsOutput, w: &mut dyn Write) -> io::Result<()> {
    let g = &report.graph;
    pretty_section(w, "Dataset")?;
    pretty_kv(w, "Products", report.products.to_string())?;
    pretty_kv(w, "Orders", report.orders.to_string())?;
    pretty_kv(w, "Unknown ids", report.unknown_order_ids.to_string())?;
    writeln!(w)?;

    pretty_section(w, "Graph")?;
    pretty_kv(w, "Nodes", g.node_count.to_string())?;
    pretty_kv(w, "Edges", g.edge_count.to_string())?;
    pretty_kv(w, "Density", format!("{:.4}", g.density))?;
    pretty_kv(w, "Components", g.component_count.to_string())?;
    pretty_kv(w, "Isolated", g.isolated_node_count.to_string())?;
    pretty_kv(w, "Max degree", g.max_degree.to_string())?;
    pretty_kv(w, "Total weight", format!("{:.1}", g.total_weight))?;
    pretty_kv(w, "Content hash", &g.content_hash)?;
    if g.is_flat() {
        writeln!(w)?;
        writeln!(w, "The graph has no edges: every recommendation will be empty.")?;
    }
    pretty_rule(w)
}
