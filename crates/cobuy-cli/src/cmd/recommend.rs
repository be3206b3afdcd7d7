//! `cobuy recommend`: rank products related to a source product.

use crate::cmd::Session;
use crate::output::{OutputMode, emit, pretty_frame, pretty_rule};
use clap::Args;
use cobuy_core::Product;
use cobuy_graph::{RankedEntry, RecommendConfig, recommend};
use serde::Serialize;
use std::io::{self, Write};

#[derive(Args, Debug)]
#[command(
    about = "Recommend products related to a product",
    long_about = "Recommend products related to the given product.\n\n\
                  Walks the co-purchase graph breadth-first up to --depth hops from the\n\
                  source product. Every edge reached adds weight × popularity/100 × 1/depth\n\
                  to the neighbor's score, so products reached through several paths rank\n\
                  higher. The source product is never recommended.",
    after_help = "EXAMPLES:\n    # Top 5 recommendations for product 1\n    cobuy recommend 1\n\n\
                  # Look a product up by name, direct neighbors only\n    cobuy recommend laptop --depth 1\n\n\
                  # Machine-readable output\n    cobuy recommend mouse -k 10 --format json"
)]
pub struct RecommendArgs {
    /// Product id, or (part of) a product name.
    pub query: String,

    /// Maximum number of recommendations. Defaults to `[recommend].limit`.
    #[arg(short = 'k', long)]
    pub limit: Option<usize>,

    /// Maximum graph depth to search, clamped to `1..=[recommend].max_depth_cap`.
    #[arg(short, long)]
    pub depth: Option<u32>,
}

/// JSON envelope for `cobuy recommend` output.
#[derive(Debug, Serialize)]
pub struct RecommendOutput {
    pub source: Product,
    pub limit: usize,
    pub max_depth: u32,
    pub count: usize,
    pub results: Vec<RankedEntry>,
}

impl RecommendOutput {
    /// Normalize `limit`/`depth` against the settings and score `source`.
    pub fn compute(
        session: &Session,
        source: &Product,
        limit: Option<usize>,
        depth: Option<u32>,
    ) -> Self {
        let (limit, max_depth) = session.settings.normalize(limit, depth);
        let results = recommend(
            &session.graph,
            &session.dataset.catalog,
            source.id,
            limit,
            &RecommendConfig::with_max_depth(max_depth),
        );
        Self {
            source: source.clone(),
            limit,
            max_depth,
            count: results.len(),
            results,
        }
    }
}

/// Execute `cobuy recommend <query>`.
///
/// # Errors
///
/// Returns an error if no product matches the query or output rendering
/// fails.
pub fn run_recommend(args: &RecommendArgs, session: &Session, output: OutputMode) -> anyhow::Result<()> {
    let source = session.resolve(&args.query)?;
    let report = RecommendOutput::compute(session, source, args.limit, args.depth);
    emit(output, &report, render_recommend_text, render_recommend_pretty)
}

/// One row per result: rank, id, score, distance, name.
pub fn render_recommend_text(report: &RecommendOutput, w: &mut dyn Write) -> io::Result<()> {
    if report.results.is_empty() {
        return Ok(());
    }
    writeln!(w, "RANK  ID  SCORE  DISTANCE  NAME")?;
    for (rank, entry) in report.results.iter().enumerate() {
        writeln!(
            w,
            "{}  {}  {:.4}  {}  {}",
            rank + 1,
            entry.id,
            entry.score,
            entry.distance,
            entry.product.as_ref().map_or("-", |p| p.name.as_str()),
        )?;
    }
    Ok(())
}

/// Framed console report, one block per recommendation.
pub fn render_recommend_pretty(report: &RecommendOutput, w: &mut dyn Write) -> io::Result<()> {
    writeln!(w)?;
    pretty_frame(w)?;
    writeln!(
        w,
        "Top {} recommendations for \"{}\" (ID: {})",
        report.count, report.source.name, report.source.id
    )?;
    pretty_rule(w)?;

    if report.results.is_empty() {
        writeln!(w, "No recommendations found for this product with the current dataset/settings.")?;
    }
    for (rank, entry) in report.results.iter().enumerate() {
        match &entry.product {
            Some(product) => {
                writeln!(w, "{}. {} (ID: {})", rank + 1, product.name, entry.id)?;
                writeln!(
                    w,
                    "   Score: {:.4}   Distance: {}   Category: {}",
                    entry.score, entry.distance, product.category
                )?;
                writeln!(w, "   Price: ${}   Popularity: {}", product.price, product.popularity)?;
            }
            None => {
                writeln!(w, "{}. <not in catalog> (ID: {})", rank + 1, entry.id)?;
                writeln!(w, "   Score: {:.4}   Distance: {}", entry.score, entry.distance)?;
            }
        }
        pretty_rule(w)?;
    }

    pretty_frame(w)?;
    writeln!(w)
}
