//! `cobuy lookup`: list catalog products matching an id or name.

use crate::cmd::Session;
use crate::output::{OutputMode, emit, pretty_section};
use clap::Args;
use cobuy_core::{Catalog, Product, lookup};
use serde::Serialize;
use std::io::{self, Write};

#[derive(Args, Debug)]
#[command(
    about = "Find products by id or name",
    long_about = "List catalog products matching the query.\n\n\
                  An all-digit query matches the product with that id. Anything else is a\n\
                  case-insensitive substring match over product names.",
    after_help = "EXAMPLES:\n    # Every product with \"desk\" in its name\n    cobuy lookup desk\n\n\
                  # Exact id\n    cobuy lookup 9"
)]
pub struct LookupArgs {
    /// Product id, or (part of) a product name.
    pub query: String,
}

#[derive(Debug, Serialize)]
pub struct LookupOutput {
    pub query: String,
    pub count: usize,
    pub products: Vec<Product>,
}

fn find_products(catalog: &Catalog, query: &str) -> Vec<Product> {
    let trimmed = query.trim();
    if !trimmed.is_empty() && trimmed.bytes().all(|b| b.is_ascii_digit()) {
        return lookup::resolve(catalog, trimmed).into_iter().cloned().collect();
    }
    lookup::search(catalog, trimmed).into_iter().cloned().collect()
}

/// Execute `cobuy lookup <query>`. No match is an empty result, not an
/// error.
///
/// # Errors
///
/// Returns an error if output rendering fails.
pub fn run_lookup(args: &LookupArgs, session: &Session, output: OutputMode) -> anyhow::Result<()> {
    let products = find_products(&session.dataset.catalog, &args.query);
    let report = LookupOutput {
        query: args.query.trim().to_string(),
        count: products.len(),
        products,
    };
    emit(output, &report, render_lookup_text, render_lookup_pretty)
}

fn render_lookup_text(report: &LookupOutput, w: &mut dyn Write) -> io::Result<()> {
    if report.products.is_empty() {
        return Ok(());
    }
    writeln!(w, "ID  NAME  CATEGORY  PRICE  QUANTITY  POPULARITY")?;
    for p in &report.products {
        writeln!(
            w,
            "{}  {}  {}  {}  {}  {}",
            p.id, p.name, p.category, p.price, p.quantity, p.popularity
        )?;
    }
    Ok(())
}

fn render_lookup_pretty(report: &LookupOutput, w: &mut dyn Write) -> io::Result<()> {
    pretty_section(w, &format!("Products matching \"{}\": {}", report.query, report.count))?;
    if report.products.is_empty() {
        writeln!(w, "No product found. Try an id or a name (e.g. '1' or 'Laptop').")?;
        return Ok(());
    }
    for p in &report.products {
        writeln!(
            w,
            "{:>4}  {:<20}  {:<12}  ${:<8}  qty {:<4}  popularity {}",
            p.id, p.name, p.category, p.price, p.quantity, p.popularity
        )?;
    }
    Ok(())
}
