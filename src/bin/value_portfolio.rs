//! Value the whole inforce block at a valuation date
//!
//! Outputs one reserve per in-force policy to portfolio_valuation.csv

use anyhow::{Context, Result};
use chrono::NaiveDate;
use std::env;
use std::fs::File;
use std::io::Write;
use std::path::Path;
use std::time::Instant;

use term_valuation::assumptions::loader::DEFAULT_ASSUMPTIONS_PATH;
use term_valuation::policy::load_default_inforce;
use term_valuation::{ActuarialAssumptions, ValuationConfig, ValuationService};

const OUTPUT_PATH: &str = "portfolio_valuation.csv";

fn main() -> Result<()> {
    env_logger::init();

    // Optional first argument: valuation date as YYYY-MM-DD
    let valuation_date = match env::args().nth(1) {
        Some(arg) => NaiveDate::parse_from_str(&arg, "%Y-%m-%d")
            .with_context(|| format!("bad valuation date '{}'", arg))?,
        None => chrono::Local::now().date_naive(),
    };

    let start = Instant::now();
    println!("Loading policies from inforce.csv...");

    let policies = load_default_inforce().context("Failed to load policies")?;
    println!("Loaded {} policies in {:?}", policies.len(), start.elapsed());

    // Built-in basis only when no basis file is shipped
    let assumptions =
        ActuarialAssumptions::from_csv_path_or_default(Path::new(DEFAULT_ASSUMPTIONS_PATH))
            .context("loading valuation basis")?;

    println!("Valuing portfolio at {}...", valuation_date);
    let run_start = Instant::now();

    let service = ValuationService::new(assumptions, ValuationConfig::default());
    let valuation = service.portfolio_snapshot(&policies, valuation_date)?;

    println!("Valuation complete in {:?}", run_start.elapsed());

    let mut file = File::create(OUTPUT_PATH).context("Failed to create output file")?;
    writeln!(file, "PolicyID,ElapsedYears,Reserve")?;
    for entry in &valuation.entries {
        writeln!(file, "{},{},{:.2}", entry.policy_id, entry.elapsed_years, entry.reserve)?;
    }

    println!("Output written to {}", OUTPUT_PATH);

    println!("\n=== SUMMARY ===");
    println!("Valuation date:     {}", valuation.valuation_date);
    println!("Policies valued:    {}", valuation.policies_valued);
    println!("Policies skipped:   {}", valuation.policies_skipped);
    println!("Total reserve:      {:.2}", valuation.total_reserve);
    if let Some(largest) = valuation
        .entries
        .iter()
        .max_by(|a, b| a.reserve.total_cmp(&b.reserve))
    {
        println!("Largest reserve:    {:.2} (policy {})", largest.reserve, largest.policy_id);
    }
    println!("Total time:         {:?}", start.elapsed());
    Ok(())
}
