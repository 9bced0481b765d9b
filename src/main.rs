//! Term Valuation CLI
//!
//! Command-line interface for quotes, reserve projections and portfolio
//! snapshots

use anyhow::{anyhow, Context, Result};
use chrono::NaiveDate;
use clap::{Parser, Subcommand};
use std::fs::File;
use std::io::Write;
use std::path::{Path, PathBuf};

use term_valuation::integration::FactorCalculator;
use term_valuation::policy::load_policies;
use term_valuation::{
    ActuarialAssumptions, Applicant, HistoryCategory, Policy, PremiumCalculator, ProjectionResult,
    ValuationConfig, ValuationService,
};

#[derive(Debug, Parser)]
#[command(name = "term_valuation", version, about = "Term assurance pricing and reserving")]
struct Cli {
    /// Directory holding valuation_basis.csv (built-in basis if omitted)
    #[arg(long, global = true)]
    assumptions: Option<PathBuf>,

    /// Print results as JSON
    #[arg(long, global = true)]
    json: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Gross premium quote for an applicant
    Quote {
        #[arg(long)]
        age: f64,
        #[arg(long)]
        coverage: f64,
        /// Policy term in years (standard term if omitted)
        #[arg(long)]
        term: Option<f64>,
        #[arg(long)]
        smoker: bool,
        /// clean, minor or major
        #[arg(long, default_value = "clean", value_parser = parse_history)]
        history: HistoryCategory,
    },

    /// Year-by-year reserve projection for one policy
    Project {
        #[arg(long)]
        age: u32,
        #[arg(long)]
        term: u32,
        #[arg(long)]
        coverage: f64,
        #[arg(long, default_value_t = 1)]
        policy_id: u32,
        /// Write the projection to this CSV file
        #[arg(long)]
        output: Option<PathBuf>,
    },

    /// Reserve snapshot of an inforce file
    Portfolio {
        #[arg(long, default_value = term_valuation::policy::loader::DEFAULT_INFORCE_PATH)]
        inforce: PathBuf,
        /// Valuation date, YYYY-MM-DD (today if omitted)
        #[arg(long)]
        date: Option<NaiveDate>,
        /// Value on one thread instead of the rayon pool
        #[arg(long)]
        sequential: bool,
        /// Memoise issue factors per (issue age, term)
        #[arg(long)]
        cache: bool,
    },
}

fn parse_history(label: &str) -> Result<HistoryCategory, String> {
    HistoryCategory::from_label(label).ok_or_else(|| format!("unknown history category '{}'", label))
}

fn main() -> Result<()> {
    env_logger::init();
    let cli = Cli::parse();

    let assumptions = match &cli.assumptions {
        Some(dir) => ActuarialAssumptions::from_csv_path(dir)
            .with_context(|| format!("loading assumptions from {}", dir.display()))?,
        None => ActuarialAssumptions::default_pricing(),
    };

    match cli.command {
        Command::Quote { age, coverage, term, smoker, history } => {
            run_quote(assumptions, cli.json, age, coverage, term, smoker, history)
        }
        Command::Project { age, term, coverage, policy_id, output } => {
            let today = chrono::Local::now().date_naive();
            let policy = Policy::new(policy_id, age, term, coverage, today);
            run_project(assumptions, cli.json, &policy, output.as_deref())
        }
        Command::Portfolio { inforce, date, sequential, cache } => {
            let config = ValuationConfig {
                parallel: !sequential,
                use_cache: cache,
            };
            let valuation_date = date.unwrap_or_else(|| chrono::Local::now().date_naive());
            run_portfolio(assumptions, cli.json, &inforce, valuation_date, config)
        }
    }
}

fn run_quote(
    assumptions: ActuarialAssumptions,
    json: bool,
    age: f64,
    coverage: f64,
    term: Option<f64>,
    smoker: bool,
    history: HistoryCategory,
) -> Result<()> {
    let calculator = PremiumCalculator::new(assumptions);
    let quote = match term {
        Some(term) => calculator.gross_quote(age, coverage, term, smoker, history)?,
        None => calculator.quote_standard(&Applicant { age, coverage, smoker, history })?,
    };

    if json {
        println!("{}", serde_json::to_string_pretty(&quote)?);
        return Ok(());
    }

    let assumptions = calculator.assumptions();
    let horizon = (assumptions.limiting_age() - age).max(0.0);
    let life_expectancy = FactorCalculator::new(assumptions)?.expected_lifetime(age, horizon)?;

    println!("Quote: age {} term {} cover {:.2}", quote.age, quote.term, quote.coverage);
    println!("  Assurance factor:   {:.8}", quote.assurance_factor);
    println!("  Annuity factor:     {:.8}", quote.annuity_factor);
    println!("  Expense annuity:    {:.8}", quote.annuity_in_factor);
    println!("  Base premium:       {:.2}", quote.base_annual_premium);
    println!("  Loading multiplier: {:.2}", quote.loading_multiplier);
    println!("  Annual premium:     {:.2}", quote.annual_premium);
    println!("  Monthly premium:    {:.2}", quote.monthly_premium);
    println!("  Risk category:      {}", quote.risk_category.as_str());
    println!("  Life expectancy:    {:.2} years", life_expectancy);
    println!("  Decision:           {}", if quote.approved { "approved" } else { "declined" });
    Ok(())
}

fn run_project(
    assumptions: ActuarialAssumptions,
    json: bool,
    policy: &Policy,
    output: Option<&Path>,
) -> Result<()> {
    let service = ValuationService::new(assumptions, ValuationConfig::default());
    let result = service.project_policy(policy)?;

    if let Some(path) = output {
        write_projection_csv(&result, path)?;
        println!("Projection written to: {}", path.display());
    }

    if json {
        println!("{}", serde_json::to_string_pretty(&result)?);
        return Ok(());
    }

    println!("Policy {}: net premium {:.2}", result.policy_id, result.net_premium);
    println!(
        "{:>5} {:>4} {:>5} {:>12} {:>12} {:>14}",
        "Year", "Age", "Left", "Assurance", "Annuity", "Reserve"
    );
    println!("{}", "-".repeat(57));
    for row in &result.rows {
        println!(
            "{:>5} {:>4} {:>5} {:>12.8} {:>12.6} {:>14.2}",
            row.elapsed_years,
            row.attained_age,
            row.remaining_term,
            row.assurance_factor,
            row.annuity_factor,
            row.reserve
        );
    }

    let summary = result.summary();
    println!(
        "\nPeak reserve {:.2} in year {}, final reserve {:.2}",
        summary.peak_reserve, summary.peak_year, summary.final_reserve
    );
    Ok(())
}

fn write_projection_csv(result: &ProjectionResult, path: &Path) -> Result<()> {
    let mut file =
        File::create(path).with_context(|| format!("creating {}", path.display()))?;

    writeln!(file, "Year,AttainedAge,RemainingTerm,AssuranceFactor,AnnuityFactor,Reserve")?;
    for row in &result.rows {
        writeln!(
            file,
            "{},{},{},{:.10},{:.10},{:.6}",
            row.elapsed_years,
            row.attained_age,
            row.remaining_term,
            row.assurance_factor,
            row.annuity_factor,
            row.reserve
        )?;
    }
    Ok(())
}

fn run_portfolio(
    assumptions: ActuarialAssumptions,
    json: bool,
    inforce: &Path,
    valuation_date: NaiveDate,
    config: ValuationConfig,
) -> Result<()> {
    let policies = load_policies(inforce)
        .with_context(|| format!("loading policies from {}", inforce.display()))?;
    if policies.is_empty() {
        return Err(anyhow!("no policies in {}", inforce.display()));
    }

    let service = ValuationService::new(assumptions, config);
    let valuation = service.portfolio_snapshot(&policies, valuation_date)?;

    if json {
        println!("{}", serde_json::to_string_pretty(&valuation)?);
        return Ok(());
    }

    println!("Portfolio valuation at {}", valuation.valuation_date);
    println!("{:>8} {:>7} {:>14}", "Policy", "Years", "Reserve");
    println!("{}", "-".repeat(31));
    for entry in &valuation.entries {
        println!("{:>8} {:>7} {:>14.2}", entry.policy_id, entry.elapsed_years, entry.reserve);
    }
    println!("{}", "-".repeat(31));
    println!(
        "Valued {} policies ({} not in force), total reserve {:.2}",
        valuation.policies_valued, valuation.policies_skipped, valuation.total_reserve
    );
    Ok(())
}
