// pricegrid CLI - headless pricing matrix operations

use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Parser, Subcommand};

use pricegrid_codec::{decode, encode, summary_grid, template};
use pricegrid_io::{csv as canonical, xlsx};
use pricegrid_recon::{validate, ValidationResult};

pub const EXIT_SUCCESS: u8 = 0;
/// Blocking validation errors: the workbook decoded but must not be applied.
pub const EXIT_INVALID: u8 = 1;
/// Structural, IO, or usage failures.
pub const EXIT_ERROR: u8 = 2;

#[derive(Parser)]
#[command(name = "pricegrid")]
#[command(about = "Pricing matrix export, bid templates, and import validation")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Export the full pricing matrix workbook
    #[command(after_help = "\
Examples:
  pricegrid export --plans plans.csv --items items.csv --pricing pricing.csv
  pricegrid export --plans plans.csv --items items.csv --pricing pricing.csv -o q3_matrix.xlsx")]
    Export {
        /// Canonical floor plans CSV
        #[arg(long)]
        plans: PathBuf,

        /// Canonical line items CSV
        #[arg(long)]
        items: PathBuf,

        /// Pricing CSV (plan_code,item_code,cost)
        #[arg(long)]
        pricing: PathBuf,

        /// Output path (defaults to Pricing_Matrix_<date>.xlsx)
        #[arg(long, short = 'o')]
        output: Option<PathBuf>,
    },

    /// Write a blank bid template workbook for external estimators
    #[command(after_help = "\
Examples:
  pricegrid template --plans plans.csv --items items.csv
  pricegrid template --plans plans.csv --items items.csv -o bid_template.xlsx")]
    Template {
        /// Canonical floor plans CSV
        #[arg(long)]
        plans: PathBuf,

        /// Canonical line items CSV
        #[arg(long)]
        items: PathBuf,

        /// Output path (defaults to Pricing_Import_Template.xlsx)
        #[arg(long, short = 'o')]
        output: Option<PathBuf>,
    },

    /// Validate an edited workbook against canonical data (no writes)
    #[command(after_help = "\
Examples:
  pricegrid validate returned_bid.xlsx --plans plans.csv --items items.csv
  pricegrid validate returned_bid.xlsx --plans plans.csv --items items.csv --json | jq .changes")]
    Validate {
        /// Workbook to validate
        input: PathBuf,

        /// Canonical floor plans CSV
        #[arg(long)]
        plans: PathBuf,

        /// Canonical line items CSV
        #[arg(long)]
        items: PathBuf,

        /// Emit the full validation result as JSON
        #[arg(long)]
        json: bool,
    },
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Export {
            plans,
            items,
            pricing,
            output,
        } => cmd_export(&plans, &items, &pricing, output),
        Commands::Template {
            plans,
            items,
            output,
        } => cmd_template(&plans, &items, output),
        Commands::Validate {
            input,
            plans,
            items,
            json,
        } => cmd_validate(&input, &plans, &items, json),
    };

    match result {
        Ok(code) => ExitCode::from(code),
        Err(message) => {
            eprintln!("error: {message}");
            ExitCode::from(EXIT_ERROR)
        }
    }
}

fn cmd_export(
    plans_path: &PathBuf,
    items_path: &PathBuf,
    pricing_path: &PathBuf,
    output: Option<PathBuf>,
) -> Result<u8, String> {
    let plans = canonical::load_plans(plans_path)?;
    let items = canonical::load_items(items_path)?;
    let pricing = canonical::load_pricing(pricing_path, &plans, &items)?;

    let doc = encode(&plans, &items, &pricing);
    let summary = summary_grid(&plans, &items, &pricing);
    let path = output.unwrap_or_else(|| PathBuf::from(&doc.default_filename));

    xlsx::write_matrix(&doc, &summary, &path)?;
    println!(
        "Wrote {} ({} plans, {} items)",
        path.display(),
        doc.plan_count,
        doc.item_count
    );
    Ok(EXIT_SUCCESS)
}

fn cmd_template(
    plans_path: &PathBuf,
    items_path: &PathBuf,
    output: Option<PathBuf>,
) -> Result<u8, String> {
    let plans = canonical::load_plans(plans_path)?;
    let items = canonical::load_items(items_path)?;

    let doc = template(&plans, &items);
    let path = output.unwrap_or_else(|| PathBuf::from(&doc.default_filename));

    xlsx::write_template(&doc, &path)?;
    println!(
        "Wrote {} ({} plans, {} items)",
        path.display(),
        doc.plan_count,
        doc.item_count
    );
    Ok(EXIT_SUCCESS)
}

fn cmd_validate(
    input: &PathBuf,
    plans_path: &PathBuf,
    items_path: &PathBuf,
    json: bool,
) -> Result<u8, String> {
    let plans = canonical::load_plans(plans_path)?;
    let items = canonical::load_items(items_path)?;

    let grid = xlsx::read_grid(input)?;
    let sheet = decode(&grid).map_err(|e| e.to_string())?;
    let result = validate(&sheet, &plans, &items);

    if json {
        let rendered = serde_json::to_string_pretty(&result)
            .map_err(|e| format!("Failed to serialize result: {}", e))?;
        println!("{rendered}");
    } else {
        print_human(&result);
    }

    if result.valid {
        Ok(EXIT_SUCCESS)
    } else {
        Ok(EXIT_INVALID)
    }
}

fn print_human(result: &ValidationResult) {
    println!("valid: {}", if result.valid { "yes" } else { "no" });
    println!(
        "plans: {}/{} matched",
        result.summary.matched_plans_count, result.summary.total_plans_in_file
    );
    println!(
        "items: {}/{} matched",
        result.summary.matched_items_count, result.summary.total_items_in_file
    );
    println!("changes: {}", result.summary.changes_count);

    for warning in &result.warnings {
        println!("warning: {warning}");
    }
    for error in &result.errors {
        println!("error: {error}");
    }
}
