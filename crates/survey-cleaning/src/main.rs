//! CLI entry point for the customer survey cleaning run.

use anyhow::{Result, anyhow};
use clap::Parser;
use polars::prelude::*;
use std::path::Path;
use survey_cleaning::charts::PANEL_TITLES;
use survey_cleaning::dataset::raw_survey;
use survey_cleaning::reporting::summary::{
    render_cleaning_steps, render_quality_assessment, render_results, render_value_counts,
};
use survey_cleaning::{CleaningConfig, PipelineResult, ReportGenerator, SurveyPipeline};
use tracing::{debug, error, info};

#[derive(Parser, Debug)]
#[command(
    version,
    about = "Customer survey data cleaning",
    long_about = "Assesses the built-in customer survey, applies the cleaning rules, and \
                  writes the cleaned CSV and a four-panel chart.\n\n\
                  EXAMPLES:\n  \
                  # Write artifacts to the current directory\n  \
                  survey-cleaning\n\n  \
                  # Write artifacts elsewhere and keep a JSON report\n  \
                  survey-cleaning --output-dir out/ --emit-report\n\n  \
                  # Machine-readable report only\n  \
                  survey-cleaning --json --no-chart"
)]
struct Args {
    /// Directory for the cleaned CSV, the chart and the report
    #[arg(short, long, default_value = ".")]
    output_dir: String,

    /// File name of the cleaned CSV
    #[arg(long, default_value = "cleaned_customer_survey.csv")]
    csv_name: String,

    /// File name of the chart image
    #[arg(long, default_value = "data_cleaning_analysis.png")]
    chart_name: String,

    /// Log level (trace, debug, info, warn, error)
    #[arg(short, long, default_value = "info")]
    log_level: String,

    /// Suppress progress output (only show errors and the console summary)
    #[arg(short, long)]
    quiet: bool,

    /// Output JSON to stdout instead of the human-readable summary
    ///
    /// Disables all logs; only the final JSON report is printed.
    #[arg(long)]
    json: bool,

    /// Write the JSON report to the output directory
    ///
    /// The report will be saved as <csv_name stem>_report.json
    #[arg(short = 'r', long)]
    emit_report: bool,

    /// Skip rendering the chart image
    #[arg(long)]
    no_chart: bool,
}

/// Initialize the tracing subscriber for logging.
///
/// When `json_output` is true no subscriber is installed, so stdout only
/// carries the JSON report.
fn init_logging(level: &str, quiet: bool, json_output: bool) {
    if json_output {
        return;
    }

    use tracing_subscriber::EnvFilter;

    let effective_level = if quiet { "warn" } else { level };

    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(effective_level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .init();
}

fn main() -> Result<()> {
    let args = Args::parse();

    init_logging(&args.log_level, args.quiet, args.json);

    let config = CleaningConfig::builder()
        .output_dir(&args.output_dir)
        .csv_name(&args.csv_name)
        .chart_name(&args.chart_name)
        .build()?;
    debug!("Configuration: {:?}", config);

    let raw = raw_survey()?;
    info!("Raw survey loaded: {:?}", raw.shape());

    if !args.json {
        print_raw_preview(&raw);
    }

    let pipeline = SurveyPipeline::new(config.clone()).render_chart(!args.no_chart);
    let result = match pipeline.process(&raw) {
        Ok(result) => result,
        Err(e) => {
            error!("Survey cleaning failed [{}]: {}", e.error_code(), e);
            return Err(anyhow!("Survey cleaning failed: {}", e));
        }
    };

    handle_output(&result, &config, &args)
}

/// Handle the run's output based on CLI flags.
///
/// - Default: print the console sections to stdout
/// - `--json`: print the report as JSON to stdout only
/// - `--emit-report`: also write the JSON report to a file
fn handle_output(result: &PipelineResult, config: &CleaningConfig, args: &Args) -> Result<()> {
    if args.json {
        println!("{}", serde_json::to_string_pretty(&result.report)?);
    } else {
        print_human_readable_summary(result, config);
    }

    if args.emit_report {
        let stem = extract_file_stem(&config.csv_name);
        let report_path =
            ReportGenerator::new(&config.output_dir).write_report_to_file(&result.report, &stem)?;
        info!("Report written to: {}", report_path.display());
        if !args.json {
            println!("Report saved as '{}'", report_path.display());
        }
    }

    Ok(())
}

/// Print the raw survey before anything is changed.
///
/// Uses `println!` rather than tracing: this is the run's primary output and
/// must stay visible regardless of log level.
fn print_raw_preview(raw: &DataFrame) {
    println!("Raw dataset created for cleaning");
    println!("Dataset shape: {:?}", raw.shape());
    println!("\nFirst few rows of raw data:");
    println!("{}", raw.head(Some(5)));
}

fn print_human_readable_summary(result: &PipelineResult, config: &CleaningConfig) {
    print!("{}", render_quality_assessment(&result.raw_quality, config));
    print!("{}", render_cleaning_steps(&result.outcome.stats, config));
    print!("{}", render_results(&result.report));

    println!("\nCleaned dataset preview:");
    println!("{}", result.outcome.cleaned);
    print!(
        "{}",
        render_value_counts(
            "Product categories after standardization",
            &result.report.category_counts
        )
    );

    println!("\n=== SAVING CLEANED DATA ===");
    match &result.csv_path {
        Some(path) => println!("Cleaned dataset saved as '{}'", path.display()),
        None => println!("Cleaned dataset not saved"),
    }

    println!("\n=== CREATING DATA QUALITY VISUALIZATIONS ===");
    match &result.chart_path {
        Some(path) => {
            println!("Panels: {}", PANEL_TITLES.join(" | "));
            println!("Visualization saved as '{}'", path.display());
        }
        None => println!("Chart rendering skipped"),
    }

    println!("\n{}", "=".repeat(60));
    println!("{}", result.report.title);
    println!("{}", "=".repeat(60));
}

/// Extract the file stem (name without extension) from a path.
fn extract_file_stem(path: &str) -> String {
    Path::new(path)
        .file_stem()
        .and_then(|s| s.to_str())
        .unwrap_or("output")
        .to_string()
}
