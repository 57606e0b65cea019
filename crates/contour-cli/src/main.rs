//! Contour CLI — sketch the structural map of a source repository.

use std::path::PathBuf;
use std::time::Instant;

use clap::{Parser, Subcommand};
use console::style;
use indicatif::{ProgressBar, ProgressStyle};

use contour_core::config::AnalysisConfig;
use contour_core::output::write_report;
use contour_core::pipeline;

#[derive(Parser)]
#[command(
    name = "contour-map",
    about = "Contour - Map the functions, classes and call hotspots of a codebase"
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Analyse a source code repository and produce a structural map
    Analyze {
        /// Path to the repository to analyse
        path: PathBuf,

        /// Output JSON file path
        #[arg(short, long)]
        output: Option<String>,

        /// Number of hotspot symbols to report
        #[arg(short = 'k', long, default_value = "10")]
        hotspots: usize,

        /// Content cap in bytes; larger files are recorded empty
        #[arg(long, default_value = "300000")]
        max_file_size: u64,

        /// Additional directory names to exclude
        #[arg(long)]
        exclude: Vec<String>,

        /// Show per-phase timing breakdown
        #[arg(long)]
        verbose: bool,

        /// Suppress all output except errors
        #[arg(long)]
        quiet: bool,
    },
}

fn main() {
    let cli = Cli::parse();

    match cli.command {
        Commands::Analyze {
            path,
            output,
            hotspots,
            max_file_size,
            exclude,
            verbose,
            quiet,
        } => {
            let repo_path = path.canonicalize().unwrap_or(path);
            let repo_name = repo_path
                .file_name()
                .map(|n| n.to_string_lossy().to_string())
                .unwrap_or_else(|| "repo".to_string());

            let output_path = output.unwrap_or_else(|| format!("{repo_name}.contour.json"));

            let config = AnalysisConfig {
                repo_path: repo_path.to_string_lossy().to_string(),
                output_path: Some(output_path.clone()),
                hotspot_count: hotspots,
                max_file_size,
                exclude_patterns: exclude,
                verbose,
                quiet,
            };

            if quiet {
                run_quiet(&config, &output_path);
            } else {
                run_with_progress(&config, &output_path, verbose);
            }
        }
    }
}

fn run_quiet(config: &AnalysisConfig, output_path: &str) {
    match pipeline::run_analysis(config, None) {
        Ok(report) => {
            if let Err(e) = write_report(&report, output_path) {
                eprintln!("Error writing output: {e}");
                std::process::exit(1);
            }
        }
        Err(e) => {
            eprintln!("Analysis failed: {e}");
            std::process::exit(1);
        }
    }
}

fn run_with_progress(config: &AnalysisConfig, output_path: &str, verbose: bool) {
    let pb = ProgressBar::new_spinner();
    pb.set_style(
        ProgressStyle::with_template("{spinner:.blue} {msg}")
            .unwrap()
            .tick_strings(&["⠋", "⠙", "⠹", "⠸", "⠼", "⠴", "⠦", "⠧", "⠇", "⠏"]),
    );
    pb.set_message("Initialising...");
    pb.enable_steady_tick(std::time::Duration::from_millis(80));

    let progress: pipeline::ProgressCallback = {
        let pb = pb.clone();
        Box::new(move |_name, label| {
            pb.set_message(label.to_string());
        })
    };

    let start = Instant::now();
    let report = match pipeline::run_analysis(config, Some(progress)) {
        Ok(r) => r,
        Err(e) => {
            pb.finish_and_clear();
            eprintln!("Analysis failed: {e}");
            std::process::exit(1);
        }
    };
    pb.finish_and_clear();

    // Summary
    println!(
        "\n{}  Contour Analysis: {}",
        style("✓").green().bold(),
        style(
            std::path::Path::new(&config.repo_path)
                .file_name()
                .map(|n| n.to_string_lossy().to_string())
                .unwrap_or_default()
        )
        .bold()
    );
    println!(
        "  {:<14} {}",
        "Files:",
        report.stats.get("files").unwrap_or(&serde_json::json!(0))
    );
    println!(
        "  {:<14} {}",
        "Functions:",
        report
            .stats
            .get("functions")
            .unwrap_or(&serde_json::json!(0))
    );
    println!(
        "  {:<14} {}",
        "Classes:",
        report.stats.get("classes").unwrap_or(&serde_json::json!(0))
    );
    println!(
        "  {:<14} {}",
        "Call edges:",
        report
            .stats
            .get("call_edges")
            .unwrap_or(&serde_json::json!(0))
    );
    println!(
        "  {:<14} {}",
        "Hotspots:",
        report
            .stats
            .get("hotspots")
            .unwrap_or(&serde_json::json!(0))
    );

    let duration = start.elapsed();
    println!(
        "  {:<14} {:.1}ms",
        "Duration:",
        duration.as_secs_f64() * 1000.0
    );

    if verbose {
        if let Some(serde_json::Value::Object(timings)) = report.metadata.get("phase_timings") {
            println!("\n  Phase Timings:");
            for (phase, ms) in timings {
                if let Some(val) = ms.as_f64() {
                    println!("    {:<14} {:.1}ms", phase, val * 1000.0);
                }
            }
        }

        if !report.hotspots.is_empty() {
            println!("\n  Top Hotspots:");
            for id in report.hotspots.iter().take(5) {
                println!("    {id}");
            }
        }
    }

    if let Err(e) = write_report(&report, output_path) {
        eprintln!("Error writing output: {e}");
        std::process::exit(1);
    }

    println!(
        "\n  {} {}",
        style("Output written to:").green(),
        output_path
    );
}
