//! Command-line interface for investswarm

use anyhow::Context;
use clap::Parser;
use std::path::PathBuf;
use std::process::ExitCode;
use std::sync::Arc;
use swarm_core::{
    AgentId, AnalysisReport, OverallStatus, ResearchProgress, Swarm, SwarmConfig,
};
use swarm_llm::providers::DedalusProvider;
use tracing::{error, info};
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

const BANNER: &str = r"
    ╔═══════════════════════════════════════════════════════════╗
    ║                                                           ║
    ║                      INVESTSWARM                          ║
    ║              AI Agent Swarm for Stock Analysis            ║
    ║                                                           ║
    ╚═══════════════════════════════════════════════════════════╝
";

const PREVIEW_CHARS: usize = 500;

#[derive(Parser, Debug)]
#[command(name = "investswarm")]
#[command(version)]
#[command(about = "AI agent swarm for stock analysis", long_about = None)]
struct Args {
    /// Stock ticker symbol (e.g., TSLA, AAPL, MSFT)
    ticker: String,

    /// Save complete results to JSON file
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Show detailed research from all agents
    #[arg(long)]
    show_research: bool,

    /// Quiet mode - only show final verdict
    #[arg(short, long)]
    quiet: bool,

    /// Don't show the banner
    #[arg(long)]
    no_banner: bool,
}

/// Progress display in "[1/3] ... Agent starting..." style
struct ConsoleProgress;

impl ConsoleProgress {
    fn slot(agent: AgentId) -> usize {
        match agent {
            AgentId::Financial => 1,
            AgentId::Market => 2,
            AgentId::Sentiment => 3,
        }
    }
}

impl ResearchProgress for ConsoleProgress {
    fn agent_started(&self, agent: AgentId) {
        info!(
            "[{}/3] {} starting...",
            Self::slot(agent),
            agent.display_name()
        );
    }

    fn agent_finished(&self, agent: AgentId, success: bool) {
        info!(
            "[{}/3] {} complete {}",
            Self::slot(agent),
            agent.display_name(),
            if success { "✓" } else { "✗" }
        );
    }
}

fn print_research_summary(report: &AnalysisReport) {
    println!("\n{}", "=".repeat(80));
    println!("RESEARCH SUMMARY");
    println!("{}\n", "=".repeat(80));

    for result in report.research.iter() {
        println!("\n--- {} ---", result.agent_name);
        println!("Status: {}", if result.is_success() { "SUCCESS" } else { "FAILED" });

        if result.is_success() {
            println!("\nPreview:\n{}\n", preview(&result.analysis, PREVIEW_CHARS));
        } else {
            println!(
                "Error: {}\n",
                result.error.as_deref().unwrap_or("Unknown error")
            );
        }
    }

    println!("{}", "=".repeat(80));
}

fn print_verdict(report: &AnalysisReport) {
    println!("\n{}", "=".repeat(80));
    println!("FINAL VERDICT");
    println!("{}\n", "=".repeat(80));

    if report.verdict.is_success() {
        println!("{}", report.verdict.verdict);
        let unavailable: Vec<&str> = report
            .research
            .iter()
            .filter(|r| !r.is_success())
            .map(|r| r.agent_name.as_str())
            .collect();
        if !unavailable.is_empty() {
            println!(
                "\nNote: verdict formed without: {}",
                unavailable.join(", ")
            );
        }
    } else {
        println!(
            "Error: {}",
            report.verdict.error.as_deref().unwrap_or("Unknown error")
        );
    }

    println!("\n{}", "=".repeat(80));
}

/// First `max` characters of the text, with an ellipsis when truncated
fn preview(text: &str, max: usize) -> String {
    if text.chars().count() <= max {
        text.to_string()
    } else {
        let truncated: String = text.chars().take(max).collect();
        format!("{truncated}...")
    }
}

fn save_report(report: &AnalysisReport, path: &PathBuf) -> anyhow::Result<()> {
    let json = serde_json::to_string_pretty(report)?;
    std::fs::write(path, json)
        .with_context(|| format!("Failed to save results to {}", path.display()))?;
    info!("Results saved to: {}", path.display());
    Ok(())
}

/// Default log filter: quiet mode keeps the terminal clear of progress and
/// phase logging so only the verdict block prints. `RUST_LOG` still wins.
fn default_filter(quiet: bool) -> &'static str {
    if quiet { "warn" } else { "info" }
}

fn init_tracing(quiet: bool) {
    tracing_subscriber::registry()
        .with(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new(default_filter(quiet))),
        )
        .with(tracing_subscriber::fmt::layer().without_time().with_target(false))
        .init();
}

#[tokio::main]
async fn main() -> ExitCode {
    let args = Args::parse();

    init_tracing(args.quiet);

    if !args.no_banner && !args.quiet {
        println!("{BANNER}");
    }

    match run(&args).await {
        Ok(code) => code,
        Err(e) => {
            error!("Fatal error: {e:#}");
            ExitCode::FAILURE
        }
    }
}

async fn run(args: &Args) -> anyhow::Result<ExitCode> {
    let provider =
        Arc::new(DedalusProvider::from_env().context("Failed to configure Dedalus provider")?);
    let swarm = Swarm::new(provider, SwarmConfig::default())?;

    let report = if args.quiet {
        swarm.analyze(&args.ticker).await?
    } else {
        swarm
            .analyze_with_progress(&args.ticker, &ConsoleProgress)
            .await?
    };

    if args.show_research && !args.quiet {
        print_research_summary(&report);
    }

    // Always show the verdict
    print_verdict(&report);

    if let Some(path) = &args.output {
        save_report(&report, path)?;
    }

    Ok(match report.status {
        OverallStatus::Success | OverallStatus::Partial => ExitCode::SUCCESS,
        OverallStatus::Failed => ExitCode::FAILURE,
    })
}
