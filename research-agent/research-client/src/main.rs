/// Research agent CLI
/// Runs the pipeline once for a query, prints a summary and saves the report

use std::path::PathBuf;

use anyhow::Result;
use clap::Parser;

use research_client::{init_tracing, write_report, Depth, ResearchAgent, ResearchConfig, ResearchRequest};

const DEFAULT_QUERY: &str = "What are the latest advances in quantum computing and their potential impact on AI?";

#[derive(Parser, Debug)]
#[command(name = "research-client", about = "Run the deep research pipeline for one query", long_about = None)]
struct Args {
    /// Research question or topic
    #[arg(default_value = DEFAULT_QUERY)]
    query: String,

    /// How thorough the research plan should be
    #[arg(long, value_enum, default_value_t = Depth::Standard)]
    depth: Depth,

    /// Advisory time budget in seconds
    #[arg(long)]
    time_limit: Option<u64>,

    /// Where to write the JSON report (overrides RESEARCH_OUTPUT_FILE)
    #[arg(long, short)]
    output: Option<PathBuf>,

    /// Model identifier (overrides RESEARCH_MODEL)
    #[arg(long)]
    model: Option<String>,
}

#[tokio::main]
async fn main() {
    let _ = dotenv::dotenv();
    init_tracing();

    let args = Args::parse();
    if let Err(e) = run(args).await {
        tracing::error!("[FATAL] Research failed: {:#}", e);
        eprintln!("Error during research: {:#}", e);
        std::process::exit(1);
    }
}

async fn run(args: Args) -> Result<()> {
    let mut config = ResearchConfig::from_env();
    if let Some(model) = args.model {
        config.model = model;
    }
    if let Some(output) = args.output {
        config.output_file = output;
    }
    if config.has_placeholder_key() {
        println!("Warning: ANTHROPIC_API_KEY environment variable not set.");
        println!("Using placeholder value; every model step will fall back to defaults.");
    }

    let agent = ResearchAgent::from_config(&config);
    let request = ResearchRequest::new(args.query)
        .with_depth(args.depth)
        .with_time_limit(args.time_limit);

    println!("Starting research process...");
    let run = agent.conduct_research(&request).await?;
    let report = &run.report;

    println!("\n{}", "=".repeat(50));
    println!("Research Report: {}", report.title);
    println!("{}", "=".repeat(50));
    println!("\nExecutive Summary:");
    println!("{}", report.executive_summary);
    println!("\nKey Findings:");
    println!("{}", preview(&report.key_findings, 500));
    println!("\nConclusion:");
    println!("{}", report.conclusion);
    println!("\n{}", "=".repeat(50));

    let degraded = run.context.degraded_steps();
    if !degraded.is_empty() {
        println!("Degraded steps: {:?}", degraded);
    }
    println!(
        "Documents: {}  Findings: {}  Time: {:.2}s",
        report.metadata.document_count,
        report.metadata.finding_count,
        run.elapsed.as_secs_f64()
    );

    write_report(&config.output_file, report)?;
    println!("\nFull research report saved to {}", config.output_file.display());
    Ok(())
}

fn preview(text: &str, limit: usize) -> String {
    if text.chars().count() > limit {
        let mut cut: String = text.chars().take(limit).collect();
        cut.push_str("...");
        cut
    } else {
        text.to_string()
    }
}
