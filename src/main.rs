use anyhow::{Context, Result};
use clap::Parser;
use pagelens_core::{
    Fetcher, HeuristicConfig, OpenAiReporter, PageSignals, ReportGenerator, analyze_url,
    generate_report,
};
use serde::Serialize;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

/// Fetch a product or landing page and print its conversion signals as JSON
#[derive(Debug, Parser)]
#[command(name = "pagelens", version, about)]
struct Cli {
    /// Page to analyze (http or https)
    url: String,

    /// Ask the LLM for a CRO report on top of the heuristics
    #[arg(short, long)]
    report: bool,

    /// Print single-line JSON instead of pretty output
    #[arg(short, long)]
    compact: bool,

    /// Credential for the report; without it the report is skipped
    #[arg(long, env = "OPENAI_API_KEY", hide_env_values = true)]
    api_key: Option<String>,

    /// Chat model used for the report
    #[arg(long, env = "OPENAI_MODEL")]
    model: Option<String>,

    /// Smallest amount accepted as a product price
    #[arg(long, default_value_t = HeuristicConfig::default().min_price)]
    min_price: f64,
}

#[derive(Serialize)]
struct Output {
    url: String,
    heuristics: PageSignals,
    #[serde(skip_serializing_if = "Option::is_none")]
    llm_report: Option<String>,
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "pagelens=warn,pagelens_core=warn".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let cli = Cli::parse();
    let output = run(&cli).await?;

    let json = if cli.compact {
        serde_json::to_string(&output)
    } else {
        serde_json::to_string_pretty(&output)
    }
    .context("failed to serialize analysis")?;

    println!("{json}");
    Ok(())
}

async fn run(cli: &Cli) -> Result<Output> {
    let config = HeuristicConfig {
        min_price: cli.min_price,
        ..HeuristicConfig::default()
    };

    let fetcher = Fetcher::new().context("failed to build HTTP client")?;
    let url = cli.url.trim().to_string();
    let heuristics = analyze_url(&fetcher, &url, &config)
        .await
        .with_context(|| format!("failed to analyze {url}"))?;

    let llm_report = if cli.report {
        let reporter = build_reporter(cli)?;
        let generator = reporter.as_ref().map(|r| r as &dyn ReportGenerator);
        let outcome = generate_report(generator, &heuristics).await;
        Some(outcome.into_text())
    } else {
        None
    };

    Ok(Output {
        url,
        heuristics,
        llm_report,
    })
}

fn build_reporter(cli: &Cli) -> Result<Option<OpenAiReporter>> {
    let Some(api_key) = cli.api_key.as_deref().filter(|key| !key.trim().is_empty()) else {
        tracing::warn!("OPENAI_API_KEY not set, skipping the LLM report");
        return Ok(None);
    };

    let mut reporter = OpenAiReporter::new(api_key).context("failed to build LLM client")?;
    if let Some(model) = &cli.model {
        reporter = reporter.with_model(model.clone());
    }
    Ok(Some(reporter))
}
