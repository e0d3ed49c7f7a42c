mod pipeline;

use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;
use wellness_core::{AppConfig, DateRange};

use crate::pipeline::{
    build_generator, build_sources, collect_context, describe_artifacts, run_digest,
    DigestOptions, PipelineError, PipelineStage,
};

#[derive(Debug, Parser)]
#[command(name = "wellness-cli")]
#[command(about = "Weekly wellness digest from trends, social posts, forums and research")]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Collect every source, summarize with the model, and write HTML/PDF
    Digest {
        /// Research topic for the paper search (default: `WELLNESS_RESEARCH_TOPIC`)
        #[arg(long)]
        topic: Option<String>,
        /// Directory for the output files (default: `WELLNESS_OUTPUT_DIR`)
        #[arg(long)]
        output_dir: Option<PathBuf>,
        /// Write only the HTML digest
        #[arg(long)]
        skip_pdf: bool,
    },
    /// Collect every source and print the model context without calling the model
    Context {
        #[arg(long)]
        topic: Option<String>,
    },
}

impl Default for Commands {
    fn default() -> Self {
        Self::Digest {
            topic: None,
            output_dir: None,
            skip_pdf: false,
        }
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<ExitCode> {
    let cli = Cli::parse();

    let config = match wellness_core::load_app_config() {
        Ok(config) => config,
        Err(e) => {
            report(&PipelineError::new(PipelineStage::Config, e));
            return Ok(ExitCode::FAILURE);
        }
    };
    let env_filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(config.log_level.clone()))?;
    tracing_subscriber::fmt().with_env_filter(env_filter).init();

    let result = match cli.command.unwrap_or_default() {
        Commands::Digest {
            topic,
            output_dir,
            skip_pdf,
        } => digest(&config, topic, output_dir, skip_pdf).await,
        Commands::Context { topic } => context(&config, topic).await,
    };

    match result {
        Ok(()) => Ok(ExitCode::SUCCESS),
        Err(e) => {
            report(&e);
            Ok(ExitCode::FAILURE)
        }
    }
}

async fn digest(
    config: &AppConfig,
    topic: Option<String>,
    output_dir: Option<PathBuf>,
    skip_pdf: bool,
) -> Result<(), PipelineError> {
    println!("Wellness Timeline Assistant");

    // Model key first: no point querying every source without it.
    let generator = build_generator(config)?;
    let sources = build_sources(config)?;
    let range = DateRange::resolve_last_week();
    let options = DigestOptions {
        topic: topic.unwrap_or_else(|| config.research_topic.clone()),
        output_dir: output_dir.unwrap_or_else(|| config.output_dir.clone()),
        wkhtmltopdf_path: config.wkhtmltopdf_path.clone(),
        skip_pdf,
    };

    println!(
        "🔍 Generating wellness summary for {}...",
        range.describe()
    );
    let artifacts = run_digest(&sources, &generator, &range, &options).await?;
    println!(
        "✅ Wellness summary saved as {}.",
        describe_artifacts(&artifacts)
    );
    Ok(())
}

async fn context(config: &AppConfig, topic: Option<String>) -> Result<(), PipelineError> {
    let sources = build_sources(config)?;
    let range = DateRange::resolve_last_week();
    let topic = topic.unwrap_or_else(|| config.research_topic.clone());

    let context = collect_context(&sources, &range, &topic).await;
    println!("{context}");
    Ok(())
}

fn report(err: &PipelineError) {
    println!("❌ Error generating wellness digest: {err}");
    println!("⚠️ {}", err.hint());
}
