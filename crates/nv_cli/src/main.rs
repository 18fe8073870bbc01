use std::net::SocketAddr;
use std::path::PathBuf;
use std::sync::Arc;
use anyhow::Context;
use clap::Parser;
use tracing::info;
use nv_inference::InferenceConfig;
use nv_narration::{AudioOutput, NarrationConfig};
use nv_pipeline::{Pipeline, PipelineConfig};
use nv_sources::SourceConfig;

mod duration;
mod logging;

use duration::HumanDuration;

#[derive(Parser)]
#[command(author, version, about = "News sentiment reports with spoken summaries", long_about = None)]
pub struct Cli {
    #[arg(long, env = "NEWSAPI_KEY", hide_env_values = true, global = true)]
    news_api_key: Option<String>,
    #[arg(long, env = "HF_API_TOKEN", hide_env_values = true, global = true)]
    hf_token: Option<String>,
    #[arg(long, default_value = "newsapi", global = true, help = "Search backend. Available backends: newsapi (default), fixture")]
    search: String,
    #[arg(long, global = true, help = "JSON file of articles served by the fixture backend")]
    fixture: Option<PathBuf>,
    #[arg(long, default_value = "huggingface", global = true, help = "Sentiment model. Available models: huggingface (default), lexicon")]
    sentiment_model: String,
    #[arg(long, default_value = "huggingface", global = true, help = "Embedding model for topics. Available models: huggingface (default), hashing")]
    embedding_model: String,
    #[arg(long, default_value = "google", global = true, help = "Translator. Available translators: google (default), offline")]
    translator: String,
    #[arg(long, default_value = "google", global = true, help = "Speech synthesizer. Available synthesizers: google (default), offline")]
    synthesizer: String,
    #[arg(long, default_value = nv_narration::DEFAULT_LANGUAGE, global = true)]
    language: String,
    #[arg(long, default_value_t = 5, global = true, help = "Key phrases kept per article")]
    top_n: usize,
    #[arg(long, default_value_t = nv_pipeline::DEFAULT_CONCURRENCY, global = true)]
    concurrency: usize,
    #[arg(long, default_value = "30s", global = true, help = "Timeout for every external call, e.g. 30s or 1m30s")]
    timeout: HumanDuration,
    #[arg(short, long, global = true)]
    verbose: bool,
    #[command(subcommand)]
    command: Commands,
}

#[derive(clap::Subcommand, Debug)]
enum Commands {
    /// Analyse news coverage of a company and print the JSON report
    Analyze {
        entity: String,
        #[arg(long, help = "Write the report to this file instead of stdout")]
        output: Option<PathBuf>,
        #[arg(long, help = "Print the report on a single line")]
        compact: bool,
        #[arg(long, default_value = "output.mp3", help = "Where the spoken summary is written")]
        audio: PathBuf,
    },
    /// Serve the HTTP API and the interactive form
    Serve {
        #[arg(long, default_value = "127.0.0.1:8000")]
        addr: SocketAddr,
        #[arg(long, default_value = "audio", help = "Directory for generated audio files")]
        audio_dir: PathBuf,
    },
}

impl Cli {
    fn pipeline_config(&self, output: AudioOutput) -> PipelineConfig {
        PipelineConfig {
            source: SourceConfig {
                backend: self.search.clone(),
                api_key: self.news_api_key.clone(),
                fixture_path: self.fixture.clone(),
                ..SourceConfig::default()
            },
            inference: InferenceConfig {
                sentiment_backend: self.sentiment_model.clone(),
                embedding_backend: self.embedding_model.clone(),
                api_token: self.hf_token.clone(),
                top_n: self.top_n,
                ..InferenceConfig::default()
            },
            narration: NarrationConfig {
                translator: self.translator.clone(),
                synthesizer: self.synthesizer.clone(),
                target_language: self.language.clone(),
                output,
                ..NarrationConfig::default()
            },
            concurrency: self.concurrency,
            ..PipelineConfig::default()
        }
        .with_timeout(self.timeout.0)
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    logging::init_logging(cli.verbose);

    match &cli.command {
        Commands::Analyze {
            entity,
            output,
            compact,
            audio,
        } => {
            let config = cli.pipeline_config(AudioOutput::File(audio.clone()));
            let pipeline = Pipeline::from_config(&config).context("Failed to set up the analysis pipeline")?;
            info!("🧠 Pipeline ready ({} search, {} sentiment)", cli.search, cli.sentiment_model);

            let result = pipeline.run(entity).await?;
            let report = if *compact {
                serde_json::to_string(&result)?
            } else {
                serde_json::to_string_pretty(&result)?
            };

            match output {
                Some(path) => {
                    std::fs::write(path, report)
                        .with_context(|| format!("Failed to write report to {}", path.display()))?;
                    info!("📄 Report written to {}", path.display());
                }
                None => println!("{}", report),
            }
        }
        Commands::Serve { addr, audio_dir } => {
            std::fs::create_dir_all(audio_dir)
                .with_context(|| format!("Failed to create audio directory {}", audio_dir.display()))?;
            let config = cli.pipeline_config(AudioOutput::Directory(audio_dir.clone()));
            let pipeline = Pipeline::from_config(&config).context("Failed to set up the analysis pipeline")?;

            let state = nv_web::AppState::new(Arc::new(pipeline), audio_dir.clone());
            let app = nv_web::create_app(state).await;

            let listener = tokio::net::TcpListener::bind(addr)
                .await
                .with_context(|| format!("Failed to bind {}", addr))?;
            info!("🌍 Listening on http://{}", addr);
            axum::serve(listener, app).await?;
        }
    }

    Ok(())
}
