use std::io::{self, Read};

use actix_web::{App, HttpServer, web};
use clap::{Parser, Subcommand};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use promptsmith::api;
use promptsmith::app::AppState;
use promptsmith::model::{Config, Prompt};

#[derive(Parser)]
#[command(
    name = "promptsmith",
    about = "Score prompt clarity and suggest rewrites",
    version
)]
struct Cli {
    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand)]
enum Command {
    /// Start the HTTP server (default)
    Serve,
    /// Analyze prompts from files and print the result as JSON
    Analyze {
        /// File paths to analyze (reads stdin if none provided)
        files: Vec<String>,
        /// Skip the generative model and use local fallback content
        #[arg(long)]
        offline: bool,
    },
}

#[tokio::main]
async fn main() -> io::Result<()> {
    // Load .env file if present (ignore if missing)
    let _ = dotenvy::dotenv();

    // Logs go to stderr so `analyze` output stays valid JSON
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(io::stderr))
        .init();

    let cli = Cli::parse();
    let config = Config::from_env();

    match cli.command.unwrap_or(Command::Serve) {
        Command::Serve => serve(config).await,
        Command::Analyze { files, offline } => analyze(config, files, offline).await,
    }
}

async fn serve(config: Config) -> io::Result<()> {
    let bind_addr = config.bind_addr();
    let state = AppState::new(&config).map_err(io::Error::other)?;
    let analysis_service = web::Data::from(state.analysis_service);

    tracing::info!("Starting PromptSmith server on {}", bind_addr);

    HttpServer::new(move || {
        App::new()
            .app_data(analysis_service.clone())
            .configure(api::configure)
    })
    .bind(&bind_addr)?
    .run()
    .await
}

async fn analyze(config: Config, files: Vec<String>, offline: bool) -> io::Result<()> {
    let state = if offline {
        AppState::offline()
    } else {
        AppState::new(&config).map_err(io::Error::other)?
    };

    let inputs = if files.is_empty() {
        let mut input = String::new();
        io::stdin().read_to_string(&mut input)?;
        vec![("<stdin>".to_string(), input)]
    } else {
        files
            .into_iter()
            .map(|path| {
                let text = std::fs::read_to_string(&path).map_err(|e| {
                    io::Error::new(e.kind(), format!("Error reading {path}: {e}"))
                })?;
                Ok((path, text))
            })
            .collect::<io::Result<Vec<_>>>()?
    };

    for (source, text) in inputs {
        let prompt = Prompt::new(&text)
            .map_err(|e| io::Error::new(io::ErrorKind::InvalidInput, format!("{source}: {e}")))?;

        let result = state.analysis_service.analyze(&prompt).await;
        let rendered = serde_json::to_string_pretty(&result).map_err(io::Error::other)?;
        println!("{rendered}");
    }

    Ok(())
}
