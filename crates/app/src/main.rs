use std::io::IsTerminal;
use std::sync::Arc;

use anyhow::Context;
use clap::Parser;
use quiz_core::Clock;
use services::{QuizService, SeedOutcome};
use session::{LineChannel, SessionEnd, Style};
use storage::repository::Storage;
use tokio::io::BufReader;
use tokio::net::TcpListener;
use tracing_subscriber::EnvFilter;

mod config;

use config::{Cli, Commands};

fn init_tracing(default_directive: &str) {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_directive));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

async fn open_service(db_url: &str) -> anyhow::Result<QuizService> {
    let db_url = config::normalize_sqlite_url(db_url);
    config::prepare_sqlite_file(&db_url)?;
    let storage = Storage::sqlite(&db_url)
        .await
        .with_context(|| format!("opening {db_url}"))?;
    tracing::info!(%db_url, "store ready");
    Ok(QuizService::new(Clock::default(), Arc::clone(&storage.quizzes)))
}

async fn run(cli: Cli) -> anyhow::Result<()> {
    let command = cli.command();
    let service = open_service(&cli.db_url).await?;

    match command {
        Commands::Serve { addr } => {
            service.seed_defaults(false).await?;
            let listener = TcpListener::bind(&addr)
                .await
                .with_context(|| format!("binding {addr}"))?;
            let style = if cli.no_color {
                Style::plain()
            } else {
                Style::colored()
            };
            let shutdown = async {
                if let Err(err) = tokio::signal::ctrl_c().await {
                    tracing::error!(%err, "cannot listen for ctrl-c");
                    std::future::pending::<()>().await;
                }
            };
            session::serve(listener, service, style, shutdown).await?;
        }
        Commands::Local => {
            service.seed_defaults(false).await?;
            let interactive = std::io::stdin().is_terminal() && std::io::stdout().is_terminal();
            let style = if cli.no_color || !std::io::stdout().is_terminal() {
                Style::plain()
            } else {
                Style::colored()
            };
            let channel = LineChannel::new(
                BufReader::new(tokio::io::stdin()),
                tokio::io::stdout(),
                style,
                interactive,
            );
            match session::run_session(channel, &service).await? {
                SessionEnd::Quit => tracing::debug!("local session quit"),
                SessionEnd::Disconnected => tracing::debug!("stdin closed"),
                SessionEnd::LineTooLong => tracing::warn!("input line too long, session closed"),
            }
        }
        Commands::Seed { force } => match service.seed_defaults(force).await? {
            SeedOutcome::Inserted(n) => println!("inserted {n} quizzes"),
            SeedOutcome::SkippedNotEmpty(n) => {
                println!("store already has {n} quizzes; use --force to add the defaults anyway");
            }
        },
    }

    Ok(())
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();
    init_tracing(match cli.command() {
        Commands::Local => "warn",
        _ => "info",
    });

    if let Err(err) = run(cli).await {
        eprintln!("{err:#}");
        std::process::exit(2);
    }
}
