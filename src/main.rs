use std::sync::Arc;

use clap::Parser;
use tokio::io::{self, AsyncBufReadExt};
use tracing::info;
use tracing_subscriber::EnvFilter;

use vitalog::config::{Settings, DEFAULT_DATABASE_PATH, DEFAULT_TIMEZONE};
use vitalog::console::ConsoleTransport;
use vitalog::error::Result;
use vitalog::jobs::{EveningCheckinJob, HydrationReminderJob};
use vitalog::providers;
use vitalog::router::{Bot, Event, Inbound};
use vitalog::scheduler::Scheduler;

#[derive(Parser, Debug)]
#[command(name = "vitalog")]
#[command(about = "Conversational health tracker")]
struct Cli {
    /// Postgres connection string; when absent the embedded SQLite file is used.
    #[arg(long, env = "DATABASE_URL")]
    database_url: Option<String>,

    #[arg(long, env = "DATABASE_PATH", default_value = DEFAULT_DATABASE_PATH)]
    database_path: String,

    /// IANA timezone used for day boundaries and reminder hours.
    #[arg(long, env = "TIMEZONE", default_value = DEFAULT_TIMEZONE)]
    timezone: String,

    #[arg(long, env = "APP_ENV", default_value = "development")]
    app_env: String,

    #[arg(long, env = "ENABLE_DEBUG", default_value_t = false)]
    debug: bool,

    /// Chat identity for the local console session.
    #[arg(long, default_value_t = 1)]
    user_id: i64,

    #[arg(long, default_value = "console_user")]
    username: String,

    #[arg(long, default_value = "Console User")]
    full_name: String,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let default_filter = if cli.debug {
        "debug,vitalog=debug"
    } else {
        "info,vitalog=info"
    };
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_filter));
    tracing_subscriber::fmt().with_env_filter(filter).init();

    let settings = Settings::new(
        cli.database_url,
        cli.database_path,
        &cli.timezone,
        &cli.app_env,
        cli.debug,
    )?;
    info!(
        backend = if settings.use_postgres() { "postgres" } else { "sqlite" },
        timezone = %settings.timezone,
        "starting"
    );

    let repo = providers::connect(&settings).await?;
    let transport = Arc::new(ConsoleTransport::new());
    let bot = Bot::new(repo.clone(), transport.clone(), settings.timezone);

    let mut scheduler = Scheduler::new();
    scheduler.register_job(Arc::new(HydrationReminderJob::new(
        repo.clone(),
        transport.clone(),
        settings.timezone,
    )));
    scheduler.register_job(Arc::new(EveningCheckinJob::new(
        repo.clone(),
        transport.clone(),
        settings.timezone,
    )));
    scheduler.start();

    println!("Type /help for commands, :token to press a button, /quit to exit.");
    let stdin = io::BufReader::new(io::stdin());
    let mut lines = stdin.lines();
    while let Ok(Some(line)) = lines.next_line().await {
        let line = line.trim().to_string();
        if line.is_empty() {
            continue;
        }
        if line == "/quit" || line == "/exit" {
            break;
        }
        let event = if let Some(command) = line.strip_prefix('/') {
            Event::Command {
                name: command.split_whitespace().next().unwrap_or("").to_string(),
            }
        } else if let Some(action) = line.strip_prefix(':') {
            Event::Callback {
                message_id: transport.last_message_id(),
                action: action.to_string(),
            }
        } else {
            Event::Text(line)
        };
        bot.dispatch(Inbound {
            user_id: cli.user_id,
            username: cli.username.clone(),
            full_name: cli.full_name.clone(),
            event,
        })
        .await;
    }

    scheduler.stop().await;
    info!("bye");
    Ok(())
}
