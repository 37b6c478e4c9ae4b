use clap::{Parser, Subcommand};
use helpline_bot::{BotConfig, Dispatcher, ExplorerClient, WorkerPool};
use helpline_channels::{ChatChannel, TelegramChannel};
use helpline_engine::TriggerScanner;
use helpline_relay::{AccessControl, RelayBridge};
use helpline_session::SessionStore;
use helpline_translate::{LibreTranslator, Passthrough, Translator};
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "helpline", about = "Helpline — conversational support orchestrator")]
struct Cli {
    /// Path to config file
    #[arg(short, long, default_value = "helpline.toml")]
    config: PathBuf,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Start the bot
    Serve,
}

/// How often the idle-session sweep runs when a TTL is configured.
const EVICTION_SWEEP_INTERVAL: Duration = Duration::from_secs(300);

/// How long a sender's worker task lingers without events before exiting.
const WORKER_IDLE_TIMEOUT: Duration = Duration::from_secs(600);

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load local .env when running locally.
    let _ = dotenvy::dotenv();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .json()
        .init();

    let cli = Cli::parse();
    let config = BotConfig::load(&cli.config)
        .map_err(|e| anyhow::anyhow!("refusing to start: {e}"))?;

    match cli.command {
        Commands::Serve => serve(config).await,
    }
}

async fn serve(config: BotConfig) -> anyhow::Result<()> {
    let mut telegram = TelegramChannel::new(config.telegram.bot_token.clone(), 256);
    let mut events = telegram
        .take_event_receiver()
        .ok_or_else(|| anyhow::anyhow!("event receiver already taken"))?;
    let channel: Arc<TelegramChannel> = Arc::new(telegram);

    let translator: Arc<dyn Translator> = match &config.translate.base_url {
        Some(base_url) => {
            info!(base_url = %base_url, "translation provider configured");
            Arc::new(LibreTranslator::new(
                base_url.clone(),
                config.translate.api_key.clone(),
            ))
        }
        None => {
            info!("no translation provider configured, using passthrough");
            Arc::new(Passthrough)
        }
    };

    let store = Arc::new(SessionStore::new());
    let access = Arc::new(AccessControl::new(
        config.telegram.operator_chat_id.clone(),
        config.support.passcode.clone(),
    ));
    let bridge = RelayBridge::new(
        Arc::clone(&store),
        Arc::clone(&translator),
        Arc::clone(&channel) as Arc<dyn ChatChannel>,
        Arc::clone(&access),
        config.telegram.operator_chat_id.clone(),
    );
    let scanner = TriggerScanner::new(&config.support.trigger_words);
    info!(keywords = scanner.keywords().len(), "trigger scanner configured");

    let explorer = ExplorerClient::new(
        config.explorer.base_url.clone(),
        config.explorer.api_key.clone(),
    );

    let dispatcher = Arc::new(Dispatcher::new(
        Arc::clone(&store),
        scanner,
        translator,
        Arc::clone(&channel) as Arc<dyn ChatChannel>,
        bridge,
        access,
        explorer,
        config.support.help_link.clone(),
    ));

    if let Some(ttl_secs) = config.session.idle_ttl_secs {
        let store = Arc::clone(&store);
        let max_idle = Duration::from_secs(ttl_secs);
        tokio::spawn(async move {
            let mut tick = tokio::time::interval(EVICTION_SWEEP_INTERVAL);
            loop {
                tick.tick().await;
                let removed = store.evict_idle(max_idle);
                if removed > 0 {
                    info!(removed, "idle sessions evicted");
                }
            }
        });
        info!(ttl_secs, "idle session eviction enabled");
    }

    // The long-poll loop only returns on transport errors; back off and
    // resume so a transient API failure does not stop the bot.
    let poller = Arc::clone(&channel);
    tokio::spawn(async move {
        loop {
            if let Err(e) = poller.poll_updates().await {
                error!(error = %e, "poll loop failed, retrying");
                tokio::time::sleep(Duration::from_secs(5)).await;
            }
        }
    });

    info!("Helpline bot started");

    let mut pool = WorkerPool::new(Arc::clone(&dispatcher), WORKER_IDLE_TIMEOUT);
    while let Some(event) = events.recv().await {
        pool.dispatch(event);
    }

    Ok(())
}
