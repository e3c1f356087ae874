use std::sync::Arc;

use clap::{Parser, Subcommand};

mod application;
mod domain;
mod infrastructure;

use application::bundles;
use application::errors::{BotError, RouterError};
use application::messaging::{CommandParser, Router};
use domain::entities::User;
use domain::traits::Bot;
use infrastructure::adapters::console::ConsoleAdapter;
use infrastructure::adapters::telegram::{self, TelegramAdapter};
use infrastructure::api::{
    self, CoinGeckoClient, HttpFunClient, HuggingFaceClient, OpenWeatherClient, TextGen,
};
use infrastructure::config::Config;
use infrastructure::storage::JsonStore;

/// Telegram long-poll window in seconds
const POLL_TIMEOUT_SECS: i64 = 30;

#[derive(Parser)]
#[command(name = "utilbot")]
#[command(about = "A multi-utility chat bot", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Bot token (overrides TELEGRAM_TOKEN)
    #[arg(short, long)]
    token: Option<String>,
}

#[derive(Subcommand)]
enum Commands {
    /// Start the bot against Telegram
    Run,
    /// Run with the console adapter (dev mode)
    Console,
    /// Show version
    Version,
}

fn main() {
    dotenvy::dotenv().ok();

    // Initialize logging
    tracing_subscriber::fmt()
        .with_target(false)
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::INFO.into()),
        )
        .init();

    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Run => run_bot(cli.token),
        Commands::Console => run_console(),
        Commands::Version => {
            println!("utilbot v{}", env!("CARGO_PKG_VERSION"));
            Ok(())
        }
    };

    if let Err(e) = result {
        tracing::error!("startup failed: {}", e);
        std::process::exit(1);
    }
}

fn run_bot(token_override: Option<String>) -> Result<(), BotError> {
    let mut config = Config::from_env()?;
    if let Some(token) = token_override {
        config.telegram_token = Some(token);
    }
    // The platform credential is the only fatal configuration error
    let token = config.require_telegram_token()?.to_string();

    let rt = tokio::runtime::Runtime::new().map_err(|e| BotError::Network(e.to_string()))?;
    rt.block_on(run_telegram(config, token))
}

fn run_console() -> Result<(), BotError> {
    let config = Config::from_env()?;
    let rt = tokio::runtime::Runtime::new().map_err(|e| BotError::Network(e.to_string()))?;
    rt.block_on(console_loop(config))
}

/// Build the routing table: shared HTTP client, typed API clients, bundles.
/// Bundle collisions surface here, before any invocation is accepted.
fn build_router(config: &Config, http: reqwest::Client) -> Result<Router, RouterError> {
    let fun = Arc::new(HttpFunClient::new(http.clone()));
    let weather = Arc::new(OpenWeatherClient::new(
        http.clone(),
        config.openweather_api_key.clone(),
    ));
    let crypto = Arc::new(CoinGeckoClient::new(
        http.clone(),
        config.coingecko_api_key.clone(),
    ));
    let textgen: Option<Arc<dyn TextGen>> = config.huggingface_api_key.clone().map(|key| {
        Arc::new(HuggingFaceClient::new(
            http,
            key,
            config.huggingface_model.as_deref(),
        )) as Arc<dyn TextGen>
    });
    if textgen.is_none() {
        tracing::warn!("HUGGINGFACE_API_KEY not set, /ask runs in echo mode");
    }

    let mut router = Router::new();
    router.register(bundles::core::bundle())?;
    router.register(bundles::fun::bundle(fun))?;
    router.register(bundles::utilities::bundle(weather, crypto))?;
    router.register(bundles::ai::bundle(textgen))?;
    Ok(router)
}

async fn startup(config: &Config) -> Result<(Arc<Router>, CommandParser, reqwest::Client), BotError> {
    tracing::info!(
        "configured optional APIs: {:?}",
        config.configured_services()
    );

    // Placeholder store for future todo/notes commands; nothing reads it yet
    let _store = JsonStore::open(&config.store_path).await?;

    let http = api::http_client(config.request_timeout)
        .map_err(|e| BotError::Network(e.to_string()))?;
    let router = Arc::new(build_router(config, http.clone())?);
    tracing::info!("routing table ready with {} commands", router.len());

    let parser = CommandParser::new(config.command_prefix.as_str());
    Ok((router, parser, http))
}

async fn run_telegram(config: Config, token: String) -> Result<(), BotError> {
    let (router, parser, http) = startup(&config).await?;
    let bot = Arc::new(TelegramAdapter::new(token, http));

    let info = bot.fetch_bot_info().await?;
    tracing::info!("Bot started: {} (@{}, id {})", info.name, info.username, info.id);

    if let Err(e) = bot.register_commands(&router.command_list()).await {
        tracing::warn!("failed to publish command menu: {}", e);
    }

    let mut offset = 0;
    loop {
        let updates = match bot.get_updates(offset, POLL_TIMEOUT_SECS).await {
            Ok(updates) => updates,
            Err(e) => {
                tracing::warn!("getUpdates failed: {}", e);
                tokio::time::sleep(std::time::Duration::from_secs(2)).await;
                continue;
            }
        };
        offset = telegram::next_offset(offset, &updates);

        for update in updates {
            let Some(message) = update.message else {
                continue;
            };
            let Some(text) = message.text else {
                continue;
            };

            let user = message
                .from
                .map(|u| {
                    let name = u
                        .first_name
                        .or(u.username)
                        .unwrap_or_else(|| "friend".to_string());
                    User::new(u.id.to_string(), name)
                })
                .unwrap_or_else(User::anonymous);

            let Some(invocation) = parser.parse(message.chat.id.to_string(), &text, user)
            else {
                continue; // plain text, platform default is silence
            };

            // Each invocation runs as its own task so a slow remote call
            // never blocks the polling loop
            let router = router.clone();
            let bot = bot.clone();
            tokio::spawn(async move {
                let chat_id = invocation.chat_id.clone();
                let command = invocation.command.clone();
                match router.dispatch(invocation).await {
                    Some(reply) => {
                        if let Err(e) = bot.deliver(&chat_id, &reply).await {
                            tracing::error!(command = %command, "reply delivery failed: {}", e);
                        }
                    }
                    None => tracing::debug!(command = %command, "unknown command ignored"),
                }
            });
        }
    }
}

async fn console_loop(config: Config) -> Result<(), BotError> {
    let (router, parser, _http) = startup(&config).await?;
    let bot = ConsoleAdapter::new();

    println!("utilbot console, type commands like /help (exit to quit)");
    loop {
        let Some(line) = bot.read_line("> ").await else {
            break;
        };
        if line == "exit" || line == "quit" {
            break;
        }

        let Some(invocation) = parser.parse("console", &line, User::anonymous()) else {
            continue;
        };
        match router.dispatch(invocation).await {
            Some(reply) => bot.deliver("console", &reply).await?,
            None => tracing::debug!("unknown command ignored"),
        }
    }
    Ok(())
}
