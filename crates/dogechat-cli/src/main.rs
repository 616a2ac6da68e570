use std::io::IsTerminal;
use std::path::PathBuf;
use std::sync::Arc;

use clap::Parser;
use eyre::Result;
use tokio::io::{AsyncBufReadExt, BufReader};

use dogechat_chain::rpc::RpcBalanceSource;
use dogechat_chain::wallet::StaticWallet;
use dogechat_cli::commands::{Command, HELP};
use dogechat_cli::config;
use dogechat_cli::view::TerminalView;
use dogechat_completion::client::ProxyClient;
use dogechat_core::models::verification::VerificationStatus;
use dogechat_session::clock::SystemClock;
use dogechat_session::controller::{ChatController, Collaborators};
use dogechat_session::view::{ChatView, Sender};
use dogechat_storage::file::FileStore;
use dogechat_storage::store::KeyValueStore;
use dogechat_storage::theme::{load_theme, toggle_theme};

#[derive(Parser)]
#[command(name = "dogechat")]
#[command(about = "Chat with STFUDoge. Hold $STFU for unlimited messages.")]
#[command(version)]
struct Args {
    /// Path to the JSON config file
    #[arg(long, env = "DOGECHAT_CONFIG")]
    config: Option<PathBuf>,

    /// Chat endpoint of the proxy forwarder
    #[arg(long, env = "DOGECHAT_PROXY_URL")]
    proxy_url: Option<String>,

    /// Path to the client key/value store
    #[arg(long, env = "DOGECHAT_STORE")]
    store: Option<PathBuf>,

    /// Disable colored output
    #[arg(long)]
    no_color: bool,
}

#[tokio::main]
async fn main() -> Result<()> {
    color_eyre::install()?;

    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn")),
        )
        .init();

    let args = Args::parse();

    let config_path = match args.config {
        Some(path) => path,
        None => config::default_config_path()?,
    };
    let mut chat_config = config::load_config(&config_path)?;
    if let Some(proxy_url) = args.proxy_url {
        chat_config.proxy_url = proxy_url;
    }

    let store_path = match args.store {
        Some(path) => path,
        None => config::default_store_path()?,
    };
    let store: Arc<dyn KeyValueStore> = Arc::new(FileStore::open(&store_path)?);

    let backend = ProxyClient::new(chat_config.proxy_url.clone(), chat_config.reply_timeout())?;
    let balances = RpcBalanceSource::new(
        chat_config.chain.rpc_url.clone(),
        &chat_config.chain.token_address,
    )?;

    let colored = !args.no_color && std::io::stdout().is_terminal();
    let view = TerminalView::new(std::io::stdout(), load_theme(store.as_ref())?, colored);

    let chain = chat_config.chain.clone();
    let mut controller = ChatController::new(
        chat_config,
        Collaborators {
            store: store.clone(),
            clock: Arc::new(SystemClock),
            backend: Arc::new(backend),
            balances: Arc::new(balances),
        },
        view,
    )?;

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    loop {
        controller.view_mut().prompt();
        let Some(line) = lines.next_line().await? else {
            break;
        };

        match Command::parse(&line) {
            Command::Say(text) => {
                let outcome = controller.submit(&text).await?;
                tracing::debug!(?outcome, "submit finished");
            }
            Command::Connect(address) => {
                let wallet = StaticWallet::new(address, &chain);
                controller.connect_wallet(&wallet).await?;
            }
            Command::Theme => {
                let theme = toggle_theme(store.as_ref())?;
                controller.view_mut().set_theme(theme);
                controller
                    .view_mut()
                    .render(Sender::System, &format!("Theme set to {theme}."));
            }
            Command::Moon => {
                controller.view_mut().render(Sender::Bot, "much moon! wow!");
            }
            Command::Status => {
                let verification = match controller.verification() {
                    VerificationStatus::Verified { balance } => format!("verified ({balance})"),
                    VerificationStatus::Denied => "denied".to_string(),
                    VerificationStatus::Failed { reason } => format!("check failed: {reason}"),
                    VerificationStatus::Checking => "checking".to_string(),
                    VerificationStatus::Unchecked => "not checked".to_string(),
                };
                let wallet = controller
                    .wallet()
                    .map(|w| w.short_address())
                    .unwrap_or_else(|| "none".to_string());
                let remaining = controller.limiter().remaining()?;
                let text = format!(
                    "wallet: {wallet}, verification: {verification}, free messages left today: {remaining}"
                );
                controller.view_mut().render(Sender::System, &text);
            }
            Command::Help => {
                for line in HELP.lines() {
                    controller.view_mut().render(Sender::System, line);
                }
            }
            Command::Quit => break,
            Command::Unknown(name) => {
                controller.view_mut().render(
                    Sender::System,
                    &format!("Unknown command /{name}. Try /help."),
                );
            }
        }
    }

    Ok(())
}
