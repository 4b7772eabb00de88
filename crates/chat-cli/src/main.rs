use std::sync::Arc;

use anyhow::Context;
use clap::{Parser, Subcommand};
use colored::Colorize;

use answer_client::{AnswerClient, AnsweringService};
use chat_core::Config;
use chat_render::{ChatView, RevealRate};
use chat_session::ChatSession;

mod logging;
mod printer;
mod repl;

use logging::init_logging;
use printer::TranscriptPrinter;

#[derive(Parser)]
#[command(name = "legalmind")]
#[command(about = "Ask questions about your indexed legal documents")]
#[command(version)]
struct Cli {
    /// Answering service base URL (overrides config and LEGALMIND_API_BASE)
    #[arg(long)]
    server_url: Option<String>,

    /// Characters revealed per second when typing answers
    #[arg(long)]
    reveal_rate: Option<u32>,

    /// Show answers immediately instead of typing them out
    #[arg(long, default_value = "false")]
    no_typing: bool,

    /// Enable debug logging
    #[arg(long, short, default_value = "false")]
    debug: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Start interactive chat
    Chat,
    /// Ask a single question
    Ask {
        /// Question text
        question: String,
    },
    /// Check that the answering service is reachable
    Health,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_logging(cli.debug);

    let mut config = Config::load();
    if let Some(server_url) = cli.server_url {
        config.api_base = server_url;
    }
    if let Some(rate) = cli.reveal_rate {
        config.reveal_rate = rate;
    }
    if cli.no_typing {
        config.typing_effect = false;
    }
    tracing::debug!("Configuration: {:?}", config);

    let rate = RevealRate::new(config.reveal_rate).context("invalid reveal rate")?;
    let client: Arc<dyn AnsweringService> = Arc::new(
        AnswerClient::new(&config).context("failed to create answering service client")?,
    );
    let view = ChatView::new(rate, config.typing_effect);

    match cli.command {
        Commands::Chat => repl::run_interactive_chat(client, view).await,
        Commands::Ask { question } => ask_once(client.as_ref(), view, &question).await,
        Commands::Health => check_health(client.as_ref(), &config.api_base).await,
    }
}

async fn ask_once(
    client: &dyn AnsweringService,
    mut view: ChatView,
    question: &str,
) -> anyhow::Result<()> {
    let mut session = ChatSession::new();
    let mut printer = TranscriptPrinter::default();

    printer.print_thinking();
    let placeholder = session
        .ask(client, question)
        .await
        .context("question not accepted")?;

    view.sync(session.messages());
    if let Some(message) = session.message(placeholder) {
        printer.print_answer(&view, message);
    }
    while let Some(update) = view.next_update().await {
        printer.print_update(&update, session.message(update.id));
    }
    Ok(())
}

async fn check_health(client: &dyn AnsweringService, api_base: &str) -> anyhow::Result<()> {
    match client.health().await {
        Ok(status) if status.is_ok() => {
            println!("{}", format!("✅ {} is up", api_base).green());
            Ok(())
        }
        Ok(status) => {
            println!(
                "{}",
                format!("⚠️  {} reported status {:?}", api_base, status.status).yellow()
            );
            Ok(())
        }
        Err(e) => {
            println!("{}", format!("❌ {} is unreachable: {}", api_base, e).red());
            Err(e.into())
        }
    }
}
