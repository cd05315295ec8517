use std::io;
use std::path::PathBuf;
use std::sync::Arc;

use clap::{Args, Parser, Subcommand};
use tokio::io::BufReader;

use ragchat::cli::{self, CliError, parse_question};
use ragchat::config::ClientConfig;
use ragchat::net::{HttpRagClient, RagService};
use ragchat::session::Session;
use ragchat::terminal::{HELP, TerminalRenderer};

#[derive(Parser, Debug)]
#[command(name = "ragchat", about = "Chat with a PDF through a RAG service")]
struct Cli {
    /// Overrides RAG_BASE_URL.
    #[arg(long, env = "RAG_BASE_URL")]
    base_url: Option<String>,

    /// Overrides RAG_REQUEST_TIMEOUT_SECS.
    #[arg(long)]
    timeout_secs: Option<u64>,

    /// Log request lifecycle to stderr.
    #[arg(long, short, default_value_t = false)]
    verbose: bool,

    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Interactive chat (default).
    Chat,
    /// Index one PDF, ask the given questions in order, print the transcript.
    Ask(AskArgs),
}

#[derive(Args, Debug)]
struct AskArgs {
    #[arg(long)]
    file: PathBuf,

    #[arg(required = true, value_parser = parse_question)]
    questions: Vec<String>,
}

#[tokio::main]
async fn main() -> Result<(), CliError> {
    if let Err(e) = dotenvy::dotenv() {
        if !e.not_found() {
            eprintln!("warning: could not load .env: {e}");
        }
    }

    let opts = Cli::parse();
    let level = if opts.verbose { tracing::Level::DEBUG } else { tracing::Level::WARN };
    tracing_subscriber::fmt()
        .with_max_level(level)
        .with_writer(io::stderr)
        .init();

    let mut config = ClientConfig::from_env()?;
    if let Some(base_url) = &opts.base_url {
        config = config.with_base_url(base_url)?;
    }
    if let Some(secs) = opts.timeout_secs {
        config = config.with_request_timeout(secs)?;
    }
    tracing::info!(base_url = %config.base_url, "ragchat starting");

    let service: Arc<dyn RagService> = Arc::new(HttpRagClient::new(&config)?);
    let (mut session, mut completions) = Session::new(service);
    let mut renderer = TerminalRenderer::new();
    session.subscribe(move |view| {
        if let Err(e) = renderer.render(view, &mut io::stdout()) {
            tracing::warn!(error = %e, "failed to render view");
        }
    });

    match opts.command.unwrap_or(Command::Chat) {
        Command::Chat => {
            println!("ragchat: connected to {}", config.base_url);
            println!("{HELP}");
            let stdin = BufReader::new(tokio::io::stdin());
            cli::run_chat(&mut session, &mut completions, stdin, &mut io::stdout()).await
        }
        Command::Ask(args) => {
            cli::run_ask(&mut session, &mut completions, &args.file, &args.questions, &mut io::stdout()).await
        }
    }
}
