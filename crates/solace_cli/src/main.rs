use clap::{Parser, Subcommand};
use rustyline::error::ReadlineError;
use rustyline::DefaultEditor;
use solace_core::{KeywordSentiment, SentimentAnalyzer, SolaceConfig};
use solace_memory::MemoryStore;
use solace_reasoning::{Engine, EngineConfig};
use std::path::PathBuf;
use tracing::{debug, info, warn};
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Path to the TOML config file
    #[arg(short, long, env = "SOLACE_CONFIG", default_value = "solace.toml")]
    config: PathBuf,

    /// Emit logs as JSON lines
    #[arg(long)]
    log_json: bool,

    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand, Debug, Clone, Copy, PartialEq, Eq)]
enum Command {
    /// Talk in the terminal (default)
    Chat,
    /// Serve the HTTP API
    Serve,
}

fn init_tracing(json: bool) {
    // Replies go to stdout; keep logs out of the way.
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let builder = tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(filter);
    if json {
        builder.json().init();
    } else {
        builder.init();
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenv::dotenv().ok();
    let args = Args::parse();
    init_tracing(args.log_json);

    let config = SolaceConfig::load_or_default(&args.config);
    info!(bot = %config.persona.name, "Initializing Solace...");

    match args.command.unwrap_or(Command::Chat) {
        Command::Chat => chat(&config).await,
        Command::Serve => serve(&config).await,
    }
}

async fn chat(config: &SolaceConfig) -> anyhow::Result<()> {
    let mut engine = Engine::new(EngineConfig::from(config))?;
    let store = MemoryStore::new(&config.memory.path);
    // Never save over a document we could not read.
    let mut persist = true;
    match store.load_into(engine.memory_mut()).await {
        Ok(true) => {}
        Ok(false) => info!(path = %store.path().display(), "Starting with fresh memory"),
        Err(e) => {
            warn!("Could not load memory, starting fresh: {}", e);
            if let Err(e) = store.quarantine().await {
                warn!("Could not set the memory file aside, this session will not be saved: {}", e);
                persist = false;
            }
        }
    }

    let analyzer = KeywordSentiment;
    let name = engine.name().to_string();
    println!("{} is ready to listen.", name);
    println!("Try: 'I feel sad', 'tips', 'breathe', 'affirmation', etc.\n");

    let mut rl = DefaultEditor::new()?;
    loop {
        let line = match rl.readline("You: ") {
            Ok(line) => line,
            Err(ReadlineError::Interrupted | ReadlineError::Eof) => {
                println!("\n{}: Take care!", name);
                break;
            }
            Err(e) => {
                warn!("Input error: {}", e);
                println!("\n{}: Take care!", name);
                break;
            }
        };

        let text = line.trim();
        if text.is_empty() {
            continue;
        }
        if let Err(e) = rl.add_history_entry(text) {
            debug!("Could not record line history: {}", e);
        }

        if text.eq_ignore_ascii_case("exit") || text.eq_ignore_ascii_case("quit") {
            println!("{}: {}", name, engine.respond("bye", None));
            break;
        }

        let sentiment = analyzer.analyze(text).label;
        let reply = engine.respond(text, Some(sentiment));
        println!("{} {}: {}\n", name, engine.mood_state().emoji(), reply);
    }

    if persist {
        if let Err(e) = store.save(engine.memory()).await {
            warn!("Failed to save memory: {}", e);
        }
    }
    Ok(())
}

#[cfg(feature = "gateway")]
async fn serve(config: &SolaceConfig) -> anyhow::Result<()> {
    use solace_core::Lexicons;
    use solace_gateway::GatewayServer;
    use solace_reasoning::SessionStore;
    use std::sync::Arc;

    let sessions = Arc::new(SessionStore::with_capacity(
        Lexicons::shared()?,
        EngineConfig::from(config),
        config.gateway.max_sessions,
    ));
    GatewayServer::new(
        sessions,
        Arc::new(KeywordSentiment),
        &config.gateway.host,
        config.gateway.port,
    )
    .serve()
    .await
}

#[cfg(not(feature = "gateway"))]
async fn serve(_config: &SolaceConfig) -> anyhow::Result<()> {
    anyhow::bail!("this build has no HTTP gateway; rebuild with --features gateway")
}
