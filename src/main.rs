use ayurrag::config::AppConfig;
use ayurrag::rag::RagService;
use ayurrag::Result;
use clap::Parser;
use clap::Subcommand;
use tracing::info;

#[derive(Parser)]
#[command(name = "ayurrag")]
#[command(about = "AyurRAG CLI tool for grounded Ayurvedic health Q&A")]
#[command(version)]
struct Cli {
    /// Enable verbose debug logging
    #[arg(short, long)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Ask a health question and print the grounded answer
    Ask {
        /// The question to answer
        question: String,
        /// Show the retrieved source documents
        #[arg(short, long)]
        sources: bool,
    },
    /// Show current configuration
    Config,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize logging
    if cli.verbose {
        ayurrag::logging::init_logging_with_level("debug")?;
    } else {
        ayurrag::logging::init_logging()?;
    }

    // Load configuration
    let config = AppConfig::load()?;
    info!("Configuration loaded successfully");

    match cli.command {
        Commands::Ask { question, sources } => {
            handle_ask_command(&config, &question, sources).await?;
        }
        Commands::Config => {
            handle_config_command(&config);
        }
    }

    Ok(())
}

async fn handle_ask_command(config: &AppConfig, question: &str, show_sources: bool) -> Result<()> {
    let service = RagService::new(config)?;

    println!("❓ {question}");
    println!();

    let answer = service.answer(question).await?;

    println!("{}", answer.text);

    if show_sources {
        println!();
        println!(
            "{}",
            service.context_assembler().create_summary(&answer.sources)
        );
    }

    Ok(())
}

fn handle_config_command(config: &AppConfig) {
    println!("📋 AyurRAG Configuration:");
    println!();

    println!("🗄️  Vector store:");
    let url = config.vector_store_url();
    if url.is_empty() {
        println!("  URL: (not configured - disconnected)");
    } else {
        println!("  URL: {url}");
    }
    println!(
        "  API key: {}",
        if config.vector_store.api_key.is_empty() {
            "(none)"
        } else {
            "***masked***"
        }
    );
    println!("  Collection: {}", config.collection_name());
    println!();

    println!("🧠 Embeddings:");
    println!("  Endpoint: {}", config.embedding_endpoint());
    println!("  Model: {}", config.embedding_model());
    println!();

    println!("💬 LLM:");
    println!("  Endpoint: {}", config.llm_endpoint());
    println!(
        "  Key: {}",
        if config.llm.llm_key.is_empty() {
            "(none)"
        } else {
            "***masked***"
        }
    );
    println!("  Model: {}", config.llm_model());
    println!();

    println!("📝 Logging:");
    println!("  Level: {}", config.log_level());
    println!("  Backtrace: {}", config.logging.backtrace);
}
