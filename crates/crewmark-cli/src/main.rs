use clap::{Parser, Subcommand};
use crewmark_core::config::Config;
use crewmark_crews::PipelineRunner;
use crewmark_server::{McpServer, PipelineDispatcher};
use crewmark_tools::{register_marketing_tools, OutputLayout, ToolRegistry};
use std::sync::Arc;
use tracing::info;
use tracing_subscriber::EnvFilter;

const RESULT_PREVIEW_CHARS: usize = 2000;

#[derive(Parser)]
#[command(
    name = "crewmark",
    about = "Crewmark — AI-powered marketing automation",
    after_help = "\
Examples:
  # Daily content creation
  crewmark content --niche \"AI tools for developers\"

  # SEO article generation
  crewmark seo --topic \"best AI marketing tools 2026\" --articles 5

  # Email nurture sequence
  crewmark email --product \"MarketBot\" --value \"AI marketing on autopilot\"

  # Analytics report
  crewmark analytics

  # Full pipeline
  crewmark full --niche \"AI tools\" --product \"MarketBot\" --value \"AI marketing\"

  # Remote MCP server
  crewmark serve --port 8080"
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Daily content creation + scheduling
    Content {
        /// Target niche
        #[arg(long)]
        niche: String,
    },
    /// SEO keyword research + article generation
    Seo {
        /// Topic for articles
        #[arg(long)]
        topic: String,
        /// Number of articles
        #[arg(long, default_value_t = crewmark_crews::DEFAULT_SEO_ARTICLES)]
        articles: u32,
    },
    /// Email nurture sequence generation
    Email {
        /// Product name
        #[arg(long)]
        product: String,
        /// Value proposition
        #[arg(long, default_value = "")]
        value: String,
    },
    /// Daily analytics review
    Analytics,
    /// Run the full marketing pipeline
    Full {
        /// Target niche
        #[arg(long)]
        niche: String,
        /// Product name
        #[arg(long)]
        product: String,
        /// Value proposition
        #[arg(long, default_value = "")]
        value: String,
    },
    /// Start the remote MCP server
    Serve {
        /// Port to listen on (overrides PORT)
        #[arg(short, long)]
        port: Option<u16>,
    },
    /// Manage tool bindings
    Tools {
        #[command(subcommand)]
        action: ToolsAction,
    },
}

#[derive(Subcommand)]
enum ToolsAction {
    /// List registered tool bindings
    List,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let cli = Cli::parse();
    let config = Config::from_env()?;

    let layout = Arc::new(OutputLayout::new(config.output_dir.clone()));
    let mut registry = ToolRegistry::new();
    register_marketing_tools(&mut registry, &config, layout)?;
    info!(count = registry.tool_count(), "Tool bindings registered");

    if let Commands::Tools {
        action: ToolsAction::List,
    } = &cli.command
    {
        let mut descriptors = registry.list_descriptors();
        descriptors.sort_by(|a, b| a.name.cmp(&b.name));
        println!("Registered tools:");
        for descriptor in &descriptors {
            println!("  {} — {}", descriptor.name, descriptor.description);
        }
        println!("\nTotal: {} tool(s)", descriptors.len());
        return Ok(());
    }

    let port = config.port;
    let runner = PipelineRunner::new(config, Arc::new(registry));

    let result = match cli.command {
        Commands::Content { niche } => {
            info!(niche = %niche, "Running content pipeline");
            runner.run_daily_content(&niche).await?
        }
        Commands::Seo { topic, articles } => {
            info!(topic = %topic, "Running SEO pipeline");
            runner.run_seo(&topic, articles).await?
        }
        Commands::Email { product, value } => {
            info!(product = %product, "Creating email sequence");
            runner.run_email(&product, &value).await?
        }
        Commands::Analytics => {
            info!("Running analytics review");
            runner.run_analytics().await?
        }
        Commands::Full {
            niche,
            product,
            value,
        } => {
            info!(niche = %niche, product = %product, "Running full pipeline");
            runner.run_full(&niche, &product, &value).await?
        }
        Commands::Serve { port: override_port } => {
            let port = override_port.unwrap_or(port);
            let app = McpServer::build(Arc::new(runner));

            let addr = format!("0.0.0.0:{port}");
            let listener = tokio::net::TcpListener::bind(&addr).await?;
            info!(
                addr = %addr,
                tools = ?PipelineDispatcher::tool_names(),
                "Crewmark MCP server (SSE) listening"
            );
            axum::serve(listener, app).await?;
            return Ok(());
        }
        Commands::Tools { .. } => unreachable!("handled above"),
    };

    println!("\n=== Result ===\n");
    let preview: String = result.chars().take(RESULT_PREVIEW_CHARS).collect();
    println!("{preview}");
    if result.chars().count() > RESULT_PREVIEW_CHARS {
        println!("\n[... truncated]");
    }

    Ok(())
}
