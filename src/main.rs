use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand};
use costdeck::config::{AppConfig, Backend, ConfigOverrides};
use tracing::{info, Level};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[clap(author, version, about)]
struct Cli {
    #[clap(short, long, global = true)]
    log_level: Option<String>,
    /// YAML configuration file
    #[clap(short, long, global = true)]
    config: Option<PathBuf>,
    #[clap(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run the HTTP server
    Serve {
        #[clap(short, long)]
        port: Option<u16>,
        #[clap(long)]
        cors_origin: Option<String>,
        /// live or demo
        #[clap(long)]
        backend: Option<Backend>,
    },
    /// Print the GraphQL schema in SDL
    Schema,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    let config = AppConfig::load_or_default(cli.config.as_deref())?;

    match cli.command {
        Commands::Serve {
            port,
            cors_origin,
            backend,
        } => {
            let config = config.apply_overrides(ConfigOverrides {
                port,
                cors_origin,
                backend,
                log_level: cli.log_level,
            });
            config.validate()?;
            setup_logging(config.log_level());

            info!("Starting server on port {}", config.server.port);
            costdeck::server::start_server(&config).await?;
        }
        Commands::Schema => {
            let services = costdeck::services::Services::demo();
            let schema = costdeck::graphql::build_schema(
                costdeck::graphql::GraphQLContext::from_services(&services),
            );
            println!("{}", schema.sdl());
        }
    }

    Ok(())
}

fn setup_logging(log_level: &str) {
    let log_level = match log_level.to_lowercase().as_str() {
        "trace" => Level::TRACE,
        "debug" => Level::DEBUG,
        "info" => Level::INFO,
        "warn" => Level::WARN,
        "error" => Level::ERROR,
        _ => Level::INFO,
    };

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::new(format!("hyper=off,{}", log_level)))
        .without_time()
        .init();
}
