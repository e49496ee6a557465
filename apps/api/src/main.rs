use std::net::SocketAddr;

use anyhow::Context;
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use recipe_api::api::{router, AppState};
use recipe_api::config::Config;
use recipe_api::domain::user::{NewUser, UserManager};
use recipe_api::infrastructure::database;
use recipe_api::infrastructure::repositories::PostgresUserRepository;

/// Recipe API server
#[derive(Parser)]
#[command(name = "recipe-api")]
#[command(about = "Per-user recipe, tag and ingredient REST API", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Apply migrations and start the HTTP server
    Serve {
        /// Listen address (overrides BIND_ADDR)
        #[arg(long)]
        bind: Option<SocketAddr>,
    },
    /// Run database migrations
    Migrate,
    /// Create an account with staff and superuser rights
    CreateSuperuser {
        #[arg(long)]
        email: String,
        #[arg(long, env = "SUPERUSER_PASSWORD", hide_env_values = true)]
        password: String,
        #[arg(long, default_value = "")]
        name: String,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("recipe_api=info,tower_http=info")),
        )
        .init();

    let cli = Cli::parse();
    let config = Config::from_env().context("invalid configuration")?;

    match cli.command {
        Commands::Serve { bind } => serve(config, bind).await,
        Commands::Migrate => {
            let pool = database::connect(&config).await?;
            database::migrate(&pool).await?;
            Ok(())
        }
        Commands::CreateSuperuser {
            email,
            password,
            name,
        } => {
            let pool = database::connect(&config).await?;
            let manager = UserManager::new(std::sync::Arc::new(PostgresUserRepository::new(pool)));
            let user = manager
                .create_superuser(&email, &password, NewUser::named(name))
                .await?;
            tracing::info!(user_id = %user.id, email = %user.email, "superuser created");
            Ok(())
        }
    }
}

async fn serve(config: Config, bind: Option<SocketAddr>) -> anyhow::Result<()> {
    let pool = database::connect(&config)
        .await
        .context("failed to connect to database")?;
    database::migrate(&pool).await?;

    let app = router(AppState::postgres(pool, config.auth.clone()));

    let addr = bind.unwrap_or(config.bind_addr);
    tracing::info!("Server listening on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("failed to bind {}", addr))?;

    axum::serve(listener, app).await.context("server failed")?;
    Ok(())
}
