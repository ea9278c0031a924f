/// Listeners Club Server - record-listening club REST backend
use clap::{Parser, Subcommand};
use club_core::{storage::StorageContext, CreateUser, Role};
use club_server::{
    api::{self, auth::MIN_PASSWORD_LENGTH},
    config::ServerConfig,
    services::AuthService,
    state::AppState,
};
use club_storage::Database;
use std::{net::SocketAddr, path::PathBuf, sync::Arc};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser)]
#[command(name = "club-server")]
#[command(about = "Listeners Club REST backend", long_about = None)]
struct Cli {
    /// Configuration file path
    #[arg(short, long, global = true, env = "CLUB_CONFIG")]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Start the HTTP server
    Serve,
    /// Create a new account
    AddUser {
        /// Username
        #[arg(short, long)]
        username: String,
        /// Email address used to log in
        #[arg(short, long)]
        email: String,
        /// Password
        #[arg(short, long)]
        password: String,
        /// Grant the administrator role
        #[arg(long)]
        admin: bool,
    },
    /// List all accounts
    ListUsers,
    /// Renumber the club catalog to 1..N
    FixEntryNumbers,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "club_server=info,club_storage=info,tower_http=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let cli = Cli::parse();
    let config = ServerConfig::load_from(cli.config.as_deref())?;

    match cli.command {
        Commands::Serve => serve(config).await?,
        Commands::AddUser {
            username,
            email,
            password,
            admin,
        } => add_user(&config, username, email, &password, admin).await?,
        Commands::ListUsers => list_users(&config).await?,
        Commands::FixEntryNumbers => fix_entry_numbers(&config).await?,
    }

    Ok(())
}

async fn serve(config: ServerConfig) -> anyhow::Result<()> {
    config.validate()?;

    tracing::info!("Starting Listeners Club server");
    tracing::info!("Host: {}", config.server.host);
    tracing::info!("Port: {}", config.server.port);

    let db = Arc::new(open_database(&config).await?);
    tracing::info!("Database connected");

    let auth_service = Arc::new(auth_service(&config));
    tracing::info!("Auth service initialized");

    let app_state = AppState::new(db, auth_service);
    let app = api::create_router(app_state, &config.cors.allowed_origins);

    let addr = SocketAddr::from((
        config.server.host.parse::<std::net::IpAddr>()?,
        config.server.port,
    ));

    tracing::info!("Server listening on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

async fn add_user(
    config: &ServerConfig,
    username: String,
    email: String,
    password: &str,
    admin: bool,
) -> anyhow::Result<()> {
    if password.chars().count() < MIN_PASSWORD_LENGTH {
        anyhow::bail!("Password must be at least {MIN_PASSWORD_LENGTH} characters");
    }

    let db = open_database(config).await?;
    let password_hash = auth_service(config).hash_password(password)?;
    let role = if admin { Role::Admin } else { Role::User };

    let user = db
        .create_user(CreateUser {
            username,
            email,
            password_hash,
            role,
        })
        .await?;

    println!(
        "✓ Created {} '{}' <{}> (ID: {})",
        user.role.as_str(),
        user.username,
        user.email,
        user.id
    );
    Ok(())
}

async fn list_users(config: &ServerConfig) -> anyhow::Result<()> {
    let db = open_database(config).await?;
    let users = db.get_all_users().await?;

    if users.is_empty() {
        println!("No users found");
        return Ok(());
    }

    println!("Users:");
    for user in users {
        println!(
            "  {} - {} <{}> [{}] registered {}",
            user.id,
            user.username,
            user.email,
            user.role.as_str(),
            user.date_registered
        );
    }
    Ok(())
}

async fn fix_entry_numbers(config: &ServerConfig) -> anyhow::Result<()> {
    let db = open_database(config).await?;
    let albums = db.fix_entry_numbers().await?;

    println!("✓ Entry numbers repaired ({} albums)", albums.len());
    for album in albums {
        println!(
            "  #{} {} - {}",
            album.club_entry_number, album.artist, album.title
        );
    }
    Ok(())
}

async fn open_database(config: &ServerConfig) -> anyhow::Result<Database> {
    ensure_database_dir(&config.storage.database_url).await?;
    Ok(Database::open(&config.storage.database_url).await?)
}

/// Create the parent directory of a file-backed database
async fn ensure_database_dir(database_url: &str) -> anyhow::Result<()> {
    let Some(path) = database_url
        .strip_prefix("sqlite://")
        .or_else(|| database_url.strip_prefix("sqlite:"))
    else {
        return Ok(());
    };

    let path = path.split('?').next().unwrap_or_default();
    if path.is_empty() || path == ":memory:" {
        return Ok(());
    }

    if let Some(parent) = std::path::Path::new(path).parent() {
        if !parent.as_os_str().is_empty() {
            tokio::fs::create_dir_all(parent).await?;
        }
    }
    Ok(())
}

fn auth_service(config: &ServerConfig) -> AuthService {
    AuthService::new(
        config.auth.jwt_secret.clone(),
        config.auth.jwt_expiration_hours,
        config.auth.jwt_refresh_expiration_days,
    )
    .with_cost(config.auth.bcrypt_cost)
}
