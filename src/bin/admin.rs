//! CLI administration tool for ilm-portal.
//!
//! Manages accounts and roles, shows content statistics and runs database
//! diagnostics without going through the web interface.
//!
//! # Usage
//!
//! ```bash
//! # Create the first admin account
//! cargo run --bin admin -- user create --role admin
//!
//! # List accounts
//! cargo run --bin admin -- user list
//!
//! # Promote a scholar
//! cargo run --bin admin -- user role aisha ulama
//!
//! # View statistics
//! cargo run --bin admin -- stats
//!
//! # Check database connection
//! cargo run --bin admin -- db check
//! ```
//!
//! # Environment Variables
//!
//! Same as the server: `DATABASE_URL` (or `DB_*`) and `SESSION_SECRET`,
//! which keys the password digests.

use ilm_portal::application::services::AuthService;
use ilm_portal::config::{self, mask_connection_string};
use ilm_portal::domain::entities::Role;
use ilm_portal::domain::repositories::UserRepository;
use ilm_portal::infrastructure::persistence::PgUserRepository;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use colored::*;
use dialoguer::{Confirm, Input};
use sqlx::PgPool;
use std::sync::Arc;

/// CLI tool for managing ilm-portal.
#[derive(Parser)]
#[command(name = "admin")]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

/// Top-level command groups.
#[derive(Subcommand)]
enum Commands {
    /// Manage user accounts
    User {
        #[command(subcommand)]
        action: UserAction,
    },

    /// Show content statistics
    Stats,

    /// Database operations
    Db {
        #[command(subcommand)]
        action: DbAction,
    },
}

/// Account management subcommands.
#[derive(Subcommand)]
enum UserAction {
    /// Create an account
    Create {
        #[arg(short, long)]
        username: Option<String>,

        #[arg(short, long)]
        email: Option<String>,

        /// Role: user, ulama or admin
        #[arg(short, long, default_value = "user")]
        role: String,

        /// Password (generated and printed once if omitted)
        #[arg(short, long)]
        password: Option<String>,

        /// Skip confirmation prompt
        #[arg(short = 'y', long)]
        yes: bool,
    },

    /// List all accounts
    List,

    /// Change an account's role
    Role {
        username: String,

        /// New role: user, ulama or admin
        role: String,
    },
}

/// Database operation subcommands.
#[derive(Subcommand)]
enum DbAction {
    /// Check database connection
    Check,

    /// Show database info
    Info,
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    let cli = Cli::parse();
    let config = config::load_from_env().context("Invalid configuration")?;

    let pool = PgPool::connect(&config.database_url)
        .await
        .context("Failed to connect to database")?;

    match cli.command {
        Commands::User { action } => {
            let users = Arc::new(PgUserRepository::new(Arc::new(pool.clone())));
            let auth = AuthService::new(
                users.clone(),
                config.session_secret.clone(),
                config.session_ttl_seconds,
            );
            handle_user_action(action, users, &auth).await?
        }
        Commands::Stats => handle_stats(&pool).await?,
        Commands::Db { action } => {
            handle_db_action(action, &pool, &mask_connection_string(&config.database_url)).await?
        }
    }

    Ok(())
}

/// Dispatches account commands.
async fn handle_user_action(
    action: UserAction,
    users: Arc<PgUserRepository>,
    auth: &AuthService,
) -> Result<()> {
    match action {
        UserAction::Create {
            username,
            email,
            role,
            password,
            yes,
        } => create_user(auth, username, email, &role, password, yes).await,
        UserAction::List => list_users(users).await,
        UserAction::Role { username, role } => change_role(users, &username, &role).await,
    }
}

fn parse_role(raw: &str) -> Result<Role> {
    raw.parse::<Role>().map_err(|e| anyhow::anyhow!(e))
}

/// Creates an account with interactive prompts for missing fields.
///
/// When no password is given, a random one is generated and shown once.
async fn create_user(
    auth: &AuthService,
    username: Option<String>,
    email: Option<String>,
    role: &str,
    password: Option<String>,
    skip_confirm: bool,
) -> Result<()> {
    println!("{}", "👤 Create account".bright_blue().bold());
    println!();

    let role = parse_role(role)?;

    let username = match username {
        Some(u) => u,
        None => Input::new().with_prompt("Username").interact_text()?,
    };
    let email = match email {
        Some(e) => e,
        None => Input::new().with_prompt("Email").interact_text()?,
    };

    let (password, generated) = match password {
        Some(p) => (p, false),
        None => (generate_password(), true),
    };

    println!();
    println!("{}", "Account details:".bright_white().bold());
    println!("  Username: {}", username.cyan());
    println!("  Email:    {}", email.cyan());
    println!("  Role:     {}", role.as_str().cyan());
    if generated {
        println!("  Password: {}", password.bright_yellow().bold());
        println!();
        println!(
            "{}",
            "⚠️  Save this password now. It is not stored in readable form."
                .red()
                .bold()
        );
    }
    println!();

    if !skip_confirm {
        let confirmed = Confirm::new()
            .with_prompt("Create this account?")
            .default(true)
            .interact()?;

        if !confirmed {
            println!("{}", "❌ Cancelled".red());
            return Ok(());
        }
    }

    let user = auth
        .register(&username, &email, &password, role)
        .await
        .map_err(|e| anyhow::anyhow!("Failed to create account: {}", e))?;

    println!();
    println!(
        "{} (id {})",
        "✅ Account created".green().bold(),
        user.id.to_string().bright_white()
    );
    println!();

    Ok(())
}

/// Lists all accounts.
///
/// ```text
/// 📋 Accounts
///
///   ID  Username              Role     Created
///   ──────────────────────────────────────────────────────
///   1   admin                 admin    2025-01-15 10:30
/// ```
async fn list_users(users: Arc<PgUserRepository>) -> Result<()> {
    println!("{}", "📋 Accounts".bright_blue().bold());
    println!();

    let accounts = users
        .list()
        .await
        .map_err(|e| anyhow::anyhow!("Failed to list accounts: {}", e))?;

    if accounts.is_empty() {
        println!("{}", "  No accounts found".yellow());
        println!();
        println!(
            "  Create one with: {} admin user create --role admin",
            "cargo run --bin".bright_cyan()
        );
        return Ok(());
    }

    println!(
        "  {:<4} {:<22} {:<8} {}",
        "ID".bright_white().bold(),
        "Username".bright_white().bold(),
        "Role".bright_white().bold(),
        "Created".bright_white().bold()
    );
    println!("  {}", "─".repeat(56).bright_black());

    for user in &accounts {
        let role = match user.role {
            Role::Admin => user.role.as_str().red(),
            Role::Ulama => user.role.as_str().green(),
            Role::User => user.role.as_str().normal(),
        };

        println!(
            "  {:<4} {:<22} {:<8} {}",
            user.id.to_string().bright_black(),
            user.username.cyan(),
            role,
            user.created_at
                .format("%Y-%m-%d %H:%M")
                .to_string()
                .bright_black()
        );
    }

    println!();
    println!(
        "  Total: {}",
        accounts.len().to_string().bright_white().bold()
    );
    println!();

    Ok(())
}

/// Changes an account's role after confirmation.
async fn change_role(users: Arc<PgUserRepository>, username: &str, role: &str) -> Result<()> {
    let role = parse_role(role)?;

    let user = users
        .find_by_username(username)
        .await
        .map_err(|e| anyhow::anyhow!("Database error: {}", e))?
        .context("Account not found")?;

    if user.role == role {
        println!(
            "{}",
            format!("⚠️  {} already has role {}", user.username, role).yellow()
        );
        return Ok(());
    }

    println!(
        "  {}: {} → {}",
        user.username.cyan(),
        user.role.as_str().bright_black(),
        role.as_str().bright_white().bold()
    );

    let confirmed = Confirm::new()
        .with_prompt("Change this role?")
        .default(false)
        .interact()?;

    if !confirmed {
        println!("{}", "❌ Cancelled".red());
        return Ok(());
    }

    users
        .update_role(user.id, role)
        .await
        .map_err(|e| anyhow::anyhow!("Failed to update role: {}", e))?;

    println!("{}", "✅ Role updated".green().bold());
    Ok(())
}

/// Displays content statistics.
async fn handle_stats(pool: &PgPool) -> Result<()> {
    println!("{}", "📊 Statistics".bright_blue().bold());
    println!();

    for (label, sql) in [
        ("Users", "SELECT COUNT(*) FROM users"),
        ("Events", "SELECT COUNT(*) FROM events"),
        ("Hadiths", "SELECT COUNT(*) FROM hadiths"),
        ("Badges", "SELECT COUNT(*) FROM badges"),
        ("Bookmarks", "SELECT COUNT(*) FROM bookmarks"),
        ("Ayahs", "SELECT COUNT(*) FROM quran_ayahs"),
    ] {
        let count: i64 = sqlx::query_scalar(sql).fetch_one(pool).await?;
        println!(
            "  {:<10} {}",
            format!("{label}:"),
            count.to_string().bright_green().bold()
        );
    }
    println!();

    Ok(())
}

/// Handles database diagnostic commands.
async fn handle_db_action(action: DbAction, pool: &PgPool, masked_url: &str) -> Result<()> {
    match action {
        DbAction::Check => {
            println!("{}", "🔍 Checking database connection...".bright_blue());

            sqlx::query("SELECT 1").fetch_one(pool).await?;

            println!("{}", "✅ Database connection OK".green().bold());
        }
        DbAction::Info => {
            println!("{}", "ℹ️  Database Information".bright_blue().bold());
            println!();

            let version: String = sqlx::query_scalar("SELECT version()")
                .fetch_one(pool)
                .await?;
            let migrations: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM _sqlx_migrations")
                .fetch_one(pool)
                .await
                .unwrap_or(0);

            println!("  URL:        {}", masked_url.bright_white());
            println!("  PostgreSQL: {}", version.bright_white());
            println!("  Migrations: {}", migrations.to_string().bright_white());
            println!();
        }
    }

    Ok(())
}

/// Generates a random 20-character password from an unambiguous alphabet.
fn generate_password() -> String {
    use rand::Rng;
    const CHARSET: &[u8] = b"ABCDEFGHJKLMNPQRSTUVWXYZabcdefghijkmnpqrstuvwxyz23456789";
    const PASSWORD_LEN: usize = 20;

    let mut rng = rand::rng();

    (0..PASSWORD_LEN)
        .map(|_| {
            let idx = rng.random_range(0..CHARSET.len());
            CHARSET[idx] as char
        })
        .collect()
}
