//! CLI administration tool for todo-api.
//!
//! Provides commands for bootstrapping accounts, managing API tokens and
//! checking the database without going through the HTTP API.
//!
//! # Usage
//!
//! ```bash
//! # Create the first (superuser) account
//! cargo run --bin admin -- user create --superuser
//!
//! # List accounts
//! cargo run --bin admin -- user list
//!
//! # Issue a token for an account
//! cargo run --bin admin -- token create alice
//!
//! # List and revoke tokens
//! cargo run --bin admin -- token list
//! cargo run --bin admin -- token revoke 3
//!
//! # Check database connection
//! cargo run --bin admin -- db check
//! ```
//!
//! # Environment Variables
//!
//! - `DATABASE_URL` or `DB_*` components (required): PostgreSQL connection
//! - `TOKEN_SIGNING_SECRET` (required for `token create`): must match the server

use todo_api::application::services::{AuthService, UserInput, UserService};
use todo_api::config::Config;
use todo_api::domain::repositories::{TokenRepository, UserRepository};
use todo_api::infrastructure::persistence::{
    PgGroupRepository, PgTokenRepository, PgUserRepository,
};

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use colored::*;
use dialoguer::{Confirm, Input, Password};
use sqlx::PgPool;
use std::sync::Arc;

/// CLI tool for managing todo-api.
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

    /// Manage API tokens
    Token {
        #[command(subcommand)]
        action: TokenAction,
    },

    /// Database operations
    Db {
        #[command(subcommand)]
        action: DbAction,
    },
}

/// User management subcommands.
#[derive(Subcommand)]
enum UserAction {
    /// Create a user account
    Create {
        /// Username (prompted if omitted)
        #[arg(short, long)]
        username: Option<String>,

        /// Email address
        #[arg(short, long)]
        email: Option<String>,

        /// Grant staff and superuser flags
        #[arg(long)]
        superuser: bool,
    },

    /// List all users
    List,
}

/// Token management subcommands.
#[derive(Subcommand)]
enum TokenAction {
    /// Issue a new API token for a user
    Create {
        /// Owner of the token
        username: String,

        /// Skip confirmation prompt
        #[arg(short = 'y', long)]
        yes: bool,
    },

    /// List all tokens
    List,

    /// Revoke a token
    Revoke {
        /// Token ID to revoke
        id: i64,
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

    let database_url = Config::load_database_url()?;

    let pool = PgPool::connect(&database_url)
        .await
        .context("Failed to connect to database")?;
    let pool = Arc::new(pool);

    match cli.command {
        Commands::User { action } => handle_user_action(action, pool).await?,
        Commands::Token { action } => handle_token_action(action, pool).await?,
        Commands::Db { action } => handle_db_action(action, &pool).await?,
    }

    Ok(())
}

/// Dispatches user management commands.
async fn handle_user_action(action: UserAction, pool: Arc<PgPool>) -> Result<()> {
    let users = Arc::new(PgUserRepository::new(pool.clone()));
    let groups = Arc::new(PgGroupRepository::new(pool));
    let service = UserService::new(users.clone(), groups);

    match action {
        UserAction::Create {
            username,
            email,
            superuser,
        } => create_user(&service, username, email, superuser).await?,
        UserAction::List => list_users(users).await?,
    }

    Ok(())
}

/// Creates an account with an interactive password prompt.
async fn create_user(
    service: &UserService<PgUserRepository, PgGroupRepository>,
    username: Option<String>,
    email: Option<String>,
    superuser: bool,
) -> Result<()> {
    println!("{}", "👤 Create User".bright_blue().bold());
    println!();

    let username = match username {
        Some(u) => u,
        None => Input::new().with_prompt("Username").interact_text()?,
    };

    let password = Password::new()
        .with_prompt("Password")
        .with_confirmation("Repeat password", "Passwords do not match")
        .interact()?;

    let input = UserInput {
        username,
        password,
        first_name: String::new(),
        last_name: String::new(),
        email: email.unwrap_or_default(),
        is_staff: superuser,
        is_active: true,
        is_superuser: superuser,
        groups: Vec::new(),
    };

    let user = service
        .create_user(input)
        .await
        .map_err(|e| anyhow::anyhow!("Failed to create user: {}", e))?;

    println!();
    println!("{}", "✅ User created successfully!".green().bold());
    println!("  ID:        {}", user.id.to_string().bright_black());
    println!("  Username:  {}", user.username.cyan());
    if user.is_superuser {
        println!("  Role:      {}", "superuser".bright_yellow());
    }
    println!();

    Ok(())
}

/// Lists accounts, most recently joined first.
async fn list_users(repo: Arc<PgUserRepository>) -> Result<()> {
    println!("{}", "📋 Users".bright_blue().bold());
    println!();

    let users = repo
        .list()
        .await
        .map_err(|e| anyhow::anyhow!("Failed to list users: {}", e))?;

    if users.is_empty() {
        println!("{}", "  No users found".yellow());
        println!();
        println!(
            "  Create one with: {} admin user create --superuser",
            "cargo run --bin".bright_cyan()
        );
        return Ok(());
    }

    println!(
        "  {:<5} {:<20} {:<25} {:<20} {:<10}",
        "ID".bright_white().bold(),
        "Username".bright_white().bold(),
        "Name".bright_white().bold(),
        "Joined".bright_white().bold(),
        "Status".bright_white().bold()
    );
    println!("  {}", "─".repeat(90).bright_black());

    for user in &users {
        let status = if !user.is_active {
            "INACTIVE".red()
        } else if user.is_superuser {
            "SUPERUSER".bright_yellow()
        } else {
            "ACTIVE".green()
        };

        println!(
            "  {:<5} {:<20} {:<25} {:<20} {}",
            user.id.to_string().bright_black(),
            user.username.cyan(),
            user.full_name(),
            user.date_joined
                .format("%Y-%m-%d %H:%M")
                .to_string()
                .bright_black(),
            status
        );
    }

    println!();
    println!("  Total: {}", users.len().to_string().bright_white().bold());
    println!();

    Ok(())
}

/// Dispatches token management commands.
async fn handle_token_action(action: TokenAction, pool: Arc<PgPool>) -> Result<()> {
    let tokens = Arc::new(PgTokenRepository::new(pool.clone()));
    let users = Arc::new(PgUserRepository::new(pool));

    match action {
        TokenAction::Create { username, yes } => {
            let secret = std::env::var("TOKEN_SIGNING_SECRET")
                .context("TOKEN_SIGNING_SECRET must be set")?;
            let auth = AuthService::new(tokens, users.clone(), secret);
            create_token(&auth, users, username, yes).await?;
        }
        TokenAction::List => list_tokens(tokens, users).await?,
        TokenAction::Revoke { id } => revoke_token(tokens, id).await?,
    }

    Ok(())
}

/// Issues a token for `username` after confirmation.
///
/// # Security
///
/// - Only the HMAC-SHA256 hash is stored in the database
/// - Raw token is displayed once and cannot be retrieved later
async fn create_token(
    auth: &AuthService<PgTokenRepository, PgUserRepository>,
    users: Arc<PgUserRepository>,
    username: String,
    skip_confirm: bool,
) -> Result<()> {
    println!("{}", "🔑 Create API Token".bright_blue().bold());
    println!();

    let user = users
        .find_by_username(&username)
        .await
        .map_err(|e| anyhow::anyhow!("Database error: {}", e))?
        .context("User not found")?;

    if !user.is_active {
        println!(
            "{}",
            "⚠️  This account is inactive; its tokens will be rejected".yellow()
        );
    }

    println!("  User: {}", user.username.cyan());
    println!();

    if !skip_confirm {
        let confirmed = Confirm::new()
            .with_prompt("Issue a token for this user?")
            .default(true)
            .interact()?;

        if !confirmed {
            println!("{}", "❌ Cancelled".red());
            return Ok(());
        }
    }

    let (token, record) = auth
        .issue_token(user.id)
        .await
        .map_err(|e| anyhow::anyhow!("Failed to create token: {}", e))?;

    println!();
    println!("{}", "✅ Token created successfully!".green().bold());
    println!("  ID:    {}", record.id.to_string().bright_black());
    println!("  Token: {}", token.bright_yellow().bold());
    println!();
    println!(
        "{}",
        "⚠️  IMPORTANT: Save this token now! You won't be able to see it again."
            .red()
            .bold()
    );
    println!();
    println!("{}", "Example:".bright_white());
    println!(
        "  curl -H \"Authorization: Bearer {}\" http://localhost:8000/general/users/",
        token.bright_yellow()
    );
    println!();

    Ok(())
}

/// Lists all API tokens with their owners and status.
async fn list_tokens(tokens: Arc<PgTokenRepository>, users: Arc<PgUserRepository>) -> Result<()> {
    println!("{}", "📋 API Tokens".bright_blue().bold());
    println!();

    let records = tokens
        .list_tokens()
        .await
        .map_err(|e| anyhow::anyhow!("Failed to list tokens: {}", e))?;

    if records.is_empty() {
        println!("{}", "  No tokens found".yellow());
        return Ok(());
    }

    println!(
        "  {:<5} {:<25} {:<20} {:<20} {:<10}",
        "ID".bright_white().bold(),
        "User".bright_white().bold(),
        "Created".bright_white().bold(),
        "Last used".bright_white().bold(),
        "Status".bright_white().bold()
    );
    println!("  {}", "─".repeat(85).bright_black());

    for token in &records {
        let owner = users
            .find_by_id(token.user_id)
            .await
            .map_err(|e| anyhow::anyhow!("Database error: {}", e))?
            .map(|u| u.username)
            .unwrap_or_else(|| format!("#{}", token.user_id));

        let status = if token.is_revoked() {
            "REVOKED".red()
        } else {
            "ACTIVE".green()
        };

        let last_used = token
            .last_used_at
            .map(|t| t.format("%Y-%m-%d %H:%M").to_string())
            .unwrap_or_else(|| "never".to_string());

        println!(
            "  {:<5} {:<25} {:<20} {:<20} {}",
            token.id.to_string().bright_black(),
            owner.cyan(),
            token
                .created_at
                .format("%Y-%m-%d %H:%M")
                .to_string()
                .bright_black(),
            last_used.bright_black(),
            status
        );
    }

    println!();
    println!(
        "  Total: {}",
        records.len().to_string().bright_white().bold()
    );
    println!();

    Ok(())
}

/// Revokes a token by ID with confirmation prompt (default: No).
async fn revoke_token(repo: Arc<PgTokenRepository>, id: i64) -> Result<()> {
    println!("{}", "🔒 Revoke API Token".bright_blue().bold());
    println!();

    let confirmed = Confirm::new()
        .with_prompt(format!("Revoke token {id}?"))
        .default(false)
        .interact()?;

    if !confirmed {
        println!("{}", "❌ Cancelled".red());
        return Ok(());
    }

    let revoked = repo
        .revoke_token(id)
        .await
        .map_err(|e| anyhow::anyhow!("Failed to revoke token: {}", e))?;

    println!();
    if revoked {
        println!("{}", "✅ Token revoked successfully!".green().bold());
    } else {
        println!("{}", "⚠️  Token not found or already revoked".yellow());
    }
    println!();

    Ok(())
}

/// Handles database diagnostic commands.
async fn handle_db_action(action: DbAction, pool: &PgPool) -> Result<()> {
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

            let todos: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM todos")
                .fetch_one(pool)
                .await?;

            let users: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM auth_user")
                .fetch_one(pool)
                .await?;

            let tokens: i64 =
                sqlx::query_scalar("SELECT COUNT(*) FROM api_tokens WHERE revoked_at IS NULL")
                    .fetch_one(pool)
                    .await?;

            println!("  PostgreSQL:    {}", version.bright_white());
            println!("  Todos:         {}", todos.to_string().bright_green().bold());
            println!("  Users:         {}", users.to_string().bright_green().bold());
            println!("  Active tokens: {}", tokens.to_string().bright_green().bold());
            println!();
        }
    }

    Ok(())
}
