//! Longbox CLI tools.
//!
//! Operational commands that run against the same database as the server:
//!
//! - `migrate` applies pending schema migrations
//! - `user create` provisions an account without going through the API

#![cfg_attr(not(test), forbid(unsafe_code))]

use clap::{Parser, Subcommand};

mod commands;

#[derive(Parser)]
#[command(name = "longbox-cli")]
#[command(about = "Longbox management CLI", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run pending database migrations
    Migrate,
    /// User management
    User {
        #[command(subcommand)]
        action: UserAction,
    },
}

#[derive(Subcommand)]
enum UserAction {
    /// Create a user account
    Create {
        /// Email address (must be unique)
        #[arg(long)]
        email: String,
        /// Plaintext password, hashed before storage
        #[arg(long)]
        password: String,
        /// Optional display name
        #[arg(long)]
        name: Option<String>,
    },
}

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt::init();

    if let Err(e) = run().await {
        tracing::error!("{e}");
        std::process::exit(1);
    }
}

async fn run() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Migrate => commands::migrate::run().await?,
        Commands::User { action } => match action {
            UserAction::Create {
                email,
                password,
                name,
            } => commands::user::create(&email, &password, name.as_deref()).await?,
        },
    }

    Ok(())
}
