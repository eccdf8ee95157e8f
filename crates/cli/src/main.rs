//! Kabelindo CLI - database migrations and management tools.
//!
//! # Usage
//!
//! ```bash
//! # Run database migrations
//! kabelindo-cli migrate
//!
//! # Create a staff user (generates a password when -p is omitted)
//! kabelindo-cli staff create -u admin -e admin@kabelindo.id -r super_admin
//!
//! # Reset a staff user's password
//! kabelindo-cli staff set-password -u admin
//!
//! # Seed the catalog with sample data
//! kabelindo-cli seed
//! ```
//!
//! # Environment Variables
//!
//! - `KABELINDO_DATABASE_URL` - `PostgreSQL` connection string

#![cfg_attr(not(test), forbid(unsafe_code))]

use clap::{Parser, Subcommand};

mod commands;

#[derive(Parser)]
#[command(name = "kabelindo-cli")]
#[command(author, version, about = "Kabelindo CLI tools")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run database migrations
    Migrate,
    /// Manage staff users
    Staff {
        #[command(subcommand)]
        action: StaffAction,
    },
    /// Seed the database with sample catalog data
    Seed,
}

#[derive(Subcommand)]
enum StaffAction {
    /// Create a new staff user
    Create {
        /// Login username
        #[arg(short, long)]
        username: String,

        /// Email address
        #[arg(short, long)]
        email: String,

        /// Role (`super_admin`, `admin`, `customer`)
        #[arg(short, long, default_value = "admin")]
        role: String,

        /// Password; a random one is generated and printed when omitted
        #[arg(short, long)]
        password: Option<String>,
    },
    /// Reset a staff user's password
    SetPassword {
        /// Username or email of the account
        #[arg(short, long)]
        username: String,

        /// New password; a random one is generated and printed when omitted
        #[arg(short, long)]
        password: Option<String>,
    },
}

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt::init();

    let cli = Cli::parse();

    let result: Result<(), Box<dyn std::error::Error>> = run(cli).await;

    if let Err(e) = result {
        tracing::error!("Command failed: {e}");
        std::process::exit(1);
    }
}

async fn run(cli: Cli) -> Result<(), Box<dyn std::error::Error>> {
    match cli.command {
        Commands::Migrate => commands::migrate::run().await?,
        Commands::Staff { action } => match action {
            StaffAction::Create {
                username,
                email,
                role,
                password,
            } => {
                commands::staff::create(&username, &email, &role, password.as_deref()).await?;
            }
            StaffAction::SetPassword { username, password } => {
                commands::staff::set_password(&username, password.as_deref()).await?;
            }
        },
        Commands::Seed => commands::seed::run().await?,
    }
    Ok(())
}
