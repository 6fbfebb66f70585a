use anyhow::Result;
use clap::{Parser, Subcommand};

mod commands;

#[derive(Parser)]
#[command(name = "fdk")]
#[command(about = "FundedDesk challenge tracker CLI", long_about = None)]
struct Cli {
    /// Root directory for the per-user local stores.
    #[arg(long, global = true, default_value = "state")]
    store_root: String,

    /// Path to the user profile registry.
    #[arg(long, global = true, default_value = "profiles.yaml")]
    profiles: String,

    #[command(subcommand)]
    cmd: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Database commands
    Db {
        #[command(subcommand)]
        cmd: DbCmd,
    },

    /// List configured user profiles
    User {
        #[command(subcommand)]
        cmd: UserCmd,
    },

    /// Challenge lifecycle commands
    Challenge {
        #[command(subcommand)]
        cmd: ChallengeCmd,
    },

    /// Compute layered config hash + print canonical JSON
    ConfigHash {
        /// Paths in merge order (base -> override)
        #[arg(required = true)]
        paths: Vec<String>,
    },
}

#[derive(Subcommand)]
enum DbCmd {
    Status,

    /// Apply SQL migrations. Guardrail: refuses when challenge history
    /// already exists unless --yes is provided.
    Migrate {
        /// Acknowledge you are migrating a DB that already holds history.
        #[arg(long, default_value_t = false)]
        yes: bool,
    },
}

#[derive(Subcommand)]
enum UserCmd {
    /// Print the profile registry
    List,
}

#[derive(Subcommand)]
enum ChallengeCmd {
    /// Print the current state for a user
    Status {
        #[arg(long)]
        user: String,
    },

    /// Submit one day of trade results
    Submit {
        #[arg(long)]
        user: String,

        /// Comma-separated per-trade amounts (e.g. "240,-80")
        #[arg(long, conflicts_with_all = ["wins", "losses"])]
        amounts: Option<String>,

        /// Winning trade count (paired with --losses)
        #[arg(long, requires = "losses")]
        wins: Option<u32>,

        /// Losing trade count (paired with --wins)
        #[arg(long, requires = "wins")]
        losses: Option<u32>,
    },

    /// Confirm a pending phase advance
    ConfirmAdvance {
        #[arg(long)]
        user: String,
    },

    /// Reset the challenge: drops local state AND the remote history
    Reset {
        #[arg(long)]
        user: String,

        /// Acknowledge this deletes the user's entire history.
        #[arg(long, default_value_t = false)]
        yes: bool,
    },

    /// Print one week of the trading grid with its weekly P/L
    Week {
        #[arg(long)]
        user: String,

        /// Week to show; defaults to the current week.
        #[arg(long)]
        week: Option<u32>,
    },

    /// Rebuild state from the remote history and compare with the local copy
    Replay {
        #[arg(long)]
        user: String,

        /// Write the replayed state into the local store.
        #[arg(long, default_value_t = false)]
        write: bool,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    // Load .env.local if present (dev convenience).
    let _ = dotenvy::from_filename(".env.local");

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "warn".into()),
        )
        .init();

    let cli = Cli::parse();

    match cli.cmd {
        Commands::Db { cmd } => match cmd {
            DbCmd::Status => commands::db::status().await,
            DbCmd::Migrate { yes } => commands::db::migrate(yes).await,
        },

        Commands::User { cmd } => match cmd {
            UserCmd::List => commands::challenge::user_list(&cli.profiles),
        },

        Commands::Challenge { cmd } => match cmd {
            ChallengeCmd::Status { user } => {
                commands::challenge::status(&cli.store_root, &cli.profiles, &user).await
            }
            ChallengeCmd::Submit {
                user,
                amounts,
                wins,
                losses,
            } => {
                commands::challenge::submit(
                    &cli.store_root,
                    &cli.profiles,
                    &user,
                    amounts.as_deref(),
                    wins,
                    losses,
                )
                .await
            }
            ChallengeCmd::ConfirmAdvance { user } => {
                commands::challenge::confirm_advance(&cli.store_root, &cli.profiles, &user)
            }
            ChallengeCmd::Reset { user, yes } => {
                commands::challenge::reset(&cli.store_root, &cli.profiles, &user, yes).await
            }
            ChallengeCmd::Week { user, week } => {
                commands::challenge::week(&cli.store_root, &cli.profiles, &user, week).await
            }
            ChallengeCmd::Replay { user, write } => {
                commands::challenge::replay(&cli.store_root, &cli.profiles, &user, write).await
            }
        },

        Commands::ConfigHash { paths } => commands::config_hash(&paths),
    }
}
