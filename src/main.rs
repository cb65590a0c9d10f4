mod commands;
mod render;

use anyhow::Result;
use clap::{Parser, Subcommand};
use eventbook_core::{SortKey, ViewMode};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "eventbook")]
#[command(about = "Create, browse, favorite and register for events")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List events
    List {
        /// Which events to show: all, saved or registered
        #[arg(short, long, default_value = "all")]
        view: ViewMode,

        /// Only show events whose title, description or location contains this text
        #[arg(short, long)]
        search: Option<String>,

        /// Print the events as JSON
        #[arg(long)]
        json: bool,
    },
    /// Show the details of one event
    Show { id: String },
    /// Create a new event
    Add {
        #[arg(short, long)]
        title: String,

        #[arg(short, long)]
        description: String,

        #[arg(short, long)]
        location: String,

        /// Date (YYYY-MM-DD)
        #[arg(long)]
        date: String,

        /// Start time (24-hour HH:MM)
        #[arg(short, long)]
        start: String,

        /// End time (24-hour HH:MM)
        #[arg(short, long)]
        end: String,
    },
    /// Edit an existing event (unspecified fields are kept)
    Edit {
        id: String,

        #[arg(short, long)]
        title: Option<String>,

        #[arg(short, long)]
        description: Option<String>,

        #[arg(short, long)]
        location: Option<String>,

        #[arg(long)]
        date: Option<String>,

        #[arg(short, long)]
        start: Option<String>,

        #[arg(short, long)]
        end: Option<String>,
    },
    /// Delete an event
    Delete {
        id: String,

        /// Skip the confirmation
        #[arg(short, long)]
        yes: bool,
    },
    /// Save or unsave an event
    Favorite { id: String },
    /// Register for an event
    Register { id: String, email: String },
    /// Cancel your registration for an event
    Cancel { id: String },
    /// Sort by date or duration (selecting the active key again reverses it)
    Sort { key: SortKey },
    /// Delete all events
    Clear {
        /// Skip the confirmation
        #[arg(short, long)]
        yes: bool,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::List { view, search, json } => commands::list::run(view, search, json).await,
        Commands::Show { id } => commands::show::run(&id).await,
        Commands::Add {
            title,
            description,
            location,
            date,
            start,
            end,
        } => commands::add::run(title, description, location, date, start, end).await,
        Commands::Edit {
            id,
            title,
            description,
            location,
            date,
            start,
            end,
        } => {
            let changes = commands::edit::Changes {
                title,
                description,
                location,
                date,
                start,
                end,
            };
            commands::edit::run(&id, changes).await
        }
        Commands::Delete { id, yes } => commands::delete::run(&id, yes).await,
        Commands::Favorite { id } => commands::favorite::run(&id).await,
        Commands::Register { id, email } => commands::register::run(&id, &email).await,
        Commands::Cancel { id } => commands::register::cancel(&id).await,
        Commands::Sort { key } => commands::sort::run(key).await,
        Commands::Clear { yes } => commands::clear::run(yes).await,
    }
}
