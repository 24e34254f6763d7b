mod account;
mod contacts;
mod insights;

pub use contacts::{ContactFields, ListArgs};
pub use insights::EnrichTarget;

use crate::state::AppState;
use clap::Subcommand;
use std::path::PathBuf;

#[derive(Clone, Debug, Subcommand)]
pub enum Command {
    /// Check that the backend is reachable
    Health,
    /// Sign in and keep the session
    Login {
        #[arg(long, short)]
        username: String,
        /// Read from stdin when omitted
        #[arg(long, env = "REHBER_PASSWORD", hide_env_values = true)]
        password: Option<String>,
    },
    /// Create an account
    Register {
        #[arg(long, short)]
        username: String,
        #[arg(long)]
        email: Option<String>,
        #[arg(long, env = "REHBER_PASSWORD", hide_env_values = true)]
        password: Option<String>,
    },
    /// Forget the stored session
    Logout,
    /// Show who is signed in
    Whoami,
    /// Counters and recently added contacts
    Dashboard,
    /// List contacts
    Contacts(ListArgs),
    /// Show one contact by id or name
    Show {
        id: Option<i64>,
        #[arg(long, conflicts_with = "id")]
        name: Option<String>,
    },
    /// Add a contact
    Add(ContactFields),
    /// Change a contact
    Edit {
        id: i64,
        #[command(flatten)]
        fields: ContactFields,
    },
    /// Delete a contact
    Delete { id: i64 },
    /// Toggle the favorite flag
    Favorite { id: i64 },
    /// List every tag in use
    Tags,
    /// Contacts with a location
    Map,
    /// Write every email address to emails.txt
    ExportEmails {
        /// Directory to write into
        #[arg(long)]
        out: Option<PathBuf>,
    },
    /// Look up extra details through the backend
    Enrich {
        #[command(subcommand)]
        target: EnrichTarget,
    },
    /// Contacts near a point
    Nearby {
        #[arg(long, allow_negative_numbers = true)]
        lat: f64,
        #[arg(long, allow_negative_numbers = true)]
        lng: f64,
        /// Radius in kilometres
        #[arg(long, default_value_t = 5.0)]
        radius: f64,
    },
}

/// Runs one command and returns what should be printed.
pub async fn execute(state: &AppState, command: Command) -> anyhow::Result<String> {
    match command {
        Command::Health => account::health(state).await,
        Command::Login { username, password } => account::login(state, &username, password).await,
        Command::Register {
            username,
            email,
            password,
        } => account::register(state, &username, email.as_deref(), password).await,
        Command::Logout => account::logout(state).await,
        Command::Whoami => account::whoami(state).await,
        Command::Dashboard => insights::show_dashboard(state).await,
        Command::Contacts(args) => contacts::list(state, args).await,
        Command::Show { id, name } => contacts::show(state, id, name.as_deref()).await,
        Command::Add(fields) => contacts::add(state, fields).await,
        Command::Edit { id, fields } => contacts::edit(state, id, fields).await,
        Command::Delete { id } => contacts::delete(state, id).await,
        Command::Favorite { id } => contacts::favorite(state, id).await,
        Command::Tags => insights::tags(state).await,
        Command::Map => insights::map(state).await,
        Command::ExportEmails { out } => insights::export_emails(state, out).await,
        Command::Enrich { target } => insights::enrich(state, target).await,
        Command::Nearby { lat, lng, radius } => insights::nearby(state, lat, lng, radius).await,
    }
}
