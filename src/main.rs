mod api;
mod auth;
mod config;
mod consts;
mod dashboard;
mod environment;
mod error_classifier;
mod events;
mod forms;
mod logging;
mod models;
mod pretty;
mod session;
mod ui;

use crate::config::get_config_path;
use crate::session::{HeadlessCommand, run_headless_mode, run_tui_mode, setup_session};
use clap::{Parser, Subcommand};
use std::error::Error;

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
/// Command-line arguments
struct Args {
    /// Talk to the API at this URL instead of the configured environment
    #[arg(long, global = true, value_name = "URL")]
    api_url: Option<String>,

    /// Command to execute
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Sign in and remember the session
    Login {
        #[arg(long, value_name = "EMAIL")]
        email: String,

        #[arg(long, value_name = "PASSWORD")]
        password: String,
    },
    /// Sign out and forget the stored session.
    Logout,
    /// Open the terminal dashboard for your role
    Dashboard {
        /// Paint the dashboard background
        #[arg(long)]
        with_background: bool,
    },
    #[command(flatten)]
    Headless(HeadlessCommand),
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn Error>> {
    logging::init_max_level();

    let config_path = get_config_path()?;
    let args = Args::parse();
    let session = setup_session(config_path, args.api_url)?;

    match args.command {
        Command::Login { email, password } => {
            pretty::print_banner();
            auth::login(&email, &password, &session.config_path, session.api.as_ref()).await?;
            Ok(())
        }
        Command::Logout => auth::logout(&session.config_path, session.api.as_ref()).await,
        Command::Dashboard { with_background } => run_tui_mode(session, with_background).await,
        Command::Headless(command) => run_headless_mode(session, command).await,
    }
}
