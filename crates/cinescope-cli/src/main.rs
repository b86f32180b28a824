use cinescope_models::ImageSize;
use clap::{ArgAction, Parser, Subcommand};
use commands::{auth, config, movies, watchlists};
use std::path::PathBuf;

mod commands;
mod logging;
mod output;

#[derive(Parser)]
#[command(name = "cinescope")]
#[command(about = "CineScope - Discover movies and keep your watchlists in order")]
#[command(version)]
struct Cli {
    /// Enable verbose output (use multiple times for more verbosity: -v, -vv)
    #[arg(short, long, action = ArgAction::Count, global = true)]
    verbose: u8,

    /// Suppress all output except errors
    #[arg(short, long, global = true)]
    quiet: bool,

    /// Output format
    #[arg(long, global = true, default_value = "human", value_enum)]
    output: output::OutputFormat,

    /// Write logs to this file (rotated daily) instead of stderr
    #[arg(long, global = true, value_name = "PATH")]
    log_file: Option<PathBuf>,

    /// Backend base URL, overriding the configuration file
    #[arg(long, global = true, env = "CINESCOPE_API_URL", value_name = "URL")]
    api_url: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Manage your watchlists
    #[command(long_about = "List, create, rename and delete the watchlists of the signed-in account. Every change is followed by a fresh read from the server.")]
    Watchlists {
        #[command(subcommand)]
        cmd: WatchlistCommands,
    },
    /// Browse the movie catalog
    Movies {
        #[command(subcommand)]
        cmd: MovieCommands,
    },
    /// Store a session token obtained from the web sign-in
    #[command(long_about = "Save the bearer token issued by the backend's sign-in flow. All later requests send it in the Authorization header.")]
    Login {
        /// Session token (if not provided, will prompt)
        #[arg(long)]
        token: Option<String>,

        /// Display name for the signed-in user
        #[arg(long)]
        name: Option<String>,

        /// Email of the signed-in user
        #[arg(long)]
        email: Option<String>,
    },
    /// Forget the stored session token
    Logout,
    /// Show or change settings
    Config {
        #[command(subcommand)]
        cmd: ConfigCommands,
    },
}

#[derive(Subcommand)]
enum WatchlistCommands {
    /// Show all watchlists
    List {
        /// Also show the movies of this list
        #[arg(long, value_name = "ID")]
        expand: Option<String>,
    },
    /// Create a new watchlist
    Create {
        name: String,
    },
    /// Rename a watchlist
    Rename {
        id: String,
        name: String,
    },
    /// Delete a watchlist
    Delete {
        id: String,

        /// Skip the confirmation prompt
        #[arg(short, long, action = ArgAction::SetTrue)]
        yes: bool,
    },
    /// Interactive watchlist manager
    Manage,
}

#[derive(Subcommand)]
enum MovieCommands {
    /// Popular movies right now
    Popular,
    /// One popular movie picked at random, with its backdrop
    Featured,
    /// Filter movies by genre and release year
    Discover {
        /// Action, Comedy, Drama, Horror, Romance or Sci-Fi
        #[arg(long)]
        genre: Option<String>,

        /// Release year
        #[arg(long)]
        year: Option<u32>,
    },
}

#[derive(Subcommand)]
enum ConfigCommands {
    /// Show current configuration (masks the session token)
    Show {
        /// Show the full session token
        #[arg(long, action = ArgAction::SetTrue)]
        full: bool,
    },
    /// Change settings and save them
    Set {
        /// Backend base URL to save
        #[arg(long, value_name = "URL")]
        backend_url: Option<String>,

        /// Image CDN base URL
        #[arg(long)]
        image_base_url: Option<String>,

        /// Poster size for watchlist entries (w300, w500, original)
        #[arg(long)]
        poster_size: Option<ImageSize>,
    },
}

#[tokio::main]
async fn main() -> color_eyre::Result<()> {
    color_eyre::install()?;

    let cli = Cli::parse();

    logging::init_logging(cli.verbose, cli.quiet, cli.log_file)
        .map_err(|e| color_eyre::eyre::eyre!("{}", e))?;

    let output = output::Output::new(cli.output, cli.quiet);
    let api_url = cli.api_url.as_deref();

    match cli.command {
        Commands::Watchlists { cmd } => watchlists::run_watchlists(cmd, api_url, &output).await,
        Commands::Movies { cmd } => movies::run_movies(cmd, api_url, &output).await,
        Commands::Login { token, name, email } => auth::run_login(token, name, email, &output),
        Commands::Logout => auth::run_logout(&output),
        Commands::Config { cmd } => config::run_config(cmd, api_url, &output),
    }
}
