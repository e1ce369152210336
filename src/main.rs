use std::{sync::Arc, time::Duration};

use clap::{
    CommandFactory, Parser, Subcommand,
    builder::{
        Styles,
        styling::{AnsiColor, Effects},
    },
};
use clap_complete::{Shell, generate};

use musecli::{
    cli, config, error,
    location::Location,
    management::FileStorage,
    sink::HttpLikeSink,
    state::AppState,
    types::ItemType,
};

const DRAIN_TIMEOUT: Duration = Duration::from_secs(5);

fn styles() -> Styles {
    Styles::styled()
        .header(AnsiColor::White.on_default() | Effects::BOLD)
        .usage(AnsiColor::White.on_default() | Effects::BOLD)
        .literal(AnsiColor::BrightBlue.on_default())
        .placeholder(AnsiColor::BrightGreen.on_default())
}

#[derive(Parser, Debug, Clone)]
#[clap(
  version = env!("CARGO_PKG_VERSION"),
  name=env!("CARGO_PKG_NAME"),
  bin_name=env!("CARGO_PKG_NAME"),
  author=env!("CARGO_PKG_AUTHORS"),
  about=env!("CARGO_PKG_DESCRIPTION"),
  styles=styles(),
)]
struct Cli {
    #[clap(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug, Clone)]
pub enum Command {
    /// Authorize with Spotify API
    Auth(AuthOptions),

    /// Forget the stored access token
    Logout,

    /// Show session and liked items status
    Status,

    /// Search artists and albums
    Search(SearchOptions),

    /// Like an artist or album, or unlike it when already liked
    Like(LikeOptions),

    /// List liked artists and albums
    Likes(LikesOptions),

    /// Get shell completions
    Completions(CompletionsOption),
}

#[derive(Parser, Debug, Clone)]
pub struct AuthOptions {
    /// Redirect URL (including the #access_token fragment) to sign in with,
    /// instead of waiting for the browser
    #[clap(long)]
    pub redirect_url: Option<String>,
}

#[derive(Parser, Debug, Clone)]
pub struct SearchOptions {
    /// Keywords to search for
    pub query: String,

    /// Only show artists or only albums
    #[clap(long, value_enum)]
    pub kind: Option<ItemType>,
}

#[derive(Parser, Debug, Clone)]
pub struct LikeOptions {
    /// Spotify id of the artist or album
    pub id: String,

    /// Whether the id names an artist or an album
    #[clap(long = "type", value_enum)]
    pub item_type: ItemType,
}

#[derive(Parser, Debug, Clone)]
pub struct LikesOptions {
    /// Only show artists or only albums
    #[clap(long, value_enum)]
    pub kind: Option<ItemType>,
}

#[derive(Parser, Debug, Clone)]
pub struct CompletionsOption {
    shell: Shell,
}

#[tokio::main]
async fn main() {
    if let Err(e) = config::load_env().await {
        error!("Cannot load environment. Err: {}", e);
    }

    let cli = Cli::parse();

    if let Command::Completions(opt) = &cli.command {
        let mut cmd = Cli::command();
        let name = cmd.get_name().to_string();
        generate(opt.shell, &mut cmd, name, &mut std::io::stdout());
        return;
    }

    let location = match Location::parse_root(&config::spotify_redirect_uri()) {
        Ok(l) => l,
        Err(e) => error!("Invalid SPOTIFY_API_REDIRECT_URI. Err: {}", e),
    };
    let sink = Arc::new(HttpLikeSink::new(config::backend_url()));
    let mut state = AppState::start(
        Arc::new(FileStorage::open_default()),
        sink.clone(),
        location,
    );

    match cli.command {
        Command::Auth(opt) => cli::auth(&mut state, opt.redirect_url).await,
        Command::Logout => cli::logout(&mut state),
        Command::Status => cli::status(&state),
        Command::Search(opt) => cli::search(&state, opt.query, opt.kind).await,
        Command::Like(opt) => cli::like(&mut state, opt.id, opt.item_type).await,
        Command::Likes(opt) => cli::likes(&state, opt.kind),
        Command::Completions(_) => {}
    }

    // notifications were fire-and-forget; just don't cut them off at exit
    sink.drain(DRAIN_TIMEOUT).await;
}
