use clap::{
    CommandFactory, Parser, Subcommand,
    builder::{
        Styles,
        styling::{AnsiColor, Effects},
    },
};
use clap_complete::{Shell, generate};

use crowdlist::{
    cli,
    config::{self, AppConfig, MappingSource, OAuthSettings},
    error,
};

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
    command: Option<Command>,
}

#[derive(Subcommand, Debug, Clone)]
pub enum Command {
    /// Authorize with Spotify API
    Auth,

    /// Print the contributor mapping read from the spreadsheet
    Mapping,

    /// Add missing spreadsheet tracks to the playlist and exit
    Sync,

    /// Sync the playlist once, then serve the now playing page (default)
    Serve,

    /// Get shell completions
    Completions(CompletionsOption),
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

    match cli.command.unwrap_or(Command::Serve) {
        Command::Auth => {
            let oauth = match OAuthSettings::from_lookup(config::env_lookup).await {
                Ok(oauth) => oauth,
                Err(e) => error!("{}", e),
            };
            cli::auth(&oauth).await;
        }
        Command::Mapping => {
            let source = match MappingSource::from_lookup(config::env_lookup) {
                Ok(source) => source,
                Err(e) => error!("{}", e),
            };
            let columns = config::columns_from_lookup(config::env_lookup);
            cli::mapping(&source, &columns).await;
        }
        Command::Sync => cli::sync(&app_config().await).await,
        Command::Serve => cli::serve(&app_config().await).await,
        Command::Completions(opt) => {
            let mut cmd = Cli::command();
            let name = cmd.get_name().to_string();
            generate(opt.shell, &mut cmd, name, &mut std::io::stdout())
        }
    }
}

async fn app_config() -> AppConfig {
    match AppConfig::from_env().await {
        Ok(config) => config,
        Err(e) => error!("{}", e),
    }
}
