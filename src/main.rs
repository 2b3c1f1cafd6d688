use std::{fs::File, path::PathBuf};

use clap::{Args, Parser, Subcommand};
use tracing::{error, info, warn};

mod config;
mod error;
mod loader;
mod shell;
mod trie;

use config::Config;
use trie::Trie;

/// A word dictionary with prefix suggestions.
#[derive(Parser, Debug)]
#[command(version, about = "A trie-backed word dictionary for your terminal.")]
struct Cli {
    /// JSON config file.
    #[arg(short, long)]
    config: Option<PathBuf>,
    /// Dictionary file to load, one `word meaning` pair per line.
    #[arg(short, long)]
    dictionary: Option<PathBuf>,
    #[arg(long)]
    log_file: Option<PathBuf>,
    /// Start with an empty dictionary.
    #[arg(long)]
    no_dictionary: bool,
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Print the meaning of a word
    Search(SearchArgs),
    /// List up to 10 words starting with a prefix
    Suggest(SuggestArgs),
    /// Interactive add/delete/search/update session (default)
    Shell,
}

#[derive(Args, Debug)]
struct SearchArgs {
    #[arg(name = "WORD")]
    word: String,
}

#[derive(Args, Debug)]
struct SuggestArgs {
    #[arg(name = "PREFIX", default_value = "")]
    prefix: String,
}

impl Cli {
    fn resolve_config(&self) -> anyhow::Result<Config> {
        let mut config = match &self.config {
            Some(path) => Config::load(path)?,
            None => Config::default(),
        };

        if let Some(dictionary) = &self.dictionary {
            config.dictionary_path = dictionary.clone();
        }
        if let Some(log_file) = &self.log_file {
            config.log_path = log_file.clone();
        }
        config.skip_dictionary |= self.no_dictionary;

        Ok(config)
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let config = cli.resolve_config()?;

    let file = File::create(&config.log_path)?;
    tracing_subscriber::fmt()
        .with_ansi(false)
        .with_writer(file)
        .init();

    info!("Config: {:?}", config);

    let mut trie = Trie::new();
    if !config.skip_dictionary {
        // A failed load keeps whatever was inserted and carries on.
        if let Err(e) = loader::load_file(&mut trie, &config.dictionary_path).await {
            error!("{}", e);
            eprintln!("Error: {}", e);
        }
    }
    if trie.is_empty() {
        warn!("Starting with an empty dictionary");
    }

    match cli.command.unwrap_or(Commands::Shell) {
        Commands::Search(args) => {
            let meaning = trie.search(&args.word)?;
            println!("{}", meaning);
        }
        Commands::Suggest(args) => {
            for suggestion in trie.suggest(&args.prefix)? {
                println!("{}", suggestion);
            }
        }
        Commands::Shell => shell::run(&mut trie).await?,
    }

    Ok(())
}
