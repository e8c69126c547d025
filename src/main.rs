use clap::Parser;
use guessle::{
    app::App,
    app_dirs::AppDirs,
    config::{Config, ConfigStore, FileConfigStore},
    history::GameLog,
    runtime::{Runner, StdinCommandSource},
    session::SessionConfig,
    stats::{FileStatsStore, StatsStore},
    ui::{self, Theme},
    word_source::{RandomWordSource, WordList, DEFAULT_LIST},
};
use std::{error::Error, io, path::PathBuf, sync::Arc};

/// guess the hidden word in a handful of tries
#[derive(Parser, Debug, Clone)]
#[clap(
    version,
    about,
    long_about = "Guess the hidden word. Each guess colors its letters: in the right spot, in the word but elsewhere, or not in the word at all. Hints can reveal a letter or rule out a few."
)]
pub struct Cli {
    /// number of guesses allowed per round
    #[clap(short = 'a', long)]
    max_attempts: Option<usize>,

    /// number of hints available per round
    #[clap(long)]
    hints: Option<u32>,

    /// JSON word list ({"name", "size", "words"}) to draw secrets from
    #[clap(short = 'l', long)]
    word_list: Option<PathBuf>,

    /// where to keep statistics (default: ~/.local/state/guessle/stats.json)
    #[clap(long)]
    stats_file: Option<PathBuf>,

    /// where to keep the game history log (default: ~/.local/state/guessle/history.csv)
    #[clap(long)]
    history_file: Option<PathBuf>,

    /// do not record finished rounds in the history log
    #[clap(long)]
    no_history: bool,

    /// plain output without colors
    #[clap(long)]
    no_color: bool,

    /// seed for secret selection and hints, for reproducible rounds
    #[clap(long)]
    seed: Option<u64>,

    /// print statistics and exit
    #[clap(long)]
    show_stats: bool,

    /// store the given options as the new defaults
    #[clap(long)]
    save_config: bool,

    /// more logging on stderr (-v info, -vv debug, -vvv trace)
    #[clap(short = 'v', long, action = clap::ArgAction::Count)]
    verbose: u8,
}

impl Cli {
    /// Stored config with command-line overrides applied
    fn merge_config(&self, mut cfg: Config) -> Config {
        if let Some(max_attempts) = self.max_attempts {
            cfg.max_attempts = max_attempts;
        }
        if let Some(hints) = self.hints {
            cfg.max_hints = hints;
        }
        if let Some(ref word_list) = self.word_list {
            cfg.word_list = Some(word_list.clone());
        }
        cfg
    }
}

fn init_logging(verbose: u8) {
    let level = match verbose {
        0 => tracing::Level::WARN,
        1 => tracing::Level::INFO,
        2 => tracing::Level::DEBUG,
        _ => tracing::Level::TRACE,
    };
    tracing_subscriber::fmt()
        .with_max_level(level)
        .with_writer(io::stderr)
        .with_target(false)
        .init();
}

fn main() -> Result<(), Box<dyn Error>> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let config_store = FileConfigStore::new();
    let config = cli.merge_config(config_store.load());
    config.validate()?;
    if cli.save_config {
        config_store.save(&config)?;
        tracing::info!(path = %config_store.path().display(), "saved config");
    }

    let stats_path = cli
        .stats_file
        .clone()
        .or_else(AppDirs::stats_path)
        .unwrap_or_else(|| PathBuf::from("guessle_stats.json"));
    let store: Arc<dyn StatsStore> = Arc::new(FileStatsStore::with_path(
        stats_path,
        config.max_attempts,
    ));

    if cli.show_stats {
        println!("{}", ui::render_stats(&store.load()));
        return Ok(());
    }

    let list = match config.word_list {
        Some(ref path) => WordList::from_file(path, config.word_length)?,
        None => WordList::embedded(DEFAULT_LIST, config.word_length)?,
    };
    tracing::info!(words = list.len(), "word list loaded");
    let words = match cli.seed {
        Some(seed) => RandomWordSource::with_seed(list, seed),
        None => RandomWordSource::new(list),
    };

    let log = if cli.no_history {
        None
    } else {
        cli.history_file
            .clone()
            .or_else(AppDirs::history_path)
            .map(GameLog::with_path)
    };

    let mut app = App::new(
        SessionConfig::from(&config),
        Theme {
            color: !cli.no_color,
        },
        Box::new(words),
        store,
        log,
        cli.seed,
    );

    let runner = Runner::new(StdinCommandSource::new());
    let stdout = io::stdout();
    app.run(&runner, &mut stdout.lock())?;

    Ok(())
}
