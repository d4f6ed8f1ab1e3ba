use std::io::Write;
use std::path::PathBuf;

use clap::{Parser, Subcommand};
use oed::tools::parse_format;
use oed::{OedConfig, OedTools, RandomPolicy, Result};

#[derive(Parser, Debug)]
#[command(name = "oed", about = "Look up words in a local OED2 archive", version)]
pub struct Cli {
    /// Path to the data file. Overrides OED_DATA_PATH and config files.
    #[arg(long, global = true)]
    data: Option<PathBuf>,

    /// Path to the index file. Overrides OED_INDEX_PATH and config files.
    #[arg(long, global = true)]
    index: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Look up a word and print its entry.
    Lookup {
        word: String,
        /// Output format: full, clean, brief or raw.
        #[arg(short, long, default_value = "clean")]
        format: String,
        /// Leave the etymology out.
        #[arg(long)]
        no_etymology: bool,
    },
    /// List index words starting with a prefix.
    Search {
        prefix: String,
        /// Maximum number of results (1 to 50).
        #[arg(short, long)]
        limit: Option<usize>,
    },
    /// Print the etymology of a word.
    Etymology {
        word: String,
        /// Keep markup in the etymology text.
        #[arg(long)]
        raw: bool,
    },
    /// Print a "random" entry.
    Random {
        #[arg(short, long, default_value = "clean")]
        format: String,
        #[arg(long)]
        no_etymology: bool,
        /// Pick uniformly instead of the index midpoint.
        #[arg(long)]
        uniform: bool,
    },
    /// Look up a comma-separated list of words.
    Multi { words: String },
    /// Dump raw data file bytes.
    Raw {
        offset: u64,
        #[arg(default_value_t = 1024)]
        length: usize,
    },
}

fn open_tools(cli: &Cli, uniform: bool) -> Result<OedTools> {
    let mut config = OedConfig::discover();
    if let Some(data) = &cli.data {
        config.data_path = data.clone();
    }
    if let Some(index) = &cli.index {
        config.index_path = index.clone();
    }
    if uniform {
        config.random_policy = RandomPolicy::Uniform;
    }
    OedTools::from_config(&config)
}

pub fn run() -> Result<()> {
    let cli = Cli::parse();
    let uniform = matches!(cli.command, Command::Random { uniform: true, .. });
    let tools = open_tools(&cli, uniform)?;

    let text = match &cli.command {
        Command::Lookup { word, format, no_etymology } => tools.lookup(word, parse_format(format), !no_etymology)?,
        Command::Search { prefix, limit } => tools.search(prefix, *limit)?,
        Command::Etymology { word, raw } => tools.etymology(word, !raw)?,
        Command::Random { format, no_etymology, .. } => tools.random(parse_format(format), !no_etymology)?,
        Command::Multi { words } => tools.multi_lookup(words)?,
        Command::Raw { offset, length } => {
            let bytes = tools.read_raw(*offset, *length)?;
            let mut stdout = std::io::stdout().lock();
            stdout.write_all(&bytes)?;
            stdout.flush()?;
            return Ok(());
        }
    };

    println!("{}", text.trim_end_matches('\n'));
    Ok(())
}
