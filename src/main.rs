use clap::{ArgMatches, CommandFactory, FromArgMatches, Parser, Subcommand};
use std::process;
use textgram::aggregate::Mode;
use textgram::config::Config;
use textgram::error::TgResult;
use textgram::source::resolve_source;
use tracing::{error, info, Level};

mod cmd;
mod reports;

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Text file to analyze; `-` or omitted reads stdin.
    #[arg(global = true, short, long)]
    input: Option<String>,

    /// JSON file with analysis settings. Explicit flags override it.
    #[arg(global = true, long)]
    config: Option<String>,

    #[arg(global = true, long, default_value_t = false)]
    debug: bool,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Word frequencies.
    Words(cmd::analyze::AnalyzeArgs),
    /// Character n-grams inside words.
    Ngrams(cmd::analyze::AnalyzeArgs),
    /// N-gram transitions across adjacent words.
    Transitions(cmd::analyze::AnalyzeArgs),
    /// Print the top rows of a saved report.
    Inspect(cmd::inspect::InspectArgs),
}

/// Defaults, then the JSON file (if any), then flags typed on the command line.
fn resolve_config(
    cli_config: &Config,
    file: Option<&str>,
    sub_matches: &ArgMatches,
) -> TgResult<Config> {
    match file {
        Some(path) => {
            info!("⚙️  Loading config from: {}", path);
            let mut config = Config::load_from_file(path)?;
            config.merge_from_cli(cli_config, sub_matches);
            Ok(config)
        }
        None => Ok(cli_config.clone()),
    }
}

fn execute(cli: &Cli, matches: &ArgMatches) -> TgResult<()> {
    let (mode, args) = match &cli.command {
        Commands::Inspect(args) => return cmd::inspect::run(args),
        Commands::Words(args) => (Mode::Words, args),
        Commands::Ngrams(args) => (Mode::Ngrams, args),
        Commands::Transitions(args) => (Mode::Transitions, args),
    };

    let sub_matches = matches
        .subcommand_matches(&mode.to_string())
        .unwrap_or(matches);
    let config = resolve_config(&args.config, cli.config.as_deref(), sub_matches)?;
    // Fail on bad sizes before touching the input.
    if mode.uses_n() {
        config.get_ngram_sizes()?;
    }

    let source = resolve_source(cli.input.as_deref());
    cmd::analyze::run(mode, &config, source.as_ref())
}

fn main() {
    let matches = Cli::command().get_matches();
    let cli = Cli::from_arg_matches(&matches).unwrap_or_else(|e| e.exit());

    let level = if cli.debug { Level::DEBUG } else { Level::INFO };
    tracing_subscriber::fmt()
        .with_max_level(level)
        .with_writer(std::io::stderr)
        .init();

    if let Err(e) = execute(&cli, &matches) {
        error!("❌ FATAL: {}", e);
        process::exit(1);
    }
}
