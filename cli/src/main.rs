use anyhow::Context;
use clap::{Parser, Subcommand};
use flipside_core::Session;
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

mod auto;
mod play;
mod render;
mod settings;

#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Args {
    /// What log level to use
    #[command(flatten)]
    verbose: clap_verbosity_flag::Verbosity,

    /// Force a seed instead of random
    #[arg(short, long, global = true)]
    seed: Option<u64>,

    /// TOML file with timings and grid growth
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand, Debug, Clone, PartialEq)]
enum Command {
    /// Play in the terminal, tiles are tapped by typing their number
    Play,
    /// Let a bot play on a simulated clock and report each level
    Auto(auto::AutoArgs),
}

fn init_logging(verbose: &clap_verbosity_flag::Verbosity) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        EnvFilter::new(verbose.log_level_filter().as_str().to_ascii_lowercase())
    });
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn random_seed() -> u64 {
    use web_time::SystemTime;
    SystemTime::now()
        .duration_since(SystemTime::UNIX_EPOCH)
        .map(|elapsed| elapsed.as_nanos() as u64)
        .unwrap_or_default()
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();
    init_logging(&args.verbose);

    let config = match &args.config {
        Some(path) => settings::load(path)
            .with_context(|| format!("Could not load config from {}", path.display()))?,
        None => Default::default(),
    };
    let seed = args.seed.unwrap_or_else(random_seed);
    log::debug!("seed: {}", seed);

    let session = Session::with_config(&config, seed).context("Could not lay out level 1")?;

    match args.command.unwrap_or(Command::Play) {
        Command::Play => {
            let stdin = std::io::stdin().lock();
            let stdout = std::io::stdout().lock();
            play::run(session, stdin, stdout)
        }
        Command::Auto(auto_args) => {
            let reports = auto::run(session, &auto_args)?;
            for report in &reports {
                println!("{report}");
            }
            Ok(())
        }
    }
}
