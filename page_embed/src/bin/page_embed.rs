use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::Parser;
use env_logger::Env;
use log::LevelFilter;
use page_embed::{BEST_LEVEL, Config, Generated};

#[derive(Parser, Debug)]
#[command(name = "page_embed", version)]
#[command(about = "Convert a file into a gzip-compressed C header", long_about = None)]
struct Args {
    /// Path to the input file, typically an HTML page
    input: PathBuf,

    /// Directory to write `page_<name>.h` into
    /// [default: `pages` next to this executable]
    #[arg(short, long)]
    out_dir: Option<PathBuf>,

    /// Gzip compression level (0-9)
    #[arg(short, long, default_value_t = BEST_LEVEL)]
    level: u32,

    /// Text for the "generated on" comment instead of the current time
    #[arg(long)]
    timestamp: Option<String>,

    /// Enable debug logging
    #[arg(short, long, default_value_t = false)]
    verbose: bool,
}

fn init_logging(verbose: bool) {
    let default_level = if verbose {
        LevelFilter::Debug
    } else {
        LevelFilter::Warn
    };
    let mut builder =
        env_logger::Builder::from_env(Env::default().default_filter_or(default_level.as_str()));
    builder.format_timestamp_millis();
    let _ = builder.try_init();
}

fn run(args: Args) -> Result<Generated> {
    let mut config = Config::new(&args.input).level(args.level);
    if let Some(dir) = &args.out_dir {
        config = config.out_dir(dir);
    }
    if let Some(timestamp) = args.timestamp {
        config = config.timestamp(timestamp);
    }
    config
        .build()
        .with_context(|| format!("failed to generate header for '{}'", args.input.display()))
}

fn main() -> ExitCode {
    let args = Args::parse();
    init_logging(args.verbose);

    match run(args) {
        Ok(generated) => {
            println!("Generated: {}", generated.path.display());
            ExitCode::SUCCESS
        }
        Err(err) => {
            eprintln!("error: {err:#}");
            ExitCode::FAILURE
        }
    }
}
