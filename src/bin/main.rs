//! schemadoc CLI - Filter and annotate database schema snapshots
//!
//! Usage:
//!   schemadoc modify --input <schema.json> [--config <file>] [--output <file>] [--label <l>]...
//!   schemadoc mask-dsn <url>
//!   schemadoc fingerprint <schema.json>
//!
//! Examples:
//!   schemadoc modify --input schema.json --output docs/schema.json
//!   schemadoc modify --input schema.json --label public --label billing
//!   SCHEMADOC_LOG=debug schemadoc modify --input schema.json --config ci.toml

use clap::{Parser, Subcommand};
use schemadoc::config::{mask_dsn, Config};
use schemadoc::modify::modify_schema;
use schemadoc::schema::encode_pretty;
use schemadoc::snapshot::{fingerprint_file, read_snapshot, write_snapshot};
use std::path::PathBuf;
use std::process::ExitCode;
use tracing_subscriber::EnvFilter;

/// Environment variable holding the log filter.
const LOG_ENV_VAR: &str = "SCHEMADOC_LOG";

#[derive(Parser)]
#[command(name = "schemadoc")]
#[command(about = "schemadoc - Filter, infer and annotate database schema snapshots")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Apply the configuration to a schema snapshot
    Modify {
        /// Path to the schema snapshot (JSON)
        #[arg(short, long)]
        input: PathBuf,

        /// Config file (defaults to SCHEMADOC_CONFIG or ./schemadoc.toml)
        #[arg(short, long)]
        config: Option<PathBuf>,

        /// Where to write the result (stdout if not specified)
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Keep tables carrying this label (repeatable)
        #[arg(short, long = "label")]
        labels: Vec<String>,
    },

    /// Print a connection string with its password masked
    MaskDsn {
        /// Connection URL
        url: String,
    },

    /// Print the SHA256 fingerprint of a schema snapshot
    Fingerprint {
        /// Path to the schema snapshot (JSON)
        file: PathBuf,
    },
}

fn init_tracing() {
    let env_filter =
        EnvFilter::try_from_env(LOG_ENV_VAR).unwrap_or_else(|_| EnvFilter::new("warn"));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .try_init();
}

fn main() -> ExitCode {
    init_tracing();
    let cli = Cli::parse();

    match cli.command {
        Commands::Modify {
            input,
            config,
            output,
            labels,
        } => cmd_modify(input, config, output, labels),
        Commands::MaskDsn { url } => cmd_mask_dsn(&url),
        Commands::Fingerprint { file } => cmd_fingerprint(file),
    }
}

fn cmd_modify(
    input: PathBuf,
    config: Option<PathBuf>,
    output: Option<PathBuf>,
    labels: Vec<String>,
) -> ExitCode {
    let loaded = match &config {
        Some(path) => Config::from_file(path),
        None => Config::load(),
    };
    let mut config = match loaded {
        Ok(c) => c,
        Err(e) => {
            eprintln!("Config error: {}", e);
            return ExitCode::FAILURE;
        }
    };
    config.include_labels = labels;

    let mut schema = match read_snapshot(&input) {
        Ok(s) => s,
        Err(e) => {
            eprintln!("Error: {}", e);
            return ExitCode::FAILURE;
        }
    };

    if let Err(e) = modify_schema(&mut schema, &config, schemadoc::VERSION) {
        eprintln!("Error: {}", e);
        return ExitCode::FAILURE;
    }

    match output {
        Some(path) => {
            if let Err(e) = write_snapshot(&path, &schema) {
                eprintln!("Error: {}", e);
                return ExitCode::FAILURE;
            }
        }
        None => match encode_pretty(&schema) {
            Ok(json) => println!("{}", json),
            Err(e) => {
                eprintln!("Error: {}", e);
                return ExitCode::FAILURE;
            }
        },
    }

    ExitCode::SUCCESS
}

fn cmd_mask_dsn(url: &str) -> ExitCode {
    match mask_dsn(url) {
        Ok(masked) => {
            println!("{}", masked);
            ExitCode::SUCCESS
        }
        Err(e) => {
            eprintln!("Error: {}", e);
            ExitCode::FAILURE
        }
    }
}

fn cmd_fingerprint(file: PathBuf) -> ExitCode {
    match fingerprint_file(&file) {
        Ok(hash) => {
            println!("{}  {}", hash, file.display());
            ExitCode::SUCCESS
        }
        Err(e) => {
            eprintln!("Error: {}", e);
            ExitCode::FAILURE
        }
    }
}
