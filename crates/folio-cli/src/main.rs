mod commands;
mod output;

use clap::{Parser, Subcommand};
use std::path::PathBuf;
use std::process::ExitCode;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(
    name = "folio",
    version,
    about = "Extract clean text from PDFs, falling back across parsing backends"
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Extract text from a PDF, trying backends until one gives usable text
    Extract {
        /// Path to PDF file
        input_file: PathBuf,

        /// Run only this backend (pdftotext, pdf-extract, lopdf) and skip the quality gate
        #[arg(short, long, value_name = "NAME")]
        backend: Option<String>,

        /// Predefined config: default, strict
        #[arg(short, long, value_name = "NAME", conflicts_with = "config")]
        preset: Option<String>,

        /// Custom JSON config file
        #[arg(short, long, value_name = "FILE")]
        config: Option<PathBuf>,

        /// Output format: text (default) or json
        #[arg(short, long, default_value = "text")]
        output: String,

        /// Write output to a file instead of stdout
        #[arg(short = 'O', long = "out", value_name = "FILE")]
        out: Option<PathBuf>,

        /// Include the PDF's document information
        #[arg(long)]
        metadata: bool,

        /// Show why each backend was accepted or passed over
        #[arg(long)]
        attempts: bool,
    },
    /// List extraction backends in priority order
    Backends,
    /// Inspect and validate pipeline configs
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },
}

#[derive(Subcommand)]
enum ConfigAction {
    /// List predefined configs
    Presets,
    /// Print a predefined config as JSON
    Show {
        /// Preset name (default: "default")
        name: Option<String>,
    },
    /// Validate a custom config file
    Validate {
        /// Path to JSON config file
        file: PathBuf,
    },
}

fn init_tracing() {
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));

    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}

fn main() -> ExitCode {
    init_tracing();
    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Extract {
            input_file,
            backend,
            preset,
            config,
            output,
            out,
            metadata,
            attempts,
        } => commands::extract::run(commands::extract::ExtractOptions {
            input_file,
            backend,
            preset,
            config,
            output_format: output,
            output_file: out,
            metadata,
            attempts,
        }),
        Commands::Backends => commands::backends::list().map(|()| true),
        Commands::Config { action } => {
            let done = match action {
                ConfigAction::Presets => commands::config::presets(),
                ConfigAction::Show { name } => {
                    commands::config::show(name.as_deref().unwrap_or("default"))
                }
                ConfigAction::Validate { file } => commands::config::validate(&file),
            };
            done.map(|()| true)
        }
    };

    match result {
        Ok(true) => ExitCode::SUCCESS,
        Ok(false) => ExitCode::FAILURE,
        Err(e) => {
            eprintln!("Error: {e}");
            ExitCode::FAILURE
        }
    }
}
