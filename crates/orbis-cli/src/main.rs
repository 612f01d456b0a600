//! Orbis CLI: inspect, resize, invert and validate decomposed matrices.

use clap::{Parser, Subcommand};

mod commands;

#[derive(Parser)]
#[command(name = "orbis")]
#[command(version, about = "Orbis: symmetric positive semi-definite matrices kept as M = BᵗB")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Print the summary of a stored matrix.
    Inspect {
        /// Path to a matrix file (.json, .bin or .orbis).
        path: String,
    },

    /// Shrink the stored factor to at most `n` rows.
    Resize {
        /// Matrix file to read.
        input: String,

        /// Matrix file to write.
        output: String,
    },

    /// Invert a stored matrix.
    Invert {
        /// Matrix file to read.
        input: String,

        /// Matrix file to write.
        output: String,

        /// Decomposition config (TOML). Defaults to Cholesky.
        #[arg(short, long)]
        config: Option<String>,
    },

    /// Validate a matrix file or a decomposition config.
    Validate {
        /// Path to a matrix file or a .toml config.
        path: String,
    },
}

fn main() {
    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Inspect { path } => commands::inspect(&path),
        Commands::Resize { input, output } => commands::resize(&input, &output),
        Commands::Invert { input, output, config } => commands::invert(&input, &output, config.as_deref()),
        Commands::Validate { path } => commands::validate(&path),
    };

    if let Err(e) = result {
        eprintln!("Error: {e}");
        std::process::exit(1);
    }
}
