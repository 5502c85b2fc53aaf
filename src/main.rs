use clap::{Parser, Subcommand};
use quire::{DocumentSpec, Pipeline, PipelineConfig, PipelineError};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "quire", version, about = "Lays out JSON documents and renders them to PDF")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Render a JSON document to a PDF file.
    Render {
        document: PathBuf,
        #[arg(short, long)]
        output: PathBuf,
        /// Pipeline configuration as JSON.
        #[arg(long)]
        config: Option<PathBuf>,
        /// Log at debug level unless RUST_LOG says otherwise.
        #[arg(short, long)]
        verbose: bool,
    },
}

fn main() -> Result<(), PipelineError> {
    let cli = Cli::parse();
    match cli.command {
        Command::Render {
            document,
            output,
            config,
            verbose,
        } => {
            let level = if verbose { "debug" } else { "info" };
            env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(level)).init();

            let config = match config {
                Some(path) => PipelineConfig::from_file(path)?,
                None => PipelineConfig::default(),
            };
            let document = DocumentSpec::from_file(&document)?;
            Pipeline::new(config).render_to_file(&document, &output)?;
            println!("Successfully generated {}", output.display());
            Ok(())
        }
    }
}
