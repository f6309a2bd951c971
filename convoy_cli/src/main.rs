use clap::{Parser, Subcommand};
use mimalloc::MiMalloc;

use crate::{optimize::OptimizeArgs, optimize_sheets::OptimizeSheetsArgs};

mod matrix;
mod optimize;
mod optimize_sheets;
mod parsers;
mod schema;
mod sheets;
mod summary;

#[global_allocator]
static GLOBAL: MiMalloc = MiMalloc;

#[derive(Parser)]
#[clap(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    #[arg(short, long)]
    debug: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Plans routes from a locations sheet and a vehicles sheet (CSV)
    OptimizeSheets {
        #[command(flatten)]
        args: OptimizeSheetsArgs,
    },
    /// Plans routes from a JSON dispatch document
    Optimize {
        #[command(flatten)]
        args: OptimizeArgs,
    },
    /// Writes the JSON schema of the dispatch document
    Schema {
        #[arg(long, short = 'o')]
        out: Option<std::path::PathBuf>,
    },
}

#[tokio::main]
async fn main() -> Result<(), anyhow::Error> {
    let cli = Cli::parse();
    tracing_subscriber::fmt()
        .with_max_level(if cli.debug {
            tracing::Level::DEBUG
        } else {
            tracing::Level::INFO
        })
        .init();

    // A missing .env is fine, the key may come from the environment.
    let _ = dotenvy::dotenv();

    match cli.command {
        Commands::OptimizeSheets { args } => optimize_sheets::run(args).await?,
        Commands::Optimize { args } => optimize::run(args).await?,
        Commands::Schema { out } => schema::run(out)?,
    }

    Ok(())
}
