use anyhow::Result;
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing::{info, Level};
use tracing_subscriber::filter::LevelFilter;
use tracing_subscriber::EnvFilter;

mod cli;
mod config;
mod error;
mod extract;
mod host;
mod locator;
mod mapper;
mod pipeline;
mod query;

#[derive(Parser)]
#[command(name = "mapper-gen")]
#[command(author = "Mapper Gen Team")]
#[command(version)]
#[command(about = "Generate MyBatis mapper queries from data-access method signatures", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Enable debug logging
    #[arg(short, long, global = true)]
    debug: bool,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Generate a query for the selected signature and append it to the mapper file
    Generate {
        /// Data-access interface the selection comes from
        #[arg(short, long)]
        file: Option<PathBuf>,

        /// Selected method signature ('-' reads stdin)
        #[arg(short, long, conflicts_with = "selection_file")]
        selection: Option<String>,

        /// Read the selected text from a file
        #[arg(long)]
        selection_file: Option<PathBuf>,

        /// Workspace root
        #[arg(short, long, default_value = ".")]
        workspace: PathBuf,

        /// Query type: select, insert, update, delete (prompted if omitted)
        #[arg(short, long)]
        kind: Option<String>,

        /// Table name (prompted if omitted)
        #[arg(short, long)]
        table: Option<String>,

        /// Print the resulting mapper document instead of writing it
        #[arg(long)]
        dry_run: bool,
    },

    /// Show the signature parsed from a snippet
    Parse {
        /// Method signature ('-' reads stdin)
        #[arg(short, long, conflicts_with = "selection_file")]
        selection: Option<String>,

        /// Read the snippet from a file
        #[arg(long)]
        selection_file: Option<PathBuf>,

        /// Output format: json, text
        #[arg(short, long, default_value = "text")]
        format: String,
    },

    /// List the fields of a value-object file
    Fields {
        /// Value-object source file
        file: PathBuf,

        /// Output format: json, text
        #[arg(short, long, default_value = "text")]
        format: String,
    },

    /// Print the effective configuration
    Config {
        /// Workspace root
        #[arg(short, long, default_value = ".")]
        workspace: PathBuf,
    },
}

fn init_logging(debug: bool, verbose: bool) {
    let level = if debug {
        Level::DEBUG
    } else if verbose {
        Level::INFO
    } else {
        Level::WARN
    };

    // RUST_LOG overrides the flags
    let filter = EnvFilter::builder()
        .with_default_directive(LevelFilter::from_level(level).into())
        .from_env_lossy();

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    init_logging(cli.debug, cli.verbose);

    info!("mapper-gen v{} starting...", env!("CARGO_PKG_VERSION"));

    match cli.command {
        Commands::Generate {
            file,
            selection,
            selection_file,
            workspace,
            kind,
            table,
            dry_run,
        } => {
            let selection = cli::read_selection(selection, selection_file.as_deref())?;
            cli::generate::generate_query(selection, file, workspace, kind, table, dry_run).await?;
        }

        Commands::Parse {
            selection,
            selection_file,
            format,
        } => {
            let selection = cli::read_selection(selection, selection_file.as_deref())?;
            cli::parse::parse_selection(selection, format).await?;
        }

        Commands::Fields { file, format } => {
            cli::fields::show_fields(file, format).await?;
        }

        Commands::Config { workspace } => {
            cli::config::show_config(workspace).await?;
        }
    }

    Ok(())
}
