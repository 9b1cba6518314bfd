use clap::{Parser, Subcommand};
use collection_linearizer::config::{LinearizeOptions, UnresolvedPolicy};
use collection_linearizer::pipeline;
use std::path::PathBuf;
use tracing::debug;
use tracing_subscriber::EnvFilter;

pub type Result<T> = anyhow::Result<T>;

#[derive(Parser)]
#[command(name = "collection-linearizer", version)]
#[command(
    about = "Resolve setNextRequest() directives of a Postman collection into a flat request order",
    long_about = None
)]
struct Cli {
    /// Debug logs (overridden by RUST_LOG).
    #[arg(short, long, global = true)]
    verbose: bool,

    /// What to do when a directive names a request that does not exist.
    #[arg(long, value_enum, default_value_t = UnresolvedPolicy::Stop, global = true)]
    on_unresolved: UnresolvedPolicy,

    #[command(subcommand)]
    cmd: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Linearize one collection file.
    Linearize {
        #[arg(long)]
        collection: PathBuf,

        /// Defaults to <name>.linear.json next to the input.
        #[arg(short = 'o', long)]
        out: Option<PathBuf>,
    },

    /// Linearize every *.json collection of a directory; failures do not stop the batch.
    Batch {
        #[arg(long)]
        dir: PathBuf,

        /// Output directory (defaults to the input directory).
        #[arg(short = 'o', long)]
        out: Option<PathBuf>,
    },

    /// Print the linear order of a collection without writing anything.
    Plan {
        #[arg(long)]
        collection: PathBuf,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    // RUST_LOG wins; otherwise --verbose selects debug.
    let env_filter = if std::env::var("RUST_LOG").is_ok() {
        EnvFilter::from_default_env()
    } else if cli.verbose {
        EnvFilter::new("collection_linearizer=debug")
    } else {
        EnvFilter::new("collection_linearizer=info")
    };

    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    debug!("Logging initialized (verbose={})", cli.verbose);

    let options = LinearizeOptions {
        on_unresolved: cli.on_unresolved,
    };

    match cli.cmd {
        Commands::Linearize { collection, out } => {
            let out = out.unwrap_or_else(|| pipeline::output_path(&collection, None));
            let report = pipeline::linearize_file(&collection, &out, &options)?;
            println!(
                "{}: {} requests found, {} placed -> {}",
                collection.display(),
                report.found,
                report.placed,
                out.display()
            );
        }
        Commands::Batch { dir, out } => {
            let summary = pipeline::run_batch(&dir, out.as_deref(), &options)?;
            for (input, report) in &summary.succeeded {
                println!(
                    "ok     {}: {} requests found, {} placed",
                    input.display(),
                    report.found,
                    report.placed
                );
            }
            for (input, err) in &summary.failed {
                println!("failed {}: {:#}", input.display(), err);
            }
            if !summary.failed.is_empty() {
                anyhow::bail!(
                    "{} of {} collections failed",
                    summary.failed.len(),
                    summary.failed.len() + summary.succeeded.len()
                );
            }
        }
        Commands::Plan { collection } => {
            let (flat, _) = pipeline::read_and_linearize(&collection, &options)?;
            if flat.is_empty() {
                println!("no requests to run");
            }
            for (position, item) in flat.items.iter().enumerate() {
                println!("{:>3}  {}", position + 1, item.name);
            }
        }
    }

    Ok(())
}
