// wine-guide: Personalized wedding wine guides and dinner pairings

use clap::{Parser, Subcommand};
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::fs::File;
use std::io::{BufReader, BufWriter, Write};
use std::path::{Path, PathBuf};

use wine_guide::budget::{compute_budget, format_money};
use wine_guide::config::Config;
use wine_guide::content::parse::into_wine_list;
use wine_guide::error::AppError;
use wine_guide::guide::assemble_guide;
use wine_guide::layout::GuideTemplate;
use wine_guide::model::{BudgetSummary, EventRequest, GuideContent, QuantitySet};
use wine_guide::quantities::compute_quantities;
use wine_guide::render::PdfRenderer;
use wine_guide::{logging, server};

// ============================================================================
// Data Structures
// ============================================================================

/// CLI Arguments
#[derive(Parser, Debug)]
#[command(author, version, about = "Generate personalized wedding wine guides")]
struct Args {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Run the HTTP service
    Serve {
        /// TOML configuration file
        #[arg(short, long)]
        config: Option<PathBuf>,

        /// Address to listen on (overrides configuration)
        #[arg(short, long)]
        bind: Option<String>,
    },

    /// Render a guide from an event and pre-generated content, offline
    Render {
        /// Event request JSON file
        #[arg(short, long)]
        event: PathBuf,

        /// Generated content JSON file (personalLetter + wines)
        #[arg(short = 'c', long)]
        content: PathBuf,

        /// Output PDF path (default: <names>_Wine_Guide.pdf)
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Allow content that lacks some wine categories
        #[arg(long)]
        allow_missing: bool,
    },

    /// Print bottle quantities, and the budget when content is given
    Plan {
        /// Event request JSON file
        #[arg(short, long)]
        event: PathBuf,

        /// Generated content JSON file for prices
        #[arg(short = 'c', long)]
        content: Option<PathBuf>,
    },
}

#[derive(Serialize)]
struct Plan {
    quantities: QuantitySet,
    #[serde(skip_serializing_if = "Option::is_none")]
    budget: Option<BudgetSummary>,
}

// ============================================================================
// Main Entry Point
// ============================================================================

fn main() {
    if let Err(e) = run() {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

fn run() -> Result<(), AppError> {
    let args = Args::parse();

    match args.command {
        Command::Serve { config, bind } => {
            let mut config = Config::load(config.as_deref())?;
            if let Some(bind) = bind {
                config.server.bind = bind;
            }
            logging::init(config.server.log_format);

            let runtime = tokio::runtime::Runtime::new()?;
            runtime.block_on(server::serve(config))
        }
        Command::Render {
            event,
            content,
            output,
            allow_missing,
        } => render(&event, &content, output, allow_missing),
        Command::Plan { event, content } => plan(&event, content.as_deref()),
    }
}

// ============================================================================
// Commands
// ============================================================================

fn render(
    event_path: &Path,
    content_path: &Path,
    output: Option<PathBuf>,
    allow_missing: bool,
) -> Result<(), AppError> {
    let event: EventRequest = read_json(event_path)?;
    let content: GuideContent = read_json(content_path)?;

    let guide = assemble_guide(&event, content, &GuideTemplate::default(), !allow_missing)?;
    let bytes = guide.render(&PdfRenderer)?;

    let output_file = output.unwrap_or_else(|| PathBuf::from(&guide.filename));
    let file = File::create(&output_file)?;
    let mut writer = BufWriter::new(file);
    writer.write_all(&bytes)?;
    writer.flush()?;

    println!("✓ Generated: {}", output_file.display());
    println!("  Couple: {}", event.names());
    println!("  Pages: {}", guide.pages.len());
    println!("  Bottles: {}", guide.quantities.total);
    println!("  Estimated total: {}", format_money(guide.budget.total));

    Ok(())
}

fn plan(event_path: &Path, content_path: Option<&Path>) -> Result<(), AppError> {
    let event: EventRequest = read_json(event_path)?;
    let quantities = compute_quantities(&event);

    let budget = match content_path {
        Some(path) => {
            let content: GuideContent = read_json(path)?;
            let wines = into_wine_list(content.wines, false)?;
            Some(compute_budget(&quantities, &wines))
        }
        None => None,
    };

    let plan = Plan { quantities, budget };
    let json = serde_json::to_string_pretty(&plan)
        .map_err(|e| AppError::Internal(e.to_string()))?;
    println!("{}", json);
    Ok(())
}

// ============================================================================
// Helper Functions
// ============================================================================

fn read_json<T: DeserializeOwned>(path: &Path) -> Result<T, AppError> {
    let file = File::open(path)
        .map_err(|e| AppError::Validation(format!("Failed to read {}: {}", path.display(), e)))?;
    serde_json::from_reader(BufReader::new(file))
        .map_err(|e| AppError::Validation(format!("Invalid JSON in {}: {}", path.display(), e)))
}
