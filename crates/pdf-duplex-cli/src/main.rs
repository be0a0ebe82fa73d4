use anyhow::Result;
use clap::{Parser, Subcommand, ValueEnum};
use pdf_duplex::{
    DuplexOptions, OutputMode, ReinsertGuide, SourceDocument, calculate_statistics, partition,
    plan_split, reinsert_guide, save_pdf,
};
use pdf_duplex_runtime::{TipClient, TipConfig};
use std::path::{Path, PathBuf};

#[derive(Parser)]
#[command(name = "pdfdx", about = "Manual duplex printing helper", version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Split a PDF into an odd-pages pass and a reversed even-pages pass
    Split {
        /// Input PDF file (may come from --config instead)
        input: Option<PathBuf>,

        /// Output file for the odd pass (default: <input>-odd.pdf)
        #[arg(long)]
        odd: Option<PathBuf>,

        /// Output file for the even pass (default: <input>-even.pdf)
        #[arg(long)]
        even: Option<PathBuf>,

        /// How the printer ejects printed sheets
        #[arg(long, value_enum)]
        output_mode: Option<OutputModeArg>,

        /// Load job options from a JSON file
        #[arg(long)]
        config: Option<PathBuf>,

        /// Show statistics only, don't write PDFs
        #[arg(long)]
        stats_only: bool,
    },

    /// Print the page order of both passes for a given page count
    Plan {
        /// Number of pages in the document
        pages: usize,
    },

    /// Print the stack re-insertion instructions
    Guide {
        /// How the printer ejects printed sheets
        #[arg(long, default_value = "face-down", value_enum)]
        output_mode: OutputModeArg,
    },
}

#[derive(Clone, Copy, ValueEnum)]
enum OutputModeArg {
    FaceUp,
    FaceDown,
}

impl From<OutputModeArg> for OutputMode {
    fn from(arg: OutputModeArg) -> Self {
        match arg {
            OutputModeArg::FaceUp => Self::FaceUp,
            OutputModeArg::FaceDown => Self::FaceDown,
        }
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    env_logger::init();
    let cli = Cli::parse();

    match cli.command {
        Commands::Split {
            input,
            odd,
            even,
            output_mode,
            config,
            stats_only,
        } => {
            let mut options = match config {
                Some(path) => DuplexOptions::load(&path).await?,
                None => DuplexOptions::default(),
            };
            // Explicit arguments win over the config file
            if let Some(input) = input {
                options.input_file = input;
            }
            if let Some(mode) = output_mode {
                options.output_mode = mode.into();
            }
            options.validate()?;

            let source = SourceDocument::load(&options.input_file).await?;

            let stats = calculate_statistics(source.page_count());
            println!("Split statistics:");
            println!("  Source pages: {}", stats.source_pages);
            println!("  Odd pass pages: {}", stats.odd_pages);
            println!("  Even pass pages: {}", stats.even_pages);
            println!("  Sheets of paper: {}", stats.sheets);
            if stats.last_sheet_blank_back {
                println!("  The last sheet keeps a blank back side");
            }

            if stats_only {
                return Ok(());
            }

            // Cosmetic; only shown when a tip service is configured
            if let Some(config) = tip_config_from_env() {
                let tip = TipClient::new(Some(config))
                    .advisory_tip(source.page_count())
                    .await;
                println!("Tip: {tip}");
            }

            let plan = plan_split(source.page_count());
            let pair = partition(&source, &plan).await?;

            let odd_path = odd.unwrap_or_else(|| derive_output(&options.input_file, "odd"));
            save_pdf(pair.odd, &odd_path).await?;
            println!("Odd pass ({} pages) → {}", plan.odd.len(), odd_path.display());

            if plan.even.is_empty() {
                println!("Single-page document: there is no even pass to print.");
                return Ok(());
            }

            let even_path = even.unwrap_or_else(|| derive_output(&options.input_file, "even"));
            save_pdf(pair.even, &even_path).await?;
            println!(
                "Even pass ({} pages, reversed) → {}",
                plan.even.len(),
                even_path.display()
            );

            println!();
            println!("Print the odd pass first, then between the passes:");
            print_guide(&reinsert_guide(options.output_mode));
        }

        Commands::Plan { pages } => {
            let plan = plan_split(pages);
            println!("Pass 1 (odd pages):  {}", format_pages(&plan.odd));
            println!("Pass 2 (even pages): {}", format_pages(&plan.even));
        }

        Commands::Guide { output_mode } => {
            print_guide(&reinsert_guide(output_mode.into()));
        }
    }

    Ok(())
}

fn tip_config_from_env() -> Option<TipConfig> {
    match (
        std::env::var("PDFDX_TIP_ENDPOINT"),
        std::env::var("PDFDX_TIP_API_KEY"),
    ) {
        (Ok(endpoint), Ok(api_key)) => Some(TipConfig { endpoint, api_key }),
        _ => None,
    }
}

fn derive_output(input: &Path, suffix: &str) -> PathBuf {
    let stem = input
        .file_stem()
        .and_then(|s| s.to_str())
        .unwrap_or("output");
    input.with_file_name(format!("{stem}-{suffix}.pdf"))
}

fn format_pages(indices: &[usize]) -> String {
    if indices.is_empty() {
        return "(none)".to_string();
    }
    indices
        .iter()
        .map(|i| (i + 1).to_string())
        .collect::<Vec<_>>()
        .join(", ")
}

fn print_guide(guide: &ReinsertGuide) {
    for (i, step) in guide.steps.iter().enumerate() {
        println!("  {}. {step}", i + 1);
    }
    println!();
    println!("{}", guide.summary);
    println!("{}", guide.note);
}
