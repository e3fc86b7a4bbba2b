mod config;
mod logger;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use config::ToolConfig;
use log::{debug, warn};
use pdf_invoice::{Invoice, NumberFormat, RenderOptions};
use pdf_payload::{PayloadOptions, lookup_encoding};
use pdf_recompose::{OverlayOptions, OverlayOutcome, ReplaceStrategy};
use std::path::{Path, PathBuf};

/// Invoice records are JSON, which is always UTF-8
const RECORD_ENCODING: &str = "utf-8";

#[derive(Parser)]
#[command(name = "pdfi", about = "Invoice PDF tools", version)]
struct Cli {
    /// More output (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    /// JSON configuration file
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Render an invoice PDF from a JSON record
    Render {
        /// Invoice JSON record
        #[arg(short, long)]
        input: PathBuf,

        /// Output PDF file (defaults to the record's file name)
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Number format for amounts
        #[arg(long, value_enum)]
        format: Option<FormatArg>,
    },

    /// Put a letterhead beneath the pages of a PDF
    Overlay {
        /// PDF to decorate
        #[arg(short, long)]
        input: PathBuf,

        /// Write here instead of replacing the input
        #[arg(short, long)]
        output: Option<PathBuf>,

        #[command(flatten)]
        letterhead: LetterheadArgs,
    },

    /// Hide the contents of a text file inside a PDF (the file is consumed)
    Embed {
        /// PDF to embed into; replaced in place
        #[arg(short, long)]
        document: PathBuf,

        /// Text file to embed
        #[arg(short, long)]
        payload: PathBuf,

        #[command(flatten)]
        payload_args: PayloadArgs,
    },

    /// Recover the hidden text from a PDF
    Extract {
        /// PDF holding a payload
        #[arg(short, long)]
        document: PathBuf,

        /// Write the payload here instead of stdout
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Information dictionary key
        #[arg(long)]
        key: Option<String>,
    },

    /// Render, apply the letterhead and embed the JSON record
    Make {
        /// Invoice JSON record
        #[arg(short, long)]
        input: PathBuf,

        /// Output PDF file (defaults to the record's file name)
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Number format for amounts
        #[arg(long, value_enum)]
        format: Option<FormatArg>,

        /// Embed a copy of the record and leave the JSON file in place
        #[arg(long)]
        keep_record: bool,

        #[command(flatten)]
        letterhead: LetterheadArgs,

        #[command(flatten)]
        payload_args: PayloadArgs,
    },

    /// Write an example invoice record
    Example {
        /// Output JSON file
        #[arg(short, long, default_value = "invoice.json")]
        output: PathBuf,

        /// Also write a configuration file with every setting at its default
        #[arg(long)]
        config_template: Option<PathBuf>,
    },
}

#[derive(clap::Args)]
struct LetterheadArgs {
    /// Letterhead PDF drawn beneath the first page
    #[arg(long)]
    letterhead: Option<PathBuf>,

    /// Background PDF drawn beneath the following pages
    #[arg(long)]
    background: Option<PathBuf>,

    /// Document title
    #[arg(long)]
    title: Option<String>,

    /// Document author
    #[arg(long)]
    author: Option<String>,
}

#[derive(clap::Args)]
struct PayloadArgs {
    /// Information dictionary key
    #[arg(long)]
    key: Option<String>,

    /// Encoding of the payload file
    #[arg(long)]
    encoding: Option<String>,

    /// How the original document is replaced
    #[arg(long, value_enum)]
    strategy: Option<StrategyArg>,
}

#[derive(Clone, Copy, ValueEnum)]
enum FormatArg {
    German,
    English,
}

#[derive(Clone, Copy, ValueEnum)]
enum StrategyArg {
    Backup,
    Overwrite,
}

impl From<FormatArg> for NumberFormat {
    fn from(arg: FormatArg) -> Self {
        match arg {
            FormatArg::German => Self::german(),
            FormatArg::English => Self::english(),
        }
    }
}

impl From<StrategyArg> for ReplaceStrategy {
    fn from(arg: StrategyArg) -> Self {
        match arg {
            StrategyArg::Backup => Self::BackupThenRemove,
            StrategyArg::Overwrite => Self::RenameOverwrite,
        }
    }
}

impl LetterheadArgs {
    fn overlay_options(self, config: &ToolConfig, output: Option<PathBuf>) -> OverlayOptions {
        OverlayOptions {
            letterhead: self.letterhead.or_else(|| config.letterhead.clone()),
            background: self.background.or_else(|| config.background.clone()),
            output,
            title: self.title.or_else(|| config.title.clone()).unwrap_or_default(),
            author: self.author.or_else(|| config.author.clone()).unwrap_or_default(),
            replace_strategy: config.payload.replace_strategy,
        }
    }
}

impl PayloadArgs {
    fn payload_options(self, config: &ToolConfig) -> Result<PayloadOptions> {
        let mut options = config.payload.clone();
        if let Some(key) = self.key {
            options.key = key;
        }
        if let Some(encoding) = self.encoding {
            options.source_encoding = encoding;
        }
        if let Some(strategy) = self.strategy {
            options.replace_strategy = strategy.into();
        }
        options.validate()?;
        Ok(options)
    }

    /// Options for embedding an invoice record
    fn record_options(self, config: &ToolConfig) -> Result<PayloadOptions> {
        let mut options = self.payload_options(config)?;
        if lookup_encoding(&options.source_encoding)? != lookup_encoding(RECORD_ENCODING)? {
            warn!(
                "Ignoring source encoding {} for the invoice record, reading it as UTF-8",
                options.source_encoding
            );
        }
        options.source_encoding = RECORD_ENCODING.to_string();
        Ok(options)
    }
}

fn render_options(config: &ToolConfig, format: Option<FormatArg>, invoice: &Invoice) -> RenderOptions {
    RenderOptions {
        number_format: format.map(Into::into).unwrap_or_else(|| config.number_format.clone()),
        title: config.title.clone().unwrap_or_else(|| invoice.number.clone()),
        ..Default::default()
    }
}

/// Output path for a rendered record: explicit, the record's own file name
/// next to the record, or the record path with a `.pdf` extension
fn pdf_path(input: &Path, output: Option<PathBuf>, invoice: &Invoice) -> PathBuf {
    if let Some(output) = output {
        return output;
    }
    match &invoice.file_name {
        Some(name) => input.with_file_name(name),
        None => input.with_extension("pdf"),
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    logger::init(cli.verbose).context("Failed to install logger")?;

    let config = match &cli.config {
        Some(path) => ToolConfig::load(path)?,
        None => ToolConfig::default(),
    };
    debug!("Configuration: {:?}", config);

    match cli.command {
        Commands::Render {
            input,
            output,
            format,
        } => {
            let invoice = pdf_invoice::load_invoice(&input)
                .with_context(|| format!("Failed to read invoice {}", input.display()))?;
            let output = pdf_path(&input, output, &invoice);
            let options = render_options(&config, format, &invoice);

            pdf_invoice::generate_pdf(&invoice, &options, &output)?;
            println!("Rendered {} → {}", invoice.number, output.display());
        }

        Commands::Overlay {
            input,
            output,
            letterhead,
        } => {
            let options = letterhead.overlay_options(&config, output);
            report_overlay(&input, pdf_recompose::overlay(&input, &options)?);
        }

        Commands::Embed {
            document,
            payload,
            payload_args,
        } => {
            let options = payload_args.payload_options(&config)?;
            let report = pdf_payload::embed(&document, &payload, &options)?;
            println!(
                "Embedded {} bytes from {} → {} ({} pages)",
                report.payload_bytes,
                payload.display(),
                report.document.display(),
                report.pages
            );
        }

        Commands::Extract {
            document,
            output,
            key,
        } => {
            let mut options = config.payload.clone();
            if let Some(key) = key {
                options.key = key;
            }
            let text = pdf_payload::decode_with(&document, &options)?;
            match output {
                Some(path) => {
                    std::fs::write(&path, &text)?;
                    println!("Extracted {} bytes → {}", text.len(), path.display());
                }
                None => print!("{}", text),
            }
        }

        Commands::Make {
            input,
            output,
            format,
            keep_record,
            letterhead,
            payload_args,
        } => {
            let record = std::fs::read_to_string(&input)
                .with_context(|| format!("Failed to read invoice {}", input.display()))?;
            let invoice = Invoice::from_json(&record)?;
            let payload_options = payload_args.record_options(&config)?;
            let output = pdf_path(&input, output, &invoice);

            let render = render_options(&config, format, &invoice);
            pdf_invoice::generate_pdf(&invoice, &render, &output)?;
            println!("Rendered {} → {}", invoice.number, output.display());

            let mut overlay = letterhead.overlay_options(&config, None);
            if overlay.title.is_empty() {
                overlay.title = invoice.number.clone();
            }
            report_overlay(&output, pdf_recompose::overlay(&output, &overlay)?);

            let report = if keep_record {
                pdf_payload::embed_text(&output, &record, &payload_options)?
            } else {
                pdf_payload::embed(&output, &input, &payload_options)?
            };
            println!(
                "Embedded {} bytes of {} → {}",
                report.payload_bytes,
                input.display(),
                report.document.display()
            );
        }

        Commands::Example {
            output,
            config_template,
        } => {
            let invoice = Invoice::example();
            std::fs::write(&output, invoice.to_json()?)?;
            println!("Example invoice → {}", output.display());

            if let Some(path) = config_template {
                ToolConfig::default().save(&path)?;
                println!("Configuration template → {}", path.display());
            }
        }
    }

    Ok(())
}

fn report_overlay(input: &Path, outcome: OverlayOutcome) {
    match outcome {
        OverlayOutcome::Unchanged => println!("No letterhead configured, {} unchanged", input.display()),
        OverlayOutcome::Written(path) => println!("Letterhead applied → {}", path.display()),
        OverlayOutcome::Replaced(path) => println!("Letterhead applied in place → {}", path.display()),
    }
}
