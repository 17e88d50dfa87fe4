// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Quire — assemble ordered raster images into one paginated PDF.
//
// Entry point. Initialises logging, ingests the listed image files into the
// store in argument order, assembles, and writes the finished document.

use std::path::PathBuf;

use clap::{Parser, ValueEnum};
use tracing::{debug, info, warn};

use quire_core::config::{AssemblyConfig, FailurePolicy, PageGeometry};
use quire_core::error::Result;
use quire_core::types::{ImageEntry, ImageSource, PaperSize};
use quire_document::assemble::DocumentAssembler;
use quire_document::pdf::PdfWriter;
use quire_document::resolve::ImageDimensionResolver;
use quire_document::store::ImageStore;

/// Paper size presets selectable on the command line.
#[derive(Debug, Clone, Copy, ValueEnum)]
enum PaperArg {
    A4,
    A3,
    A5,
    Letter,
    Legal,
}

impl From<PaperArg> for PaperSize {
    fn from(arg: PaperArg) -> Self {
        match arg {
            PaperArg::A4 => PaperSize::A4,
            PaperArg::A3 => PaperSize::A3,
            PaperArg::A5 => PaperSize::A5,
            PaperArg::Letter => PaperSize::Letter,
            PaperArg::Legal => PaperSize::Legal,
        }
    }
}

/// Failure handling when an image cannot be decoded.
#[derive(Debug, Clone, Copy, ValueEnum)]
enum OnErrorArg {
    /// Abort the whole run; no document is produced.
    Abort,
    /// Skip the failing image and report which pages were dropped.
    Skip,
}

impl From<OnErrorArg> for FailurePolicy {
    fn from(arg: OnErrorArg) -> Self {
        match arg {
            OnErrorArg::Abort => FailurePolicy::Abort,
            OnErrorArg::Skip => FailurePolicy::Skip,
        }
    }
}

#[derive(Debug, Parser)]
#[command(
    name = "quire",
    version,
    about = "Assemble images into a paginated PDF, one scaled-and-centred image per page"
)]
struct Cli {
    /// Image files in page order (JPEG, PNG, GIF, ...).
    #[arg(required = true)]
    images: Vec<PathBuf>,

    /// Output file path. Defaults to the configured output name.
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Paper size preset.
    #[arg(long, value_enum)]
    paper: Option<PaperArg>,

    /// Page width in millimetres; overrides --paper.
    #[arg(long, requires = "page_height")]
    page_width: Option<f64>,

    /// Page height in millimetres; overrides --paper.
    #[arg(long, requires = "page_width")]
    page_height: Option<f64>,

    /// Margin in millimetres on all four sides.
    #[arg(long)]
    margin: Option<f64>,

    /// Title metadata embedded in the PDF.
    #[arg(long)]
    title: Option<String>,

    /// What to do when an image fails to decode.
    #[arg(long, value_enum)]
    on_error: Option<OnErrorArg>,

    /// JSON configuration file; explicit flags override its values.
    #[arg(long)]
    config: Option<PathBuf>,
}

impl Cli {
    /// Merge the config file (if any) with command-line overrides.
    fn into_parts(self) -> Result<(Vec<PathBuf>, Option<PathBuf>, AssemblyConfig)> {
        let mut config = match &self.config {
            Some(path) => AssemblyConfig::load(path)?,
            None => AssemblyConfig::default(),
        };

        if let Some(paper) = self.paper {
            config.page = PageGeometry::from_paper(paper.into(), config.page.margin_mm);
        }
        if let (Some(width), Some(height)) = (self.page_width, self.page_height) {
            config.page.width_mm = width;
            config.page.height_mm = height;
        }
        if let Some(margin) = self.margin {
            config.page.margin_mm = margin;
        }
        if let Some(title) = self.title {
            config.title = Some(title);
        }
        if let Some(policy) = self.on_error {
            config.failure_policy = policy.into();
        }

        Ok((self.images, self.output, config))
    }
}

async fn run(cli: Cli) -> Result<()> {
    let (images, output, config) = cli.into_parts()?;

    let mut store = ImageStore::new();
    for path in &images {
        let bytes = tokio::fs::read(path).await?;
        let display_name = path
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_else(|| path.display().to_string());
        let entry = ImageEntry::new(ImageSource::new(bytes), display_name);
        debug!(id = %entry.id, path = %path.display(), "image added");
        store.append(entry);
    }
    info!(count = store.len(), "store populated");

    let snapshot = store.snapshot();
    let writer = PdfWriter::new(config.page, config.title.as_deref());
    let assembler = DocumentAssembler::new(config.clone());
    let result = assembler
        .assemble(&snapshot, &ImageDimensionResolver, writer)
        .await?;

    for id in &result.skipped {
        warn!(%id, "entry skipped — not in the output document");
    }

    let out_path = output.unwrap_or_else(|| PathBuf::from(&config.output_name));
    tokio::fs::write(&out_path, &result.bytes).await?;
    info!(
        pages = result.pages,
        bytes = result.bytes.len(),
        path = %out_path.display(),
        "PDF written"
    );
    Ok(())
}

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    let cli = Cli::parse();
    if let Err(err) = run(cli).await {
        tracing::error!(error = %err, "assembly failed — no document was produced");
        std::process::exit(1);
    }
}
