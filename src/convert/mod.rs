//! Conversion orchestration: source → layout builder → package file.
//!
//! A [`Converter`] runs one conversion per call. Every failure inside a run
//! is turned into a [`ConversionResult`] with `success == false`; nothing is
//! raised to the caller.
//!
//! # Example
//!
//! ```no_run
//! use pdf2office::convert::{ConvertOptions, Converter, OutputFormat};
//!
//! let converter = Converter::new(ConvertOptions::default());
//! let result = converter.convert("report.pdf", "report.pptx", OutputFormat::Pptx);
//! println!("{}", result.message);
//! ```

mod batch;

pub use batch::{batch_output_path, convert_batch, BatchEntry};

use std::fmt;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::layout::{DocumentLayout, Labels, LayoutBuilder, PageContent, SlideLayout};
use crate::model::{DocumentModel, SlideDeckModel};
use crate::parser::{LopdfSource, PageSource, ParseOptions};
use crate::writer::{self, OfficePackage};

/// Target container format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// Word document (`.docx`)
    Docx,
    /// PowerPoint presentation (`.pptx`)
    Pptx,
}

impl OutputFormat {
    /// File extension without the dot.
    pub fn extension(&self) -> &'static str {
        match self {
            OutputFormat::Docx => DocumentModel::EXTENSION,
            OutputFormat::Pptx => SlideDeckModel::EXTENSION,
        }
    }

    /// MIME type of the produced file.
    pub fn mime_type(&self) -> &'static str {
        match self {
            OutputFormat::Docx => DocumentModel::MIME_TYPE,
            OutputFormat::Pptx => SlideDeckModel::MIME_TYPE,
        }
    }
}

impl fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.extension())
    }
}

/// Options for a conversion run.
#[derive(Debug, Clone)]
pub struct ConvertOptions {
    /// How the PDF source is read
    pub parse: ParseOptions,
    /// Labels inserted by the layout builders
    pub labels: Labels,
    /// Directory for the staging file; defaults to the output's directory
    pub temp_dir: Option<PathBuf>,
    /// Convert batch files in parallel
    pub parallel: bool,
}

impl Default for ConvertOptions {
    fn default() -> Self {
        Self {
            parse: ParseOptions::default(),
            labels: Labels::default(),
            temp_dir: None,
            parallel: true,
        }
    }
}

impl ConvertOptions {
    /// Create default options.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set source parsing options.
    pub fn with_parse_options(mut self, parse: ParseOptions) -> Self {
        self.parse = parse;
        self
    }

    /// Set the builder labels.
    pub fn with_labels(mut self, labels: Labels) -> Self {
        self.labels = labels;
        self
    }

    /// Stage output files in `dir`.
    pub fn with_temp_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.temp_dir = Some(dir.into());
        self
    }

    /// Enable or disable parallel batch conversion.
    pub fn with_parallel(mut self, parallel: bool) -> Self {
        self.parallel = parallel;
        self
    }
}

/// Outcome of one conversion.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConversionResult {
    /// Whether the output file was written
    pub success: bool,
    /// Pages in the source (0 if it could not be opened)
    pub pages: u32,
    /// Human-readable summary or failure cause
    pub message: String,
    /// Path of the written file on success
    pub output: Option<PathBuf>,
}

impl ConversionResult {
    fn succeeded(pages: u32, output: &Path) -> Self {
        Self {
            success: true,
            pages,
            message: format!("Conversion succeeded: {} pages", pages),
            output: Some(output.to_path_buf()),
        }
    }

    fn failed(pages: u32, cause: impl fmt::Display) -> Self {
        Self {
            success: false,
            pages,
            message: format!("Conversion failed: {}", cause),
            output: None,
        }
    }
}

/// Pipeline stage of a conversion run, logged on each transition.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stage {
    /// Before the source is opened
    Init,
    /// Source opened, page count known
    Opened,
    /// Placing page n
    PerPage(u32),
    /// Package written
    Serialized,
    /// Result produced
    Done,
    /// Run aborted
    Failed,
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Stage::Init => f.write_str("init"),
            Stage::Opened => f.write_str("opened"),
            Stage::PerPage(n) => write!(f, "page {}", n),
            Stage::Serialized => f.write_str("serialized"),
            Stage::Done => f.write_str("done"),
            Stage::Failed => f.write_str("failed"),
        }
    }
}

fn enter(stage: Stage) {
    log::debug!("conversion stage: {}", stage);
}

/// Drives conversions with a fixed set of options.
#[derive(Debug, Clone, Default)]
pub struct Converter {
    options: ConvertOptions,
}

impl Converter {
    /// Create a converter.
    pub fn new(options: ConvertOptions) -> Self {
        Self { options }
    }

    /// Options in use.
    pub fn options(&self) -> &ConvertOptions {
        &self.options
    }

    /// Convert the PDF at `input` into `output`.
    ///
    /// The document title is the input's file stem. The target is chosen
    /// by `format` alone; the extension of `output` is not inspected.
    pub fn convert(
        &self,
        input: impl AsRef<Path>,
        output: impl AsRef<Path>,
        format: OutputFormat,
    ) -> ConversionResult {
        let input = input.as_ref();
        enter(Stage::Init);

        let source = match LopdfSource::open(input, self.options.parse.clone()) {
            Ok(source) => source,
            Err(e) => {
                enter(Stage::Failed);
                log::debug!("{}: {}", input.display(), e);
                return ConversionResult::failed(0, e);
            }
        };

        self.convert_source(&source, &document_title(input), output, format)
    }

    /// Convert pages from any [`PageSource`] into `output`.
    pub fn convert_source<S: PageSource>(
        &self,
        source: &S,
        title: &str,
        output: impl AsRef<Path>,
        format: OutputFormat,
    ) -> ConversionResult {
        let output = output.as_ref();
        let pages = source.page_count();
        enter(Stage::Opened);

        let written = match format {
            OutputFormat::Docx => self
                .build_document(source, title)
                .and_then(|model| self.save(&model, output)),
            OutputFormat::Pptx => self
                .build_deck(source, title)
                .and_then(|model| self.save(&model, output)),
        };

        match written {
            Ok(()) => {
                enter(Stage::Done);
                log::info!(
                    "converted {} pages into {} ({})",
                    pages,
                    output.display(),
                    format
                );
                ConversionResult::succeeded(pages, output)
            }
            Err(e) => {
                enter(Stage::Failed);
                log::debug!("{}: {}", output.display(), e);
                ConversionResult::failed(pages, e)
            }
        }
    }

    /// Build the document model for `source` without writing it.
    pub fn build_document<S: PageSource>(&self, source: &S, title: &str) -> Result<DocumentModel> {
        build(source, DocumentLayout::new(title, self.options.labels.clone()))
    }

    /// Build the slide deck model for `source` without writing it.
    pub fn build_deck<S: PageSource>(&self, source: &S, title: &str) -> Result<SlideDeckModel> {
        build(source, SlideLayout::new(title, self.options.labels.clone()))
    }

    fn save<M: OfficePackage>(&self, model: &M, output: &Path) -> Result<()> {
        writer::save(model, output, self.options.temp_dir.as_deref())?;
        enter(Stage::Serialized);
        Ok(())
    }

    /// Run [`Converter::convert`] on the blocking thread pool.
    #[cfg(feature = "async")]
    pub async fn convert_async(
        &self,
        input: PathBuf,
        output: PathBuf,
        format: OutputFormat,
    ) -> ConversionResult {
        let converter = self.clone();
        tokio::task::spawn_blocking(move || converter.convert(&input, &output, format))
            .await
            .unwrap_or_else(|e| ConversionResult::failed(0, format!("conversion task failed: {}", e)))
    }
}

/// Feed every page of `source`, in order, through `builder`.
fn build<S, B>(source: &S, mut builder: B) -> Result<B::Model>
where
    S: PageSource,
    B: LayoutBuilder,
{
    let total = source.page_count();
    let profile = builder.profile();
    let limits = builder.table_limits();

    for number in 1..=total {
        enter(Stage::PerPage(number));
        let page = source.page(number)?;
        let content = PageContent::prepare(&page, total, profile, limits);
        builder.add_page(&content);
    }
    Ok(builder.finish())
}

/// Title for a converted document: the file stem of `input`.
pub fn document_title(input: &Path) -> String {
    input
        .file_stem()
        .map(|stem| stem.to_string_lossy().into_owned())
        .unwrap_or_default()
}
