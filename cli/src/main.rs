//! pdf2office CLI - PDF to Word / PowerPoint converter

use std::path::{Path, PathBuf};

use clap::{Parser, Subcommand, ValueEnum};
use colored::Colorize;
use indicatif::{ProgressBar, ProgressStyle};

use pdf2office::{
    convert_batch, ClassifierProfile, ConversionResult, ConvertOptions, Converter, Labels,
    LopdfSource, OutputFormat, PageContent, PageSource, ParseOptions, TableLimits,
};

#[derive(Parser)]
#[command(name = "pdf2office")]
#[command(author = "iyulab")]
#[command(version)]
#[command(about = "Convert PDF text and tables to Word and PowerPoint", long_about = None)]
struct Cli {
    /// Language of inserted page labels
    #[arg(long, value_enum, global = true, default_value = "en")]
    labels: LabelSet,

    /// Read pages with failed text extraction as empty instead of failing
    #[arg(long, global = true)]
    lenient: bool,

    /// Skip table detection
    #[arg(long, global = true)]
    no_tables: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Convert a PDF to a Word document
    Docx {
        /// Input PDF file
        #[arg(value_name = "FILE")]
        input: PathBuf,

        /// Output file (input name with .docx if not specified)
        #[arg(short, long, value_name = "FILE")]
        output: Option<PathBuf>,
    },

    /// Convert a PDF to a PowerPoint presentation
    Pptx {
        /// Input PDF file
        #[arg(value_name = "FILE")]
        input: PathBuf,

        /// Output file (input name with .pptx if not specified)
        #[arg(short, long, value_name = "FILE")]
        output: Option<PathBuf>,
    },

    /// Convert every PDF in a directory
    Batch {
        /// Directory containing PDF files
        #[arg(value_name = "INPUT_DIR")]
        input_dir: PathBuf,

        /// Directory for converted files
        #[arg(value_name = "OUTPUT_DIR")]
        output_dir: PathBuf,

        /// Target format
        #[arg(long, value_enum, default_value = "docx")]
        format: Format,

        /// Convert one file at a time
        #[arg(long)]
        sequential: bool,

        /// Print results as JSON
        #[arg(long)]
        json: bool,
    },

    /// Show how a PDF would be laid out
    Info {
        /// Input PDF file
        #[arg(value_name = "FILE")]
        input: PathBuf,
    },
}

#[derive(Copy, Clone, PartialEq, Eq, ValueEnum)]
enum Format {
    /// Word document
    Docx,
    /// PowerPoint presentation
    Pptx,
}

impl From<Format> for OutputFormat {
    fn from(format: Format) -> Self {
        match format {
            Format::Docx => OutputFormat::Docx,
            Format::Pptx => OutputFormat::Pptx,
        }
    }
}

#[derive(Copy, Clone, PartialEq, Eq, ValueEnum)]
enum LabelSet {
    /// English ("Page 1", "Tables")
    En,
    /// Chinese ("第 1 页", "表格")
    Zh,
}

impl From<LabelSet> for Labels {
    fn from(set: LabelSet) -> Self {
        match set {
            LabelSet::En => Labels::english(),
            LabelSet::Zh => Labels::chinese(),
        }
    }
}

impl Cli {
    fn parse_options(&self) -> ParseOptions {
        let options = ParseOptions::new().with_tables(!self.no_tables);
        if self.lenient {
            options.lenient()
        } else {
            options
        }
    }

    fn convert_options(&self) -> ConvertOptions {
        ConvertOptions::new()
            .with_parse_options(self.parse_options())
            .with_labels(self.labels.into())
    }
}

fn main() {
    env_logger::init();

    let cli = Cli::parse();
    let options = cli.convert_options();

    let result = match &cli.command {
        Commands::Docx { input, output } => {
            cmd_convert(input, output.as_deref(), OutputFormat::Docx, options)
        }
        Commands::Pptx { input, output } => {
            cmd_convert(input, output.as_deref(), OutputFormat::Pptx, options)
        }
        Commands::Batch {
            input_dir,
            output_dir,
            format,
            sequential,
            json,
        } => cmd_batch(
            input_dir,
            output_dir,
            (*format).into(),
            options.with_parallel(!sequential),
            *json,
        ),
        Commands::Info { input } => cmd_info(input, cli.parse_options()),
    };

    if let Err(e) = result {
        eprintln!("{}: {}", "Error".red().bold(), e);
        std::process::exit(1);
    }
}

fn default_output(input: &Path, format: OutputFormat) -> PathBuf {
    input.with_extension(format.extension())
}

fn cmd_convert(
    input: &Path,
    output: Option<&Path>,
    format: OutputFormat,
    options: ConvertOptions,
) -> Result<(), Box<dyn std::error::Error>> {
    let output = output
        .map(Path::to_path_buf)
        .unwrap_or_else(|| default_output(input, format));

    let pb = ProgressBar::new_spinner();
    pb.set_message(format!("Converting {}...", input.display()));

    let result = Converter::new(options).convert(input, &output, format);
    pb.finish_and_clear();

    if !result.success {
        return Err(result.message.into());
    }

    println!("{} {}", result.message.as_str().green(), format!("({})", output.display()).dimmed());
    Ok(())
}

fn cmd_batch(
    input_dir: &Path,
    output_dir: &Path,
    format: OutputFormat,
    options: ConvertOptions,
    json: bool,
) -> Result<(), Box<dyn std::error::Error>> {
    let pb = ProgressBar::new_spinner();
    pb.set_style(ProgressStyle::default_spinner().template("{spinner:.green} {msg}")?);
    pb.set_message(format!("Converting PDFs in {}...", input_dir.display()));

    let entries = convert_batch(input_dir, output_dir, format, options)?;
    pb.finish_and_clear();

    let failed = entries.iter().filter(|e| !e.result.success).count();

    if json {
        println!("{}", serde_json::to_string_pretty(&entries)?);
    } else {
        for entry in &entries {
            print_entry(&entry.file, &entry.result);
        }
        println!(
            "\n{} {} converted, {} failed",
            "Done!".green().bold(),
            entries.len() - failed,
            failed
        );
    }

    if failed > 0 {
        return Err(format!("{} of {} files failed", failed, entries.len()).into());
    }
    Ok(())
}

fn print_entry(file: &Path, result: &ConversionResult) {
    let name = file
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_default();
    if result.success {
        println!("  {} {} ({} pages)", "✓".green(), name, result.pages);
    } else {
        println!("  {} {} {}", "✗".red(), name, result.message.as_str().dimmed());
    }
}

fn cmd_info(input: &Path, options: ParseOptions) -> Result<(), Box<dyn std::error::Error>> {
    let source = LopdfSource::open(input, options)?;
    let total = source.page_count();

    println!("{}", "Document Information".cyan().bold());
    println!("{}", "─".repeat(40).dimmed());
    println!("{}: {}", "File".bold(), input.display());
    println!("{}: {}", "Format".bold(), source.version());
    println!("{}: {}", "Pages".bold(), total);

    println!();
    println!("{}", "Page Layout".cyan().bold());
    println!("{}", "─".repeat(40).dimmed());

    let pb = ProgressBar::new(u64::from(total));
    pb.set_style(
        ProgressStyle::default_bar()
            .template("{spinner:.green} [{bar:40.cyan/blue}] {pos}/{len}")?
            .progress_chars("#>-"),
    );

    let mut rows = Vec::with_capacity(total as usize);
    for number in 1..=total {
        let page = source.page(number)?;
        let content = PageContent::prepare(
            &page,
            total,
            ClassifierProfile::Document,
            TableLimits::unbounded(),
        );
        let slide_tables = PageContent::prepare(
            &page,
            total,
            ClassifierProfile::Slides,
            TableLimits::slides(),
        )
        .tables
        .len();
        let headings = content.lines.iter().filter(|l| l.class.is_heading()).count();
        rows.push((number, content.lines.len(), headings, content.tables.len(), slide_tables));
        pb.inc(1);
    }
    pb.finish_and_clear();

    for (number, lines, headings, tables, slide_tables) in rows {
        println!(
            "{} {:>4}: {} lines, {} headings, {} tables ({} fit on slides)",
            "Page".bold(),
            number,
            lines,
            headings,
            tables,
            slide_tables
        );
    }

    Ok(())
}
