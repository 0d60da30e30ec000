//! Directory conversion.

use std::collections::HashMap;
use std::path::{Path, PathBuf};

use rayon::prelude::*;
use serde::{Deserialize, Serialize};

use super::{ConversionResult, ConvertOptions, Converter, OutputFormat};
use crate::detect::has_pdf_extension;
use crate::error::Result;

/// Result for one file of a batch.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BatchEntry {
    /// Input file
    pub file: PathBuf,
    /// Conversion outcome
    pub result: ConversionResult,
}

/// Output path for `input` inside `output_dir`: `{stem}.{ext}`.
pub fn batch_output_path(input: &Path, output_dir: &Path, format: OutputFormat) -> PathBuf {
    let mut name = input.file_stem().unwrap_or(input.as_os_str()).to_os_string();
    name.push(".");
    name.push(format.extension());
    output_dir.join(name)
}

/// Where one file of a batch is written.
enum Target<'a> {
    Output(PathBuf),
    /// The output name already belongs to an earlier file, e.g. `a.pdf`
    /// and `a.PDF`.
    Taken { output: PathBuf, by: &'a Path },
}

/// Assign output paths in file order; the first file to claim a path keeps it.
fn plan<'a>(
    files: &'a [PathBuf],
    output_dir: &Path,
    format: OutputFormat,
) -> Vec<(&'a PathBuf, Target<'a>)> {
    let mut claimed: HashMap<PathBuf, &'a Path> = HashMap::new();
    files
        .iter()
        .map(|file| {
            let output = batch_output_path(file, output_dir, format);
            let target = match claimed.get(&output).copied() {
                Some(by) => Target::Taken { output, by },
                None => {
                    claimed.insert(output.clone(), file.as_path());
                    Target::Output(output)
                }
            };
            (file, target)
        })
        .collect()
}

/// Convert every `*.pdf` file directly inside `input_dir`.
///
/// Files are matched case-insensitively by extension and processed in file
/// name order; entries come back in that order. `output_dir` is created if
/// missing. A failed file is reported in its entry and does not stop the
/// batch; only problems listing or creating the directories are errors.
/// When two files map to the same output name, the later one fails and the
/// earlier output is kept.
pub fn convert_batch(
    input_dir: impl AsRef<Path>,
    output_dir: impl AsRef<Path>,
    format: OutputFormat,
    options: ConvertOptions,
) -> Result<Vec<BatchEntry>> {
    let input_dir = input_dir.as_ref();
    let output_dir = output_dir.as_ref();

    let files = pdf_files(input_dir)?;
    std::fs::create_dir_all(output_dir)?;
    log::debug!(
        "batch: {} PDF files in {}",
        files.len(),
        input_dir.display()
    );

    let parallel = options.parallel;
    let converter = Converter::new(options);
    let jobs = plan(&files, output_dir, format);
    let run = |(file, target): &(&PathBuf, Target<'_>)| {
        let result = match target {
            Target::Output(output) => converter.convert(file, output, format),
            Target::Taken { output, by } => {
                log::warn!("batch: {} skipped, {} is taken", file.display(), output.display());
                ConversionResult::failed(
                    0,
                    format!("output {} is already written by {}", output.display(), by.display()),
                )
            }
        };
        BatchEntry {
            file: (*file).clone(),
            result,
        }
    };

    let entries: Vec<BatchEntry> = if parallel {
        jobs.par_iter().map(run).collect()
    } else {
        jobs.iter().map(run).collect()
    };

    let failed = entries.iter().filter(|e| !e.result.success).count();
    log::info!(
        "batch finished: {} converted, {} failed",
        entries.len() - failed,
        failed
    );
    Ok(entries)
}

fn pdf_files(dir: &Path) -> Result<Vec<PathBuf>> {
    let mut files = Vec::new();
    for entry in std::fs::read_dir(dir)? {
        let path = entry?.path();
        if path.is_file() && has_pdf_extension(&path) {
            files.push(path);
        }
    }
    files.sort();
    Ok(files)
}
