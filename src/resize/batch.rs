use super::{resize_file, ResizeMode};
use crate::error::ResizeError;
use crate::utils::files::{ensure_directory, list_image_files};
use indicatif::{ProgressBar, ProgressStyle};
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use tracing::{debug, info};

/// Outcome of a directory run
#[derive(Debug, Default)]
pub struct BatchReport {
    pub total: usize,
    pub processed: Vec<PathBuf>,
    pub failed: Vec<(PathBuf, String)>,
}

/// Resize every image directly inside `input_dir` into `output_dir`.
///
/// A failing file is recorded in the report and does not stop the run.
pub fn resize_directory(
    input_dir: &Path,
    output_dir: &Path,
    width: u32,
    height: u32,
    mode: ResizeMode,
) -> Result<BatchReport, ResizeError> {
    let stdout = io::stdout();
    resize_directory_to(input_dir, output_dir, width, height, mode, &mut stdout.lock())
}

/// Same as [`resize_directory`], writing per-file progress and errors to `out`.
///
/// Each file gets a `[i/N] Processing` header, each failure one
/// `Error processing` line, and the run ends with a single summary line.
pub fn resize_directory_to<W: Write>(
    input_dir: &Path,
    output_dir: &Path,
    width: u32,
    height: u32,
    mode: ResizeMode,
    out: &mut W,
) -> Result<BatchReport, ResizeError> {
    if !input_dir.is_dir() {
        return Err(ResizeError::NotADirectory(input_dir.to_path_buf()));
    }

    ensure_directory(output_dir)?;
    let files = list_image_files(input_dir)?;

    writeln!(out, "Found {} images", files.len())?;
    info!("Resizing {:?} -> {:?} ({}x{}, {})", input_dir, output_dir, width, height, mode);

    let mut report = BatchReport {
        total: files.len(),
        ..Default::default()
    };

    let progress_bar = ProgressBar::new(files.len() as u64);
    progress_bar.set_style(
        ProgressStyle::default_bar()
            .template("{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} {msg}")
            .unwrap_or_else(|_| ProgressStyle::default_bar())
            .progress_chars("#>-"),
    );

    for (i, input_path) in files.into_iter().enumerate() {
        let Some(file_name) = input_path.file_name() else {
            continue;
        };
        let display_name = file_name.to_string_lossy().into_owned();
        let output_path = output_dir.join(file_name);

        progress_bar.set_message(display_name.clone());

        // Hidden bars drop `ProgressBar::println`, so write through `out` while suspended
        let result = progress_bar.suspend(|| -> Result<_, ResizeError> {
            writeln!(out, "\n[{}/{}] Processing: {}", i + 1, report.total, display_name)?;
            out.flush()?;
            Ok(resize_file(&input_path, &output_path, width, height, mode))
        })?;

        match result {
            Ok(_) => report.processed.push(input_path),
            Err(e) => {
                debug!("Failed to resize {:?}: {}", input_path, e);
                progress_bar.suspend(|| writeln!(out, "Error processing {}: {}", display_name, e))?;
                report.failed.push((input_path, e.to_string()));
            }
        }

        progress_bar.inc(1);
    }

    progress_bar.finish_and_clear();

    writeln!(
        out,
        "\nResized {} of {} images into {} ({} failed)",
        report.processed.len(),
        report.total,
        output_dir.display(),
        report.failed.len()
    )?;

    Ok(report)
}
