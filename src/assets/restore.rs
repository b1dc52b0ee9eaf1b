use super::BACKUP_SUFFIX;
use crate::error::AssetError;
use crate::utils::files::{display_relative, find_files_with_suffix, strip_suffix};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::debug;

#[derive(Debug, Default)]
pub struct RestoreReport {
    pub restored: Vec<PathBuf>,
    /// Backups whose original file no longer exists
    pub orphaned: Vec<PathBuf>,
}

/// Move every `*.backup` file under `project_dir` back over its original.
///
/// Backups without an existing original are left untouched.
pub fn restore_backups(project_dir: &Path) -> Result<RestoreReport, AssetError> {
    if !project_dir.is_dir() {
        return Err(AssetError::MissingProjectDir(project_dir.to_path_buf()));
    }

    println!("Restoring files from backups...");
    let mut report = RestoreReport::default();

    for backup_path in find_files_with_suffix(project_dir, BACKUP_SUFFIX)? {
        let Some(original_path) = strip_suffix(&backup_path, BACKUP_SUFFIX) else {
            continue;
        };

        if !original_path.exists() {
            debug!("No original for {:?}, leaving it", backup_path);
            report.orphaned.push(backup_path);
            continue;
        }

        fs::rename(&backup_path, &original_path)?;
        println!(
            "✓ Restored: {}",
            display_relative(&original_path, project_dir)
        );
        report.restored.push(original_path);
    }

    println!("\n✅ Restored {} file(s)", report.restored.len());
    Ok(report)
}
