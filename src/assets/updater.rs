use super::config::{AssetConfig, AssetMapping};
use super::BACKUP_SUFFIX;
use crate::error::AssetError;
use crate::utils::files::{append_suffix, display_relative};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

const QUOTES: [char; 2] = ['"', '\''];

/// One rewritten file, kept in memory until it is written back
#[derive(Debug, Clone)]
pub struct FileRecord {
    pub path: PathBuf,
    pub original: String,
    pub updated: String,
    /// Occurrences actually substituted, summed over every pattern
    pub replacements: usize,
}

impl FileRecord {
    pub fn is_changed(&self) -> bool {
        self.original != self.updated
    }
}

/// Result of a full run over the configured file list
#[derive(Debug, Default)]
pub struct UpdateSummary {
    pub dry_run: bool,
    pub updated: Vec<PathBuf>,
    pub missing: Vec<PathBuf>,
}

/// Replace every quoted local prefix with its quoted remote prefix.
///
/// Only occurrences directly preceded by `"` or `'` are touched; the quote is kept.
/// The returned count is the number of substitutions made, measured on the text as
/// it stands when each pattern is applied.
pub fn rewrite(content: &str, mapping: &AssetMapping) -> (String, usize) {
    let mut content = content.to_string();
    let mut replacements = 0;

    for entry in mapping.entries() {
        for quote in QUOTES {
            let old = format!("{quote}{}", entry.local);
            let count = content.matches(old.as_str()).count();
            if count == 0 {
                continue;
            }

            let new = format!("{quote}{}", entry.remote);
            content = content.replace(&old, &new);
            replacements += count;
            debug!("{} -> {} ({} occurrences)", old, new, count);
        }
    }

    (content, replacements)
}

pub struct AssetUpdater {
    project_dir: PathBuf,
    config: AssetConfig,
    mapping: AssetMapping,
}

impl AssetUpdater {
    pub fn new(project_dir: impl Into<PathBuf>, config: AssetConfig) -> Self {
        let mapping = config.mapping();
        Self {
            project_dir: project_dir.into(),
            config,
            mapping,
        }
    }

    fn relative(&self, path: &Path) -> String {
        display_relative(path, &self.project_dir)
    }

    /// Rewrite a single file.
    ///
    /// When the content changes and this is not a dry run, the original text is
    /// saved to `<path>.backup` before the file is overwritten.
    pub fn update_file(&self, path: &Path, dry_run: bool) -> Result<FileRecord, AssetError> {
        let original = fs::read_to_string(path)?;
        let (updated, replacements) = rewrite(&original, &self.mapping);

        let record = FileRecord {
            path: path.to_path_buf(),
            original,
            updated,
            replacements,
        };

        if !record.is_changed() {
            println!("  No changes: {}", self.relative(path));
            return Ok(record);
        }

        if dry_run {
            println!(
                "[DRY RUN] Would update: {} ({} replacements)",
                self.relative(path),
                record.replacements
            );
            return Ok(record);
        }

        let backup_path = append_suffix(path, BACKUP_SUFFIX);
        fs::write(&backup_path, &record.original)?;
        fs::write(path, &record.updated)?;
        debug!("Backup written to {:?}", backup_path);

        println!(
            "✓ Updated: {} ({} replacements)",
            self.relative(path),
            record.replacements
        );
        Ok(record)
    }

    /// Rewrite every configured file, skipping the ones that do not exist
    pub fn update_all(&self, dry_run: bool) -> Result<UpdateSummary, AssetError> {
        if !self.project_dir.is_dir() {
            return Err(AssetError::MissingProjectDir(self.project_dir.clone()));
        }

        let rule = "=".repeat(70);
        println!("{}", rule);
        println!("InfiniDepth Asset URL Updater");
        println!("{}", rule);
        println!("GitHub Release URL: {}", self.config.base_url());
        println!("Release Tag: {}", self.config.tag);
        println!("File Structure: {}", self.config.layout);
        println!("Mapped prefixes: {}", self.mapping.len());
        println!();

        if dry_run {
            println!("⚠️  DRY RUN MODE - No files will be modified");
            println!();
        }

        let mut summary = UpdateSummary {
            dry_run,
            ..Default::default()
        };

        for file in &self.config.files {
            let path = self.project_dir.join(file);
            if !path.is_file() {
                warn!("Skipping missing file {:?}", path);
                println!("⚠️  File not found: {}", self.relative(&path));
                summary.missing.push(path);
                continue;
            }

            let record = self.update_file(&path, dry_run)?;
            if record.is_changed() {
                summary.updated.push(record.path);
            }
        }

        println!();
        println!("{}", rule);
        println!(
            "Summary: {} file(s) {}updated",
            summary.updated.len(),
            if dry_run { "would be " } else { "" }
        );
        println!("{}", rule);

        if !dry_run && !summary.updated.is_empty() {
            println!();
            println!("✅ Backup files created with {} extension", BACKUP_SUFFIX);
            println!("   To restore original files, run:");
            println!("   asset-tools assets --restore");
        }

        Ok(summary)
    }
}
