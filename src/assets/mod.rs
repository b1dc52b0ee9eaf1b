//! Rewrites local asset paths in site sources into release download URLs
//!
//! - `config`: Release location, layout and the substitution table
//! - `updater`: Per-file rewrite with `.backup` snapshots
//! - `restore`: Puts the snapshots back

pub mod config;
pub mod restore;
pub mod updater;

/// Appended to a file path to name its pre-update snapshot
pub const BACKUP_SUFFIX: &str = ".backup";
