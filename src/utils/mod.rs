//! Utility modules for asset-tools
//!
//! This module contains helpers shared by both subcommands:
//! - `files`: Directory listing, extension filtering and path suffix handling

pub mod files;
