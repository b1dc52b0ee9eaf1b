use crate::error::AssetError;
use serde::Deserialize;
use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};

pub const DEFAULT_HOST: &str = "https://github.com";
pub const DEFAULT_REPO: &str = "RitianYu/ritianyu.github.io";
pub const DEFAULT_TAG: &str = "infinidepth-assets-v1.0";

/// Local prefix shared by every mapped asset
const LOCAL_ROOT: &str = "images/pub/infinidepth/";

/// Files rewritten by default, relative to the project directory
pub const DEFAULT_FILES: &[&str] = &[
    "index.html",
    "js/infinidepth/config.js",
    "js/infinidepth/viz-showcase.js",
    "js/infinidepth/showcase.js",
];

/// How assets are laid out on the release page
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Layout {
    /// Single-level file names carrying a per-directory prefix (`depth-comparison_depth1.jpg`)
    #[default]
    Flat,
    /// Remote paths mirror the local subdirectories (`depth/depth1.jpg`)
    Hierarchical,
}

impl fmt::Display for Layout {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Flat => f.write_str("Flat (with prefixes)"),
            Self::Hierarchical => f.write_str("Hierarchical"),
        }
    }
}

/// One local-prefix -> remote-prefix substitution
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AssetEntry {
    pub local: String,
    pub remote: String,
}

/// Ordered substitution table. Entries are applied one after another.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AssetMapping {
    entries: Vec<AssetEntry>,
}

impl AssetMapping {
    pub fn push(&mut self, local: impl Into<String>, remote: impl Into<String>) {
        self.entries.push(AssetEntry {
            local: local.into(),
            remote: remote.into(),
        });
    }

    pub fn entries(&self) -> &[AssetEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }
}

/// Optional JSON config file. Every field falls back to the built-in default.
#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct AssetConfigFile {
    pub host: Option<String>,
    pub repo: Option<String>,
    pub tag: Option<String>,
    pub layout: Option<Layout>,
    pub files: Option<Vec<PathBuf>>,
}

impl AssetConfigFile {
    pub fn load(path: &Path) -> Result<Self, AssetError> {
        let raw = fs::read_to_string(path)?;
        serde_json::from_str(&raw).map_err(|source| AssetError::Config {
            path: path.to_path_buf(),
            source,
        })
    }
}

/// Settings for one updater run, built once from defaults, file and flags
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AssetConfig {
    pub host: String,
    pub repo: String,
    pub tag: String,
    pub layout: Layout,
    pub files: Vec<PathBuf>,
}

impl Default for AssetConfig {
    fn default() -> Self {
        Self {
            host: DEFAULT_HOST.to_string(),
            repo: DEFAULT_REPO.to_string(),
            tag: DEFAULT_TAG.to_string(),
            layout: Layout::default(),
            files: DEFAULT_FILES.iter().map(PathBuf::from).collect(),
        }
    }
}

impl AssetConfig {
    /// Layer a config file over the defaults
    pub fn from_file(file: AssetConfigFile) -> Self {
        let defaults = Self::default();
        Self {
            host: file.host.unwrap_or(defaults.host),
            repo: file.repo.unwrap_or(defaults.repo),
            tag: file.tag.unwrap_or(defaults.tag),
            layout: file.layout.unwrap_or(defaults.layout),
            files: file.files.unwrap_or(defaults.files),
        }
    }

    /// Apply command-line overrides. `None` keeps the current value.
    pub fn with_overrides(mut self, tag: Option<String>, layout: Option<Layout>) -> Self {
        if let Some(tag) = tag {
            self.tag = tag;
        }
        if let Some(layout) = layout {
            self.layout = layout;
        }
        self
    }

    /// `<host>/<repo>/releases/download/<tag>`
    pub fn base_url(&self) -> String {
        format!(
            "{}/{}/releases/download/{}",
            self.host.trim_end_matches('/'),
            self.repo.trim_matches('/'),
            self.tag
        )
    }

    /// Build the substitution table for the configured layout
    pub fn mapping(&self) -> AssetMapping {
        let base = self.base_url();
        let mut mapping = AssetMapping::default();

        match self.layout {
            Layout::Flat => {
                for (dir, prefix) in [
                    ("depth/", "depth-comparison_"),
                    ("interactitve_depth/", "interactive-depth_"),
                    ("pointclouds/", "pointclouds_"),
                    ("vis_pcd/", "vis-pcd_"),
                    ("vis_nvs/", "vis-nvs_"),
                    ("nvs_compare/", "nvs-comparison_"),
                ] {
                    mapping.push(format!("{LOCAL_ROOT}{dir}"), format!("{base}/{prefix}"));
                }
                for file in ["demo.mov", "pipeline.jpg", "DSC_6487.png"] {
                    mapping.push(format!("{LOCAL_ROOT}{file}"), format!("{base}/{file}"));
                }
            }
            Layout::Hierarchical => {
                for dir in [
                    "depth/",
                    "interactitve_depth/",
                    "pointclouds/",
                    "vis_pcd/",
                    "vis_nvs/",
                    "nvs_compare/",
                    "demo.mov",
                    "pipeline.jpg",
                ] {
                    mapping.push(format!("{LOCAL_ROOT}{dir}"), format!("{base}/{dir}"));
                }
            }
        }

        mapping
    }
}
