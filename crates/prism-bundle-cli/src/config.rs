//! PRISM Bundle Configuration Module
//!
//! Serde-based TOML configuration for the bundle driver. Every section is
//! optional; command-line flags override whatever the file sets.

use anyhow::{bail, Context, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Root configuration for a bundle run
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct BundleConfig {
    #[serde(default)]
    pub bundle: BundleSection,

    #[serde(default)]
    pub input: InputConfig,

    #[serde(default)]
    pub output: OutputConfig,

    #[serde(default)]
    pub verify: VerifyConfig,
}

impl BundleConfig {
    /// Load configuration from TOML file
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file '{}'", path.display()))?;
        Self::from_str(&content)
            .with_context(|| format!("Failed to parse config file '{}'", path.display()))
    }

    /// Parse configuration from TOML string
    #[allow(clippy::should_implement_trait)]
    pub fn from_str(content: &str) -> Result<Self> {
        Ok(toml::from_str(content)?)
    }

    /// Validate configuration consistency
    pub fn validate(&self) -> Result<()> {
        if self.bundle.fibers == 0 {
            bail!("bundle.fibers must be at least 1 (got 0)");
        }
        match (&self.input.graph, &self.input.coloring) {
            (None, Some(coloring)) => {
                bail!("Coloring '{}' given without a fiber graph", coloring)
            }
            (Some(graph), None) => {
                bail!("Fiber graph '{}' given without a total coloring", graph)
            }
            _ => Ok(()),
        }
    }
}

// =============================================================================
// Bundle Shape
// =============================================================================

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BundleSection {
    /// Number of fibers `m` along the base path
    #[serde(default = "default_fibers")]
    pub fibers: usize,
}

impl Default for BundleSection {
    fn default() -> Self {
        Self {
            fibers: default_fibers(),
        }
    }
}

// =============================================================================
// Input Files
// =============================================================================

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct InputConfig {
    /// DIMACS .col file for the fiber graph
    #[serde(default)]
    pub graph: Option<String>,

    /// Total coloring of the fiber (`v U C` / `e U V C` lines)
    #[serde(default)]
    pub coloring: Option<String>,
}

// =============================================================================
// Output
// =============================================================================

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct OutputConfig {
    /// JSON output path; stdout summary only when unset
    #[serde(default)]
    pub path: Option<String>,

    #[serde(default)]
    pub pretty: bool,
}

// =============================================================================
// Verification
// =============================================================================

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct VerifyConfig {
    /// Audit the constructed bundle for conflicts
    #[serde(default)]
    pub enabled: bool,
}

fn default_fibers() -> usize {
    3
}
