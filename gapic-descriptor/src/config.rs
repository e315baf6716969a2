//! Generator configuration read from `gapic.toml`.

use std::{collections::BTreeMap, path::Path, str::FromStr};

use gapic_core::Transport;
use serde::Deserialize;

use crate::error::{DescriptorError, Result, SourceContext};

/// Root of `gapic.toml`. Every section is optional.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "kebab-case", deny_unknown_fields)]
pub struct GeneratorConfig {
    #[serde(default)]
    pub generator: GeneratorSection,

    /// Polling overrides keyed by fully-qualified method (`pkg.Service.Method`).
    #[serde(default)]
    pub longrunning: BTreeMap<String, PollingOverride>,

    /// Resource patterns the protos do not annotate.
    #[serde(default)]
    pub resources: Vec<ResourceConfig>,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "kebab-case", deny_unknown_fields)]
pub struct GeneratorSection {
    /// Transports to generate; the command line takes precedence.
    pub transport: Option<Transport>,

    /// Name of the generated crate; defaults to one derived from the proto package.
    pub crate_name: Option<String>,

    /// Whether to emit samples.
    #[serde(default = "default_samples")]
    pub samples: bool,

    /// Lines placed above the generated-file marker.
    pub copyright: Option<String>,
}

fn default_samples() -> bool {
    true
}

impl Default for GeneratorSection {
    fn default() -> Self {
        Self {
            transport: None,
            crate_name: None,
            samples: default_samples(),
            copyright: None,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "kebab-case", deny_unknown_fields)]
pub struct PollingOverride {
    pub initial_poll_delay_ms: Option<u64>,
    pub poll_delay_multiplier: Option<f64>,
    pub max_poll_delay_ms: Option<u64>,
    pub initial_rpc_timeout_ms: Option<u64>,
    pub rpc_timeout_multiplier: Option<f64>,
    pub max_rpc_timeout_ms: Option<u64>,
    pub total_poll_timeout_ms: Option<u64>,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "kebab-case", deny_unknown_fields)]
pub struct ResourceConfig {
    #[serde(rename = "type")]
    pub type_name: String,
    pub patterns: Vec<String>,
}

impl FromStr for GeneratorConfig {
    type Err = Box<DescriptorError>;

    fn from_str(s: &str) -> Result<Self> {
        Self::from_str_with_filename(s, "gapic.toml")
    }
}

impl GeneratorConfig {
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|e| DescriptorError::io(path, e))?;
        Self::from_str_with_filename(&content, &path.display().to_string())
    }

    pub fn from_str_with_filename(content: &str, filename: &str) -> Result<Self> {
        toml::from_str(content).map_err(|e| SourceContext::new(content, filename).config_error(e))
    }
}
