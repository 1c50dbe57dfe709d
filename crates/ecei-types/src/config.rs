// ─────────────────────────────────────────────────────────────────────
// SCPN Fusion Core — Config
// © 1998–2026 Miroslav Šotek. All rights reserved.
// Contact: www.anulum.li | protoscience@anulum.li
// ORCID: https://orcid.org/0009-0009-3560-0851
// License: GNU AGPL v3 | Commercial licensing available
// ─────────────────────────────────────────────────────────────────────
use crate::error::{EceiError, EceiResult};
use serde::{Deserialize, Serialize};
use tracing::debug;

/// Poloidal/vertical row plotted when nothing else is requested.
pub const DEFAULT_ROW_INDEX: usize = 99;

/// Frequency plot configuration.
/// Maps 1:1 to ecei_plot_config.json; every field is optional in JSON.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlotConfig {
    /// Grid row whose radial slice is drawn (default: 99)
    #[serde(default = "default_row_index")]
    pub row_index: usize,
    /// Chart caption
    #[serde(default = "default_caption")]
    pub caption: String,
    /// Draw the series legend after the lines (default: true)
    #[serde(default = "default_draw_legend")]
    pub draw_legend: bool,
}

fn default_row_index() -> usize {
    DEFAULT_ROW_INDEX
}
fn default_caption() -> String {
    "ECEI characteristic frequencies".to_string()
}
fn default_draw_legend() -> bool {
    true
}

impl Default for PlotConfig {
    fn default() -> Self {
        PlotConfig {
            row_index: default_row_index(),
            caption: default_caption(),
            draw_legend: default_draw_legend(),
        }
    }
}

impl PlotConfig {
    /// Load from a JSON file and validate.
    pub fn from_file(path: &str) -> EceiResult<Self> {
        let contents = std::fs::read_to_string(path)?;
        let config = Self::from_json(&contents)?;
        debug!(path, row_index = config.row_index, "loaded plot config");
        Ok(config)
    }

    pub fn from_json(json: &str) -> EceiResult<Self> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> EceiResult<()> {
        if self.caption.trim().is_empty() {
            return Err(EceiError::ConfigError(
                "plot caption must not be empty".to_string(),
            ));
        }
        Ok(())
    }
}
