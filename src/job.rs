//! JSON line-breaking jobs, as read by the CLI.

use crate::error::Result;
use crate::font::FontContext;
use crate::model::{AttributedString, Attributes, Run};
use crate::text::{Line, LineBreakConfig};
use serde::{Deserialize, Serialize};

/// Everything needed for one line-breaking call.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LineBreakJob {
    pub text: String,
    /// Attributes for the whole text. Ignored when `runs` is given.
    #[serde(default)]
    pub attributes: Attributes,
    #[serde(default)]
    pub runs: Vec<Run>,
    pub width_budgets: Vec<f64>,
    #[serde(default)]
    pub config: LineBreakConfig,
    /// BCP 47 tag selecting hyphenation patterns. English when absent.
    #[serde(default)]
    pub lang: Option<String>,
    #[serde(default)]
    pub fonts: Vec<FontEntry>,
}

/// A custom font to register before measuring.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FontEntry {
    /// Font family name (e.g. "Inter", "Roboto").
    pub family: String,
    /// Base64-encoded font data, or a data URI (e.g. "data:font/ttf;base64,...").
    pub src: String,
    /// Font weight (100-900). Defaults to 400.
    #[serde(default = "default_weight")]
    pub weight: u32,
    #[serde(default)]
    pub italic: bool,
}

fn default_weight() -> u32 {
    400
}

impl LineBreakJob {
    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn run(&self) -> Result<Vec<Line>> {
        let mut fonts = FontContext::new();
        for entry in &self.fonts {
            fonts
                .registry_mut()
                .register_base64(&entry.family, entry.weight, entry.italic, &entry.src)?;
        }

        let string = if self.runs.is_empty() {
            AttributedString::new(self.text.clone(), self.attributes.clone())
        } else {
            AttributedString::from_runs(self.text.clone(), self.runs.clone())?
        };

        crate::break_attributed(
            &fonts,
            string,
            &self.width_budgets,
            self.config.clone(),
            self.lang.as_deref(),
        )
    }
}

/// Parse a JSON job and break its text.
pub fn run_json(json: &str) -> Result<Vec<Line>> {
    LineBreakJob::from_json(json)?.run()
}
