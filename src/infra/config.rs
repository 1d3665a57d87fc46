// ============================================================
// Layer 6 — Engine Configuration
// ============================================================
// Optional JSON file. Every field has a default, so an empty
// object `{}` (or no file at all) gives the built-in behaviour.
//
// Example config.json:
//   {
//     "qa_path": "data/questions_db.csv",
//     "keywords": [
//       { "keyword": "hostel", "answer": "...", "topic": "hostel" },
//       { "keyword": "fees",   "answer": "...", "topic": "fees" }
//     ],
//     "extra_corrections": [
//       { "canonical": "library", "variants": ["libary", "librery"] }
//     ]
//   }
//
// `keywords` REPLACES the default keyword list (and so fixes a
// different match order); `extra_corrections` is APPENDED to the
// built-in misspelling table.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::{fs, path::Path};

use crate::data::normalizer;
use crate::domain::qa_entry::{CorrectionRule, KeywordRule};
use crate::matching::keyword_fallback;

pub const DEFAULT_QA_PATH: &str = "data/questions_db.csv";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// Path of the question/answer CSV
    pub qa_path: String,

    /// Replacement keyword rules, in match order
    pub keywords: Option<Vec<KeywordRule>>,

    /// Misspellings added on top of the built-in table
    pub extra_corrections: Vec<CorrectionRule>,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            qa_path:           DEFAULT_QA_PATH.to_string(),
            keywords:          None,
            extra_corrections: Vec::new(),
        }
    }
}

impl EngineConfig {
    /// Read a config file. A missing or invalid file is an error:
    /// the user asked for it explicitly.
    pub fn load(path: &Path) -> Result<Self> {
        let json = fs::read_to_string(path)
            .with_context(|| format!("Cannot read config from '{}'", path.display()))?;

        let cfg = serde_json::from_str(&json)
            .with_context(|| format!("Invalid config in '{}'", path.display()))?;

        tracing::debug!("Loaded engine config from '{}'", path.display());
        Ok(cfg)
    }

    /// Read `path` if given, otherwise use the defaults.
    pub fn load_or_default(path: Option<&Path>) -> Result<Self> {
        match path {
            Some(p) => Self::load(p),
            None => Ok(Self::default()),
        }
    }

    /// Built-in correction rules followed by the configured extras
    pub fn correction_rules(&self) -> Vec<CorrectionRule> {
        let mut rules = normalizer::default_rules();
        rules.extend(self.extra_corrections.iter().cloned());
        rules
    }

    /// Configured keyword rules, or the built-in ordered list
    pub fn keyword_rules(&self) -> Vec<KeywordRule> {
        self.keywords
            .clone()
            .unwrap_or_else(keyword_fallback::default_rules)
    }
}
