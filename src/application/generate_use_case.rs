// ============================================================
// Layer 2 — GenerateUseCase
// ============================================================
// Builds training examples for an external intent classifier
// from the same question/answer CSV the engine answers from:
//
//   Step 1: Load Q/A rows                (Layer 4 - data)
//   Step 2: Group questions by intent    (sorted by intent name)
//   Step 3: Expand each question into
//           misspelled/short variations  (Layer 4 - data)
//   Step 4: Add generic small-talk examples, dedupe, cap at 50
//   Step 5: Append lookup tables and synonyms
//   Step 6: Write the artifact           (Layer 6 - infra)
//           .yml/.yaml → nlu.yml layout, else JSON
//
// If the source cannot be read, six built-in questions are
// used so the classifier still gets a usable file.

use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashSet};
use std::path::Path;

use crate::data::loader::CsvQaLoader;
use crate::data::variations::generate_variations;
use crate::domain::qa_entry::QaEntry;
use crate::domain::traits::QaSource;
use crate::infra::artifact_store::{write_json_atomic, write_yaml_atomic, ArtifactFormat};

pub const FORMAT_VERSION: &str = "3.1";

/// Cap on examples per intent
pub const MAX_EXAMPLES_PER_INTENT: usize = 50;

// ─── Generation Configuration ────────────────────────────────────────────────
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GenerateConfig {
    pub qa_path:  String,
    pub out_path: String,
}

// ─── Artifact Shape ──────────────────────────────────────────────────────────
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IntentExamples {
    pub intent:   String,
    pub examples: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NamedExamples {
    pub name:     String,
    pub examples: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TrainingSet {
    pub version:  String,
    pub intents:  Vec<IntentExamples>,
    pub lookups:  Vec<NamedExamples>,
    pub synonyms: Vec<NamedExamples>,
}

impl TrainingSet {
    pub fn total_examples(&self) -> usize {
        self.intents.iter().map(|i| i.examples.len()).sum()
    }

    /// Flatten into the `version` + `nlu` list a classifier reads:
    /// intents first, then lookups, then synonyms.
    pub fn to_nlu(&self) -> NluFile {
        let intents = self.intents.iter().map(|i| NluItem::Intent {
            intent:   i.intent.clone(),
            examples: example_block(&i.examples),
        });
        let lookups = self.lookups.iter().map(|l| NluItem::Lookup {
            lookup:   l.name.clone(),
            examples: example_block(&l.examples),
        });
        let synonyms = self.synonyms.iter().map(|s| NluItem::Synonym {
            synonym:  s.name.clone(),
            examples: example_block(&s.examples),
        });

        NluFile {
            version: self.version.clone(),
            nlu:     intents.chain(lookups).chain(synonyms).collect(),
        }
    }
}

// ─── nlu.yml Shape ───────────────────────────────────────────────────────────
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NluFile {
    pub version: String,
    pub nlu:     Vec<NluItem>,
}

/// One `nlu` entry; `examples` is a "- example" line block.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum NluItem {
    Intent  { intent: String,  examples: String },
    Lookup  { lookup: String,  examples: String },
    Synonym { synonym: String, examples: String },
}

fn example_block(examples: &[String]) -> String {
    examples.iter().map(|e| format!("- {e}\n")).collect()
}

// ─── GenerateUseCase ─────────────────────────────────────────────────────────
pub struct GenerateUseCase {
    config: GenerateConfig,
}

impl GenerateUseCase {
    pub fn new(config: GenerateConfig) -> Self {
        Self { config }
    }

    /// Load, build and write the training set. Returns what was written.
    pub fn execute(&self) -> Result<TrainingSet> {
        let cfg = &self.config;

        // ── Step 1: Load rows, falling back to the built-in questions ────────
        let loader  = CsvQaLoader::new(&cfg.qa_path);
        let entries = match loader.load_all() {
            Ok(rows) => rows,
            Err(e) => {
                tracing::warn!("Using built-in questions, {} unavailable: {:#}", loader.describe(), e);
                fallback_entries()
            }
        };

        // ── Steps 2-5 ────────────────────────────────────────────────────────
        let set = build_training_set(&entries);
        tracing::info!(
            "Generated {} intents with {} examples",
            set.intents.len(),
            set.total_examples()
        );

        // ── Step 6: Write the artifact ───────────────────────────────────────
        let out = Path::new(&cfg.out_path);
        match ArtifactFormat::from_path(out) {
            ArtifactFormat::Yaml => write_yaml_atomic(out, &set.to_nlu())?,
            ArtifactFormat::Json => write_json_atomic(out, &set)?,
        }
        Ok(set)
    }
}

/// Build the training set from loaded rows. Rows without an intent
/// are skipped; if none carry one, the built-in questions are used.
pub fn build_training_set(entries: &[QaEntry]) -> TrainingSet {
    let mut groups = group_by_intent(entries);

    if groups.is_empty() {
        tracing::warn!("No rows carry an intent; using built-in questions");
        groups = group_by_intent(&fallback_entries());
    }

    let intents = groups
        .into_iter()
        .filter_map(|(intent, questions)| {
            let mut examples: Vec<String> = questions
                .iter()
                .flat_map(|q| generate_variations(q))
                .collect();
            examples.extend(generic_examples(&intent).iter().map(|s| s.to_string()));

            let examples = dedupe_capped(examples, MAX_EXAMPLES_PER_INTENT);
            if examples.is_empty() {
                return None;
            }
            Some(IntentExamples { intent, examples })
        })
        .collect();

    TrainingSet {
        version: FORMAT_VERSION.to_string(),
        intents,
        lookups: vec![named(
            "university_names",
            &["PDEU", "Pandit Deendayal Energy University", "pdeu", "pdu", "pde"],
        )],
        synonyms: vec![
            named("PDEU", &["pdeu", "pdu", "pde", "Pandit Deendayal Energy University"]),
            named("admission", &["admissions", "admision", "addmission", "enrollment"]),
            named("fees", &["fee", "fess", "cost", "charges", "tuition"]),
        ],
    }
}

fn group_by_intent(entries: &[QaEntry]) -> BTreeMap<String, Vec<String>> {
    let mut groups: BTreeMap<String, Vec<String>> = BTreeMap::new();
    let mut skipped = 0usize;

    for entry in entries {
        match &entry.topic {
            Some(topic) => groups
                .entry(topic.to_string())
                .or_default()
                .push(entry.question.clone()),
            None => skipped += 1,
        }
    }

    if skipped > 0 {
        tracing::debug!("Skipped {} rows without an intent", skipped);
    }
    groups
}

fn generic_examples(intent: &str) -> &'static [&'static str] {
    match intent {
        "greet"   => &["hi", "hello", "hey", "good morning", "good afternoon", "namaste", "hii", "helo"],
        "goodbye" => &["bye", "goodbye", "see you", "thanks", "thank you", "thnks", "by"],
        "affirm"  => &["yes", "yeah", "yep", "correct", "right", "ok", "okay", "sure"],
        "deny"    => &["no", "nope", "not really", "wrong", "incorrect", "nah"],
        _ => &[],
    }
}

/// Drop repeats (first occurrence wins) and keep at most `cap`.
fn dedupe_capped(examples: Vec<String>, cap: usize) -> Vec<String> {
    let mut seen = HashSet::new();
    examples
        .into_iter()
        .filter(|e| seen.insert(e.clone()))
        .take(cap)
        .collect()
}

fn named(name: &str, examples: &[&str]) -> NamedExamples {
    NamedExamples {
        name:     name.to_string(),
        examples: examples.iter().map(|e| e.to_string()).collect(),
    }
}

fn fallback_entries() -> Vec<QaEntry> {
    [
        ("How do I apply for admission?",   "admission_process"),
        ("What is the fee structure?",      "fees"),
        ("Tell me about hostel facilities", "hostel"),
        ("What about placements?",          "placement"),
        ("Which courses are available?",    "courses"),
        ("What is the eligibility criteria?", "eligibility"),
    ]
    .into_iter()
    .map(|(q, intent)| QaEntry::new(q, "").with_topic(intent))
    .collect()
}
