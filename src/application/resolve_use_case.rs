// ============================================================
// Layer 2 — Resolve Use Case (ResolutionEngine)
// ============================================================
// One user turn, as a small state machine:
//
//   Start ──normalize──▶ Normalized
//                          │
//            store hit ≥ 60 ├──▶ MatchedByFuzzy   ┐
//            keyword found  ├──▶ MatchedByKeyword ├─▶ NextStage::ShowSuggestions
//            otherwise      └──▶ Unmatched        ┘   (menu, state untouched)
//
// Stage 1 (`respond`) produces the answer and says whether a
// second stage should run. Stage 2 (`follow_up`) records the
// topic into the session state and picks the suggestion buttons.
// `handle_turn` runs both.
//
// The engine holds only read-only parts (plus the atomically
// reloadable store) and can be shared between sessions. Each
// session passes its own ConversationState in and gets the
// updated copy back.

use anyhow::Result;
use serde::Serialize;

use crate::data::loader::CsvQaLoader;
use crate::data::normalizer::Normalizer;
use crate::domain::state::ConversationState;
use crate::domain::topic::{TopicCode, TopicSuggestion};
use crate::infra::config::EngineConfig;
use crate::matching::followup::{FollowupSelector, FOLLOWUP_PROMPT};
use crate::matching::keyword_fallback::KeywordFallback;
use crate::matching::question_store::{LoadStatus, QuestionStore};
use crate::matching::topic_menu;

/// What the hosting framework hands in for one turn.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Turn {
    /// Raw user text
    pub text: String,

    /// Intent label from an external classifier, if one ran
    pub intent: Option<TopicCode>,
}

impl Turn {
    pub fn new(text: impl Into<String>) -> Self {
        Self { text: text.into(), intent: None }
    }

    pub fn with_intent(mut self, intent: impl Into<TopicCode>) -> Self {
        self.intent = Some(intent.into());
        self
    }
}

/// Which branch answered the turn
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Resolution {
    MatchedByFuzzy { question: String, score: f64 },
    MatchedByKeyword { keyword: String },
    Unmatched,
}

impl Resolution {
    pub fn is_match(&self) -> bool {
        !matches!(self, Resolution::Unmatched)
    }
}

/// The immediate reply for a turn
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Response {
    pub text:    String,
    /// Text shown above the buttons, if any
    pub prompt:  Option<String>,
    pub buttons: Vec<TopicSuggestion>,
    /// Clarifying question about the previous topic (menu replies only)
    pub hint:    Option<String>,
}

/// Deferred work the orchestrator may run after the reply.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NextStage {
    ShowSuggestions { topic: TopicCode },
}

/// Stage 1 output
#[derive(Debug, Clone, PartialEq)]
pub struct TurnOutcome {
    pub normalized: String,
    pub resolution: Resolution,
    pub response:   Response,
    pub next:       Option<NextStage>,
}

/// Stage 2 output
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FollowupOutcome {
    pub topic:       TopicCode,
    pub prompt:      Option<String>,
    pub suggestions: Vec<TopicSuggestion>,
}

/// Both stages together, plus the state to persist
#[derive(Debug, Clone, PartialEq)]
pub struct TurnReply {
    pub outcome:  TurnOutcome,
    pub followup: Option<FollowupOutcome>,
    pub state:    ConversationState,
}

pub struct ResolutionEngine {
    normalizer: Normalizer,
    store:      QuestionStore,
    keywords:   KeywordFallback,
    followups:  FollowupSelector,
}

impl ResolutionEngine {
    pub fn new(normalizer: Normalizer, store: QuestionStore, keywords: KeywordFallback) -> Self {
        Self {
            normalizer,
            store,
            keywords,
            followups: FollowupSelector::new(),
        }
    }

    /// Build the engine from configuration and load the CSV source.
    ///
    /// Only invalid correction rules fail here; an unusable Q/A
    /// source is reported through the returned LoadStatus.
    pub fn from_config(cfg: &EngineConfig) -> Result<(Self, LoadStatus)> {
        let normalizer     = Normalizer::new(&cfg.correction_rules())?;
        let keywords       = KeywordFallback::new(cfg.keyword_rules());
        let (store, status) = QuestionStore::open(Box::new(CsvQaLoader::new(&cfg.qa_path)));

        tracing::info!(
            "Engine ready: {} misspellings, {} keyword rules",
            normalizer.len(),
            keywords.rules().len()
        );
        Ok((Self::new(normalizer, store, keywords), status))
    }

    pub fn store(&self) -> &QuestionStore {
        &self.store
    }

    /// Re-read the Q/A source; concurrent turns keep a consistent table.
    pub fn reload(&self) -> LoadStatus {
        self.store.reload()
    }

    /// Stage 1: normalize, then fuzzy → keyword → menu.
    pub fn respond(&self, turn: &Turn, state: &ConversationState) -> TurnOutcome {
        let normalized = self.normalizer.normalize(&turn.text);

        let fuzzy = match self.store.best_match(&normalized) {
            Ok(found) => found,
            Err(e) => {
                tracing::warn!("Question store unavailable, trying keywords: {:#}", e);
                None
            }
        };

        if let Some(m) = fuzzy {
            tracing::debug!("Fuzzy match #{} (score {:.1})", m.index, m.score);
            let resolution = Resolution::MatchedByFuzzy { question: m.question, score: m.score };
            return self.matched(turn, normalized, resolution, m.answer, m.topic);
        }

        if let Some(rule) = self.keywords.find(&normalized) {
            tracing::debug!("Keyword match '{}'", rule.keyword);
            let resolution = Resolution::MatchedByKeyword { keyword: rule.keyword.clone() };
            return self.matched(
                turn,
                normalized,
                resolution,
                rule.answer.clone(),
                Some(rule.topic.clone()),
            );
        }

        tracing::debug!("No match for '{}', showing topic menu", normalized);
        let menu = topic_menu::default_response();
        TurnOutcome {
            normalized,
            resolution: Resolution::Unmatched,
            response: Response {
                text:    menu.intro,
                prompt:  Some(menu.prompt),
                buttons: menu.suggestions,
                hint:    self
                    .followups
                    .contextual_hint(state.last_topic())
                    .map(str::to_string),
            },
            next: None,
        }
    }

    /// Stage 2: record the topic and choose related suggestions.
    pub fn follow_up(
        &self,
        stage: NextStage,
        state: ConversationState,
    ) -> (FollowupOutcome, ConversationState) {
        match stage {
            NextStage::ShowSuggestions { topic } => {
                let suggestions = self.followups.suggestions_for(&topic).to_vec();
                let prompt = if suggestions.is_empty() {
                    None
                } else {
                    Some(FOLLOWUP_PROMPT.to_string())
                };
                let state = self.followups.record_topic(topic.clone(), state);
                (FollowupOutcome { topic, prompt, suggestions }, state)
            }
        }
    }

    /// Run a whole turn: the reply, then the follow-up stage if any.
    pub fn handle_turn(&self, turn: &Turn, state: ConversationState) -> TurnReply {
        let outcome = self.respond(turn, &state);

        let (followup, state) = match outcome.next.clone() {
            Some(stage) => {
                let (followup, state) = self.follow_up(stage, state);
                (Some(followup), state)
            }
            None => (None, state),
        };

        TurnReply { outcome, followup, state }
    }

    /// Clarifying question for the topic recorded in `state`
    pub fn contextual_hint(&self, state: &ConversationState) -> Option<&'static str> {
        self.followups.contextual_hint(state.last_topic())
    }

    fn matched(
        &self,
        turn:       &Turn,
        normalized: String,
        resolution: Resolution,
        answer:     String,
        topic:      Option<TopicCode>,
    ) -> TurnOutcome {
        // An externally classified intent takes precedence over the
        // topic attached to the matched row or rule.
        let topic = turn.intent.clone().or(topic);

        TurnOutcome {
            normalized,
            resolution,
            response: Response {
                text:    answer,
                prompt:  None,
                buttons: Vec::new(),
                hint:    None,
            },
            next: topic.map(|topic| NextStage::ShowSuggestions { topic }),
        }
    }
}

// ─── Unit Tests ───────────────────────────────────────────────────────────────
#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::normalizer::default_rules;
    use crate::domain::qa_entry::QaEntry;
    use crate::domain::traits::StaticSource;
    use crate::matching::question_store::CONFIDENCE_THRESHOLD;
    use crate::matching::similarity::token_sort_ratio;
    use crate::matching::topic_menu::MENU_INTRO;

    fn entries() -> Vec<QaEntry> {
        vec![
            QaEntry::new("how do i apply for admission", "Apply online at the portal.")
                .with_topic("admission_process"),
            QaEntry::new("what is the admission process", "Fill the form and upload documents.")
                .with_topic("admission_process"),
            QaEntry::new("Tell me about hostel facilities", "AC and non-AC rooms with mess.")
                .with_topic("hostel"),
            QaEntry::new("Where is the campus", "Gandhinagar, Gujarat."),
        ]
    }

    fn engine_with(entries: Vec<QaEntry>) -> ResolutionEngine {
        let (store, _) = QuestionStore::open(Box::new(StaticSource::new(entries)));
        ResolutionEngine::new(
            Normalizer::new(&default_rules()).unwrap(),
            store,
            KeywordFallback::default(),
        )
    }

    fn engine() -> ResolutionEngine {
        engine_with(entries())
    }

    #[test]
    fn test_misspelled_question_matches_by_fuzzy() {
        let reply = engine().handle_turn(
            &Turn::new("what is the addmission process"),
            ConversationState::new(),
        );
        assert_eq!(reply.outcome.normalized, "what is the admission process");
        // The neighbouring admission row alone would not clear the threshold.
        assert!(
            token_sort_ratio("what is the admission process", "how do i apply for admission")
                < CONFIDENCE_THRESHOLD
        );
        assert_eq!(reply.outcome.response.text, "Fill the form and upload documents.");
        assert!(matches!(
            reply.outcome.resolution,
            Resolution::MatchedByFuzzy { score, .. } if score == 100.0
        ));

        let followup = reply.followup.unwrap();
        assert_eq!(followup.topic.as_str(), "admission_process");
        assert_eq!(followup.suggestions.len(), 3);
        assert_eq!(reply.state.last_topic().unwrap().as_str(), "admission_process");
    }

    #[test]
    fn test_keyword_fallback_uses_declaration_order() {
        let reply = engine().handle_turn(&Turn::new("hstel fees plz"), ConversationState::new());
        assert_eq!(
            reply.outcome.resolution,
            Resolution::MatchedByKeyword { keyword: "fees".to_string() }
        );
        assert!(reply.outcome.response.text.starts_with("B.Tech tuition fee"));
        assert_eq!(reply.state.last_topic().unwrap().as_str(), "fees");
    }

    #[test]
    fn test_empty_input_shows_menu_and_keeps_state() {
        let before = ConversationState::new().with_interest("mba");
        let reply  = engine().handle_turn(&Turn::new(""), before.clone());

        assert_eq!(reply.outcome.normalized, "");
        assert_eq!(reply.outcome.resolution, Resolution::Unmatched);
        assert_eq!(reply.outcome.response.text, MENU_INTRO);
        assert_eq!(reply.outcome.response.buttons.len(), 6);
        assert!(reply.outcome.next.is_none());
        assert!(reply.followup.is_none());
        assert_eq!(reply.state, before);
    }

    #[test]
    fn test_unmatched_turn_carries_hint_for_previous_topic() {
        let engine = engine();
        let first  = engine.handle_turn(&Turn::new("what about fee"), ConversationState::new());
        assert_eq!(first.state.last_topic().unwrap().as_str(), "fees");
        assert_eq!(
            engine.contextual_hint(&first.state),
            Some("Would you also like to know about scholarships or payment options?")
        );

        let second = engine.handle_turn(&Turn::new("thanks"), first.state.clone());
        assert_eq!(second.outcome.resolution, Resolution::Unmatched);
        assert_eq!(
            second.outcome.response.hint.as_deref(),
            Some("Would you also like to know about scholarships or payment options?")
        );
        assert_eq!(second.state, first.state);
    }

    #[test]
    fn test_classifier_intent_overrides_row_topic() {
        let reply = engine().handle_turn(
            &Turn::new("tell me about hostel facilities").with_intent("fees"),
            ConversationState::new(),
        );
        assert_eq!(reply.outcome.response.text, "AC and non-AC rooms with mess.");
        assert_eq!(reply.state.last_topic().unwrap().as_str(), "fees");
    }

    #[test]
    fn test_match_without_topic_skips_second_stage() {
        let reply = engine().handle_turn(&Turn::new("where is the campus"), ConversationState::new());
        assert!(reply.outcome.resolution.is_match());
        assert!(reply.outcome.next.is_none());
        assert!(reply.state.last_topic().is_none());
    }

    #[test]
    fn test_unknown_topic_records_state_without_buttons() {
        let engine = engine();
        let (followup, state) = engine.follow_up(
            NextStage::ShowSuggestions { topic: TopicCode::new("scholarship") },
            ConversationState::new(),
        );
        assert!(followup.suggestions.is_empty());
        assert!(followup.prompt.is_none());
        assert_eq!(state.last_topic().unwrap().as_str(), "scholarship");
    }

    #[test]
    fn test_empty_store_falls_through_to_keywords_and_menu() {
        let engine = engine_with(Vec::new());
        let reply  = engine.handle_turn(&Turn::new("what is the admission process"), ConversationState::new());
        assert_eq!(
            reply.outcome.resolution,
            Resolution::MatchedByKeyword { keyword: "admission".to_string() }
        );

        let reply = engine.handle_turn(&Turn::new("where is the library"), ConversationState::new());
        assert_eq!(reply.outcome.resolution, Resolution::Unmatched);
    }

    #[test]
    fn test_poisoned_store_falls_back_to_keywords_until_reload() {
        let engine = engine();
        engine.store().poison();
        assert!(engine.store().best_match("what is the admission process").is_err());

        let reply = engine.handle_turn(&Turn::new("hostel fees"), ConversationState::new());
        assert_eq!(
            reply.outcome.resolution,
            Resolution::MatchedByKeyword { keyword: "fees".to_string() }
        );
        assert_eq!(reply.state.last_topic().unwrap().as_str(), "fees");

        assert_eq!(engine.reload(), LoadStatus::Loaded { rows: 4 });
        let reply = engine.handle_turn(
            &Turn::new("what is the admission process"),
            ConversationState::new(),
        );
        assert!(matches!(reply.outcome.resolution, Resolution::MatchedByFuzzy { .. }));
    }

    #[test]
    fn test_missing_csv_never_fails_a_turn() {
        let cfg = EngineConfig {
            qa_path: "no/such/questions.csv".to_string(),
            ..EngineConfig::default()
        };
        let (engine, status) = ResolutionEngine::from_config(&cfg).unwrap();
        assert!(!status.is_loaded());

        let reply = engine.handle_turn(&Turn::new("placement record?"), ConversationState::new());
        assert_eq!(
            reply.outcome.resolution,
            Resolution::MatchedByKeyword { keyword: "placement".to_string() }
        );
    }

    #[test]
    fn test_bad_correction_rules_fail_construction() {
        let mut cfg = EngineConfig::default();
        cfg.extra_corrections.push(crate::domain::qa_entry::CorrectionRule::new("festival", &["fes"]));
        assert!(ResolutionEngine::from_config(&cfg).is_err());
    }

    #[test]
    fn test_sessions_share_engine_but_not_state() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<ResolutionEngine>();

        let engine = engine();
        std::thread::scope(|s| {
            let a = s.spawn(|| engine.handle_turn(&Turn::new("fee details"), ConversationState::new()));
            let b = s.spawn(|| engine.handle_turn(&Turn::new("hostle rooms"), ConversationState::new()));
            let a = a.join().unwrap();
            let b = b.join().unwrap();
            assert_eq!(a.state.last_topic().unwrap().as_str(), "fees");
            assert_eq!(b.state.last_topic().unwrap().as_str(), "hostel");
        });
    }
}
