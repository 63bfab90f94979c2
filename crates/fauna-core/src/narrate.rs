//! Narration and Lore Collaborators
//!
//! The engine talks to two external services: a narrator that turns an
//! interaction into descriptive text, and a context source that supplies
//! background lore and scenario prompts. Both are trait objects so drivers
//! and tests can swap implementations freely. Narrator failures are
//! recovered inside the engine; they never abort a tick.

use thiserror::Error;

use fauna_events::CreatureSnapshot;

/// Failure modes of a narration backend.
#[derive(Debug, Error)]
pub enum NarrateError {
    /// The backend was unreachable or rejected the request.
    #[error("narration backend unavailable: {0}")]
    Backend(String),
    /// The backend produced no usable text.
    #[error("narration backend returned an empty response")]
    Empty,
}

/// Produces descriptive text for an interaction between creatures.
pub trait Narrator {
    /// Narrates `scenario` for the given participants, optionally weaving
    /// in background `context` lines.
    fn narrate(
        &mut self,
        participants: &[CreatureSnapshot],
        scenario: &str,
        context: &[String],
    ) -> Result<String, NarrateError>;
}

/// Supplies background lore lines and scenario prompts.
///
/// Either query may return an empty list; the engine treats that as "no
/// context available".
pub trait ContextSource {
    /// Lore lines relevant to `text`, at most `limit` of them.
    fn query(&self, text: &str, limit: usize) -> Vec<String>;

    /// The catalog of scenario prompts used for random world events.
    fn scenarios(&self) -> Vec<String>;
}

/// Deterministic, template-based narrator.
///
/// Formats the scenario, cast, and the first context line into a single
/// sentence. Useful as a default when no language backend is wired up, and
/// for reproducible tests.
#[derive(Debug, Clone, Default)]
pub struct TemplateNarrator;

impl Narrator for TemplateNarrator {
    fn narrate(
        &mut self,
        participants: &[CreatureSnapshot],
        scenario: &str,
        context: &[String],
    ) -> Result<String, NarrateError> {
        if participants.is_empty() {
            return Err(NarrateError::Empty);
        }
        let cast = participants
            .iter()
            .map(|p| p.name.as_str())
            .collect::<Vec<_>>()
            .join(" and ");
        let mut line = format!("{} ({})", scenario, cast);
        if let Some(lore) = context.first() {
            line.push_str(&format!(", while {}", lore));
        }
        Ok(line)
    }
}

/// In-memory context source: a fixed set of lore lines and scenarios.
#[derive(Debug, Clone, Default)]
pub struct StaticContextSource {
    lore: Vec<String>,
    scenario_list: Vec<String>,
}

impl StaticContextSource {
    pub fn new(lore: Vec<String>, scenarios: Vec<String>) -> Self {
        Self {
            lore,
            scenario_list: scenarios,
        }
    }
}

impl ContextSource for StaticContextSource {
    /// Prefers lore lines sharing a word with the query, padding with the
    /// remaining lines in order until `limit` is reached.
    fn query(&self, text: &str, limit: usize) -> Vec<String> {
        let mut results: Vec<String> = self
            .lore
            .iter()
            .filter(|line| text.split_whitespace().any(|word| line.contains(word)))
            .cloned()
            .collect();
        for line in &self.lore {
            if results.len() >= limit {
                break;
            }
            if !results.contains(line) {
                results.push(line.clone());
            }
        }
        results.truncate(limit);
        results
    }

    fn scenarios(&self) -> Vec<String> {
        self.scenario_list.clone()
    }
}

/// Narrator that always fails. Drives the engine's deterministic fallback
/// paths, mirroring a run with no language backend available.
#[derive(Debug, Clone, Default)]
pub struct SilentNarrator;

impl Narrator for SilentNarrator {
    fn narrate(
        &mut self,
        _participants: &[CreatureSnapshot],
        _scenario: &str,
        _context: &[String],
    ) -> Result<String, NarrateError> {
        Err(NarrateError::Backend("narration disabled".to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use fauna_events::Position;

    fn snap(name: &str) -> CreatureSnapshot {
        CreatureSnapshot::new(name.to_lowercase(), name, "stormtail", Position::default())
    }

    #[test]
    fn test_template_narrator_is_deterministic() {
        let mut narrator = TemplateNarrator;
        let participants = [snap("Volta"), snap("Umbra")];
        let context = vec!["the field is soaked from rain".to_string()];

        let a = narrator
            .narrate(&participants, "a scuffle breaks out", &context)
            .unwrap();
        let b = narrator
            .narrate(&participants, "a scuffle breaks out", &context)
            .unwrap();
        assert_eq!(a, b);
        assert!(a.contains("Volta and Umbra"));
        assert!(a.contains("soaked"));
    }

    #[test]
    fn test_template_narrator_rejects_empty_cast() {
        let mut narrator = TemplateNarrator;
        assert!(narrator.narrate(&[], "nothing", &[]).is_err());
    }

    #[test]
    fn test_static_context_prefers_matching_lines() {
        let source = StaticContextSource::new(
            vec![
                "Umbra hoards shiny things".to_string(),
                "Volta naps in tall grass".to_string(),
                "the old oak marks the field's center".to_string(),
            ],
            vec![],
        );
        let results = source.query("Volta and Umbra battle", 2);
        assert_eq!(results.len(), 2);
        assert!(results.iter().all(|l| l.contains("Umbra") || l.contains("Volta")));
    }

    #[test]
    fn test_static_context_pads_up_to_limit() {
        let source = StaticContextSource::new(
            vec!["first".to_string(), "second".to_string()],
            vec![],
        );
        let results = source.query("zzz", 5);
        assert_eq!(results, vec!["first".to_string(), "second".to_string()]);
    }

    #[test]
    fn test_silent_narrator_always_fails() {
        let mut narrator = SilentNarrator;
        let err = narrator.narrate(&[snap("Volta")], "anything", &[]).unwrap_err();
        assert!(err.to_string().contains("unavailable"));
    }

    #[test]
    fn test_scenarios_pass_through() {
        let source = StaticContextSource::new(vec![], vec!["a storm rolls in".to_string()]);
        assert_eq!(source.scenarios(), vec!["a storm rolls in".to_string()]);
    }
}
