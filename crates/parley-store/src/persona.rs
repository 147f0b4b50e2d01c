//! Keyword-based persona classification for free text.

use tracing::debug;

/// A customer archetype with the keywords that signal it.
#[derive(Debug, Clone)]
pub struct Persona {
    pub name: String,
    pub keywords: Vec<String>,
}

/// Scores free text against each persona's keyword set.
///
/// Declaration order matters: ties go to the first persona reaching the
/// maximum score, and classification is deterministic.
pub struct PersonaClassifier {
    personas: Vec<Persona>,
}

impl PersonaClassifier {
    pub fn new(personas: Vec<Persona>) -> Self {
        Self { personas }
    }

    /// The built-in SDR persona set.
    pub fn seeded() -> Self {
        let persona = |name: &str, keywords: &[&str]| Persona {
            name: name.into(),
            keywords: keywords.iter().map(|k| k.to_string()).collect(),
        };
        Self::new(vec![
            persona(
                "engineering_leader",
                &["engineer", "developer", "cto", "technical", "architect", "devops", "platform"],
            ),
            persona(
                "executive",
                &["founder", "ceo", "coo", "president", "vp", "director", "head of"],
            ),
            persona(
                "operations",
                &["operations", "ops", "support", "customer success", "logistics"],
            ),
            persona(
                "growth",
                &["marketing", "sales", "growth", "revenue", "demand", "brand"],
            ),
        ])
    }

    /// Best-matching persona name, or `None` when nothing scores.
    ///
    /// Score = number of the persona's keywords occurring case-insensitively
    /// as substrings of `text`. A zero maximum never assigns a persona.
    pub fn classify(&self, text: &str) -> Option<&str> {
        let haystack = text.to_lowercase();
        let mut best: Option<(&Persona, usize)> = None;
        for persona in &self.personas {
            let score = persona
                .keywords
                .iter()
                .filter(|k| haystack.contains(&k.to_lowercase()))
                .count();
            // strictly-greater keeps the first persona on ties
            if score > best.map_or(0, |(_, s)| s) {
                best = Some((persona, score));
            }
        }
        let (persona, score) = best?;
        debug!(persona = %persona.name, score, "persona classified");
        Some(&persona.name)
    }
}
