//! Wellness check-in pipeline: field accumulation, deterministic advice,
//! and the JSON history log.

use std::path::PathBuf;
use std::sync::Mutex;

use chrono::Utc;
use tracing::debug;

use parley_core::types::WellnessEntry;

use crate::persist_best_effort;

/// Stress phrasings normalized to "No stress reported".
const STRESS_NEGATIONS: [&str; 7] =
    ["no", "none", "nothing", "no stress", "i am fine", "im fine", ""];

const LOW_ENERGY: [&str; 4] = ["low", "low energy", "tired", "drained"];
const HIGH_ENERGY: [&str; 4] = ["high", "high energy", "energized", "very high"];
const LOW_MOOD: [&str; 7] = ["sad", "low", "down", "bad", "unhappy", "tired", "depressed"];
const POSITIVE_MOOD: [&str; 7] = ["good", "happy", "great", "fine", "well", "okay", "content"];
// substring buckets, so "stres" matches "stressed"
const STRESSED: [&str; 6] = ["stres", "anx", "worried", "tense", "pressure", "panic"];

#[derive(Debug, Default, Clone)]
struct CheckinFields {
    mood: Option<String>,
    energy: Option<String>,
    stress: Option<String>,
    goals: Vec<String>,
}

/// The in-progress check-in for one session. Each setter mutates exactly one
/// field; unset fields receive defaults at completion time.
#[derive(Default)]
pub struct CheckinState {
    fields: Mutex<CheckinFields>,
}

/// Result of completing a check-in. `saved` is false when the history write
/// failed; the check-in itself still succeeded in memory.
#[derive(Debug, Clone)]
pub struct CheckinOutcome {
    pub summary: String,
    pub advice: String,
    pub saved: bool,
}

impl CheckinState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_mood(&self, mood: &str) -> String {
        let val = non_empty_or(mood, "Not specified");
        self.fields.lock().unwrap_or_else(|e| e.into_inner()).mood = Some(val.clone());
        debug!(mood = %val, "mood recorded");
        val
    }

    pub fn set_energy(&self, energy: &str) -> String {
        let val = non_empty_or(energy, "Not specified");
        self.fields.lock().unwrap_or_else(|e| e.into_inner()).energy = Some(val.clone());
        debug!(energy = %val, "energy recorded");
        val
    }

    /// Record stress, normalizing negation phrases ("no", "none", "im fine",
    /// ...) to "No stress reported".
    pub fn set_stress(&self, stress: &str) -> String {
        let raw = stress.trim();
        let val = if STRESS_NEGATIONS.contains(&raw.to_lowercase().as_str()) {
            "No stress reported".to_string()
        } else {
            raw.to_string()
        };
        self.fields.lock().unwrap_or_else(|e| e.into_inner()).stress = Some(val.clone());
        debug!(stress = %val, "stress recorded");
        val
    }

    /// Record goals, trimming each and dropping empties.
    pub fn set_goals(&self, goals: &[String]) -> Vec<String> {
        let cleaned: Vec<String> = goals
            .iter()
            .map(|g| g.trim().to_string())
            .filter(|g| !g.is_empty())
            .collect();
        self.fields.lock().unwrap_or_else(|e| e.into_inner()).goals = cleaned.clone();
        debug!(goals = ?cleaned, "goals recorded");
        cleaned
    }

    /// Finalize the check-in: fill defaults, build the summary and advice,
    /// and append the entry to the history log. A failed history write
    /// degrades to `saved: false` rather than an error.
    pub fn complete(&self, log: &WellnessLog) -> CheckinOutcome {
        let fields = self.fields.lock().unwrap_or_else(|e| e.into_inner()).clone();
        let mood = fields.mood.unwrap_or_else(|| "Not specified".into());
        let energy = fields.energy.unwrap_or_else(|| "Not specified".into());
        let stress = fields.stress.unwrap_or_else(|| "No stress reported".into());
        let goals = fields.goals;

        let goals_text = if goals.is_empty() {
            "none".to_string()
        } else {
            goals.join(", ")
        };
        let summary = format!("Mood: {mood}. Energy: {energy}. Stress: {stress}. Goals: {goals_text}.");
        let advice = compose_advice(&mood, &energy, &stress, &goals);

        let entry = WellnessEntry {
            timestamp: Utc::now(),
            mood,
            energy,
            stress,
            goals,
            summary: summary.clone(),
        };
        let saved = log.append(entry);

        CheckinOutcome {
            summary,
            advice,
            saved,
        }
    }
}

fn non_empty_or(value: &str, default: &str) -> String {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        default.to_string()
    } else {
        trimmed.to_string()
    }
}

/// Deterministic advice paragraph: fixed opening, one energy sentence pair,
/// one mood sentence pair, one stress sentence, goal sentences, fixed close,
/// joined with single spaces.
pub fn compose_advice(mood: &str, energy: &str, stress: &str, goals: &[String]) -> String {
    let m = mood.trim().to_lowercase();
    let e = energy.trim().to_lowercase();
    let s = stress.trim().to_lowercase();

    let mut parts: Vec<String> = Vec::new();
    parts.push("Thanks for sharing—I've taken that in.".into());

    if LOW_ENERGY.contains(&e.as_str()) {
        parts.push("Right now your energy seems limited — that calls for gentleness.".into());
        parts.push("If possible, aim for one small, doable step that won't use much energy.".into());
    } else if HIGH_ENERGY.contains(&e.as_str()) {
        parts.push(
            "You have momentum — it could be a good moment to make a meaningful push on one thing."
                .into(),
        );
        parts.push("Choose a clear, short chunk of work so energy helps you finish it cleanly.".into());
    } else {
        parts.push("You have steady energy; small plans and short breaks can keep that steady pace.".into());
    }

    if LOW_MOOD.iter().any(|k| m.contains(k)) {
        parts.push("Be kind to yourself today — small acts of care really do add up.".into());
        parts.push(
            "If a task feels heavy, break it into the tiniest next step and celebrate that step."
                .into(),
        );
    } else if POSITIVE_MOOD.iter().any(|k| m.contains(k)) {
        parts.push(
            "That positive tone is useful — consider using it to do one thing that matters to you."
                .into(),
        );
        parts.push("A short pause to notice progress will help keep the good feeling steady.".into());
    } else {
        parts.push("You're in a place where small, practical moves will make the day feel steadier.".into());
    }

    // the no-stress check runs first so "No stress reported" never trips the
    // "stres" substring bucket
    if s.is_empty() || s.contains("no stress") {
        parts.push(
            "Since stress seems low, it's a great chance to use small windows productively and kindly."
                .into(),
        );
    } else if STRESSED.iter().any(|k| s.contains(k)) {
        parts.push(
            "When stress shows up, try a short grounding action: 30 seconds of steady breathing or a two-minute walk."
                .into(),
        );
    } else {
        parts.push(
            "If something is bothering you, naming the smallest next action can reduce how big the problem feels."
                .into(),
        );
    }

    if let Some(first_goal) = goals.first() {
        parts.push(format!(
            "For your goal — “{first_goal}” — try splitting it into a micro-step you can finish within 15–30 minutes."
        ));
        if goals.len() > 1 {
            parts.push("For the rest, pick one to focus on so you don't spread yourself thin.".into());
        }
    } else {
        parts.push(
            "If you're not sure about goals today, one tiny intention (even 'rest a little') is a useful plan."
                .into(),
        );
    }

    parts.push("Remember: a small kind action toward yourself is still progress. I'll remember this for next time.".into());
    parts.join(" ")
}

/// JSON-array history log (`wellness_log.json`). Entries are appended via
/// read-modify-rewrite; a missing or corrupt file reads as empty history.
pub struct WellnessLog {
    path: PathBuf,
}

impl WellnessLog {
    pub fn new(path: PathBuf) -> Self {
        Self { path }
    }

    pub fn load_history(&self) -> Vec<WellnessEntry> {
        std::fs::read_to_string(&self.path)
            .ok()
            .and_then(|s| serde_json::from_str(&s).ok())
            .unwrap_or_default()
    }

    /// Append an entry and rewrite the log. Returns false (and logs) on a
    /// failed write; the caller's check-in still succeeds.
    pub fn append(&self, entry: WellnessEntry) -> bool {
        let mut history = self.load_history();
        history.push(entry);
        persist_best_effort(&self.path, &history)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn goals(items: &[&str]) -> Vec<String> {
        items.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_summary_matches_fixed_format() {
        let dir = tempfile::tempdir().unwrap();
        let log = WellnessLog::new(dir.path().join("wellness_log.json"));
        let checkin = CheckinState::new();
        checkin.set_mood("sad");
        checkin.set_energy("low");
        checkin.set_stress("");
        checkin.set_goals(&goals(&["sleep more"]));

        let outcome = checkin.complete(&log);
        assert_eq!(
            outcome.summary,
            "Mood: sad. Energy: low. Stress: No stress reported. Goals: sleep more."
        );
        assert!(outcome.saved);
    }

    #[test]
    fn test_advice_low_energy_low_mood_no_stress_single_goal() {
        let advice = compose_advice("sad", "low", "No stress reported", &goals(&["sleep more"]));
        assert!(advice.starts_with("Thanks for sharing—I've taken that in."));
        assert!(advice.contains("Right now your energy seems limited — that calls for gentleness."));
        assert!(advice.contains("If possible, aim for one small, doable step that won't use much energy."));
        assert!(advice.contains("Be kind to yourself today — small acts of care really do add up."));
        assert!(advice.contains(
            "If a task feels heavy, break it into the tiniest next step and celebrate that step."
        ));
        assert!(advice.contains(
            "Since stress seems low, it's a great chance to use small windows productively and kindly."
        ));
        assert!(advice.contains("“sleep more”"));
        assert!(!advice.contains("For the rest, pick one to focus on"));
        assert!(advice.ends_with("I'll remember this for next time."));
    }

    #[test]
    fn test_advice_is_deterministic() {
        let a = compose_advice("happy", "high", "deadline pressure", &goals(&["ship", "rest"]));
        let b = compose_advice("happy", "high", "deadline pressure", &goals(&["ship", "rest"]));
        assert_eq!(a, b);
        assert!(a.contains("You have momentum"));
        assert!(a.contains("That positive tone is useful"));
        assert!(a.contains("When stress shows up"));
        assert!(a.contains("For the rest, pick one to focus on so you don't spread yourself thin."));
    }

    #[test]
    fn test_energy_bucket_is_exact_match_not_substring() {
        // "lowish" is not in the low bucket; it falls through to steady
        let advice = compose_advice("", "lowish", "x", &[]);
        assert!(advice.contains("You have steady energy"));
    }

    #[test]
    fn test_unmatched_stress_text_gets_default_sentence() {
        let advice = compose_advice("", "", "my commute", &[]);
        assert!(advice.contains("naming the smallest next action"));
    }

    #[test]
    fn test_stress_negations_normalize() {
        let checkin = CheckinState::new();
        for phrase in ["no", "None", "NOTHING", "i am fine", "Im Fine", ""] {
            assert_eq!(checkin.set_stress(phrase), "No stress reported");
        }
        assert_eq!(checkin.set_stress("deadlines"), "deadlines");
    }

    #[test]
    fn test_defaults_applied_at_completion() {
        let dir = tempfile::tempdir().unwrap();
        let log = WellnessLog::new(dir.path().join("wellness_log.json"));
        let outcome = CheckinState::new().complete(&log);
        assert_eq!(
            outcome.summary,
            "Mood: Not specified. Energy: Not specified. Stress: No stress reported. Goals: none."
        );
    }

    #[test]
    fn test_history_appends_and_never_shrinks() {
        let dir = tempfile::tempdir().unwrap();
        let log = WellnessLog::new(dir.path().join("wellness_log.json"));
        for i in 0..3 {
            let checkin = CheckinState::new();
            checkin.set_mood(&format!("mood-{i}"));
            checkin.complete(&log);
            assert_eq!(log.load_history().len(), i + 1);
        }
        let history = log.load_history();
        assert_eq!(history[0].mood, "mood-0");
        assert_eq!(history[2].mood, "mood-2");
    }

    #[test]
    fn test_corrupt_history_reads_as_empty() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("wellness_log.json");
        std::fs::write(&path, "not json at all").unwrap();
        let log = WellnessLog::new(path);
        assert!(log.load_history().is_empty());

        let checkin = CheckinState::new();
        checkin.set_mood("fine");
        let outcome = checkin.complete(&log);
        assert!(outcome.saved);
        assert_eq!(log.load_history().len(), 1);
    }
}
