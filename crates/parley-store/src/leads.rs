//! Incrementally-built lead record for the sales persona.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use chrono::Utc;
use tracing::debug;

use parley_core::types::{BookedMeeting, LeadSnapshot, TranscriptTurn};

use crate::persist_best_effort;
use crate::persona::PersonaClassifier;

/// Fields whose values accumulate as deduplicated lists.
const LIST_FIELDS: [&str; 2] = ["pain_points", "key_interests"];

/// Fields that must be present and non-empty for a complete lead.
pub const REQUIRED_FIELDS: [&str; 7] = [
    "name",
    "email",
    "company",
    "role",
    "team_size",
    "timeline",
    "use_case",
];

#[derive(Default)]
struct LeadState {
    fields: BTreeMap<String, serde_json::Value>,
    transcript: Vec<TranscriptTurn>,
    detected_persona: Option<String>,
    booked_meeting: Option<BookedMeeting>,
}

/// Mutable lead record, built up one `store_field` call at a time.
///
/// Scalar fields are last-write-wins. List fields (`pain_points`,
/// `key_interests`) split the incoming value on `" and "` and commas, then
/// append each trimmed token unless it is already present — exact-string
/// dedup, original order preserved, entries never dropped.
pub struct LeadStore {
    state: Mutex<LeadState>,
}

impl Default for LeadStore {
    fn default() -> Self {
        Self::new()
    }
}

impl LeadStore {
    pub fn new() -> Self {
        Self {
            state: Mutex::new(LeadState::default()),
        }
    }

    /// Store one field. Storing `role` additionally runs persona detection
    /// over the value as a side effect.
    pub fn store_field(&self, field: &str, value: &str, classifier: &PersonaClassifier) {
        let mut state = self.state.lock().unwrap_or_else(|e| e.into_inner());

        if LIST_FIELDS.contains(&field) {
            let entry = state
                .fields
                .entry(field.to_string())
                .or_insert_with(|| serde_json::Value::Array(Vec::new()));
            if !entry.is_array() {
                // a scalar slipped in earlier under a list field name
                *entry = serde_json::Value::Array(Vec::new());
            }
            if let serde_json::Value::Array(list) = entry {
                for token in split_list_value(value) {
                    let token = serde_json::Value::String(token);
                    if !list.contains(&token) {
                        list.push(token);
                    }
                }
            }
        } else {
            state
                .fields
                .insert(field.to_string(), serde_json::Value::String(value.to_string()));
        }

        if field == "role" {
            if let Some(persona) = classifier.classify(value) {
                state.detected_persona = Some(persona.to_string());
                state.fields.insert(
                    "detected_persona".into(),
                    serde_json::Value::String(persona.to_string()),
                );
            }
        }
        debug!(field, "lead field stored");
    }

    /// True iff all seven required fields are present and non-empty.
    pub fn is_complete(&self) -> bool {
        let state = self.state.lock().unwrap_or_else(|e| e.into_inner());
        REQUIRED_FIELDS.iter().all(|f| {
            state
                .fields
                .get(*f)
                .and_then(|v| v.as_str())
                .is_some_and(|s| !s.trim().is_empty())
        })
    }

    /// Scalar field value, if stored.
    pub fn get(&self, field: &str) -> Option<String> {
        let state = self.state.lock().unwrap_or_else(|e| e.into_inner());
        state
            .fields
            .get(field)
            .and_then(|v| v.as_str())
            .map(str::to_string)
    }

    /// List field entries, if any.
    pub fn get_list(&self, field: &str) -> Vec<String> {
        let state = self.state.lock().unwrap_or_else(|e| e.into_inner());
        state
            .fields
            .get(field)
            .and_then(|v| v.as_array())
            .map(|a| {
                a.iter()
                    .filter_map(|v| v.as_str())
                    .map(str::to_string)
                    .collect()
            })
            .unwrap_or_default()
    }

    /// Record a classified persona directly (the `detect_persona` tool),
    /// mirroring it into the lead map like the `role` side effect does.
    pub fn set_detected_persona(&self, persona: &str) {
        let mut state = self.state.lock().unwrap_or_else(|e| e.into_inner());
        state.detected_persona = Some(persona.to_string());
        state.fields.insert(
            "detected_persona".into(),
            serde_json::Value::String(persona.to_string()),
        );
    }

    pub fn detected_persona(&self) -> Option<String> {
        let state = self.state.lock().unwrap_or_else(|e| e.into_inner());
        state.detected_persona.clone()
    }

    pub fn record_turn(&self, speaker: &str, text: &str) {
        let mut state = self.state.lock().unwrap_or_else(|e| e.into_inner());
        state.transcript.push(TranscriptTurn {
            speaker: speaker.to_string(),
            text: text.to_string(),
            timestamp: Utc::now(),
        });
    }

    /// Attach a confirmed booking. The first booking wins; there is no
    /// cancellation path, so later calls are ignored.
    pub fn attach_booking(&self, meeting: BookedMeeting) {
        let mut state = self.state.lock().unwrap_or_else(|e| e.into_inner());
        if state.booked_meeting.is_none() {
            state.booked_meeting = Some(meeting);
        }
    }

    pub fn booked_meeting(&self) -> Option<BookedMeeting> {
        let state = self.state.lock().unwrap_or_else(|e| e.into_inner());
        state.booked_meeting.clone()
    }

    /// Write a timestamped snapshot file `<prefix>_<YYYYmmdd_HHMMSS>.json`.
    ///
    /// Filenames are second-resolution, so two saves in the same second
    /// collide and the later one wins. Returns the path on a successful
    /// write; a failed write is logged and yields `None`.
    pub fn snapshot(&self, dir: &Path, prefix: &str) -> Option<PathBuf> {
        let now = Utc::now();
        let snapshot = {
            let state = self.state.lock().unwrap_or_else(|e| e.into_inner());
            let mut lead = state.fields.clone();
            if let Some(meeting) = &state.booked_meeting {
                if let Ok(value) = serde_json::to_value(meeting) {
                    lead.insert("booked_meeting".into(), value);
                }
            }
            LeadSnapshot {
                timestamp: now,
                lead,
                transcript: state.transcript.clone(),
                detected_persona: state.detected_persona.clone(),
            }
        };
        let path = dir.join(format!("{prefix}_{}.json", now.format("%Y%m%d_%H%M%S")));
        persist_best_effort(&path, &snapshot).then(|| {
            debug!(path = %path.display(), "lead snapshot written");
            path.clone()
        })
    }
}

/// Split a free-form value on the literal `" and "` plus commas, trimming
/// tokens and dropping empties.
fn split_list_value(value: &str) -> Vec<String> {
    value
        .replace(" and ", ",")
        .split(',')
        .map(str::trim)
        .filter(|t| !t.is_empty())
        .map(str::to_string)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn store() -> (LeadStore, PersonaClassifier) {
        (LeadStore::new(), PersonaClassifier::seeded())
    }

    #[test]
    fn test_list_field_dedup_preserves_order() {
        let (lead, classifier) = store();
        lead.store_field("pain_points", "slow checkout, poor docs", &classifier);
        lead.store_field("pain_points", "slow checkout and mobile support", &classifier);
        assert_eq!(
            lead.get_list("pain_points"),
            vec!["slow checkout", "poor docs", "mobile support"]
        );
    }

    #[test]
    fn test_list_dedup_is_case_sensitive() {
        let (lead, classifier) = store();
        lead.store_field("key_interests", "Pricing", &classifier);
        lead.store_field("key_interests", "pricing", &classifier);
        assert_eq!(lead.get_list("key_interests"), vec!["Pricing", "pricing"]);
    }

    #[test]
    fn test_scalar_fields_are_last_write_wins() {
        let (lead, classifier) = store();
        lead.store_field("company", "Acme Corp, the big one", &classifier);
        lead.store_field("company", "Acme", &classifier);
        assert_eq!(lead.get("company").as_deref(), Some("Acme"));
    }

    #[test]
    fn test_scalar_store_is_idempotent() {
        let (lead, classifier) = store();
        lead.store_field("timeline", "next quarter", &classifier);
        lead.store_field("timeline", "next quarter", &classifier);
        assert_eq!(lead.get("timeline").as_deref(), Some("next quarter"));
    }

    #[test]
    fn test_role_triggers_persona_detection() {
        let (lead, classifier) = store();
        lead.store_field("role", "VP of Engineering", &classifier);
        assert_eq!(lead.detected_persona().as_deref(), Some("engineering_leader"));
        assert_eq!(
            lead.get("detected_persona").as_deref(),
            Some("engineering_leader")
        );
    }

    #[test]
    fn test_unclassifiable_role_leaves_persona_unset() {
        let (lead, classifier) = store();
        lead.store_field("role", "chief vibes officer", &classifier);
        assert_eq!(lead.detected_persona(), None);
        assert_eq!(lead.get("detected_persona"), None);
    }

    #[test]
    fn test_completeness_requires_all_seven_fields() {
        let (lead, classifier) = store();
        for field in ["name", "email", "company", "role", "team_size", "timeline"] {
            lead.store_field(field, "x", &classifier);
        }
        assert!(!lead.is_complete());
        lead.store_field("use_case", "outbound automation", &classifier);
        assert!(lead.is_complete());
    }

    #[test]
    fn test_empty_value_does_not_count_toward_completeness() {
        let (lead, classifier) = store();
        for field in REQUIRED_FIELDS {
            lead.store_field(field, "x", &classifier);
        }
        lead.store_field("email", "   ", &classifier);
        assert!(!lead.is_complete());
    }

    #[test]
    fn test_snapshot_writes_timestamped_file() {
        let (lead, classifier) = store();
        let dir = tempfile::tempdir().unwrap();
        lead.store_field("name", "Ada", &classifier);
        lead.record_turn("user", "hello");

        let path = lead.snapshot(dir.path(), "lead").unwrap();
        let raw = std::fs::read_to_string(&path).unwrap();
        let snapshot: LeadSnapshot = serde_json::from_str(&raw).unwrap();
        assert_eq!(snapshot.lead.get("name").unwrap(), "Ada");
        assert_eq!(snapshot.transcript.len(), 1);
        assert!(
            path.file_name()
                .unwrap()
                .to_string_lossy()
                .starts_with("lead_")
        );
    }

    #[test]
    fn test_same_second_snapshots_collide() {
        // Filenames are second-resolution; two saves in the same second
        // produce the same path and the later write wins.
        let (lead, classifier) = store();
        let dir = tempfile::tempdir().unwrap();
        lead.store_field("name", "Ada", &classifier);
        let first = lead.snapshot(dir.path(), "lead").unwrap();
        lead.store_field("name", "Grace", &classifier);
        let second = lead.snapshot(dir.path(), "lead").unwrap();
        if first == second {
            let snapshot: LeadSnapshot =
                serde_json::from_str(&std::fs::read_to_string(&second).unwrap()).unwrap();
            assert_eq!(snapshot.lead.get("name").unwrap(), "Grace");
        }
    }

    #[test]
    fn test_first_booking_wins() {
        let (lead, _) = store();
        let meeting = |id: &str| BookedMeeting {
            id: id.into(),
            slot_id: "slot-1".into(),
            date: "2026-09-01".into(),
            time: "10:00".into(),
            duration_minutes: 30,
            meeting_type: "demo".into(),
            lead_name: "Ada".into(),
            lead_email: "ada@example.com".into(),
            lead_company: "Analytical Engines".into(),
            booked_at: Utc::now(),
        };
        lead.attach_booking(meeting("first"));
        lead.attach_booking(meeting("second"));
        assert_eq!(lead.booked_meeting().unwrap().id, "first");
    }
}
