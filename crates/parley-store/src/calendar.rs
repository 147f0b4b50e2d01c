//! Mock calendar: available slots and booked meetings, mirrored to
//! `mock_calendar.json`.

use std::path::PathBuf;
use std::sync::Mutex;

use chrono::Utc;
use serde::{Deserialize, Serialize};
use tracing::debug;
use uuid::Uuid;

use parley_core::types::{BookedMeeting, MeetingSlot};

use crate::persist_best_effort;

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
struct CalendarFile {
    #[serde(default)]
    available_slots: Vec<MeetingSlot>,
    #[serde(default)]
    booked_meetings: Vec<BookedMeeting>,
}

/// Meeting slot store. Booking flips a slot's availability flag for the
/// rest of the process lifetime and appends to the booked list; there is no
/// cancellation operation.
pub struct Calendar {
    state: Mutex<CalendarFile>,
    path: PathBuf,
}

impl Calendar {
    /// Open the calendar file, seeding default slots when it is missing,
    /// corrupt, or empty.
    pub fn open(path: PathBuf) -> Self {
        let mut state: CalendarFile = std::fs::read_to_string(&path)
            .ok()
            .and_then(|s| serde_json::from_str(&s).ok())
            .unwrap_or_default();
        if state.available_slots.is_empty() && state.booked_meetings.is_empty() {
            state.available_slots = seed_slots();
        }
        Self {
            state: Mutex::new(state),
            path,
        }
    }

    /// Currently available slots of the given type. An empty type matches
    /// every slot.
    pub fn available(&self, meeting_type: &str) -> Vec<MeetingSlot> {
        let state = self.state.lock().unwrap_or_else(|e| e.into_inner());
        state
            .available_slots
            .iter()
            .filter(|s| s.available)
            .filter(|s| meeting_type.is_empty() || s.meeting_type == meeting_type)
            .cloned()
            .collect()
    }

    /// Book a slot for a lead. `choice` is either a 1-based position in the
    /// currently available list of `meeting_type`, or a slot id. Returns
    /// `None` when the choice resolves to nothing bookable (including a slot
    /// that was already booked).
    pub fn book(
        &self,
        choice: &str,
        meeting_type: &str,
        lead_name: &str,
        lead_email: &str,
        lead_company: &str,
    ) -> Option<BookedMeeting> {
        let slot_id = {
            let open = self.available(meeting_type);
            let by_index = choice
                .trim()
                .parse::<usize>()
                .ok()
                .filter(|n| *n >= 1)
                .and_then(|n| open.get(n - 1));
            let slot = by_index.or_else(|| open.iter().find(|s| s.id == choice.trim()))?;
            slot.id.clone()
        };

        let mut state = self.state.lock().unwrap_or_else(|e| e.into_inner());
        let slot = state
            .available_slots
            .iter_mut()
            .find(|s| s.id == slot_id && s.available)?;
        slot.available = false;
        let slot = slot.clone();

        let meeting = BookedMeeting {
            id: Uuid::new_v4().to_string(),
            slot_id: slot.id,
            date: slot.date,
            time: slot.time,
            duration_minutes: slot.duration_minutes,
            meeting_type: slot.meeting_type,
            lead_name: lead_name.to_string(),
            lead_email: lead_email.to_string(),
            lead_company: lead_company.to_string(),
            booked_at: Utc::now(),
        };
        state.booked_meetings.push(meeting.clone());
        persist_best_effort(&self.path, &*state);
        debug!(meeting_id = %meeting.id, slot_id = %meeting.slot_id, "meeting booked");
        Some(meeting)
    }

    pub fn booked(&self) -> Vec<BookedMeeting> {
        let state = self.state.lock().unwrap_or_else(|e| e.into_inner());
        state.booked_meetings.clone()
    }
}

fn seed_slots() -> Vec<MeetingSlot> {
    let slot = |id: &str, date: &str, time: &str, duration_minutes: u32, meeting_type: &str| {
        MeetingSlot {
            id: id.into(),
            date: date.into(),
            time: time.into(),
            duration_minutes,
            meeting_type: meeting_type.into(),
            available: true,
        }
    };
    vec![
        slot("slot-001", "2026-09-01", "10:00", 30, "demo"),
        slot("slot-002", "2026-09-01", "15:30", 30, "demo"),
        slot("slot-003", "2026-09-02", "11:00", 45, "demo"),
        slot("slot-004", "2026-09-02", "14:00", 30, "discovery"),
        slot("slot-005", "2026-09-03", "09:30", 30, "discovery"),
    ]
}
