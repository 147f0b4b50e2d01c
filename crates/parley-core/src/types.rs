use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A catalog product. The catalog is seeded at startup and read-only
/// afterwards; orders snapshot the fields they need rather than keeping a
/// live reference.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Product {
    pub id: String,
    pub name: String,
    pub description: String,
    pub price: f64,
    pub currency: String,
    pub category: String,
    pub color: String,
    #[serde(default)]
    pub sizes: Vec<String>,
}

/// A requested order line, as supplied by the caller.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LineItem {
    pub product_id: String,
    #[serde(default = "default_quantity")]
    pub quantity: u32,
    #[serde(default)]
    pub attributes: BTreeMap<String, serde_json::Value>,
}

fn default_quantity() -> u32 {
    1
}

/// A resolved, priced order line. Snapshots name and unit price at creation
/// time so later catalog changes cannot alter an existing order.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OrderItem {
    pub product_id: String,
    pub name: String,
    pub unit_price: f64,
    pub quantity: u32,
    pub line_total: f64,
    #[serde(default)]
    pub attributes: BTreeMap<String, serde_json::Value>,
}

/// An order. Immutable once created; the ledger is append-only.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Order {
    pub id: String,
    pub items: Vec<OrderItem>,
    pub total: f64,
    pub currency: String,
    pub created_at: DateTime<Utc>,
    #[serde(default)]
    pub metadata: BTreeMap<String, serde_json::Value>,
}

/// A bookable meeting slot in the mock calendar.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MeetingSlot {
    pub id: String,
    pub date: String,
    pub time: String,
    pub duration_minutes: u32,
    pub meeting_type: String,
    pub available: bool,
}

/// A confirmed booking. Copies the slot fields and the lead identity at
/// booking time; there is no cancellation path.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BookedMeeting {
    pub id: String,
    pub slot_id: String,
    pub date: String,
    pub time: String,
    pub duration_minutes: u32,
    pub meeting_type: String,
    pub lead_name: String,
    pub lead_email: String,
    pub lead_company: String,
    pub booked_at: DateTime<Utc>,
}

/// One completed wellness check-in, as appended to the history log.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WellnessEntry {
    pub timestamp: DateTime<Utc>,
    pub mood: String,
    pub energy: String,
    pub stress: String,
    pub goals: Vec<String>,
    pub summary: String,
}

/// A point-in-time export of a lead record, written to its own timestamped
/// file on save.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LeadSnapshot {
    pub timestamp: DateTime<Utc>,
    pub lead: BTreeMap<String, serde_json::Value>,
    pub transcript: Vec<TranscriptTurn>,
    pub detected_persona: Option<String>,
}

/// One conversational turn recorded against a lead.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TranscriptTurn {
    pub speaker: String,
    pub text: String,
    pub timestamp: DateTime<Utc>,
}
