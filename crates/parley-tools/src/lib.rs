//! The Parley tool-call surface.
//!
//! The external voice/LLM runtime decides which tool to invoke each turn;
//! this crate models that surface as a closed set of tagged commands
//! ([`ToolCall`]) plus a dispatcher, so the whole conversation state machine
//! is testable without a live LLM. Every handler returns a short
//! natural-language acknowledgment that the runtime relays verbatim.

mod commerce;
mod sales;
mod wellness;

pub mod schema;

use std::collections::BTreeMap;
use std::sync::Arc;

use serde::Deserialize;
use tracing::debug;

use parley_core::config::Config;
use parley_core::types::LineItem;
use parley_store::{
    Calendar, Catalog, CheckinState, Faq, LeadStore, OrderLedger, PersonaClassifier, ProductFilters,
    WellnessLog,
};

/// Shared store handles injected into every tool handler. One context per
/// session; the stores own their synchronization.
pub struct ToolContext {
    pub config: Arc<Config>,
    pub catalog: Arc<Catalog>,
    pub ledger: Arc<OrderLedger>,
    pub lead: Arc<LeadStore>,
    pub classifier: Arc<PersonaClassifier>,
    pub calendar: Arc<Calendar>,
    pub faq: Arc<Faq>,
    pub wellness_log: Arc<WellnessLog>,
    pub checkin: Arc<CheckinState>,
}

impl ToolContext {
    /// Build a session context with the seeded stores, persisting under the
    /// config's data dir.
    pub fn from_config(config: Arc<Config>) -> Self {
        Self {
            catalog: Arc::new(Catalog::seeded()),
            ledger: Arc::new(OrderLedger::open(config.orders_file())),
            lead: Arc::new(LeadStore::new()),
            classifier: Arc::new(PersonaClassifier::seeded()),
            calendar: Arc::new(Calendar::open(config.calendar_file())),
            faq: Arc::new(Faq::seeded()),
            wellness_log: Arc::new(WellnessLog::new(config.wellness_log_file())),
            checkin: Arc::new(CheckinState::new()),
            config,
        }
    }
}

/// Output of a tool execution. `content` is relayed to the user as
/// conversational text.
#[derive(Debug, Clone)]
pub struct ToolOutput {
    pub content: String,
    pub is_error: bool,
}

impl ToolOutput {
    pub fn text(content: impl Into<String>) -> Self {
        Self {
            content: content.into(),
            is_error: false,
        }
    }

    pub fn error(content: impl Into<String>) -> Self {
        Self {
            content: content.into(),
            is_error: true,
        }
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct CreateOrderParams {
    #[serde(default)]
    pub line_items: Vec<LineItem>,
    #[serde(default)]
    pub metadata: BTreeMap<String, serde_json::Value>,
}

/// The closed set of tool commands the external runtime may dispatch.
#[derive(Debug, Clone)]
pub enum ToolCall {
    // wellness persona
    SetMood { mood: String },
    SetEnergy { energy: String },
    SetStress { stress: String },
    SetGoals { goals: Vec<String> },
    CompleteCheckin,
    // sales persona
    StoreLeadInfo { field: String, value: String },
    DetectPersona { text: String },
    SearchFaq { query: String },
    ShowAvailableMeetings { meeting_type: String },
    BookMeeting { choice: String, meeting_type: String },
    EndConversation,
    // merchant
    ListProducts { filters: ProductFilters },
    CreateOrder(CreateOrderParams),
    GetLastOrder,
}

impl ToolCall {
    /// Parse a named tool invocation with JSON arguments, as delivered by
    /// the LLM runtime. `arguments` may be null when the tool takes none.
    pub fn parse(name: &str, arguments: serde_json::Value) -> anyhow::Result<Self> {
        let args = if arguments.is_null() {
            serde_json::json!({})
        } else {
            arguments
        };

        fn field<T: serde::de::DeserializeOwned + Default>(
            args: &serde_json::Value,
            key: &str,
        ) -> anyhow::Result<T> {
            match args.get(key) {
                Some(v) => Ok(serde_json::from_value(v.clone())?),
                None => Ok(T::default()),
            }
        }

        let call = match name {
            "set_mood" => Self::SetMood {
                mood: field(&args, "mood")?,
            },
            "set_energy" => Self::SetEnergy {
                energy: field(&args, "energy")?,
            },
            "set_stress" => Self::SetStress {
                stress: field(&args, "stress")?,
            },
            "set_goals" => Self::SetGoals {
                goals: field(&args, "goals")?,
            },
            "complete_checkin" => Self::CompleteCheckin,
            "store_lead_info" => Self::StoreLeadInfo {
                field: field(&args, "field")?,
                value: field(&args, "value")?,
            },
            "detect_persona" => Self::DetectPersona {
                text: field(&args, "text")?,
            },
            "search_faq" => Self::SearchFaq {
                query: field(&args, "query")?,
            },
            "show_available_meetings" => Self::ShowAvailableMeetings {
                meeting_type: field(&args, "meeting_type")?,
            },
            "book_meeting" => Self::BookMeeting {
                choice: field(&args, "choice")?,
                meeting_type: field(&args, "meeting_type")?,
            },
            "end_conversation" => Self::EndConversation,
            "list_products" => Self::ListProducts {
                filters: serde_json::from_value(args)?,
            },
            "create_order" => Self::CreateOrder(serde_json::from_value(args)?),
            "get_last_order" => Self::GetLastOrder,
            other => anyhow::bail!("unknown tool: {other}"),
        };
        Ok(call)
    }

    pub fn name(&self) -> &'static str {
        match self {
            Self::SetMood { .. } => "set_mood",
            Self::SetEnergy { .. } => "set_energy",
            Self::SetStress { .. } => "set_stress",
            Self::SetGoals { .. } => "set_goals",
            Self::CompleteCheckin => "complete_checkin",
            Self::StoreLeadInfo { .. } => "store_lead_info",
            Self::DetectPersona { .. } => "detect_persona",
            Self::SearchFaq { .. } => "search_faq",
            Self::ShowAvailableMeetings { .. } => "show_available_meetings",
            Self::BookMeeting { .. } => "book_meeting",
            Self::EndConversation => "end_conversation",
            Self::ListProducts { .. } => "list_products",
            Self::CreateOrder(_) => "create_order",
            Self::GetLastOrder => "get_last_order",
        }
    }

    /// Run the command against the session's stores.
    ///
    /// File I/O inside handlers is synchronous and best-effort; no handler
    /// fails the conversation over a disk problem.
    pub async fn dispatch(self, ctx: &ToolContext) -> ToolOutput {
        debug!(tool = self.name(), "dispatching tool call");
        match self {
            Self::SetMood { mood } => wellness::set_mood(ctx, &mood),
            Self::SetEnergy { energy } => wellness::set_energy(ctx, &energy),
            Self::SetStress { stress } => wellness::set_stress(ctx, &stress),
            Self::SetGoals { goals } => wellness::set_goals(ctx, &goals),
            Self::CompleteCheckin => wellness::complete_checkin(ctx),
            Self::StoreLeadInfo { field, value } => sales::store_lead_info(ctx, &field, &value),
            Self::DetectPersona { text } => sales::detect_persona(ctx, &text),
            Self::SearchFaq { query } => sales::search_faq(ctx, &query),
            Self::ShowAvailableMeetings { meeting_type } => {
                sales::show_available_meetings(ctx, &meeting_type)
            }
            Self::BookMeeting {
                choice,
                meeting_type,
            } => sales::book_meeting(ctx, &choice, &meeting_type),
            Self::EndConversation => sales::end_conversation(ctx),
            Self::ListProducts { filters } => commerce::list_products(ctx, &filters),
            Self::CreateOrder(params) => commerce::create_order(ctx, params),
            Self::GetLastOrder => commerce::get_last_order(ctx),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn context() -> (tempfile::TempDir, ToolContext) {
        let dir = tempfile::tempdir().unwrap();
        let config = Config {
            data_dir: Some(dir.path().to_string_lossy().into_owned()),
            ..Default::default()
        };
        let ctx = ToolContext::from_config(Arc::new(config));
        (dir, ctx)
    }

    #[tokio::test]
    async fn test_wellness_flow_end_to_end() {
        let (_dir, ctx) = context();
        ToolCall::parse("set_mood", json!({"mood": "sad"}))
            .unwrap()
            .dispatch(&ctx)
            .await;
        ToolCall::parse("set_energy", json!({"energy": "low"}))
            .unwrap()
            .dispatch(&ctx)
            .await;
        ToolCall::parse("set_stress", json!({"stress": ""}))
            .unwrap()
            .dispatch(&ctx)
            .await;
        ToolCall::parse("set_goals", json!({"goals": ["sleep more"]}))
            .unwrap()
            .dispatch(&ctx)
            .await;

        let out = ToolCall::parse("complete_checkin", json!(null))
            .unwrap()
            .dispatch(&ctx)
            .await;
        assert!(!out.is_error);
        assert!(out.content.contains(
            "Mood: sad. Energy: low. Stress: No stress reported. Goals: sleep more."
        ));
        assert!(out.content.contains("“sleep more”"));
        assert_eq!(ctx.wellness_log.load_history().len(), 1);
    }

    #[tokio::test]
    async fn test_create_order_example_totals() {
        let (_dir, ctx) = context();
        let out = ToolCall::parse(
            "create_order",
            json!({"line_items": [{"product_id": "mug-001", "quantity": 2}]}),
        )
        .unwrap()
        .dispatch(&ctx)
        .await;
        assert!(!out.is_error);
        assert!(out.content.contains("1600"));
        assert!(out.content.contains("INR"));

        let order = ctx.ledger.last_order().unwrap();
        assert_eq!(order.total, 1600.0);
        assert_eq!(order.currency, "INR");
        assert_eq!(order.items[0].line_total, 1600.0);
    }

    #[tokio::test]
    async fn test_create_order_unknown_product_is_an_error_reply() {
        let (_dir, ctx) = context();
        let out = ToolCall::parse(
            "create_order",
            json!({"line_items": [{"product_id": "ghost-1"}]}),
        )
        .unwrap()
        .dispatch(&ctx)
        .await;
        assert!(out.is_error);
        assert!(out.content.contains("ghost-1"));
        assert!(ctx.ledger.is_empty());
    }

    #[tokio::test]
    async fn test_booking_requires_email_then_succeeds() {
        let (_dir, ctx) = context();
        let blocked = ToolCall::BookMeeting {
            choice: "1".into(),
            meeting_type: "demo".into(),
        }
        .dispatch(&ctx)
        .await;
        assert!(!blocked.is_error);
        assert!(blocked.content.to_lowercase().contains("email"));
        assert!(ctx.lead.booked_meeting().is_none());

        ToolCall::StoreLeadInfo {
            field: "name".into(),
            value: "Ada".into(),
        }
        .dispatch(&ctx)
        .await;
        ToolCall::StoreLeadInfo {
            field: "email".into(),
            value: "ada@example.com".into(),
        }
        .dispatch(&ctx)
        .await;

        let booked = ToolCall::BookMeeting {
            choice: "1".into(),
            meeting_type: "demo".into(),
        }
        .dispatch(&ctx)
        .await;
        assert!(booked.content.contains("booked"));
        assert!(ctx.lead.booked_meeting().is_some());
    }

    #[tokio::test]
    async fn test_booked_slot_disappears_from_listing() {
        let (_dir, ctx) = context();
        ToolCall::StoreLeadInfo {
            field: "email".into(),
            value: "a@example.com".into(),
        }
        .dispatch(&ctx)
        .await;

        let before = ToolCall::ShowAvailableMeetings {
            meeting_type: "demo".into(),
        }
        .dispatch(&ctx)
        .await;
        ToolCall::BookMeeting {
            choice: "slot-001".into(),
            meeting_type: "demo".into(),
        }
        .dispatch(&ctx)
        .await;
        let after = ToolCall::ShowAvailableMeetings {
            meeting_type: "demo".into(),
        }
        .dispatch(&ctx)
        .await;

        assert!(before.content.contains("2026-09-01 at 10:00"));
        assert!(!after.content.contains("2026-09-01 at 10:00"));

        // same slot again falls through to a rejection
        let again = ToolCall::BookMeeting {
            choice: "slot-001".into(),
            meeting_type: "demo".into(),
        }
        .dispatch(&ctx)
        .await;
        assert!(again.content.contains("couldn't"));
    }

    #[tokio::test]
    async fn test_complete_lead_is_snapshotted_on_store_and_end() {
        let (dir, ctx) = context();
        for (field, value) in [
            ("name", "Ada Lovelace"),
            ("email", "ada@example.com"),
            ("company", "Analytical Engines"),
            ("role", "CTO"),
            ("team_size", "40"),
            ("timeline", "this quarter"),
            ("use_case", "outbound automation"),
        ] {
            ToolCall::StoreLeadInfo {
                field: field.into(),
                value: value.into(),
            }
            .dispatch(&ctx)
            .await;
        }
        ToolCall::EndConversation.dispatch(&ctx).await;

        let leads_dir = dir.path().join("leads");
        let names: Vec<String> = std::fs::read_dir(&leads_dir)
            .unwrap()
            .map(|e| e.unwrap().file_name().to_string_lossy().into_owned())
            .collect();
        assert!(names.iter().any(|n| n.starts_with("lead_")));
        assert!(names.iter().any(|n| n.starts_with("complete_lead_")));
        assert_eq!(ctx.lead.detected_persona().as_deref(), Some("engineering_leader"));
    }

    #[tokio::test]
    async fn test_unknown_tool_name_fails_parse() {
        assert!(ToolCall::parse("launch_rocket", json!({})).is_err());
    }
}
