//! JSON Schema tool definitions for the LLM API request.

use serde_json::{Value, json};

fn def(name: &str, description: &str, input_schema: Value) -> Value {
    json!({
        "name": name,
        "description": description,
        "input_schema": input_schema,
    })
}

fn string_arg(name: &str, description: &str) -> Value {
    json!({
        "type": "object",
        "properties": {
            name: { "type": "string", "description": description }
        },
        "required": [name]
    })
}

/// Definitions for the wellness persona's tools.
pub fn wellness_definitions() -> Vec<Value> {
    vec![
        def(
            "set_mood",
            "Record the user's mood, in their own words.",
            string_arg("mood", "User mood (in own words)"),
        ),
        def(
            "set_energy",
            "Record the user's energy level.",
            string_arg("energy", "Energy level: low/medium/high or free text"),
        ),
        def(
            "set_stress",
            "Record what is stressing the user, or 'no' if nothing.",
            string_arg("stress", "Stress description or 'no'"),
        ),
        def(
            "set_goals",
            "Record 1-3 small goals for today.",
            json!({
                "type": "object",
                "properties": {
                    "goals": {
                        "type": "array",
                        "items": { "type": "string" },
                        "description": "List of 1-3 small goals"
                    }
                },
                "required": ["goals"]
            }),
        ),
        def(
            "complete_checkin",
            "Finalize the check-in once mood, energy, stress, and goals are collected.",
            json!({ "type": "object", "properties": {} }),
        ),
    ]
}

/// Definitions for the sales persona's tools.
pub fn sales_definitions() -> Vec<Value> {
    vec![
        def(
            "store_lead_info",
            "Store one lead detail (name, email, company, role, team_size, timeline, use_case, pain_points, key_interests).",
            json!({
                "type": "object",
                "properties": {
                    "field": { "type": "string", "description": "Which detail this is" },
                    "value": { "type": "string", "description": "The detail, verbatim" }
                },
                "required": ["field", "value"]
            }),
        ),
        def(
            "detect_persona",
            "Classify the customer archetype from free text about the prospect.",
            string_arg("text", "What the prospect said about themselves"),
        ),
        def(
            "search_faq",
            "Answer a product or policy question from the FAQ.",
            string_arg("query", "The prospect's question"),
        ),
        def(
            "show_available_meetings",
            "List open meeting slots, optionally filtered by type.",
            json!({
                "type": "object",
                "properties": {
                    "meeting_type": { "type": "string", "description": "demo or discovery; empty for all" }
                }
            }),
        ),
        def(
            "book_meeting",
            "Book one of the listed slots for the prospect.",
            json!({
                "type": "object",
                "properties": {
                    "choice": { "type": "string", "description": "Slot number from the list, or a slot id" },
                    "meeting_type": { "type": "string", "description": "demo or discovery" }
                },
                "required": ["choice"]
            }),
        ),
        def(
            "end_conversation",
            "Wrap up: save the lead record and say goodbye.",
            json!({ "type": "object", "properties": {} }),
        ),
        def(
            "list_products",
            "List catalog products matching optional filters.",
            json!({
                "type": "object",
                "properties": {
                    "category": { "type": "string" },
                    "max_price": { "type": "number" },
                    "color": { "type": "string" },
                    "size": { "type": "string" },
                    "text": { "type": "string", "description": "Substring of name or description" }
                }
            }),
        ),
        def(
            "create_order",
            "Place an order for one or more products.",
            json!({
                "type": "object",
                "properties": {
                    "line_items": {
                        "type": "array",
                        "items": {
                            "type": "object",
                            "properties": {
                                "product_id": { "type": "string" },
                                "quantity": { "type": "integer", "minimum": 1 },
                                "attributes": { "type": "object" }
                            },
                            "required": ["product_id"]
                        }
                    },
                    "metadata": { "type": "object" }
                },
                "required": ["line_items"]
            }),
        ),
        def(
            "get_last_order",
            "Recall the most recent order.",
            json!({ "type": "object", "properties": {} }),
        ),
    ]
}

/// Every tool definition, across both personas.
pub fn all_definitions() -> Vec<Value> {
    let mut defs = wellness_definitions();
    defs.extend(sales_definitions());
    defs
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ToolCall;

    #[test]
    fn test_every_definition_parses_as_a_tool() {
        for tool in all_definitions() {
            let name = tool["name"].as_str().unwrap();
            // minimal arguments: empty object; parse must at least know the name
            let parsed = ToolCall::parse(name, serde_json::json!({}));
            assert!(parsed.is_ok(), "definition {name} has no dispatch arm");
        }
    }

    #[test]
    fn test_definitions_carry_schemas() {
        for tool in all_definitions() {
            assert!(tool["description"].as_str().is_some());
            assert_eq!(tool["input_schema"]["type"], "object");
        }
    }
}
