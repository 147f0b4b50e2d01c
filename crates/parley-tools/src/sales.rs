//! Sales (SDR) persona handlers.

use tracing::debug;

use crate::{ToolContext, ToolOutput};

pub(crate) fn store_lead_info(ctx: &ToolContext, field: &str, value: &str) -> ToolOutput {
    if field.trim().is_empty() {
        return ToolOutput::text("Which detail should I note that under?");
    }
    ctx.lead.store_field(field, value, &ctx.classifier);

    // a complete record gets its own timestamped save; later stores produce
    // further snapshots rather than updating a canonical file
    if ctx.lead.is_complete() {
        ctx.lead.snapshot(&ctx.config.leads_dir(), "lead");
    }
    ToolOutput::text(format!("Got it — I've noted your {field}."))
}

pub(crate) fn detect_persona(ctx: &ToolContext, text: &str) -> ToolOutput {
    match ctx.classifier.classify(text) {
        Some(persona) => {
            ctx.lead.set_detected_persona(persona);
            ToolOutput::text(format!(
                "That helps — sounds like I'm talking with someone on the {} side.",
                persona.replace('_', " ")
            ))
        }
        // zero keyword hits: record nothing
        None => ToolOutput::text("Thanks for the context — tell me a bit more about your role."),
    }
}

pub(crate) fn search_faq(ctx: &ToolContext, query: &str) -> ToolOutput {
    ToolOutput::text(ctx.faq.search(query, &ctx.catalog))
}

pub(crate) fn show_available_meetings(ctx: &ToolContext, meeting_type: &str) -> ToolOutput {
    let slots = ctx.calendar.available(meeting_type);
    if slots.is_empty() {
        let label = if meeting_type.is_empty() { "meeting" } else { meeting_type };
        return ToolOutput::text(format!("I don't have any open {label} slots right now."));
    }
    let mut lines = vec!["Here's what I have open:".to_string()];
    for (i, slot) in slots.iter().enumerate() {
        lines.push(format!(
            "{}. {} at {} ({} min {})",
            i + 1,
            slot.date,
            slot.time,
            slot.duration_minutes,
            slot.meeting_type
        ));
    }
    lines.push("Which one works for you?".into());
    ToolOutput::text(lines.join("\n"))
}

pub(crate) fn book_meeting(ctx: &ToolContext, choice: &str, meeting_type: &str) -> ToolOutput {
    // missing prerequisite surfaces as a conversational ask, not a failure
    let Some(email) = ctx.lead.get("email").filter(|e| !e.trim().is_empty()) else {
        return ToolOutput::text(
            "Before I book that, could you share your email address so I can send the invite?",
        );
    };
    let name = ctx.lead.get("name").unwrap_or_default();
    let company = ctx.lead.get("company").unwrap_or_default();

    match ctx.calendar.book(choice, meeting_type, &name, &email, &company) {
        Some(meeting) => {
            ctx.lead.attach_booking(meeting.clone());
            debug!(meeting_id = %meeting.id, "lead booking attached");
            ToolOutput::text(format!(
                "You're booked: {} on {} at {} ({} min). The invite is on its way to {}.",
                meeting.meeting_type, meeting.date, meeting.time, meeting.duration_minutes, email
            ))
        }
        None => ToolOutput::text(
            "I couldn't book that slot — it may have just been taken. Want me to list what's still open?",
        ),
    }
}

pub(crate) fn end_conversation(ctx: &ToolContext) -> ToolOutput {
    ctx.lead.snapshot(&ctx.config.leads_dir(), "complete_lead");
    ToolOutput::text("Thanks for your time today — I've saved your details. Have a great day!")
}
