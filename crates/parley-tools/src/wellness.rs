//! Wellness persona handlers.

use crate::{ToolContext, ToolOutput};

pub(crate) fn set_mood(ctx: &ToolContext, mood: &str) -> ToolOutput {
    let val = ctx.checkin.set_mood(mood);
    ToolOutput::text(format!("Thanks — I've recorded your mood as: {val}."))
}

pub(crate) fn set_energy(ctx: &ToolContext, energy: &str) -> ToolOutput {
    let val = ctx.checkin.set_energy(energy);
    ToolOutput::text(format!("Okay — energy set to: {val}."))
}

pub(crate) fn set_stress(ctx: &ToolContext, stress: &str) -> ToolOutput {
    let val = ctx.checkin.set_stress(stress);
    ToolOutput::text(format!("Noted — stress: {val}."))
}

pub(crate) fn set_goals(ctx: &ToolContext, goals: &[String]) -> ToolOutput {
    let cleaned = ctx.checkin.set_goals(goals);
    if cleaned.is_empty() {
        ToolOutput::text("No goals recorded.")
    } else {
        ToolOutput::text(format!("Got it — your goals: {}.", cleaned.join(", ")))
    }
}

pub(crate) fn complete_checkin(ctx: &ToolContext) -> ToolOutput {
    let outcome = ctx.checkin.complete(&ctx.wellness_log);
    if outcome.saved {
        ToolOutput::text(format!(
            "Check-in saved. {} Advice: {}",
            outcome.summary, outcome.advice
        ))
    } else {
        // in-memory success; only the disk write failed
        ToolOutput::text(format!(
            "I recorded the check-in in memory, but I couldn't save it to disk. {} Advice: {}",
            outcome.summary, outcome.advice
        ))
    }
}
