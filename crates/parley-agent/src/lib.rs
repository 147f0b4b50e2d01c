//! Persona prompt builders.
//!
//! The voice runtime owns the LLM; this crate only assembles the
//! deterministic text it needs: system instructions per persona and the
//! opening greeting (including the recap of the last wellness check-in).

pub mod prompt;

pub use prompt::{
    sales_instructions, wellness_greeting, wellness_instructions, wellness_recap,
};
