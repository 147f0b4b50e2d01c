//! Stateful stores backing the Parley tool surface.
//!
//! Each store owns its data behind a mutex and is shared via `Arc` so tool
//! handlers never touch ambient global state. Persistence is synchronous,
//! best-effort JSON: a failed write is logged and the in-memory state stays
//! authoritative for the rest of the session.

pub mod calendar;
pub mod catalog;
pub mod faq;
pub mod leads;
pub mod ledger;
pub mod persona;
pub mod wellness;

pub use calendar::Calendar;
pub use catalog::{Catalog, ProductFilters};
pub use faq::Faq;
pub use leads::LeadStore;
pub use ledger::OrderLedger;
pub use persona::PersonaClassifier;
pub use wellness::{CheckinOutcome, CheckinState, WellnessLog};

use std::path::Path;

use tracing::warn;

/// Serialize `value` as pretty JSON and write it atomically (temp file +
/// rename). Used by every store that rewrites a whole file.
pub(crate) fn write_json_atomic<T: serde::Serialize>(
    path: &Path,
    value: &T,
) -> anyhow::Result<()> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    let json = serde_json::to_string_pretty(value)?;
    let tmp = path.with_extension("json.tmp");
    std::fs::write(&tmp, json.as_bytes())?;
    std::fs::rename(&tmp, path)?;
    Ok(())
}

/// Best-effort variant: a failure is logged and swallowed so a disk problem
/// never fails the conversational call.
pub(crate) fn persist_best_effort<T: serde::Serialize>(path: &Path, value: &T) -> bool {
    match write_json_atomic(path, value) {
        Ok(()) => true,
        Err(e) => {
            warn!(path = %path.display(), error = %e, "persistence failed; keeping in-memory state");
            false
        }
    }
}
