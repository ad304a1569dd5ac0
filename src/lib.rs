//! Schedule DNA: infers a user's temporal work patterns purely from
//! historical calendar-event metadata (no explicit user input) and turns
//! them into calibrated guidance and recommended assistant behaviors for
//! today.
//!
//! The engine is deterministic and rule-based: events are classified into
//! semantic categories, aggregated into a seven-dimension behavioral
//! profile with per-dimension confidence, read against the current day,
//! and mapped to a closed action vocabulary plus natural-language messages.
//! It performs no I/O; a collaborator supplies already-fetched events and
//! persists the resulting profile.

pub mod actions;
pub mod analyzer;
pub mod classify;
pub mod engine;
pub mod error;
pub mod messages;
pub mod rules;
pub mod today;
pub mod types;
pub mod util;

pub use actions::AssistantAction;
pub use engine::DnaEngine;
pub use error::RuleError;
pub use rules::RuleSet;
pub use types::{
    AnalysisOptions, BurnoutWarning, CalendarEvent, DnaProfile, RolloutPhase, SpecialEvent,
    Suggestion, TodayContext,
};
