//! Event classification: one event at a time, title → category,
//! attendee count → intensity, both → energy cost.
//!
//! Classification priority is carried by the rule set's explicit priority
//! field (presentation before meeting, etc.), so a title matching both
//! "presentation" and "meeting" keywords always lands on presentation.

use crate::rules::RuleSet;
use crate::types::{
    CalendarEvent, ClassifiedEvent, EnergyLevel, EventCategory, MeetingIntensity,
};
use crate::util::duration_minutes;

/// Per-event energy scores for daily drain prediction.
const DRAIN_HIGH: f64 = 25.0;
const DRAIN_MEDIUM: f64 = 15.0;
const DRAIN_LOW: f64 = 5.0;
const DRAIN_RECOVERY: f64 = -10.0;

/// Hours of a single event that count toward drain.
const DRAIN_HOURS_CAP: f64 = 2.0;

/// Largest gap (minutes) that still chains two meetings into a run.
const MAX_RUN_GAP_MINUTES: i64 = 30;

/// Runs shorter than this are not flagged.
const MIN_CONSECUTIVE_RUN: usize = 3;

/// Longest back-to-back meeting run found in a day.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ConsecutiveRun {
    pub longest_run: usize,
    pub has_consecutive: bool,
}

/// Match a title against the keyword rules, first priority match wins.
/// Total: every title maps to exactly one category (`Other` on no match).
pub fn classify_title(title: &str, rules: &RuleSet) -> EventCategory {
    let lower = title.to_lowercase();
    for rule in rules.keyword_rules_by_priority() {
        if rule.keywords.iter().any(|k| lower.contains(k.as_str())) {
            return rule.category;
        }
    }
    EventCategory::Other
}

/// Bucket a meeting by attendee count.
pub fn classify_attendees(count: u32) -> MeetingIntensity {
    match count {
        0 | 1 => MeetingIntensity::Solo,
        2 => MeetingIntensity::OneOnOne,
        3..=5 => MeetingIntensity::Small,
        6..=10 => MeetingIntensity::Medium,
        _ => MeetingIntensity::Large,
    }
}

fn base_energy(category: EventCategory) -> EnergyLevel {
    match category {
        EventCategory::Presentation => EnergyLevel::High,
        EventCategory::Meeting | EventCategory::Focus | EventCategory::OneOnOne => {
            EnergyLevel::Medium
        }
        EventCategory::Meal | EventCategory::Personal | EventCategory::Other => EnergyLevel::Low,
        EventCategory::Health | EventCategory::Break => EnergyLevel::Recovery,
    }
}

/// Classify one event: category from the title, intensity from attendees,
/// energy from the category table. Medium/large meeting-like events are
/// upgraded to high energy.
pub fn classify_event(event: &CalendarEvent, rules: &RuleSet) -> ClassifiedEvent {
    let category = classify_title(&event.title, rules);
    let intensity = if category.is_meeting_like() {
        Some(classify_attendees(event.attendee_count))
    } else {
        None
    };

    let mut energy = base_energy(category);
    if category.is_meeting_like()
        && matches!(
            intensity,
            Some(MeetingIntensity::Medium) | Some(MeetingIntensity::Large)
        )
    {
        energy = EnergyLevel::High;
    }

    ClassifiedEvent {
        event: event.clone(),
        category,
        energy,
        intensity,
    }
}

/// Predicted energy drain for a day's events, 0–100.
///
/// Each event contributes its energy score scaled by duration (capped at
/// two hours); recovery events earn energy back.
pub fn predict_daily_energy_drain(events: &[ClassifiedEvent]) -> u32 {
    let total: f64 = events
        .iter()
        .map(|classified| {
            let score = match classified.energy {
                EnergyLevel::High => DRAIN_HIGH,
                EnergyLevel::Medium => DRAIN_MEDIUM,
                EnergyLevel::Low => DRAIN_LOW,
                EnergyLevel::Recovery => DRAIN_RECOVERY,
            };
            let hours =
                (duration_minutes(classified.event.start, classified.event.end) as f64 / 60.0)
                    .min(DRAIN_HOURS_CAP);
            score * hours
        })
        .sum();

    total.clamp(0.0, 100.0).round() as u32
}

/// Find the longest run of meeting-like events where every gap between one
/// meeting's end and the next's start is ≤30 minutes. Flagged only at ≥3.
pub fn detect_consecutive_meetings(events: &[ClassifiedEvent]) -> ConsecutiveRun {
    let mut meetings: Vec<&ClassifiedEvent> = events
        .iter()
        .filter(|c| c.category.is_meeting_like())
        .collect();
    meetings.sort_by_key(|c| c.event.start);

    let mut longest: usize = if meetings.is_empty() { 0 } else { 1 };
    let mut run: usize = longest;

    for pair in meetings.windows(2) {
        let gap = pair[1]
            .event
            .start
            .signed_duration_since(pair[0].event.end)
            .num_minutes();
        if gap <= MAX_RUN_GAP_MINUTES {
            run += 1;
        } else {
            run = 1;
        }
        longest = longest.max(run);
    }

    ConsecutiveRun {
        longest_run: longest,
        has_consecutive: longest >= MIN_CONSECUTIVE_RUN,
    }
}

// =============================================================================
// Tests
// =============================================================================
