//! Message generation: phase-gated suggestions plus the morning-briefing
//! and evening composers.
//!
//! Claims get more specific as confidence accrues: day one surfaces raw
//! counts only, week one adds chronotype and work style, and from week two
//! the engine talks about energy peaks, focus slots, and slumps.

use chrono::NaiveDate;

use crate::actions::{briefing_tone, greeting, phrase_with_confidence};
use crate::types::{
    BalanceStatus, BusyLevel, ChronotypeKind, DnaProfile, InsightKind, RolloutPhase,
    SlotQuality, StressLevelKind, Suggestion, SuggestionKind, Tone, WorkStyleKind,
};

const PRIORITY_WARNING: u8 = 1;
const PRIORITY_NUDGE: u8 = 2;
const PRIORITY_INFO: u8 = 3;

fn suggestion(
    kind: SuggestionKind,
    message: String,
    sources: &[InsightKind],
    priority: u8,
) -> Suggestion {
    Suggestion {
        kind,
        message,
        sources: sources.to_vec(),
        priority,
        action_label: None,
    }
}

// =============================================================================
// Phase suggestions
// =============================================================================

/// Generate the guidance appropriate to how long the engine has been
/// observing this user.
pub fn generate_suggestions(profile: &DnaProfile, phase: RolloutPhase) -> Vec<Suggestion> {
    let mut out = Vec::new();

    // Day one: counts only, no behavioral claims yet.
    out.push(suggestion(
        SuggestionKind::Briefing,
        format!(
            "I've looked at {} events from your last {} days. The picture sharpens as I see more.",
            profile.analyzed_events_count,
            (profile.range_end - profile.range_start).num_days()
        ),
        &[],
        PRIORITY_INFO,
    ));
    if phase == RolloutPhase::DayOne {
        return out;
    }

    // Week one: chronotype and work style. A neutral chronotype is not a
    // claim worth making.
    let chronotype_claim = match profile.chronotype.kind {
        ChronotypeKind::Morning => Some(format!(
            "your day usually starts around {} — you're a morning person",
            profile.chronotype.first_event_avg_time
        )),
        ChronotypeKind::Evening => Some(format!(
            "your first events sit late, around {} — you ramp up in the evening",
            profile.chronotype.first_event_avg_time
        )),
        ChronotypeKind::Neutral => None,
    };
    if let Some(claim) = chronotype_claim {
        out.push(suggestion(
            SuggestionKind::Nudge,
            phrase_with_confidence(&claim, profile.chronotype.confidence),
            &[InsightKind::Chronotype],
            PRIORITY_NUDGE,
        ));
    }

    let style_claim = match profile.work_style.kind {
        WorkStyleKind::Collaborative => Some(format!(
            "about {}% of your work time is meetings — you work through people",
            profile.work_style.meeting_ratio
        )),
        WorkStyleKind::Independent => Some(format!(
            "only {}% of your work events are meetings — you guard solo time",
            profile.work_style.meeting_ratio
        )),
        WorkStyleKind::Balanced => None,
    };
    if let Some(claim) = style_claim {
        out.push(suggestion(
            SuggestionKind::Nudge,
            phrase_with_confidence(&claim, profile.work_style.confidence),
            &[InsightKind::WorkStyle],
            PRIORITY_NUDGE,
        ));
    }
    if phase == RolloutPhase::WeekOne {
        return out;
    }

    // Week two and beyond: energy peaks, focus slots, slump warnings.
    if let Some(peak) = profile.energy_pattern.peak_hours.first() {
        out.push(suggestion(
            SuggestionKind::Nudge,
            phrase_with_confidence(
                &format!("your schedule clusters around {}:00 — that's your peak", peak),
                profile.energy_pattern.confidence,
            ),
            &[InsightKind::EnergyPattern],
            PRIORITY_NUDGE,
        ));
    }

    if let Some(slot) = profile
        .focus_time
        .slots
        .iter()
        .find(|s| s.quality == SlotQuality::Excellent)
        .or_else(|| profile.focus_time.slots.first())
    {
        out.push(suggestion(
            SuggestionKind::Nudge,
            format!(
                "{:?} {}:00–{}:00 is reliably free — a good home for deep work.",
                slot.day, slot.start_hour, slot.end_hour
            ),
            &[InsightKind::FocusTime],
            PRIORITY_NUDGE,
        ));
    }

    if let Some(low) = profile.energy_pattern.low_hours.first() {
        out.push(suggestion(
            SuggestionKind::Warning,
            format!(
                "Energy tends to dip around {}:00 — keep demanding work out of that hour.",
                low
            ),
            &[InsightKind::EnergyPattern],
            PRIORITY_NUDGE,
        ));
    }

    out
}

// =============================================================================
// Stress and balance messages
// =============================================================================

pub fn stress_messages(profile: &DnaProfile) -> Vec<Suggestion> {
    let mut out = Vec::new();

    match profile.stress.level {
        StressLevelKind::Burnout => {
            let mut warning = suggestion(
                SuggestionKind::Warning,
                "Your calendar has been running hot for a while — cancellations, weekend work, \
                 almost no slack. It's time to pull back."
                    .to_string(),
                &[InsightKind::StressLevel],
                PRIORITY_WARNING,
            );
            warning.action_label = Some("Plan recovery time".to_string());
            out.push(warning);
        }
        StressLevelKind::High => {
            out.push(suggestion(
                SuggestionKind::Warning,
                "This stretch looks heavier than your usual — worth trimming where you can."
                    .to_string(),
                &[InsightKind::StressLevel],
                PRIORITY_WARNING,
            ));
        }
        _ => {}
    }

    if profile.stress.weekend_work_days >= 2 {
        out.push(suggestion(
            SuggestionKind::Nudge,
            format!(
                "You worked {} weekend days recently. One protected weekend would pay for itself.",
                profile.stress.weekend_work_days
            ),
            &[InsightKind::StressLevel],
            PRIORITY_NUDGE,
        ));
    }

    out
}

pub fn balance_messages(profile: &DnaProfile) -> Vec<Suggestion> {
    let mut out = Vec::new();

    if profile.balance.status == BalanceStatus::Poor {
        out.push(suggestion(
            SuggestionKind::Warning,
            "Work is crowding out everything else this month — personal time barely shows up."
                .to_string(),
            &[InsightKind::WorkLifeBalance],
            PRIORITY_WARNING,
        ));
    }

    if profile.balance.has_exercise_routine {
        out.push(suggestion(
            SuggestionKind::Celebration,
            "Your exercise routine is still standing — that's the habit doing its job."
                .to_string(),
            &[InsightKind::WorkLifeBalance],
            PRIORITY_INFO,
        ));
    } else {
        let mut nudge = suggestion(
            SuggestionKind::Nudge,
            "There's no recurring exercise on your calendar. Even one standing slot a week helps."
                .to_string(),
            &[InsightKind::WorkLifeBalance],
            PRIORITY_NUDGE,
        );
        nudge.action_label = Some("Add a weekly slot".to_string());
        out.push(nudge);
    }

    out
}

// =============================================================================
// Briefing composers
// =============================================================================

/// Compose the morning briefing: greeting, today's count, next meeting,
/// and a softer close when stress is elevated.
pub fn morning_briefing(
    profile: Option<&DnaProfile>,
    today_event_count: usize,
    next_meeting: Option<&str>,
    busy: Option<BusyLevel>,
    tone_override: Option<Tone>,
    date: NaiveDate,
) -> String {
    let tone = match profile {
        Some(profile) => briefing_tone(profile, tone_override, busy),
        None => tone_override.unwrap_or(Tone::Energetic),
    };

    let mut briefing = String::with_capacity(200);
    briefing.push_str(greeting(tone, date));
    briefing.push(' ');

    match today_event_count {
        0 => briefing.push_str("You have no events today — the calendar is yours."),
        1 => briefing.push_str("Just one event on the calendar today."),
        n => briefing.push_str(&format!("You have {} events today.", n)),
    }

    if let Some(title) = next_meeting {
        briefing.push_str(&format!(" First up: {}.", title));
    }

    let stressed = matches!(
        profile.map(|p| p.stress.level),
        Some(StressLevelKind::High) | Some(StressLevelKind::Burnout)
    );
    if stressed {
        briefing.push_str(" Take it gently where you can.");
    }

    briefing
}

/// Compose the evening message: completion count, burnout-specific early
/// rest, and an exercise nudge when balance allows one.
pub fn evening_message(profile: Option<&DnaProfile>, completed: usize, total: usize) -> String {
    let mut message = String::with_capacity(160);

    if total == 0 {
        message.push_str("Nothing was on the plan today — sometimes that's the win.");
    } else {
        message.push_str(&format!(
            "You wrapped {} of {} planned items today.",
            completed, total
        ));
    }

    if let Some(profile) = profile {
        if profile.stress.level == StressLevelKind::Burnout {
            message.push_str(" Tonight, stop early — the last two weeks have taken plenty.");
        }
        if profile.balance.status != BalanceStatus::Poor && !profile.balance.has_exercise_routine {
            message.push_str(" A short walk or workout tomorrow would be a good counterweight.");
        }
    }

    message
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analyzer::analyze;
    use crate::rules::RuleSet;
    use crate::types::{AnalysisOptions, Confidence};

    fn date() -> NaiveDate {
        NaiveDate::from_ymd_opt(2026, 3, 25).unwrap()
    }

    fn neutral_profile() -> DnaProfile {
        analyze(&[], &AnalysisOptions::default(), &RuleSet::default(), date())
    }

    #[test]
    fn day_one_is_counts_only() {
        let mut profile = neutral_profile();
        profile.chronotype.kind = ChronotypeKind::Morning;
        let suggestions = generate_suggestions(&profile, RolloutPhase::DayOne);
        assert_eq!(suggestions.len(), 1);
        assert_eq!(suggestions[0].kind, SuggestionKind::Briefing);
        assert!(suggestions[0].message.contains("0 events"));
        assert!(suggestions[0].sources.is_empty());
    }

    #[test]
    fn week_one_adds_chronotype_and_style() {
        let mut profile = neutral_profile();
        profile.chronotype.kind = ChronotypeKind::Morning;
        profile.chronotype.confidence = Confidence::Medium;
        profile.work_style.kind = WorkStyleKind::Collaborative;
        profile.work_style.meeting_ratio = 70;

        let suggestions = generate_suggestions(&profile, RolloutPhase::WeekOne);
        assert!(suggestions
            .iter()
            .any(|s| s.sources.contains(&InsightKind::Chronotype)));
        assert!(suggestions
            .iter()
            .any(|s| s.sources.contains(&InsightKind::WorkStyle)));
        // Week one never talks about peaks or slumps.
        assert!(!suggestions
            .iter()
            .any(|s| s.sources.contains(&InsightKind::EnergyPattern)));
    }

    #[test]
    fn established_phase_surfaces_peaks_slots_and_slumps() {
        let mut profile = neutral_profile();
        profile.energy_pattern.peak_hours = vec![9, 10, 11];
        let suggestions = generate_suggestions(&profile, RolloutPhase::Established);
        assert!(suggestions
            .iter()
            .any(|s| s.sources.contains(&InsightKind::EnergyPattern)));
        assert!(suggestions
            .iter()
            .any(|s| s.sources.contains(&InsightKind::FocusTime)));
        assert!(suggestions
            .iter()
            .any(|s| s.kind == SuggestionKind::Warning && s.message.contains("dip")));
    }

    #[test]
    fn neutral_chronotype_makes_no_claim() {
        let suggestions = generate_suggestions(&neutral_profile(), RolloutPhase::WeekOne);
        assert!(!suggestions
            .iter()
            .any(|s| s.sources.contains(&InsightKind::Chronotype)));
    }

    #[test]
    fn burnout_stress_message_is_top_priority_and_actionable() {
        let mut profile = neutral_profile();
        profile.stress.level = StressLevelKind::Burnout;
        let messages = stress_messages(&profile);
        assert_eq!(messages[0].priority, 1);
        assert_eq!(messages[0].kind, SuggestionKind::Warning);
        assert!(messages[0].action_label.is_some());
    }

    #[test]
    fn weekend_work_gets_called_out() {
        let mut profile = neutral_profile();
        profile.stress.weekend_work_days = 3;
        let messages = stress_messages(&profile);
        assert!(messages.iter().any(|m| m.message.contains("3 weekend days")));
    }

    #[test]
    fn exercise_routine_earns_a_celebration() {
        let mut profile = neutral_profile();
        profile.balance.has_exercise_routine = true;
        let messages = balance_messages(&profile);
        assert!(messages
            .iter()
            .any(|m| m.kind == SuggestionKind::Celebration));
        assert!(!messages.iter().any(|m| m.message.contains("no recurring")));
    }

    #[test]
    fn missing_routine_earns_a_nudge() {
        let messages = balance_messages(&neutral_profile());
        let nudge = messages
            .iter()
            .find(|m| m.kind == SuggestionKind::Nudge)
            .expect("nudge");
        assert_eq!(nudge.action_label.as_deref(), Some("Add a weekly slot"));
    }

    #[test]
    fn empty_morning_briefing_says_so() {
        let briefing =
            morning_briefing(Some(&neutral_profile()), 0, None, None, None, date());
        assert!(briefing.contains("no events today"));
    }

    #[test]
    fn briefing_mentions_count_and_next_meeting() {
        let briefing = morning_briefing(
            Some(&neutral_profile()),
            4,
            Some("Design review"),
            None,
            None,
            date(),
        );
        assert!(briefing.contains("4 events"));
        assert!(briefing.contains("First up: Design review."));
        assert!(!briefing.contains("gently"));
    }

    #[test]
    fn stressed_briefing_softens() {
        let mut profile = neutral_profile();
        profile.stress.level = StressLevelKind::High;
        let briefing = morning_briefing(Some(&profile), 4, None, None, None, date());
        assert!(briefing.contains("Take it gently"));
    }

    #[test]
    fn evening_message_counts_and_nudges() {
        let message = evening_message(Some(&neutral_profile()), 3, 5);
        assert!(message.contains("3 of 5"));
        // Neutral profile: balance good, no routine → exercise nudge.
        assert!(message.contains("walk or workout"));
    }

    #[test]
    fn burnout_evening_message_sends_you_to_bed() {
        let mut profile = neutral_profile();
        profile.stress.level = StressLevelKind::Burnout;
        let message = evening_message(Some(&profile), 1, 4);
        assert!(message.contains("stop early"));
    }

    #[test]
    fn poor_balance_suppresses_the_exercise_nudge() {
        let mut profile = neutral_profile();
        profile.balance.status = BalanceStatus::Poor;
        let message = evening_message(Some(&profile), 2, 2);
        assert!(!message.contains("walk or workout"));
    }
}
