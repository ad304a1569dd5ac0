//! Calendar analyzer: aggregates a date-filtered event set into the
//! seven-dimension behavioral profile.
//!
//! Every dimension is computed independently from the filtered set and
//! guards its denominators: too little data degrades to a named neutral
//! default at low confidence instead of erroring.

use std::collections::{HashMap, HashSet};

use chrono::{Datelike, Duration, NaiveDate, NaiveTime, Timelike, Utc, Weekday};

use crate::classify::classify_event;
use crate::rules::RuleSet;
use crate::types::{
    AnalysisOptions, BalanceStatus, CalendarEvent, CalendarKind, Chronotype, ChronotypeKind,
    ClassifiedEvent, Confidence, DnaProfile, EnergyPattern, EventCategory, EventStatus, FocusTime,
    ProfileDimension, SlotQuality, StressIndicators, StressLevelKind, TimeSlot, WeekdayLoad,
    WeekdayPatterns, WorkLifeBalance, WorkStyle, WorkStyleKind,
};
use crate::util::{duration_minutes, hhmm_from_minutes, is_weekend, minute_of_day, overlaps};

pub const PROFILE_SCHEMA_VERSION: u32 = 1;

/// 9:00–18:00 workday model.
const WORKDAY_MINUTES: u32 = 540;

// Chronotype (minutes of day).
const MIN_CHRONOTYPE_SAMPLES: usize = 5;
const DEFAULT_FIRST_EVENT_TIME: &str = "09:00";
const MORNING_BEFORE: u32 = 9 * 60;
const MORNING_STRONG_BEFORE: u32 = 8 * 60;
const EVENING_AFTER: u32 = 10 * 60;
const EVENING_STRONG_AFTER: u32 = 11 * 60;

// Energy pattern.
const ENERGY_HOUR_MIN: u32 = 8;
const ENERGY_HOUR_MAX: u32 = 20;
const LOW_HOUR_MIN: u32 = 12;
const LOW_HOUR_MAX: u32 = 16;
const DEFAULT_LOW_HOURS: [u8; 2] = [14, 15];

// Work style (percent).
const COLLABORATIVE_OVER: u8 = 60;
const INDEPENDENT_UNDER: u8 = 30;
const ROUTINE_OVER_PCT: f64 = 30.0;
const SOLO_UNDER: u8 = 40;

// Focus time.
const FOCUS_HOUR_MIN: u32 = 8;
const FOCUS_HOUR_MAX: u32 = 18;
const MAX_FOCUS_SLOTS: usize = 5;
const EXCELLENT_SLOT_HOURS: u8 = 2;

// Weekday patterns.
const MEETING_HEAVY_FACTOR: f64 = 1.3;

const WEEKDAYS: [Weekday; 7] = [
    Weekday::Mon,
    Weekday::Tue,
    Weekday::Wed,
    Weekday::Thu,
    Weekday::Fri,
    Weekday::Sat,
    Weekday::Sun,
];

/// Run a full profile analysis over `events` as of `today`.
///
/// Total for any input: an empty or too-small set yields the neutral
/// profile with every dimension at low confidence.
pub fn analyze(
    events: &[CalendarEvent],
    options: &AnalysisOptions,
    rules: &RuleSet,
    today: NaiveDate,
) -> DnaProfile {
    let range_start = today - Duration::days(options.days_back as i64);

    let classified: Vec<ClassifiedEvent> = events
        .iter()
        .filter(|e| {
            let date = e.start.date();
            date >= range_start && date <= today && (options.include_recurring || !e.is_recurring)
        })
        .map(|e| classify_event(e, rules))
        .collect();

    // Below the gate, keep the event count honest but analyze nothing.
    let effective: &[ClassifiedEvent] = if classified.len() < options.min_events {
        &[]
    } else {
        &classified
    };
    let samples = effective.len();

    let profile = DnaProfile {
        chronotype: analyze_chronotype(effective),
        energy_pattern: analyze_energy_pattern(effective, rules, samples),
        work_style: analyze_work_style(effective, rules, samples),
        stress: analyze_stress(effective, rules, samples, today),
        balance: analyze_balance(effective, rules, samples),
        focus_time: analyze_focus_time(effective, rules, samples),
        weekday_patterns: analyze_weekday_patterns(effective, rules, samples),
        analyzed_events_count: classified.len(),
        range_start,
        range_end: today,
        last_analyzed_at: Utc::now(),
        schema_version: PROFILE_SCHEMA_VERSION,
    };

    log::debug!(
        "analyzed {} events ({} to {}): chronotype={:?} stress={:?} busiest={:?}",
        profile.analyzed_events_count,
        profile.range_start,
        profile.range_end,
        profile.chronotype.kind,
        profile.stress.level,
        profile.weekday_patterns.busiest_day,
    );

    profile
}

// =============================================================================
// Chronotype
// =============================================================================

fn analyze_chronotype(events: &[ClassifiedEvent]) -> Chronotype {
    let mut first_by_day: HashMap<NaiveDate, u32> = HashMap::new();
    for classified in events.iter().filter(|c| !c.event.is_all_day) {
        let minute = minute_of_day(classified.event.start.time());
        first_by_day
            .entry(classified.event.start.date())
            .and_modify(|m| *m = (*m).min(minute))
            .or_insert(minute);
    }

    if first_by_day.len() < MIN_CHRONOTYPE_SAMPLES {
        return Chronotype {
            kind: ChronotypeKind::Neutral,
            first_event_avg_time: DEFAULT_FIRST_EVENT_TIME.to_string(),
            confidence: Confidence::Low,
        };
    }

    let avg = first_by_day.values().sum::<u32>() / first_by_day.len() as u32;

    let (kind, confidence) = if avg < MORNING_BEFORE {
        let confidence = if avg < MORNING_STRONG_BEFORE {
            Confidence::High
        } else {
            Confidence::Medium
        };
        (ChronotypeKind::Morning, confidence)
    } else if avg > EVENING_AFTER {
        let confidence = if avg > EVENING_STRONG_AFTER {
            Confidence::High
        } else {
            Confidence::Medium
        };
        (ChronotypeKind::Evening, confidence)
    } else {
        (ChronotypeKind::Neutral, Confidence::Medium)
    };

    Chronotype {
        kind,
        first_event_avg_time: hhmm_from_minutes(avg),
        confidence,
    }
}

// =============================================================================
// Energy pattern
// =============================================================================

fn analyze_energy_pattern(
    events: &[ClassifiedEvent],
    rules: &RuleSet,
    samples: usize,
) -> EnergyPattern {
    let mut histogram = [0u32; 24];
    for classified in events.iter().filter(|c| !c.event.is_all_day) {
        let hour = classified.event.start.time().hour();
        if (ENERGY_HOUR_MIN..=ENERGY_HOUR_MAX).contains(&hour) {
            histogram[hour as usize] += 1;
        }
    }

    // Busiest hours first; ties break toward the earlier hour.
    let mut scheduled: Vec<(u32, u32)> = (ENERGY_HOUR_MIN..=ENERGY_HOUR_MAX)
        .filter(|&h| histogram[h as usize] > 0)
        .map(|h| (h, histogram[h as usize]))
        .collect();
    scheduled.sort_by(|a, b| b.1.cmp(&a.1).then(a.0.cmp(&b.0)));
    let peak_hours: Vec<u8> = scheduled.iter().take(3).map(|(h, _)| *h as u8).collect();

    let afternoon_total: u32 = (LOW_HOUR_MIN..=LOW_HOUR_MAX)
        .map(|h| histogram[h as usize])
        .sum();
    let low_hours: Vec<u8> = if afternoon_total == 0 {
        DEFAULT_LOW_HOURS.to_vec()
    } else {
        let mut afternoon: Vec<(u32, u32)> = (LOW_HOUR_MIN..=LOW_HOUR_MAX)
            .map(|h| (h, histogram[h as usize]))
            .collect();
        afternoon.sort_by(|a, b| a.1.cmp(&b.1).then(a.0.cmp(&b.0)));
        afternoon.iter().take(2).map(|(h, _)| *h as u8).collect()
    };

    EnergyPattern {
        peak_hours,
        low_hours,
        confidence: rules.confidence_tier(ProfileDimension::EnergyPattern, samples),
    }
}

// =============================================================================
// Work style
// =============================================================================

fn analyze_work_style(events: &[ClassifiedEvent], rules: &RuleSet, samples: usize) -> WorkStyle {
    let confidence = rules.confidence_tier(ProfileDimension::WorkStyle, samples);

    let work_events: Vec<&ClassifiedEvent> = events
        .iter()
        .filter(|c| c.event.calendar != CalendarKind::Personal)
        .collect();

    if work_events.is_empty() {
        return WorkStyle {
            kind: WorkStyleKind::Balanced,
            meeting_ratio: 0,
            prefers_routine: false,
            prefers_solo: false,
            confidence,
        };
    }

    let meetings = work_events
        .iter()
        .filter(|c| c.category.is_meeting_like())
        .count();
    let meeting_ratio =
        ((meetings as f64 / work_events.len() as f64) * 100.0).round() as u8;

    let kind = if meeting_ratio > COLLABORATIVE_OVER {
        WorkStyleKind::Collaborative
    } else if meeting_ratio < INDEPENDENT_UNDER {
        WorkStyleKind::Independent
    } else {
        WorkStyleKind::Balanced
    };

    let recurring = events.iter().filter(|c| c.event.is_recurring).count();
    let prefers_routine = !events.is_empty()
        && (recurring as f64 / events.len() as f64) * 100.0 > ROUTINE_OVER_PCT;

    WorkStyle {
        kind,
        meeting_ratio,
        prefers_routine,
        prefers_solo: meeting_ratio < SOLO_UNDER,
        confidence,
    }
}

// =============================================================================
// Stress indicators
// =============================================================================

fn analyze_stress(
    events: &[ClassifiedEvent],
    rules: &RuleSet,
    samples: usize,
    today: NaiveDate,
) -> StressIndicators {
    let week_ago = today - Duration::days(7);
    let recent_cancellations = events
        .iter()
        .filter(|c| c.event.status == EventStatus::Cancelled && c.event.start.date() >= week_ago)
        .count() as u32;

    let weekend_work_days = events
        .iter()
        .filter(|c| is_weekend(c.event.start.date()) && c.category != EventCategory::Personal)
        .map(|c| c.event.start.date())
        .collect::<HashSet<_>>()
        .len() as u32;

    let mut busy_by_day: HashMap<NaiveDate, u32> = HashMap::new();
    for classified in events.iter().filter(|c| !c.event.is_all_day) {
        *busy_by_day.entry(classified.event.start.date()).or_insert(0) +=
            duration_minutes(classified.event.start, classified.event.end);
    }
    let avg_free_minutes = if busy_by_day.is_empty() {
        WORKDAY_MINUTES
    } else {
        busy_by_day
            .values()
            .map(|busy| WORKDAY_MINUTES.saturating_sub(*busy))
            .sum::<u32>()
            / busy_by_day.len() as u32
    };

    let level = if recent_cancellations >= 5 || weekend_work_days >= 3 || avg_free_minutes < 60 {
        StressLevelKind::Burnout
    } else if recent_cancellations >= 3 || weekend_work_days >= 2 || avg_free_minutes < 120 {
        StressLevelKind::High
    } else if recent_cancellations >= 1 || weekend_work_days >= 1 || avg_free_minutes < 180 {
        StressLevelKind::Medium
    } else {
        StressLevelKind::Low
    };

    StressIndicators {
        level,
        recent_cancellations,
        weekend_work_days,
        avg_free_minutes,
        confidence: rules.confidence_tier(ProfileDimension::Stress, samples),
    }
}

// =============================================================================
// Work-life balance
// =============================================================================

fn analyze_balance(
    events: &[ClassifiedEvent],
    rules: &RuleSet,
    samples: usize,
) -> WorkLifeBalance {
    let confidence = rules.confidence_tier(ProfileDimension::Balance, samples);

    if events.is_empty() {
        return WorkLifeBalance {
            status: BalanceStatus::Good,
            personal_ratio: 0,
            after_hours_days: 0,
            has_exercise_routine: false,
            confidence,
        };
    }

    let personal = events
        .iter()
        .filter(|c| {
            c.category == EventCategory::Personal || c.event.calendar == CalendarKind::Personal
        })
        .count();
    let personal_ratio = ((personal as f64 / events.len() as f64) * 100.0).round() as u8;

    let after_hours_days = events
        .iter()
        .filter(|c| {
            c.event.start.time().hour() >= 19 && c.event.calendar != CalendarKind::Personal
        })
        .map(|c| c.event.start.date())
        .collect::<HashSet<_>>()
        .len() as u32;

    let has_exercise_routine = events.iter().any(|c| {
        c.event.is_recurring && {
            let lower = c.event.title.to_lowercase();
            rules
                .exercise_keywords
                .iter()
                .any(|k| lower.contains(k.as_str()))
        }
    });

    let status = if after_hours_days >= 3 || personal_ratio < 10 {
        BalanceStatus::Poor
    } else if after_hours_days >= 1 || personal_ratio < 20 {
        BalanceStatus::Moderate
    } else {
        BalanceStatus::Good
    };

    WorkLifeBalance {
        status,
        personal_ratio,
        after_hours_days,
        has_exercise_routine,
        confidence,
    }
}

// =============================================================================
// Focus time
// =============================================================================

fn analyze_focus_time(events: &[ClassifiedEvent], rules: &RuleSet, samples: usize) -> FocusTime {
    // busy[workweek day][hour offset from 8:00]
    let mut busy = [[false; 10]; 5];

    for classified in events.iter().filter(|c| !c.event.is_all_day) {
        let date = classified.event.start.date();
        let day = date.weekday().num_days_from_monday() as usize;
        if day >= 5 {
            continue;
        }
        for hour in FOCUS_HOUR_MIN..FOCUS_HOUR_MAX {
            let slot_start =
                date.and_time(NaiveTime::from_hms_opt(hour, 0, 0).unwrap_or(NaiveTime::MIN));
            let slot_end =
                date.and_time(NaiveTime::from_hms_opt(hour + 1, 0, 0).unwrap_or(NaiveTime::MIN));
            if overlaps(classified.event.start, classified.event.end, slot_start, slot_end) {
                busy[day][(hour - FOCUS_HOUR_MIN) as usize] = true;
            }
        }
    }

    let mut slots: Vec<TimeSlot> = Vec::new();
    'scan: for day in 0..5 {
        let mut hour = FOCUS_HOUR_MIN;
        while hour < FOCUS_HOUR_MAX {
            if busy[day][(hour - FOCUS_HOUR_MIN) as usize] {
                hour += 1;
                continue;
            }
            let start = hour;
            while hour < FOCUS_HOUR_MAX && !busy[day][(hour - FOCUS_HOUR_MIN) as usize] {
                hour += 1;
            }
            let hours = (hour - start) as u8;
            slots.push(TimeSlot {
                day: WEEKDAYS[day],
                start_hour: start as u8,
                end_hour: hour as u8,
                quality: if hours >= EXCELLENT_SLOT_HOURS {
                    SlotQuality::Excellent
                } else {
                    SlotQuality::Good
                },
            });
            if slots.len() == MAX_FOCUS_SLOTS {
                break 'scan;
            }
        }
    }

    let total_hours: u32 = slots
        .iter()
        .map(|s| (s.end_hour - s.start_hour) as u32)
        .sum();

    FocusTime {
        slots,
        avg_deep_work_hours: total_hours as f64 / 5.0,
        confidence: rules.confidence_tier(ProfileDimension::FocusTime, samples),
    }
}

// =============================================================================
// Weekday patterns
// =============================================================================

fn analyze_weekday_patterns(
    events: &[ClassifiedEvent],
    rules: &RuleSet,
    samples: usize,
) -> WeekdayPatterns {
    let mut event_counts = [0u32; 7];
    let mut meeting_counts = [0u32; 7];
    for classified in events {
        let day = classified.event.start.date().weekday().num_days_from_monday() as usize;
        event_counts[day] += 1;
        if classified.category.is_meeting_like() {
            meeting_counts[day] += 1;
        }
    }

    let workweek_events: u32 = event_counts[..5].iter().sum();
    let (busiest_day, lightest_day) = if workweek_events == 0 {
        (Weekday::Mon, Weekday::Fri)
    } else {
        let busiest = (0..5)
            .max_by_key(|&d| (event_counts[d], std::cmp::Reverse(d)))
            .unwrap_or(0);
        let lightest = (0..5).min_by_key(|&d| (event_counts[d], d)).unwrap_or(4);
        (WEEKDAYS[busiest], WEEKDAYS[lightest])
    };

    let meeting_avg = meeting_counts[..5].iter().sum::<u32>() as f64 / 5.0;
    let meeting_heavy_days: Vec<Weekday> = (0..5)
        .filter(|&d| {
            meeting_counts[d] > 0 && meeting_counts[d] as f64 > meeting_avg * MEETING_HEAVY_FACTOR
        })
        .map(|d| WEEKDAYS[d])
        .collect();

    let loads: Vec<WeekdayLoad> = (0..7)
        .map(|d| WeekdayLoad {
            day: WEEKDAYS[d],
            events: event_counts[d],
            meetings: meeting_counts[d],
        })
        .collect();

    WeekdayPatterns {
        loads,
        busiest_day,
        lightest_day,
        meeting_heavy_days,
        confidence: rules.confidence_tier(ProfileDimension::WeekdayPatterns, samples),
    }
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{CalendarKind, EventStatus};

    const TODAY: fn() -> NaiveDate = || NaiveDate::from_ymd_opt(2026, 3, 27).unwrap();

    fn event_on(
        id: u32,
        title: &str,
        date: NaiveDate,
        hour: u32,
        minute: u32,
        duration_min: i64,
    ) -> CalendarEvent {
        let start = date.and_hms_opt(hour, minute, 0).unwrap();
        CalendarEvent {
            id: format!("e{}", id),
            title: title.to_string(),
            start,
            end: start + Duration::minutes(duration_min),
            is_all_day: false,
            attendee_count: 3,
            calendar: CalendarKind::Work,
            is_recurring: false,
            created_at: None,
            updated_at: None,
            status: EventStatus::Confirmed,
        }
    }

    fn day(offset_from_today: i64) -> NaiveDate {
        TODAY() - Duration::days(offset_from_today)
    }

    fn run(events: &[CalendarEvent]) -> DnaProfile {
        analyze(events, &AnalysisOptions::default(), &RuleSet::default(), TODAY())
    }

    #[test]
    fn too_few_days_gives_neutral_chronotype() {
        // 3 event days, all early: still below the 5-sample floor.
        let events: Vec<CalendarEvent> = (0..3)
            .map(|i| event_on(i, "Team sync", day(i as i64 + 1), 8, 0, 60))
            .collect();
        let profile = run(&events);
        assert_eq!(profile.chronotype.kind, ChronotypeKind::Neutral);
        assert_eq!(profile.chronotype.confidence, Confidence::Low);
        assert_eq!(profile.chronotype.first_event_avg_time, "09:00");
    }

    #[test]
    fn early_starts_make_a_morning_chronotype() {
        let events: Vec<CalendarEvent> = (0..6)
            .map(|i| event_on(i, "Team sync", day(i as i64 + 1), 8, 30, 60))
            .collect();
        let profile = run(&events);
        assert_eq!(profile.chronotype.kind, ChronotypeKind::Morning);
        assert_eq!(profile.chronotype.confidence, Confidence::Medium);
        assert_eq!(profile.chronotype.first_event_avg_time, "08:30");
    }

    #[test]
    fn very_early_starts_are_high_confidence() {
        let events: Vec<CalendarEvent> = (0..6)
            .map(|i| event_on(i, "Team sync", day(i as i64 + 1), 7, 30, 60))
            .collect();
        let profile = run(&events);
        assert_eq!(profile.chronotype.kind, ChronotypeKind::Morning);
        assert_eq!(profile.chronotype.confidence, Confidence::High);
    }

    #[test]
    fn late_starts_make_an_evening_chronotype() {
        let events: Vec<CalendarEvent> = (0..6)
            .map(|i| event_on(i, "Team sync", day(i as i64 + 1), 11, 30, 60))
            .collect();
        let profile = run(&events);
        assert_eq!(profile.chronotype.kind, ChronotypeKind::Evening);
        assert_eq!(profile.chronotype.confidence, Confidence::High);
    }

    #[test]
    fn earliest_event_per_day_drives_chronotype() {
        // A late second event on each day must not move the first-event average.
        let mut events = Vec::new();
        for i in 0..6 {
            events.push(event_on(i * 2, "Team sync", day(i as i64 + 1), 8, 0, 60));
            events.push(event_on(i * 2 + 1, "Review call", day(i as i64 + 1), 16, 0, 60));
        }
        let profile = run(&events);
        assert_eq!(profile.chronotype.kind, ChronotypeKind::Morning);
        assert_eq!(profile.chronotype.first_event_avg_time, "08:00");
    }

    #[test]
    fn peak_hours_rank_by_frequency() {
        let mut events = Vec::new();
        let mut id = 0;
        for i in 0..4 {
            events.push(event_on(id, "Team sync", day(i + 1), 9, 0, 60));
            id += 1;
        }
        for i in 0..3 {
            events.push(event_on(id, "Review call", day(i + 1), 15, 0, 60));
            id += 1;
        }
        events.push(event_on(id, "Planning call", day(1), 11, 0, 60));

        let profile = run(&events);
        assert_eq!(profile.energy_pattern.peak_hours, vec![9, 15, 11]);
    }

    #[test]
    fn low_hours_default_without_afternoon_data() {
        let events: Vec<CalendarEvent> = (0..6)
            .map(|i| event_on(i, "Team sync", day(i as i64 + 1), 9, 0, 60))
            .collect();
        let profile = run(&events);
        assert_eq!(profile.energy_pattern.low_hours, vec![14, 15]);
    }

    #[test]
    fn low_hours_pick_quietest_afternoon_hours() {
        let mut events = Vec::new();
        let mut id = 0;
        for i in 0..3 {
            events.push(event_on(id, "Review call", day(i + 1), 14, 0, 60));
            id += 1;
        }
        events.push(event_on(id, "Planning call", day(1), 16, 0, 60));
        let profile = run(&events);
        // 12 and 13 are untouched; 16 has one, 14 has three.
        assert_eq!(profile.energy_pattern.low_hours, vec![12, 13]);
    }

    #[test]
    fn meeting_ratio_and_collaborative_style() {
        // 20 work-calendar events, 14 of them meetings.
        let mut events = Vec::new();
        for i in 0..14u32 {
            events.push(event_on(i, "Team sync", day((i % 20) as i64 + 1), 10, 0, 60));
        }
        for i in 14..20u32 {
            events.push(event_on(i, "Deep work", day((i % 20) as i64 + 1), 14, 0, 60));
        }
        let profile = run(&events);
        assert_eq!(profile.work_style.meeting_ratio, 70);
        assert_eq!(profile.work_style.kind, WorkStyleKind::Collaborative);
        assert!(!profile.work_style.prefers_solo);
    }

    #[test]
    fn sparse_meetings_read_as_independent() {
        let mut events = Vec::new();
        events.push(event_on(0, "Team sync", day(1), 10, 0, 60));
        for i in 1..10u32 {
            events.push(event_on(i, "Deep work", day(i as i64 + 1), 14, 0, 60));
        }
        let profile = run(&events);
        assert_eq!(profile.work_style.kind, WorkStyleKind::Independent);
        assert!(profile.work_style.prefers_solo);
    }

    #[test]
    fn recurring_share_flags_routine_preference() {
        let mut events: Vec<CalendarEvent> = (0..10u32)
            .map(|i| event_on(i, "Deep work", day(i as i64 + 1), 14, 0, 60))
            .collect();
        for event in events.iter_mut().take(4) {
            event.is_recurring = true;
        }
        let profile = run(&events);
        assert!(profile.work_style.prefers_routine);
    }

    #[test]
    fn cancellations_drive_stress_to_burnout() {
        let mut events: Vec<CalendarEvent> = (0..5u32)
            .map(|i| event_on(i, "Team sync", day(i as i64 + 1), 10, 0, 60))
            .collect();
        for event in events.iter_mut() {
            event.status = EventStatus::Cancelled;
        }
        let profile = run(&events);
        assert_eq!(profile.stress.level, StressLevelKind::Burnout);
        assert_eq!(profile.stress.recent_cancellations, 5);
    }

    #[test]
    fn weekend_work_days_raise_stress() {
        // Mar 21 and 22, 2026 are a weekend.
        let sat = NaiveDate::from_ymd_opt(2026, 3, 21).unwrap();
        let sun = NaiveDate::from_ymd_opt(2026, 3, 22).unwrap();
        let events = vec![
            event_on(0, "Team sync", sat, 10, 0, 60),
            event_on(1, "Review call", sun, 10, 0, 60),
        ];
        let profile = run(&events);
        assert_eq!(profile.stress.weekend_work_days, 2);
        assert_eq!(profile.stress.level, StressLevelKind::High);
    }

    #[test]
    fn packed_days_shrink_free_time() {
        // Two 4.5-hour days: 540 - 270 = 270 free minutes on average.
        let events = vec![
            event_on(0, "Team sync", day(1), 9, 0, 270),
            event_on(1, "Team sync", day(2), 9, 0, 270),
        ];
        let profile = run(&events);
        assert_eq!(profile.stress.avg_free_minutes, 270);
        assert_eq!(profile.stress.level, StressLevelKind::Low);
    }

    #[test]
    fn after_hours_days_poison_balance() {
        let events: Vec<CalendarEvent> = (0..3u32)
            .map(|i| event_on(i, "Review call", day(i as i64 + 1), 20, 0, 60))
            .collect();
        let profile = run(&events);
        assert_eq!(profile.balance.after_hours_days, 3);
        assert_eq!(profile.balance.status, BalanceStatus::Poor);
    }

    #[test]
    fn recurring_exercise_sets_the_routine_flag() {
        let mut events: Vec<CalendarEvent> = (0..5u32)
            .map(|i| event_on(i, "Team sync", day(i as i64 + 1), 10, 0, 60))
            .collect();
        let mut gym = event_on(99, "Morning gym", day(2), 7, 0, 60);
        gym.is_recurring = true;
        gym.calendar = CalendarKind::Personal;
        events.push(gym);
        let profile = run(&events);
        assert!(profile.balance.has_exercise_routine);
    }

    #[test]
    fn healthy_personal_share_reads_good() {
        let mut events: Vec<CalendarEvent> = (0..7u32)
            .map(|i| event_on(i, "Team sync", day((i % 5) as i64 + 1), 10, 0, 60))
            .collect();
        for i in 0..2u32 {
            let mut personal = event_on(100 + i, "Family dinner", day(i as i64 + 1), 18, 0, 60);
            personal.calendar = CalendarKind::Personal;
            events.push(personal);
        }
        let profile = run(&events);
        // 2/9 ≈ 22% personal, no after-hours work events.
        assert_eq!(profile.balance.status, BalanceStatus::Good);
    }

    #[test]
    fn focus_slots_split_around_meetings() {
        // One meeting Monday 10:00–11:00 inside an otherwise free week.
        let monday = NaiveDate::from_ymd_opt(2026, 3, 23).unwrap();
        let events = vec![event_on(0, "Team sync", monday, 10, 0, 60)];
        let profile = run(&events);

        let monday_slots: Vec<&TimeSlot> = profile
            .focus_time
            .slots
            .iter()
            .filter(|s| s.day == Weekday::Mon)
            .collect();
        assert_eq!(monday_slots.len(), 2);
        assert_eq!((monday_slots[0].start_hour, monday_slots[0].end_hour), (8, 10));
        assert_eq!((monday_slots[1].start_hour, monday_slots[1].end_hour), (11, 18));
        assert_eq!(monday_slots[0].quality, SlotQuality::Excellent);
        assert!(profile.focus_time.slots.len() <= 5);
    }

    #[test]
    fn single_free_hour_is_only_good_quality() {
        // Meetings 8–12 and 13–18 leave exactly 12:00–13:00 free on Monday.
        let monday = NaiveDate::from_ymd_opt(2026, 3, 23).unwrap();
        let events = vec![
            event_on(0, "Team sync", monday, 8, 0, 240),
            event_on(1, "Review call", monday, 13, 0, 300),
        ];
        let profile = run(&events);
        let slot = profile
            .focus_time
            .slots
            .iter()
            .find(|s| s.day == Weekday::Mon)
            .expect("monday slot");
        assert_eq!((slot.start_hour, slot.end_hour), (12, 13));
        assert_eq!(slot.quality, SlotQuality::Good);
    }

    #[test]
    fn busiest_and_lightest_weekdays() {
        let monday = NaiveDate::from_ymd_opt(2026, 3, 23).unwrap();
        let tuesday = NaiveDate::from_ymd_opt(2026, 3, 24).unwrap();
        let mut events = vec![
            event_on(0, "Team sync", monday, 9, 0, 60),
            event_on(1, "Review call", monday, 11, 0, 60),
            event_on(2, "Planning call", monday, 14, 0, 60),
        ];
        events.push(event_on(3, "Deep work", tuesday, 9, 0, 60));
        let profile = run(&events);
        assert_eq!(profile.weekday_patterns.busiest_day, Weekday::Mon);
        assert_ne!(profile.weekday_patterns.lightest_day, Weekday::Mon);
        assert!(profile
            .weekday_patterns
            .meeting_heavy_days
            .contains(&Weekday::Mon));
    }

    #[test]
    fn empty_input_yields_the_neutral_profile() {
        let profile = run(&[]);
        assert_eq!(profile.analyzed_events_count, 0);
        assert_eq!(profile.chronotype.confidence, Confidence::Low);
        assert_eq!(profile.energy_pattern.confidence, Confidence::Low);
        assert_eq!(profile.work_style.confidence, Confidence::Low);
        assert_eq!(profile.stress.confidence, Confidence::Low);
        assert_eq!(profile.balance.confidence, Confidence::Low);
        assert_eq!(profile.focus_time.confidence, Confidence::Low);
        assert_eq!(profile.weekday_patterns.confidence, Confidence::Low);

        assert_eq!(profile.chronotype.kind, ChronotypeKind::Neutral);
        assert_eq!(profile.work_style.kind, WorkStyleKind::Balanced);
        assert_eq!(profile.stress.level, StressLevelKind::Low);
        assert_eq!(profile.balance.status, BalanceStatus::Good);
        assert!(profile.energy_pattern.peak_hours.is_empty());
        assert_eq!(profile.energy_pattern.low_hours, vec![14, 15]);
        assert_eq!(profile.weekday_patterns.busiest_day, Weekday::Mon);
        assert_eq!(profile.weekday_patterns.lightest_day, Weekday::Fri);
    }

    #[test]
    fn min_events_gate_neutralizes_but_keeps_the_count() {
        let events: Vec<CalendarEvent> = (0..3u32)
            .map(|i| event_on(i, "Team sync", day(i as i64 + 1), 8, 0, 60))
            .collect();
        let options = AnalysisOptions {
            min_events: 10,
            ..AnalysisOptions::default()
        };
        let profile = analyze(&events, &options, &RuleSet::default(), TODAY());
        assert_eq!(profile.analyzed_events_count, 3);
        assert_eq!(profile.work_style.meeting_ratio, 0);
        assert_eq!(profile.stress.level, StressLevelKind::Low);
    }

    #[test]
    fn recurring_events_can_be_excluded() {
        let mut recurring = event_on(0, "Team sync", day(1), 10, 0, 60);
        recurring.is_recurring = true;
        let events = vec![recurring, event_on(1, "Deep work", day(2), 9, 0, 60)];
        let options = AnalysisOptions {
            include_recurring: false,
            ..AnalysisOptions::default()
        };
        let profile = analyze(&events, &options, &RuleSet::default(), TODAY());
        assert_eq!(profile.analyzed_events_count, 1);
    }

    #[test]
    fn out_of_range_events_are_ignored() {
        let events = vec![
            event_on(0, "Team sync", day(40), 10, 0, 60),
            event_on(1, "Team sync", day(1), 10, 0, 60),
        ];
        let profile = run(&events);
        assert_eq!(profile.analyzed_events_count, 1);
    }

    #[test]
    fn analysis_is_idempotent_up_to_timestamps() {
        let events: Vec<CalendarEvent> = (0..12u32)
            .map(|i| event_on(i, "Team sync", day((i % 6) as i64 + 1), 9, 0, 60))
            .collect();
        let a = run(&events);
        let mut b = run(&events);
        b.last_analyzed_at = a.last_analyzed_at;
        assert_eq!(a, b);
    }

    #[test]
    fn profile_round_trips_through_json() {
        let events: Vec<CalendarEvent> = (0..12u32)
            .map(|i| event_on(i, "Team sync", day((i % 6) as i64 + 1), 9, 30, 45))
            .collect();
        let profile = run(&events);
        let json = serde_json::to_string(&profile).expect("serialize");
        let back: DnaProfile = serde_json::from_str(&json).expect("deserialize");
        assert_eq!(profile, back);
    }
}
