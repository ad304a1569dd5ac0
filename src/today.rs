//! Today-context analysis: a situational read of the current day against
//! the behavioral profile, plus forward-looking special-event alerts and a
//! trailing 14-day burnout-risk assessment.

use std::ops::RangeInclusive;

use chrono::{Duration, NaiveDate, NaiveTime, Timelike};

use crate::classify::{detect_consecutive_meetings, predict_daily_energy_drain};
use crate::types::{
    BurnoutLevel, BurnoutWarning, BusyLevel, CalendarKind, ClassifiedEvent, DnaProfile,
    EventCategory, EventStatus, SpecialEvent, SpecialEventKind, StressLevelKind, TodayContext,
    Tone,
};
use crate::util::{duration_minutes, format_hhmm, is_weekend, overlaps};

/// 9:00–18:00 workday model.
const WORKDAY_MINUTES: u32 = 540;

/// Window that must stay clear for the lunch-break flag (11:30–13:30).
const LUNCH_START: (u32, u32) = (11, 30);
const LUNCH_END: (u32, u32) = (13, 30);

/// Events starting at/after this hour count as after-hours work.
const AFTER_HOURS_FROM: u32 = 19;

/// Burnout signal thresholds over the trailing 14 days.
const BURNOUT_LOOKBACK_DAYS: i64 = 14;
const WEEKEND_STRONG_AT: usize = 4;
const WEEKEND_WEAK_AT: usize = 2;
const CANCELLATIONS_AT: usize = 5;
const AFTER_HOURS_AT: usize = 6;
const FREE_MINUTES_FLOOR: u32 = 60;

/// Busy-level thresholds: (meetings at least, free under, drain at least).
const EXTREME: (usize, u32, u32) = (6, 60, 80);
const HEAVY: (usize, u32, u32) = (4, 120, 60);
const NORMAL: (usize, u32, u32) = (2, 240, 40);

fn counts_toward_schedule(classified: &ClassifiedEvent) -> bool {
    !classified.event.is_all_day && classified.event.status != EventStatus::Cancelled
}

fn busy_level(meetings: usize, free_minutes: u32, drain: u32) -> BusyLevel {
    for (level, (m, f, d)) in [
        (BusyLevel::Extreme, EXTREME),
        (BusyLevel::Heavy, HEAVY),
        (BusyLevel::Normal, NORMAL),
    ] {
        if meetings >= m || free_minutes < f || drain >= d {
            return level;
        }
    }
    BusyLevel::Light
}

/// Build a [`TodayContext`] from today's and tomorrow's classified events.
pub fn analyze_today(
    today_events: &[ClassifiedEvent],
    tomorrow_events: &[ClassifiedEvent],
    profile: Option<&DnaProfile>,
    date: NaiveDate,
) -> TodayContext {
    let scheduled: Vec<&ClassifiedEvent> = today_events
        .iter()
        .filter(|c| counts_toward_schedule(c))
        .collect();

    let meeting_count = scheduled
        .iter()
        .filter(|c| c.category.is_meeting_like())
        .count();

    let busy_minutes: u32 = scheduled
        .iter()
        .map(|c| duration_minutes(c.event.start, c.event.end))
        .sum();
    let free_minutes = WORKDAY_MINUTES.saturating_sub(busy_minutes);

    let counted: Vec<ClassifiedEvent> = scheduled.iter().map(|c| (*c).clone()).collect();
    let energy_drain = predict_daily_energy_drain(&counted);
    let run = detect_consecutive_meetings(&counted);

    let level = busy_level(meeting_count, free_minutes, energy_drain);

    let lunch_start = date.and_time(
        NaiveTime::from_hms_opt(LUNCH_START.0, LUNCH_START.1, 0).unwrap_or(NaiveTime::MIN),
    );
    let lunch_end = date.and_time(
        NaiveTime::from_hms_opt(LUNCH_END.0, LUNCH_END.1, 0).unwrap_or(NaiveTime::MIN),
    );
    let has_lunch_break = !scheduled
        .iter()
        .any(|c| overlaps(c.event.start, c.event.end, lunch_start, lunch_end));

    let first_event = scheduled
        .iter()
        .map(|c| c.event.start)
        .min()
        .map(|start| format_hhmm(start.time()));
    let last_event = scheduled
        .iter()
        .map(|c| c.event.start)
        .max()
        .map(|start| format_hhmm(start.time()));

    let stress = profile.map(|p| p.stress.level);
    let suggested_tone = if stress == Some(StressLevelKind::Burnout) || level == BusyLevel::Extreme
    {
        Tone::Supportive
    } else if stress == Some(StressLevelKind::High) || level == BusyLevel::Heavy {
        Tone::Gentle
    } else {
        Tone::Energetic
    };

    TodayContext {
        date,
        busy_level: level,
        meeting_count,
        free_minutes,
        energy_drain,
        has_consecutive_meetings: run.has_consecutive,
        has_presentation_today: today_events
            .iter()
            .any(|c| c.category == EventCategory::Presentation),
        has_presentation_tomorrow: tomorrow_events
            .iter()
            .any(|c| c.category == EventCategory::Presentation),
        has_lunch_break,
        first_event,
        last_event,
        suggested_tone,
    }
}

/// Scan forward `days_ahead` days for presentations, plus an overload alert
/// for today when the day is already extreme.
pub fn detect_special_events(
    events: &[ClassifiedEvent],
    today: NaiveDate,
    days_ahead: u32,
    today_busy_level: BusyLevel,
) -> Vec<SpecialEvent> {
    let mut alerts = Vec::new();

    if today_busy_level == BusyLevel::Extreme {
        alerts.push(SpecialEvent {
            kind: SpecialEventKind::Overload,
            message: "Today is overloaded — consider moving anything that can wait.".to_string(),
            date: today,
            days_away: 0,
        });
    }

    let horizon: RangeInclusive<NaiveDate> = today..=(today + Duration::days(days_ahead as i64));
    let mut presentations: Vec<SpecialEvent> = events
        .iter()
        .filter(|c| c.category == EventCategory::Presentation)
        .filter(|c| horizon.contains(&c.event.start.date()))
        .map(|c| {
            let days_away = (c.event.start.date() - today).num_days() as u32;
            let countdown = match days_away {
                0 => "today".to_string(),
                1 => "tomorrow".to_string(),
                n => format!("in {} days", n),
            };
            SpecialEvent {
                kind: SpecialEventKind::Presentation,
                message: format!("Presentation {}: \"{}\"", countdown, c.event.title),
                date: c.event.start.date(),
                days_away,
            }
        })
        .collect();
    presentations.sort_by_key(|a| a.days_away);
    alerts.extend(presentations);

    alerts
}

/// Accumulate named burnout signals over the trailing 14 days and map the
/// signal count to a risk level with a fixed recommendation.
pub fn analyze_burnout_risk(
    events: &[ClassifiedEvent],
    profile: Option<&DnaProfile>,
    today: NaiveDate,
) -> BurnoutWarning {
    let window_start = today - Duration::days(BURNOUT_LOOKBACK_DAYS);
    let recent: Vec<&ClassifiedEvent> = events
        .iter()
        .filter(|c| {
            let date = c.event.start.date();
            date >= window_start && date <= today
        })
        .collect();

    let mut signals = Vec::new();

    let weekend_work = recent
        .iter()
        .filter(|c| is_weekend(c.event.start.date()) && c.category != EventCategory::Personal)
        .count();
    if weekend_work >= WEEKEND_STRONG_AT {
        signals.push(format!(
            "{} work events on weekends in the last two weeks — weekends are becoming workdays",
            weekend_work
        ));
    } else if weekend_work >= WEEKEND_WEAK_AT {
        signals.push(format!(
            "Worked through {} weekend events recently",
            weekend_work
        ));
    }

    let cancellations = recent
        .iter()
        .filter(|c| c.event.status == EventStatus::Cancelled)
        .count();
    if cancellations >= CANCELLATIONS_AT {
        signals.push(format!(
            "{} cancellations in two weeks — the schedule keeps collapsing",
            cancellations
        ));
    }

    let after_hours = recent
        .iter()
        .filter(|c| {
            c.event.start.time().hour() >= AFTER_HOURS_FROM
                && c.event.calendar != CalendarKind::Personal
        })
        .count();
    if after_hours >= AFTER_HOURS_AT {
        signals.push(format!(
            "{} events after 19:00 in two weeks — evenings are not recovering you",
            after_hours
        ));
    }

    if let Some(profile) = profile {
        if profile.stress.avg_free_minutes < FREE_MINUTES_FLOOR {
            signals.push("Average free time is under an hour a day".to_string());
        }
    }

    let level = match signals.len() {
        n if n >= 4 => BurnoutLevel::Critical,
        3 => BurnoutLevel::Warning,
        1 | 2 => BurnoutLevel::Watch,
        _ => BurnoutLevel::None,
    };

    let recommendation = match level {
        BurnoutLevel::Critical => {
            "Clear everything that can move this week and take at least one full day off."
        }
        BurnoutLevel::Warning => {
            "Block two recovery evenings this week and decline optional meetings."
        }
        BurnoutLevel::Watch => {
            "Keep an eye on the load. Protect at least one completely free evening this week."
        }
        BurnoutLevel::None => "No action needed — the last two weeks look sustainable.",
    };

    if level > BurnoutLevel::None {
        log::debug!("burnout risk {:?}: {} signal(s)", level, signals.len());
    }

    BurnoutWarning {
        level,
        signals,
        recommendation: recommendation.to_string(),
    }
}

// =============================================================================
// Tests
// =============================================================================
