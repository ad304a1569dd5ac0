//! Engine facade: one query surface over the analyzer, today-context,
//! action mapper, and message generator.
//!
//! Holds the injected rule set and at most one cached profile per logical
//! session. `analyze_calendar` replaces the cache wholesale; there is no
//! incremental mutation, so a half-updated profile can never be observed.

use chrono::{Local, NaiveDate, Timelike, Weekday};

use crate::actions::{self, AssistantAction};
use crate::analyzer;
use crate::classify::classify_event;
use crate::messages;
use crate::rules::RuleSet;
use crate::today;
use crate::types::{
    AnalysisOptions, BurnoutWarning, CalendarEvent, ChronotypeKind, ClassifiedEvent, DnaProfile,
    RolloutPhase, SlotQuality, SpecialEvent, StressLevelKind, Suggestion, TimeSlot, TodayContext,
};

/// Returned by [`DnaEngine::best_focus_time`] when the profile has no
/// measured slot; `Fair` marks it as a guess rather than an observation.
const FALLBACK_FOCUS_SLOT: (Weekday, u8, u8) = (Weekday::Tue, 9, 11);

pub struct DnaEngine {
    rules: RuleSet,
    profile: Option<DnaProfile>,
}

impl DnaEngine {
    pub fn new() -> Self {
        Self::with_rules(RuleSet::default())
    }

    /// Build an engine around a custom rule set (already validated).
    pub fn with_rules(rules: RuleSet) -> Self {
        Self {
            rules,
            profile: None,
        }
    }

    pub fn rules(&self) -> &RuleSet {
        &self.rules
    }

    /// Run a full analysis as of today and cache the resulting profile.
    pub fn analyze_calendar(
        &mut self,
        events: &[CalendarEvent],
        options: &AnalysisOptions,
    ) -> DnaProfile {
        self.analyze_calendar_at(events, options, Local::now().date_naive())
    }

    /// Deterministic variant: run the analysis as of an explicit date.
    pub fn analyze_calendar_at(
        &mut self,
        events: &[CalendarEvent],
        options: &AnalysisOptions,
        today: NaiveDate,
    ) -> DnaProfile {
        let profile = analyzer::analyze(events, options, &self.rules, today);
        self.profile = Some(profile.clone());
        profile
    }

    /// The last-computed profile, if any analysis has run this session.
    pub fn profile(&self) -> Option<&DnaProfile> {
        self.profile.as_ref()
    }

    // -------------------------------------------------------------------------
    // Query accessors over the cached profile
    // -------------------------------------------------------------------------

    pub fn chronotype(&self) -> Option<ChronotypeKind> {
        self.profile.as_ref().map(|p| p.chronotype.kind)
    }

    pub fn stress_level(&self) -> Option<StressLevelKind> {
        self.profile.as_ref().map(|p| p.stress.level)
    }

    pub fn peak_hours(&self) -> Vec<u8> {
        self.profile
            .as_ref()
            .map(|p| p.energy_pattern.peak_hours.clone())
            .unwrap_or_default()
    }

    /// Best focus window: first excellent slot, else the longest measured
    /// slot, else a fair-quality guess.
    pub fn best_focus_time(&self) -> Option<TimeSlot> {
        let profile = self.profile.as_ref()?;
        let slots = &profile.focus_time.slots;

        let best = slots
            .iter()
            .find(|s| s.quality == SlotQuality::Excellent)
            .or_else(|| slots.iter().max_by_key(|s| s.end_hour - s.start_hour));

        Some(best.cloned().unwrap_or(TimeSlot {
            day: FALLBACK_FOCUS_SLOT.0,
            start_hour: FALLBACK_FOCUS_SLOT.1,
            end_hour: FALLBACK_FOCUS_SLOT.2,
            quality: SlotQuality::Fair,
        }))
    }

    // -------------------------------------------------------------------------
    // Today
    // -------------------------------------------------------------------------

    fn classify_all(&self, events: &[CalendarEvent]) -> Vec<ClassifiedEvent> {
        events.iter().map(|e| classify_event(e, &self.rules)).collect()
    }

    fn split_today_tomorrow(
        &self,
        events: &[CalendarEvent],
        date: NaiveDate,
    ) -> (Vec<ClassifiedEvent>, Vec<ClassifiedEvent>) {
        let today: Vec<ClassifiedEvent> = self.classify_all(
            &events
                .iter()
                .filter(|e| e.start.date() == date)
                .cloned()
                .collect::<Vec<_>>(),
        );
        let tomorrow: Vec<ClassifiedEvent> = self.classify_all(
            &events
                .iter()
                .filter(|e| e.start.date() == date + chrono::Duration::days(1))
                .cloned()
                .collect::<Vec<_>>(),
        );
        (today, tomorrow)
    }

    /// Situational read of `date` from the given events (today's and
    /// tomorrow's events are filtered out of the slice by start date).
    pub fn today_context(&self, events: &[CalendarEvent], date: NaiveDate) -> TodayContext {
        let (today_events, tomorrow_events) = self.split_today_tomorrow(events, date);
        today::analyze_today(&today_events, &tomorrow_events, self.profile.as_ref(), date)
    }

    /// Upcoming presentations within `days_ahead` days plus an overload
    /// alert when today is extreme.
    pub fn special_events(
        &self,
        events: &[CalendarEvent],
        days_ahead: u32,
        date: NaiveDate,
    ) -> Vec<SpecialEvent> {
        let context = self.today_context(events, date);
        let classified = self.classify_all(events);
        today::detect_special_events(&classified, date, days_ahead, context.busy_level)
    }

    /// Trailing 14-day burnout-risk read.
    pub fn burnout_risk(&self, events: &[CalendarEvent], date: NaiveDate) -> BurnoutWarning {
        let classified = self.classify_all(events);
        today::analyze_burnout_risk(&classified, self.profile.as_ref(), date)
    }

    /// Recommended assistant behaviors for right now. Empty until a
    /// profile exists.
    pub fn recommended_actions(
        &self,
        context: &TodayContext,
        now_hour: u32,
    ) -> Vec<AssistantAction> {
        match &self.profile {
            Some(profile) => actions::recommended_actions(profile, context, now_hour, &self.rules),
            None => Vec::new(),
        }
    }

    // -------------------------------------------------------------------------
    // Messages
    // -------------------------------------------------------------------------

    /// Phase-appropriate suggestions. Empty until a profile exists.
    pub fn generate_suggestions(&self, phase: RolloutPhase) -> Vec<Suggestion> {
        match &self.profile {
            Some(profile) => messages::generate_suggestions(profile, phase),
            None => Vec::new(),
        }
    }

    pub fn stress_messages(&self) -> Vec<Suggestion> {
        match &self.profile {
            Some(profile) => messages::stress_messages(profile),
            None => Vec::new(),
        }
    }

    pub fn balance_messages(&self) -> Vec<Suggestion> {
        match &self.profile {
            Some(profile) => messages::balance_messages(profile),
            None => Vec::new(),
        }
    }

    pub fn morning_briefing(&self, today_event_count: usize, next_meeting: Option<&str>) -> String {
        self.morning_briefing_at(
            today_event_count,
            next_meeting,
            Local::now().date_naive(),
        )
    }

    pub fn morning_briefing_at(
        &self,
        today_event_count: usize,
        next_meeting: Option<&str>,
        date: NaiveDate,
    ) -> String {
        messages::morning_briefing(
            self.profile.as_ref(),
            today_event_count,
            next_meeting,
            None,
            None,
            date,
        )
    }

    pub fn evening_message(&self, completed: usize, total: usize) -> String {
        messages::evening_message(self.profile.as_ref(), completed, total)
    }

    /// Current local hour, for callers that want "now" semantics on
    /// [`Self::recommended_actions`].
    pub fn current_hour() -> u32 {
        Local::now().time().hour()
    }
}

impl Default for DnaEngine {
    fn default() -> Self {
        Self::new()
    }
}

// =============================================================================
// Tests
// =============================================================================
