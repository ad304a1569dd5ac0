use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc, Weekday};
use serde::{Deserialize, Serialize};

// =============================================================================
// Input events
// =============================================================================

/// Which calendar an event lives on, as reported by the provider.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CalendarKind {
    Work,
    Personal,
    Unknown,
}

/// Provider-reported event status.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EventStatus {
    Confirmed,
    Tentative,
    Cancelled,
}

/// One calendar entry as supplied by the provider collaborator.
///
/// Timestamps are provider-localized wall-clock times; timezone resolution
/// happens before events reach this crate. Well-formedness (`end >= start`)
/// is a provider precondition and is not validated here.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CalendarEvent {
    pub id: String,
    pub title: String,
    pub start: NaiveDateTime,
    pub end: NaiveDateTime,
    pub is_all_day: bool,
    pub attendee_count: u32,
    pub calendar: CalendarKind,
    pub is_recurring: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<NaiveDateTime>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<NaiveDateTime>,
    pub status: EventStatus,
}

// =============================================================================
// Classification
// =============================================================================

/// Semantic category inferred from an event's title.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum EventCategory {
    Meeting,
    Focus,
    Presentation,
    OneOnOne,
    Meal,
    Health,
    Personal,
    Break,
    Other,
}

impl EventCategory {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Meeting => "meeting",
            Self::Focus => "focus",
            Self::Presentation => "presentation",
            Self::OneOnOne => "one_on_one",
            Self::Meal => "meal",
            Self::Health => "health",
            Self::Personal => "personal",
            Self::Break => "break",
            Self::Other => "other",
        }
    }

    /// Categories that represent scheduled time with other people.
    pub fn is_meeting_like(&self) -> bool {
        matches!(self, Self::Meeting | Self::Presentation | Self::OneOnOne)
    }
}

/// Energy cost of attending an event.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EnergyLevel {
    High,
    Medium,
    Low,
    Recovery,
}

/// Meeting size bucket, derived from attendee count.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum MeetingIntensity {
    Solo,
    OneOnOne,
    Small,
    Medium,
    Large,
}

/// A calendar event plus its inferred semantics. Owns a copy of the source
/// event; derived values never hold references back into provider data.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ClassifiedEvent {
    pub event: CalendarEvent,
    pub category: EventCategory,
    pub energy: EnergyLevel,
    /// Present only for meeting-like categories.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub intensity: Option<MeetingIntensity>,
}

// =============================================================================
// Confidence
// =============================================================================

/// How much data backs an inference. Exactly three tiers, everywhere.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Confidence {
    Low,
    Medium,
    High,
}

impl Confidence {
    pub fn tier(&self) -> u8 {
        match self {
            Self::Low => 1,
            Self::Medium => 2,
            Self::High => 3,
        }
    }
}

/// Profile dimensions, used to key the confidence-threshold table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ProfileDimension {
    Chronotype,
    EnergyPattern,
    WorkStyle,
    Stress,
    Balance,
    FocusTime,
    WeekdayPatterns,
}

// =============================================================================
// Profile dimensions
// =============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ChronotypeKind {
    Morning,
    Evening,
    Neutral,
}

/// Inferred morning/evening preference from first-event timing.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Chronotype {
    pub kind: ChronotypeKind,
    /// Average first-event time as "HH:MM".
    pub first_event_avg_time: String,
    pub confidence: Confidence,
}

/// Hours of day with highest/lowest observed scheduling load.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EnergyPattern {
    /// Up to 3 busiest start-hours within 8–20.
    pub peak_hours: Vec<u8>,
    /// 2 quietest hours within 12–16; [14, 15] when no afternoon data exists.
    pub low_hours: Vec<u8>,
    pub confidence: Confidence,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum WorkStyleKind {
    Collaborative,
    Independent,
    Balanced,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WorkStyle {
    pub kind: WorkStyleKind,
    /// Meeting-like events as a percentage of work-calendar events.
    pub meeting_ratio: u8,
    pub prefers_routine: bool,
    pub prefers_solo: bool,
    pub confidence: Confidence,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StressLevelKind {
    Low,
    Medium,
    High,
    Burnout,
}

impl StressLevelKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Low => "low",
            Self::Medium => "medium",
            Self::High => "high",
            Self::Burnout => "burnout",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StressIndicators {
    pub level: StressLevelKind,
    /// Cancellations in the trailing 7 days.
    pub recent_cancellations: u32,
    /// Distinct weekend dates with non-personal events.
    pub weekend_work_days: u32,
    /// Average free minutes per event day on a 540-minute workday model.
    pub avg_free_minutes: u32,
    pub confidence: Confidence,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BalanceStatus {
    Good,
    Moderate,
    Poor,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WorkLifeBalance {
    pub status: BalanceStatus,
    /// Personal events as a percentage of all events.
    pub personal_ratio: u8,
    /// Distinct dates with a non-personal event starting at/after 19:00.
    pub after_hours_days: u32,
    pub has_exercise_routine: bool,
    pub confidence: Confidence,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SlotQuality {
    Fair,
    Good,
    Excellent,
}

/// A contiguous event-free window on a given weekday.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TimeSlot {
    pub day: Weekday,
    pub start_hour: u8,
    pub end_hour: u8,
    pub quality: SlotQuality,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FocusTime {
    /// Up to 5 slots, in scan order (Mon→Fri, morning→evening).
    pub slots: Vec<TimeSlot>,
    /// Total kept free hours spread over a 5-day week.
    pub avg_deep_work_hours: f64,
    pub confidence: Confidence,
}

/// Event/meeting load for one weekday.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WeekdayLoad {
    pub day: Weekday,
    pub events: u32,
    pub meetings: u32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WeekdayPatterns {
    pub loads: Vec<WeekdayLoad>,
    /// Busiest weekday, Mon–Fri only.
    pub busiest_day: Weekday,
    /// Lightest weekday, Mon–Fri only.
    pub lightest_day: Weekday,
    /// Weekdays whose meeting count exceeds 1.3× the Mon–Fri average.
    pub meeting_heavy_days: Vec<Weekday>,
    pub confidence: Confidence,
}

/// The seven-dimension inferred behavioral signature for one user.
///
/// A fresh value per analysis run; never mutated in place. Serializes and
/// round-trips exactly so the caller can persist and re-supply it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DnaProfile {
    pub chronotype: Chronotype,
    pub energy_pattern: EnergyPattern,
    pub work_style: WorkStyle,
    pub stress: StressIndicators,
    pub balance: WorkLifeBalance,
    pub focus_time: FocusTime,
    pub weekday_patterns: WeekdayPatterns,
    pub analyzed_events_count: usize,
    pub range_start: NaiveDate,
    pub range_end: NaiveDate,
    pub last_analyzed_at: DateTime<Utc>,
    pub schema_version: u32,
}

// =============================================================================
// Today context
// =============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BusyLevel {
    Light,
    Normal,
    Heavy,
    Extreme,
}

impl BusyLevel {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Light => "light",
            Self::Normal => "normal",
            Self::Heavy => "heavy",
            Self::Extreme => "extreme",
        }
    }
}

/// How the assistant should sound today.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Tone {
    Energetic,
    Gentle,
    Supportive,
}

/// Situational read of the current day. Recomputed on each query.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TodayContext {
    pub date: NaiveDate,
    pub busy_level: BusyLevel,
    pub meeting_count: usize,
    pub free_minutes: u32,
    pub energy_drain: u32,
    pub has_consecutive_meetings: bool,
    pub has_presentation_today: bool,
    pub has_presentation_tomorrow: bool,
    pub has_lunch_break: bool,
    /// First non-all-day event start as "HH:MM".
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub first_event: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_event: Option<String>,
    pub suggested_tone: Tone,
}

/// Alert emitted when an upcoming event deserves advance attention.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum SpecialEventKind {
    Presentation,
    Overload,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SpecialEvent {
    pub kind: SpecialEventKind,
    pub message: String,
    pub date: NaiveDate,
    pub days_away: u32,
}

// =============================================================================
// Burnout
// =============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BurnoutLevel {
    None,
    Watch,
    Warning,
    Critical,
}

/// 14-day burnout-risk read: ordered evidence plus one recommendation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BurnoutWarning {
    pub level: BurnoutLevel,
    pub signals: Vec<String>,
    pub recommendation: String,
}

// =============================================================================
// Suggestions
// =============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SuggestionKind {
    Briefing,
    Nudge,
    Warning,
    Celebration,
}

/// Which inference contributed to a suggestion or action.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum InsightKind {
    Chronotype,
    EnergyPattern,
    WorkStyle,
    StressLevel,
    WorkLifeBalance,
    FocusTime,
    BusyLevel,
    ConsecutiveMeetings,
}

/// One piece of generated guidance. Consumed and discarded by the caller.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Suggestion {
    pub kind: SuggestionKind,
    pub message: String,
    pub sources: Vec<InsightKind>,
    /// 1 is most urgent.
    pub priority: u8,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub action_label: Option<String>,
}

/// How long the engine has been observing this user; gates claim specificity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum RolloutPhase {
    DayOne,
    WeekOne,
    Established,
}

// =============================================================================
// Analysis options
// =============================================================================

/// Options for a profile analysis run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalysisOptions {
    /// How far back from today to look.
    #[serde(default = "default_days_back")]
    pub days_back: u32,
    #[serde(default = "default_include_recurring")]
    pub include_recurring: bool,
    /// Below this many in-range events the run returns the neutral profile.
    #[serde(default)]
    pub min_events: usize,
}

fn default_days_back() -> u32 {
    30
}

fn default_include_recurring() -> bool {
    true
}

impl Default for AnalysisOptions {
    fn default() -> Self {
        Self {
            days_back: default_days_back(),
            include_recurring: default_include_recurring(),
            min_events: 0,
        }
    }
}
