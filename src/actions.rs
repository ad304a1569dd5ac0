//! Insight-to-action mapping: evaluates the rule table against the profile
//! and today's context, producing a deduplicated set of assistant behaviors,
//! plus confidence-calibrated phrasing and briefing tone/greetings.

use chrono::{Datelike, NaiveDate};

use serde::{Deserialize, Serialize};

use crate::rules::{RuleCondition, RuleSet};
use crate::types::{
    BalanceStatus, BusyLevel, Confidence, DnaProfile, StressLevelKind, TodayContext, Tone,
};

/// The closed vocabulary of behaviors the assistant can adopt today.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum AssistantAction {
    RecommendMorningTask,
    RecommendAfternoonTask,
    MinimizeMorningAlerts,
    SuggestBreak,
    SoftenTone,
    EmphasizeRest,
    ProtectFocusTime,
    ReduceTaskLoad,
    WarnBurnout,
    CelebrateProgress,
    SendEncouragement,
}

impl AssistantAction {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::RecommendMorningTask => "recommend-morning-task",
            Self::RecommendAfternoonTask => "recommend-afternoon-task",
            Self::MinimizeMorningAlerts => "minimize-morning-alerts",
            Self::SuggestBreak => "suggest-break",
            Self::SoftenTone => "soften-tone",
            Self::EmphasizeRest => "emphasize-rest",
            Self::ProtectFocusTime => "protect-focus-time",
            Self::ReduceTaskLoad => "reduce-task-load",
            Self::WarnBurnout => "warn-burnout",
            Self::CelebrateProgress => "celebrate-progress",
            Self::SendEncouragement => "send-encouragement",
        }
    }

    /// Fixed guidance shown to whoever applies the action.
    pub fn guidance(&self) -> &'static str {
        match self {
            Self::RecommendMorningTask => {
                "Surface the most important task early — mornings are this user's strong hours."
            }
            Self::RecommendAfternoonTask => {
                "Hold substantial asks for the afternoon, when this user actually gets going."
            }
            Self::MinimizeMorningAlerts => {
                "Keep early notifications to a minimum; mornings are slow-start time."
            }
            Self::SuggestBreak => "Propose a short break at the next natural gap.",
            Self::SoftenTone => "Drop the cheerleading; keep messages short and calm.",
            Self::EmphasizeRest => "Lead with recovery: rest is the productive move right now.",
            Self::ProtectFocusTime => {
                "Discourage new bookings over open focus windows; they are scarce."
            }
            Self::ReduceTaskLoad => "Trim today's plan to essentials; defer what can wait.",
            Self::WarnBurnout => "Name the burnout pattern directly and recommend stepping back.",
            Self::CelebrateProgress => "Acknowledge what's going well before asking for more.",
            Self::SendEncouragement => "A small supportive nudge is welcome; keep it light.",
        }
    }
}

fn condition_matches(
    condition: &RuleCondition,
    profile: &DnaProfile,
    context: &TodayContext,
    current_hour: u32,
) -> bool {
    match condition {
        RuleCondition::ChronotypeIs { value } => profile.chronotype.kind == *value,
        RuleCondition::StressIs { value } => profile.stress.level == *value,
        RuleCondition::BalanceIs { value } => profile.balance.status == *value,
        RuleCondition::BusyAtLeast { value } => context.busy_level >= *value,
        RuleCondition::HasConsecutiveMeetings => context.has_consecutive_meetings,
        RuleCondition::CurrentHourInPeak => profile
            .energy_pattern
            .peak_hours
            .contains(&(current_hour as u8)),
        RuleCondition::CurrentHourInLow => profile
            .energy_pattern
            .low_hours
            .contains(&(current_hour as u8)),
    }
}

/// Evaluate the rule table in order and return the deduplicated action set.
pub fn recommended_actions(
    profile: &DnaProfile,
    context: &TodayContext,
    current_hour: u32,
    rules: &RuleSet,
) -> Vec<AssistantAction> {
    let mut actions: Vec<AssistantAction> = Vec::new();
    for rule in &rules.action_rules {
        if condition_matches(&rule.when, profile, context, current_hour) {
            for action in &rule.actions {
                if !actions.contains(action) {
                    actions.push(*action);
                }
            }
        }
    }
    actions
}

/// Wrap a bare statement so it reads as a guess, an observation, or a
/// confident assertion depending on how much data backs it.
pub fn phrase_with_confidence(statement: &str, confidence: Confidence) -> String {
    match confidence {
        Confidence::Low => format!(
            "{} — at least that's my early guess; I'm still learning your rhythm.",
            statement
        ),
        Confidence::Medium => format!("{}, from what I've seen so far.", statement),
        Confidence::High => format!("{} — your calendar makes that pretty clear.", statement),
    }
}

/// Pick the briefing tone: explicit override first, then profile severity,
/// then today's load, defaulting to energetic.
pub fn briefing_tone(
    profile: &DnaProfile,
    override_tone: Option<Tone>,
    busy: Option<BusyLevel>,
) -> Tone {
    if let Some(tone) = override_tone {
        return tone;
    }
    if profile.stress.level == StressLevelKind::Burnout {
        return Tone::Supportive;
    }
    if profile.stress.level == StressLevelKind::High {
        return Tone::Gentle;
    }
    if profile.balance.status == BalanceStatus::Poor {
        return Tone::Gentle;
    }
    if matches!(busy, Some(BusyLevel::Heavy) | Some(BusyLevel::Extreme)) {
        return Tone::Gentle;
    }
    Tone::Energetic
}

const ENERGETIC_GREETINGS: [&str; 3] = [
    "Good morning! Let's make today count.",
    "Morning! Today looks workable — let's get into it.",
    "Up and at it — here's how your day is shaping up.",
];

const GENTLE_GREETINGS: [&str; 3] = [
    "Good morning. No rush — here's the lay of the land.",
    "Morning. Let's keep today manageable.",
    "Good morning. One thing at a time today.",
];

const SUPPORTIVE_GREETINGS: [&str; 3] = [
    "Good morning. Be kind to yourself today.",
    "Morning. You've been carrying a lot — let's keep today light.",
    "Good morning. Today is a good day to protect your energy.",
];

/// Deterministic greeting for a tone, rotating by day of year.
pub fn greeting(tone: Tone, date: NaiveDate) -> &'static str {
    let templates = match tone {
        Tone::Energetic => &ENERGETIC_GREETINGS,
        Tone::Gentle => &GENTLE_GREETINGS,
        Tone::Supportive => &SUPPORTIVE_GREETINGS,
    };
    templates[date.ordinal() as usize % templates.len()]
}

// =============================================================================
// Tests
// =============================================================================
