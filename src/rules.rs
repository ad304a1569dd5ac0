//! Immutable, versioned rule configuration for the engine.
//!
//! Keyword tables carry an explicit priority per category, so reordering the
//! table cannot silently change classification. Confidence thresholds live in
//! one table keyed by dimension instead of being hard-coded per branch. The
//! insight→action mapping is declarative data. A `RuleSet` is injected into
//! the engine and never mutated, so tenants can tune rules independently.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::actions::AssistantAction;
use crate::error::RuleError;
use crate::types::{
    BalanceStatus, BusyLevel, ChronotypeKind, Confidence, EventCategory, InsightKind,
    ProfileDimension, StressLevelKind,
};

/// Highest rule-set version this build understands.
pub const RULES_SCHEMA_VERSION: u32 = 1;

/// Fallback thresholds for dimensions missing from the table.
const DEFAULT_HIGH_AT: usize = 20;
const DEFAULT_MEDIUM_AT: usize = 10;

// =============================================================================
// Keyword rules
// =============================================================================

/// Keywords that map a title to a category. Lower `priority` wins first.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct KeywordRule {
    pub category: EventCategory,
    pub priority: u8,
    pub keywords: Vec<String>,
}

// =============================================================================
// Confidence thresholds
// =============================================================================

/// Sample-count thresholds for one dimension's confidence tiers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ConfidenceThreshold {
    pub high_at: usize,
    pub medium_at: usize,
}

impl ConfidenceThreshold {
    pub fn tier(&self, samples: usize) -> Confidence {
        if samples >= self.high_at {
            Confidence::High
        } else if samples >= self.medium_at {
            Confidence::Medium
        } else {
            Confidence::Low
        }
    }
}

// =============================================================================
// Action rules
// =============================================================================

/// Condition under which an action rule fires.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "camelCase")]
pub enum RuleCondition {
    ChronotypeIs { value: ChronotypeKind },
    StressIs { value: StressLevelKind },
    BalanceIs { value: BalanceStatus },
    BusyAtLeast { value: BusyLevel },
    HasConsecutiveMeetings,
    CurrentHourInPeak,
    CurrentHourInLow,
}

/// One row of the insight→action table.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ActionRule {
    pub insight: InsightKind,
    pub when: RuleCondition,
    pub actions: Vec<AssistantAction>,
}

// =============================================================================
// Rule set
// =============================================================================

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RuleSet {
    pub version: u32,
    pub keywords: Vec<KeywordRule>,
    /// Titles matching these mark a recurring event as an exercise routine.
    pub exercise_keywords: Vec<String>,
    pub confidence: HashMap<ProfileDimension, ConfidenceThreshold>,
    /// Evaluated in order; actions deduplicate downstream.
    pub action_rules: Vec<ActionRule>,
}

impl RuleSet {
    /// Parse and validate a rule set from JSON.
    pub fn from_json(json: &str) -> Result<Self, RuleError> {
        let rules: RuleSet = serde_json::from_str(json)?;
        rules.validate()?;
        Ok(rules)
    }

    pub fn validate(&self) -> Result<(), RuleError> {
        if self.version > RULES_SCHEMA_VERSION {
            return Err(RuleError::UnsupportedVersion {
                found: self.version,
                supported: RULES_SCHEMA_VERSION,
            });
        }

        let mut seen_categories = Vec::new();
        let mut seen_priorities = Vec::new();
        for rule in &self.keywords {
            if seen_categories.contains(&rule.category) {
                return Err(RuleError::DuplicateCategory(rule.category.as_str().into()));
            }
            if seen_priorities.contains(&rule.priority) {
                return Err(RuleError::DuplicatePriority(rule.priority));
            }
            if rule.keywords.is_empty() {
                return Err(RuleError::EmptyKeywords(rule.category.as_str().into()));
            }
            seen_categories.push(rule.category);
            seen_priorities.push(rule.priority);
        }

        for (dimension, threshold) in &self.confidence {
            if threshold.high_at < threshold.medium_at {
                return Err(RuleError::InvertedThresholds {
                    dimension: format!("{:?}", dimension),
                    high_at: threshold.high_at,
                    medium_at: threshold.medium_at,
                });
            }
        }

        for (index, rule) in self.action_rules.iter().enumerate() {
            if rule.actions.is_empty() {
                return Err(RuleError::EmptyActionRule(index));
            }
        }

        Ok(())
    }

    /// Keyword rules sorted by ascending priority (first match wins).
    pub fn keyword_rules_by_priority(&self) -> Vec<&KeywordRule> {
        let mut rules: Vec<&KeywordRule> = self.keywords.iter().collect();
        rules.sort_by_key(|r| r.priority);
        rules
    }

    /// Confidence tier for a dimension given its sample count.
    pub fn confidence_tier(&self, dimension: ProfileDimension, samples: usize) -> Confidence {
        self.confidence
            .get(&dimension)
            .copied()
            .unwrap_or(ConfidenceThreshold {
                high_at: DEFAULT_HIGH_AT,
                medium_at: DEFAULT_MEDIUM_AT,
            })
            .tier(samples)
    }
}

impl Default for RuleSet {
    fn default() -> Self {
        Self {
            version: RULES_SCHEMA_VERSION,
            keywords: default_keywords(),
            exercise_keywords: to_strings(&[
                "gym", "workout", "run", "running", "yoga", "swim", "pilates", "crossfit",
                "exercise", "climbing",
            ]),
            confidence: default_confidence(),
            action_rules: default_action_rules(),
        }
    }
}

fn to_strings(words: &[&str]) -> Vec<String> {
    words.iter().map(|w| w.to_string()).collect()
}

fn default_keywords() -> Vec<KeywordRule> {
    let table: &[(EventCategory, u8, &[&str])] = &[
        (
            EventCategory::Presentation,
            1,
            &["presentation", "present", "demo", "pitch", "keynote", "showcase", "talk"],
        ),
        (
            EventCategory::OneOnOne,
            2,
            &["1:1", "1-1", "one on one", "1-on-1", "one-on-one"],
        ),
        (
            EventCategory::Health,
            3,
            &["doctor", "dentist", "therapy", "clinic", "checkup", "physio", "appointment"],
        ),
        (
            EventCategory::Meal,
            4,
            &["lunch", "dinner", "breakfast", "brunch", "coffee"],
        ),
        (
            EventCategory::Personal,
            5,
            &["birthday", "family", "errand", "shopping", "vacation", "holiday", "personal"],
        ),
        (EventCategory::Break, 6, &["break", "rest", "walk", "nap"]),
        (
            EventCategory::Focus,
            7,
            &["focus", "deep work", "writing", "study", "coding", "heads down", "no meetings"],
        ),
        (
            EventCategory::Meeting,
            8,
            &[
                "meeting", "sync", "standup", "stand-up", "scrum", "review", "planning",
                "retro", "call", "huddle", "check-in", "weekly", "daily", "kickoff",
            ],
        ),
    ];

    table
        .iter()
        .map(|(category, priority, keywords)| KeywordRule {
            category: *category,
            priority: *priority,
            keywords: to_strings(keywords),
        })
        .collect()
}

fn default_confidence() -> HashMap<ProfileDimension, ConfidenceThreshold> {
    let standard = ConfidenceThreshold {
        high_at: DEFAULT_HIGH_AT,
        medium_at: DEFAULT_MEDIUM_AT,
    };
    // Energy patterns need more samples before the histogram stabilizes.
    let energy = ConfidenceThreshold {
        high_at: 30,
        medium_at: 15,
    };

    HashMap::from([
        (ProfileDimension::Chronotype, standard),
        (ProfileDimension::EnergyPattern, energy),
        (ProfileDimension::WorkStyle, standard),
        (ProfileDimension::Stress, standard),
        (ProfileDimension::Balance, standard),
        (ProfileDimension::FocusTime, standard),
        (ProfileDimension::WeekdayPatterns, standard),
    ])
}

fn default_action_rules() -> Vec<ActionRule> {
    use AssistantAction::*;
    use RuleCondition::*;

    let rule = |insight, when, actions: &[AssistantAction]| ActionRule {
        insight,
        when,
        actions: actions.to_vec(),
    };

    vec![
        rule(
            InsightKind::Chronotype,
            ChronotypeIs {
                value: ChronotypeKind::Morning,
            },
            &[RecommendMorningTask],
        ),
        rule(
            InsightKind::Chronotype,
            ChronotypeIs {
                value: ChronotypeKind::Evening,
            },
            &[MinimizeMorningAlerts, RecommendAfternoonTask],
        ),
        rule(
            InsightKind::StressLevel,
            StressIs {
                value: StressLevelKind::Medium,
            },
            &[SendEncouragement],
        ),
        rule(
            InsightKind::StressLevel,
            StressIs {
                value: StressLevelKind::High,
            },
            &[SoftenTone, SuggestBreak],
        ),
        rule(
            InsightKind::StressLevel,
            StressIs {
                value: StressLevelKind::Burnout,
            },
            &[WarnBurnout, EmphasizeRest, ReduceTaskLoad, SoftenTone],
        ),
        rule(
            InsightKind::WorkLifeBalance,
            BalanceIs {
                value: BalanceStatus::Poor,
            },
            &[EmphasizeRest, SuggestBreak],
        ),
        rule(
            InsightKind::WorkLifeBalance,
            BalanceIs {
                value: BalanceStatus::Good,
            },
            &[CelebrateProgress],
        ),
        rule(
            InsightKind::BusyLevel,
            BusyAtLeast {
                value: BusyLevel::Heavy,
            },
            &[ReduceTaskLoad, ProtectFocusTime],
        ),
        rule(
            InsightKind::BusyLevel,
            BusyAtLeast {
                value: BusyLevel::Extreme,
            },
            &[SoftenTone, EmphasizeRest],
        ),
        rule(
            InsightKind::ConsecutiveMeetings,
            HasConsecutiveMeetings,
            &[SuggestBreak],
        ),
        rule(
            InsightKind::EnergyPattern,
            CurrentHourInPeak,
            &[ProtectFocusTime],
        ),
        rule(
            InsightKind::EnergyPattern,
            CurrentHourInLow,
            &[SuggestBreak, RecommendAfternoonTask],
        ),
    ]
}

// =============================================================================
// Tests
// =============================================================================
