//! Achievement checkers
//!
//! Each checker turns one event plus the counters it needs into an
//! [`Observation`] and evaluates every catalog badge against it. A badge's
//! own [`Requirement`] decides whether it unlocks; the checkers never name
//! badge ids. Requirements whose inputs a checker does not observe are
//! simply not met.
//!
//! The returned set is what *this* event qualifies for. Callers diff it
//! against the badges a family already holds before persisting.

use std::collections::BTreeSet;

use chrono::{DateTime, FixedOffset, Timelike};

use super::CountChange;
use super::catalog::all_badges;
use crate::models::{AchievementCheckContext, ActionType, Condition, Metric, Requirement};

const EARLY_BEFORE_HOUR: u32 = 8;
const LATE_FROM_HOUR: u32 = 22;

/// Member participation within the active window
#[derive(Debug, Clone, Copy)]
struct Participation {
    active: u32,
    total: u32,
}

impl Participation {
    /// A family of one has no team; more active members than members is
    /// malformed input and never qualifies.
    fn reaches(&self, percent: u32) -> bool {
        self.total > 1
            && self.active <= self.total
            && u64::from(self.active) * 100 >= u64::from(percent) * u64::from(self.total)
    }
}

/// Everything a single event lets the rules see.
#[derive(Debug)]
struct Observation {
    action: ActionType,
    counts: Vec<(Metric, CountChange)>,
    streak_days: Option<CountChange>,
    participation: Option<Participation>,
    local_hour: Option<u32>,
}

impl Observation {
    fn new(action: ActionType) -> Self {
        Self {
            action,
            counts: Vec::new(),
            streak_days: None,
            participation: None,
            local_hour: None,
        }
    }

    fn with_count(mut self, metric: Metric, change: CountChange) -> Self {
        self.counts.push((metric, change));
        self
    }

    fn count(&self, metric: Metric) -> Option<CountChange> {
        self.counts
            .iter()
            .find(|(m, _)| *m == metric)
            .map(|(_, change)| *change)
    }

    fn count_crossed(&self, metric: Metric, target: u32) -> bool {
        self.count(metric).is_some_and(|c| c.crossed(target))
    }
}

fn is_met(requirement: &Requirement, obs: &Observation) -> bool {
    match *requirement {
        Requirement::Count { metric, target } => obs.count_crossed(metric, target),
        Requirement::Streak { target, .. } => obs.streak_days.is_some_and(|s| s.crossed(target)),
        Requirement::Percentage { target, .. } => {
            obs.participation.is_some_and(|p| p.reaches(target))
        }
        Requirement::Special { target, condition } => match condition {
            Condition::EarlyCompletion => obs.local_hour.is_some_and(|h| h < EARLY_BEFORE_HOUR),
            Condition::LateCompletion => obs.local_hour.is_some_and(|h| h >= LATE_FROM_HOUR),
            Condition::CreateList => {
                obs.action == ActionType::ListCreated && obs.count_crossed(Metric::Lists, target)
            }
            Condition::FirstBudgetEntry => {
                obs.action == ActionType::BudgetTransaction
                    && obs.count_crossed(Metric::BudgetTransactions, target)
            }
        },
    }
}

fn evaluate(obs: &Observation) -> BTreeSet<&'static str> {
    all_badges()
        .iter()
        .filter(|badge| is_met(&badge.requirements, obs))
        .map(|badge| badge.id)
        .collect()
}

/// Badges unlocked by a member completing a task.
///
/// `completed_tasks` counts the acting member's completions, `streak_days` the
/// consecutive days they completed at least one task. The hour of
/// `completed_at` in its own offset is the local completion hour.
pub fn check_task_completion_badges(
    context: &AchievementCheckContext,
    completed_tasks: CountChange,
    streak_days: CountChange,
    completed_at: DateTime<FixedOffset>,
) -> BTreeSet<&'static str> {
    let mut obs =
        Observation::new(context.action).with_count(Metric::CompletedTasks, completed_tasks);
    obs.streak_days = Some(streak_days);
    obs.local_hour = Some(completed_at.hour());
    evaluate(&obs)
}

/// Badges unlocked by family-wide task activity.
pub fn check_collaboration_badges(
    context: &AchievementCheckContext,
    family_completed_tasks: CountChange,
    active_members_this_week: u32,
    total_family_members: u32,
) -> BTreeSet<&'static str> {
    let mut obs = Observation::new(context.action)
        .with_count(Metric::FamilyCompletedTasks, family_completed_tasks);
    obs.participation = Some(Participation {
        active: active_members_this_week,
        total: total_family_members,
    });
    evaluate(&obs)
}

/// Badges unlocked by list, budget and level milestones.
///
/// Budget counts are only observed on a `budget_transaction` action.
pub fn check_milestone_badges(
    context: &AchievementCheckContext,
    lists: CountChange,
    completed_lists: CountChange,
    budget_transactions: CountChange,
    family_level: CountChange,
) -> BTreeSet<&'static str> {
    let mut obs = Observation::new(context.action)
        .with_count(Metric::Lists, lists)
        .with_count(Metric::CompletedLists, completed_lists)
        .with_count(Metric::FamilyLevel, family_level);
    if context.action == ActionType::BudgetTransaction {
        obs = obs.with_count(Metric::BudgetTransactions, budget_transactions);
    }
    evaluate(&obs)
}
