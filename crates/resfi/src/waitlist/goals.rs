use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Closed set of intents a visitor can select on the waitlist form.
///
/// The variants are statically bound to the rendered checklist; an
/// unrecognized goal is a compile-time concern, not a runtime one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Goal {
    Debt,
    Loan,
    Savings,
    Automate,
}

impl Goal {
    pub const ALL: [Goal; 4] = [Goal::Debt, Goal::Loan, Goal::Savings, Goal::Automate];

    /// Wire key used in the collaborator payload and stored entries.
    pub const fn key(self) -> &'static str {
        match self {
            Goal::Debt => "debt",
            Goal::Loan => "loan",
            Goal::Savings => "savings",
            Goal::Automate => "automate",
        }
    }

    /// Checklist label shown next to the checkbox.
    pub const fn label(self) -> &'static str {
        match self {
            Goal::Debt => "Pay off my debt faster",
            Goal::Loan => "Get a new loan",
            Goal::Savings => "Earn more interest on my savings",
            Goal::Automate => "Automate my money",
        }
    }
}

impl fmt::Display for Goal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

impl FromStr for Goal {
    type Err = String;

    fn from_str(raw: &str) -> Result<Self, Self::Err> {
        match raw.trim().to_ascii_lowercase().as_str() {
            "debt" => Ok(Goal::Debt),
            "loan" => Ok(Goal::Loan),
            "savings" => Ok(Goal::Savings),
            "automate" => Ok(Goal::Automate),
            other => Err(format!(
                "unknown goal '{other}' (expected one of: debt, loan, savings, automate)"
            )),
        }
    }
}

/// Selection state for the fixed goal checklist.
///
/// The map always contains exactly the [`Goal::ALL`] keys; toggling flips a
/// value in place and never introduces ad-hoc keys.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GoalSelection {
    selected: BTreeMap<Goal, bool>,
}

impl Default for GoalSelection {
    fn default() -> Self {
        Self {
            selected: Goal::ALL.iter().map(|goal| (*goal, false)).collect(),
        }
    }
}

impl GoalSelection {
    /// Flip the checkbox for `goal`.
    pub fn toggle(&mut self, goal: Goal) {
        let slot = self.selected.entry(goal).or_insert(false);
        *slot = !*slot;
    }

    pub fn is_selected(&self, goal: Goal) -> bool {
        self.selected.get(&goal).copied().unwrap_or(false)
    }

    /// True iff at least one goal is checked; precondition for submission.
    pub fn has_any_selected(&self) -> bool {
        self.selected.values().any(|checked| *checked)
    }

    pub fn selected_goals(&self) -> Vec<Goal> {
        self.selected
            .iter()
            .filter(|(_, checked)| **checked)
            .map(|(goal, _)| *goal)
            .collect()
    }

    pub fn iter(&self) -> impl Iterator<Item = (Goal, bool)> + '_ {
        self.selected.iter().map(|(goal, checked)| (*goal, *checked))
    }

    pub fn clear(&mut self) {
        for checked in self.selected.values_mut() {
            *checked = false;
        }
    }
}
