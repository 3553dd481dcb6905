use crate::core::registry::Domain;
use crate::utils::error::{Result, WizardError};
use serde::{Deserialize, Serialize};

/// How a cursor treats steps outside `1..=N`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[cfg_attr(feature = "cli", derive(clap::ValueEnum))]
#[serde(rename_all = "lowercase")]
pub enum CursorPolicy {
    /// Store the value as given. Out-of-range values collapse every section.
    #[default]
    Accept,
    Clamp,
    Reject,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum SectionState {
    Expanded,
    Collapsed,
}

/// Which accordion section of one wizard is open.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StepCursor {
    domain: Domain,
    steps: u32,
    current: i64,
    policy: CursorPolicy,
}

impl StepCursor {
    pub fn new(domain: Domain, initial: i64, policy: CursorPolicy) -> Self {
        Self {
            domain,
            steps: domain.steps(),
            current: initial,
            policy,
        }
    }

    pub fn current(&self) -> i64 {
        self.current
    }

    pub fn steps(&self) -> u32 {
        self.steps
    }

    pub fn policy(&self) -> CursorPolicy {
        self.policy
    }

    pub fn in_range(&self, step: i64) -> bool {
        (1..=i64::from(self.steps)).contains(&step)
    }

    /// Moves the cursor and returns the value actually stored.
    pub fn advance_to(&mut self, step: i64) -> Result<i64> {
        let next = match self.policy {
            CursorPolicy::Accept => {
                if !self.in_range(step) {
                    tracing::warn!(
                        domain = %self.domain,
                        step,
                        steps = self.steps,
                        "Cursor set outside of its sections; all sections collapse"
                    );
                }
                step
            }
            CursorPolicy::Clamp => step.clamp(1, i64::from(self.steps)),
            CursorPolicy::Reject => {
                if !self.in_range(step) {
                    return Err(WizardError::StepOutOfRange {
                        domain: self.domain,
                        step,
                        steps: self.steps,
                    });
                }
                step
            }
        };
        self.current = next;
        Ok(next)
    }

    pub fn is_active(&self, section: i64) -> bool {
        section == self.current
    }

    pub fn active_section(&self) -> Option<i64> {
        self.in_range(self.current).then_some(self.current)
    }

    pub fn sections(&self) -> impl Iterator<Item = (i64, SectionState)> + '_ {
        (1..=i64::from(self.steps)).map(move |section| {
            let state = if self.is_active(section) {
                SectionState::Expanded
            } else {
                SectionState::Collapsed
            };
            (section, state)
        })
    }
}
