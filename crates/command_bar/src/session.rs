use shared::{
    domain::{BookmarkEntry, CategoryId},
    protocol::{RenderInstruction, SubmitOutcome},
};
use tracing::{debug, info};

use crate::{
    evaluator::{display_value, evaluate, CalculatorState, Evaluation},
    render::project,
    router::{decide, route, RoutePolicy},
};

/// Per-input-session state of the command bar. The shell owns one and feeds
/// it every keystroke and submit.
#[derive(Debug, Clone, Default)]
pub struct CommandBar {
    calculator: CalculatorState,
    policy: RoutePolicy,
}

impl CommandBar {
    pub fn new(policy: RoutePolicy) -> Self {
        Self {
            calculator: CalculatorState::default(),
            policy,
        }
    }

    /// Resumes a chain, e.g. when the shell restores a field that still shows
    /// a previous result.
    pub fn with_last_result(mut self, last_result: Option<f64>) -> Self {
        match last_result {
            Some(value) => self.calculator.record(value),
            None => self.calculator.reset(),
        }
        self
    }

    pub fn calculator(&self) -> &CalculatorState {
        &self.calculator
    }

    pub fn policy(&self) -> RoutePolicy {
        self.policy
    }

    pub fn on_input(
        &mut self,
        text: &str,
        entries: &[BookmarkEntry],
        category_ids: &[CategoryId],
    ) -> Vec<RenderInstruction> {
        self.calculator.observe_input(text);
        let query = text.trim();
        let result = route(query, entries);
        project(query, &result.matches, category_ids)
    }

    pub fn on_submit(&mut self, text: &str, entries: &[BookmarkEntry]) -> SubmitOutcome {
        let raw = text.trim();
        if raw.is_empty() {
            return SubmitOutcome::Ignored;
        }

        match evaluate(raw, self.calculator.last_result()) {
            Evaluation::Evaluated(value) => {
                self.calculator.record(value);
                debug!(value, "expression evaluated");
                SubmitOutcome::Calculated {
                    value,
                    display: display_value(value),
                }
            }
            Evaluation::Declined(_) => {
                let navigation = decide(raw, entries, self.policy);
                info!(target_url = navigation.url(), "navigating");
                SubmitOutcome::Navigate(navigation)
            }
        }
    }
}

#[cfg(test)]
#[path = "tests/session_tests.rs"]
mod tests;
