//! Continue-gated reveal of a week's content.
//!
//! A week is shown as a fixed list of steps. Only a prefix is visible; each
//! press of Continue reveals exactly one more step.

use crate::content::Week;

/// One revealable step of a week.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WeekStep {
    /// Week summary message
    Summary,
    /// Section at this index of the week's ordered sections
    Section(usize),
    /// Notes editor
    Notes,
}

impl WeekStep {
    /// Summary, every section in order, then notes.
    pub fn for_week(week: &Week) -> Vec<WeekStep> {
        let mut steps = Vec::with_capacity(week.sections.len() + 2);
        steps.push(WeekStep::Summary);
        steps.extend((0..week.sections.len()).map(WeekStep::Section));
        steps.push(WeekStep::Notes);
        steps
    }
}

/// Linear sequence of steps with a revealed-count watermark.
///
/// The watermark lives in memory only.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StepSequencer<T> {
    steps: Vec<T>,
    revealed: usize,
}

impl<T> StepSequencer<T> {
    /// Start with the first step revealed.
    pub fn new(steps: Vec<T>) -> Self {
        let revealed = steps.len().min(1);
        Self { steps, revealed }
    }

    /// Reveal the next step. Returns it, or `None` when all are visible.
    pub fn advance(&mut self) -> Option<&T> {
        if !self.has_more() {
            return None;
        }
        self.revealed += 1;
        self.steps.get(self.revealed - 1)
    }

    pub fn visible(&self) -> &[T] {
        &self.steps[..self.revealed]
    }

    pub fn has_more(&self) -> bool {
        self.revealed < self.steps.len()
    }

    pub fn revealed(&self) -> usize {
        self.revealed
    }

    pub fn len(&self) -> usize {
        self.steps.len()
    }

    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }

    /// Replace the steps (e.g. on week change) and start over.
    pub fn reset(&mut self, steps: Vec<T>) {
        self.revealed = steps.len().min(1);
        self.steps = steps;
    }
}

impl StepSequencer<WeekStep> {
    pub fn for_week(week: &Week) -> Self {
        Self::new(WeekStep::for_week(week))
    }
}
