//! Step-by-step cursor over a finished trace

use super::{Step, Trace};

/// Replay cursor
///
/// Position 0 is "before the first step"; position N is the N-th step.
#[derive(Debug, Clone)]
pub struct Replay<'a> {
    steps: &'a [Step],
    position: usize,
}

impl<'a> Replay<'a> {
    /// Cursor positioned before the first step
    pub fn new(trace: &'a Trace) -> Self {
        Self {
            steps: &trace.steps,
            position: 0,
        }
    }

    /// Step under the cursor
    pub fn current(&self) -> Option<&'a Step> {
        self.position.checked_sub(1).and_then(|i| self.steps.get(i))
    }

    /// Current position (equals the current step id)
    pub fn position(&self) -> usize {
        self.position
    }

    /// Whether the last step has been reached
    pub fn is_finished(&self) -> bool {
        self.position >= self.steps.len()
    }

    /// Move one step forward
    pub fn advance(&mut self) -> Option<&'a Step> {
        if self.is_finished() {
            return None;
        }
        self.position += 1;
        self.current()
    }

    /// Move one step back
    pub fn rewind(&mut self) -> Option<&'a Step> {
        if self.position <= 1 {
            self.position = 0;
            return None;
        }
        self.position -= 1;
        self.current()
    }

    /// Jump to the step with the given id
    pub fn seek(&mut self, step_id: u64) -> Option<&'a Step> {
        let index = usize::try_from(step_id).ok()?;
        if index == 0 || index > self.steps.len() {
            return None;
        }
        self.position = index;
        self.current()
    }
}

impl<'a> Iterator for Replay<'a> {
    type Item = &'a Step;

    fn next(&mut self) -> Option<Self::Item> {
        self.advance()
    }
}
