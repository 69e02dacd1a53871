use std::time::Duration;

use crate::error::{Error, Result};

/// Delay after the end of the repeat window before the connection is closed.
pub const CLOSE_GRACE: Duration = Duration::from_millis(400);

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum Action {
    /// Send the `ir_send` command again.
    Repeat,
    /// Send `ir_stop`.
    Stop,
    Close,
}

/// One step, due at `at` after the connection opened.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct Step {
    pub at: Duration,
    pub action: Action,
}

/// Precomputed one-shot send schedule of the repeat client.
///
/// Repeats are due at every multiple of `delay` strictly below `duration`,
/// the stop at `duration + delay`, the close at `duration + 400ms` but never
/// ahead of the stop.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RepeatSchedule {
    steps: Vec<Step>,
}

impl RepeatSchedule {
    pub fn new(duration: Duration, delay: Duration) -> Result<Self> {
        if delay.is_zero() {
            return Err(Error::InvalidArgument(
                "repeat delay must be greater than zero".into(),
            ));
        }

        let mut steps = Vec::new();
        let mut at = delay;
        while at < duration {
            steps.push(Step {
                at,
                action: Action::Repeat,
            });
            at += delay;
        }

        let stop_at = duration + delay;
        steps.push(Step {
            at: stop_at,
            action: Action::Stop,
        });
        steps.push(Step {
            at: (duration + CLOSE_GRACE).max(stop_at),
            action: Action::Close,
        });

        Ok(Self { steps })
    }

    pub fn steps(&self) -> &[Step] {
        &self.steps
    }

    pub fn repeat_count(&self) -> usize {
        self.steps
            .iter()
            .filter(|step| step.action == Action::Repeat)
            .count()
    }
}

impl IntoIterator for RepeatSchedule {
    type Item = Step;
    type IntoIter = std::vec::IntoIter<Step>;

    fn into_iter(self) -> Self::IntoIter {
        self.steps.into_iter()
    }
}
