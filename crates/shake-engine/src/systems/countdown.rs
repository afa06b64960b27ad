use crate::api::types::{CountdownDisplay, Millis};
use crate::core::time::Interval;

/// What one countdown tick produced.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CountdownStep {
    Show(CountdownDisplay),
    /// The tick after "GO!": hand off to the action phase.
    Finished,
}

/// Counts down from `start` to "GO!" on a fixed interval, then finishes once.
#[derive(Debug, Clone, PartialEq)]
pub struct Countdown {
    count: i64,
    interval: Interval,
    finished: bool,
}

impl Countdown {
    pub fn start(from: u32, now: Millis, interval_ms: Millis) -> Self {
        Self {
            count: i64::from(from),
            interval: Interval::starting_at(now, interval_ms),
            finished: false,
        }
    }

    /// What to display before the first tick.
    pub fn initial_display(&self) -> CountdownDisplay {
        Self::display_for(self.count).unwrap_or(CountdownDisplay::Go)
    }

    /// Advance by every interval elapsed up to `now`. Nothing is produced after `Finished`.
    pub fn tick(&mut self, now: Millis) -> Vec<CountdownStep> {
        let mut steps = Vec::new();
        if self.finished {
            return steps;
        }
        for _ in 0..self.interval.poll(now) {
            self.count -= 1;
            match Self::display_for(self.count) {
                Some(display) => steps.push(CountdownStep::Show(display)),
                None => {
                    self.finished = true;
                    steps.push(CountdownStep::Finished);
                    break;
                }
            }
        }
        steps
    }

    pub fn is_finished(&self) -> bool {
        self.finished
    }

    fn display_for(count: i64) -> Option<CountdownDisplay> {
        match count {
            n if n > 0 => Some(CountdownDisplay::Number(n as u32)),
            0 => Some(CountdownDisplay::Go),
            _ => None,
        }
    }
}
