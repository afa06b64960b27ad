use crate::api::types::Millis;

/// Maximum periods an `Interval` reports for a single poll.
const MAX_CATCH_UP: u32 = 10;

/// One-shot timer: due once the clock reaches `at`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Deadline {
    at: Millis,
}

impl Deadline {
    pub fn after(now: Millis, delay: Millis) -> Self {
        Self { at: now + delay }
    }

    pub fn is_due(&self, now: Millis) -> bool {
        now >= self.at
    }

    pub fn at(&self) -> Millis {
        self.at
    }
}

/// Repeating timer with a fixed period.
/// Polled from frame callbacks; reports how many periods elapsed since the last poll.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Interval {
    period: Millis,
    next: Millis,
}

impl Interval {
    /// First firing is one period after `now`.
    pub fn starting_at(now: Millis, period: Millis) -> Self {
        Self {
            period,
            next: now + period,
        }
    }

    /// Number of periods that elapsed up to `now`.
    /// Caps at 10 and resynchronizes, so a long stall cannot flood the caller.
    pub fn poll(&mut self, now: Millis) -> u32 {
        let mut fired = 0;
        while now >= self.next && fired < MAX_CATCH_UP {
            self.next += self.period;
            fired += 1;
        }
        if fired == MAX_CATCH_UP && now >= self.next {
            self.next = now + self.period;
        }
        fired
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn deadline_due_at_boundary() {
        let d = Deadline::after(100.0, 400.0);
        assert!(!d.is_due(499.9));
        assert!(d.is_due(500.0));
        assert_eq!(d.at(), 500.0);
    }

    #[test]
    fn interval_fires_once_per_period() {
        let mut iv = Interval::starting_at(0.0, 1000.0);
        assert_eq!(iv.poll(999.0), 0);
        assert_eq!(iv.poll(1000.0), 1);
        assert_eq!(iv.poll(1500.0), 0);
        assert_eq!(iv.poll(2000.0), 1);
    }

    #[test]
    fn interval_catches_up_missed_periods() {
        let mut iv = Interval::starting_at(0.0, 100.0);
        assert_eq!(iv.poll(350.0), 3);
        assert_eq!(iv.poll(399.0), 0);
        assert_eq!(iv.poll(400.0), 1);
    }

    #[test]
    fn interval_caps_after_long_stall() {
        let mut iv = Interval::starting_at(0.0, 10.0);
        assert_eq!(iv.poll(10_000.0), 10);
        // Resynchronized: next firing is a full period after the stall.
        assert_eq!(iv.poll(10_005.0), 0);
        assert_eq!(iv.poll(10_010.0), 1);
    }
}
