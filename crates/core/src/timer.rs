use std::time::{Duration, Instant};

/// Poll-driven periodic deadline. Nothing runs in the background: the owner
/// polls with the current time and acts on however many periods have
/// elapsed, so a late poll catches up instead of losing ticks.
#[derive(Debug)]
pub struct Periodic {
    period: Duration,
    next: Option<Instant>,
}

impl Periodic {
    pub fn new(period: Duration) -> Self {
        Self { period, next: None }
    }

    pub fn arm(&mut self, now: Instant) {
        self.next = Some(now + self.period);
    }

    pub fn cancel(&mut self) {
        self.next = None;
    }

    /// Number of whole periods elapsed since the last poll. Zero when
    /// cancelled or not yet due.
    pub fn poll(&mut self, now: Instant) -> u32 {
        let Some(mut next) = self.next else {
            return 0;
        };
        let mut fired = 0;
        while now >= next {
            fired += 1;
            next += self.period;
        }
        self.next = Some(next);
        fired
    }
}

/// A single delayed deadline. Fires at most once per arm.
#[derive(Debug, Default)]
pub struct OneShot {
    deadline: Option<Instant>,
}

impl OneShot {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn arm(&mut self, now: Instant, delay: Duration) {
        self.deadline = Some(now + delay);
    }

    pub fn cancel(&mut self) {
        self.deadline = None;
    }

    pub fn poll(&mut self, now: Instant) -> bool {
        match self.deadline {
            Some(deadline) if now >= deadline => {
                self.deadline = None;
                true
            }
            _ => false,
        }
    }
}
