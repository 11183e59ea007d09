use std::time::{Duration, Instant};

/// A cancellable one-shot deadline polled from the event loop.
///
/// Firing does not re-arm. Owners that want a repeating callback re-arm
/// explicitly after each fire, and only while the state that armed the timer
/// is still current.
#[derive(Clone, Debug)]
pub struct OneShot {
    delay: Duration,
    deadline: Option<Instant>,
}

impl OneShot {
    pub fn new(delay: Duration) -> Self {
        Self {
            delay,
            deadline: None,
        }
    }

    pub fn delay(&self) -> Duration {
        self.delay
    }

    pub fn set_delay(&mut self, delay: Duration) {
        self.delay = delay;
    }

    /// Schedule a fire at `now + delay`, replacing any pending deadline.
    pub fn arm(&mut self, now: Instant) {
        self.deadline = Some(now + self.delay);
    }

    pub fn disarm(&mut self) {
        self.deadline = None;
    }

    pub fn is_armed(&self) -> bool {
        self.deadline.is_some()
    }

    /// Returns true exactly once per arm, when the deadline has passed.
    pub fn poll(&mut self, now: Instant) -> bool {
        match self.deadline {
            Some(deadline) if now >= deadline => {
                self.deadline = None;
                true
            }
            _ => false,
        }
    }

    pub fn remaining(&self, now: Instant) -> Option<Duration> {
        self.deadline.map(|d| d.saturating_duration_since(now))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unarmed_timer_never_fires() {
        let mut t = OneShot::new(Duration::from_millis(10));
        let now = Instant::now();
        assert!(!t.poll(now + Duration::from_secs(60)));
    }

    #[test]
    fn fires_once_after_deadline() {
        let mut t = OneShot::new(Duration::from_secs(1));
        let start = Instant::now();
        t.arm(start);
        assert!(!t.poll(start + Duration::from_millis(999)));
        assert!(t.poll(start + Duration::from_secs(1)));
        // No implicit re-arm
        assert!(!t.is_armed());
        assert!(!t.poll(start + Duration::from_secs(5)));
    }

    #[test]
    fn disarm_cancels_pending_fire() {
        let mut t = OneShot::new(Duration::from_secs(1));
        let start = Instant::now();
        t.arm(start);
        t.disarm();
        assert!(!t.poll(start + Duration::from_secs(2)));
    }

    #[test]
    fn rearm_replaces_deadline() {
        let mut t = OneShot::new(Duration::from_secs(1));
        let start = Instant::now();
        t.arm(start);
        t.arm(start + Duration::from_millis(500));
        assert!(!t.poll(start + Duration::from_millis(1200)));
        assert!(t.poll(start + Duration::from_millis(1500)));
    }

    #[test]
    fn remaining_saturates() {
        let mut t = OneShot::new(Duration::from_secs(1));
        let start = Instant::now();
        assert_eq!(t.remaining(start), None);
        t.arm(start);
        assert_eq!(
            t.remaining(start + Duration::from_secs(3)),
            Some(Duration::ZERO)
        );
    }
}
