//! Frame-driven timers. Both advance only when the host calls `update(dt)` with the frame's
//! elapsed seconds.

/// One-shot countdown.
///
/// `start` is idempotent while the timer is running or finished, so it can be called every frame
/// a condition holds. `stop` rearms it.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Timer {
    duration: f32,
    elapsed: f32,
    running: bool,
    finished: bool,
}

impl Timer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn start(&mut self, duration: f32) {
        if self.running || self.finished {
            return;
        }
        self.duration = duration;
        self.elapsed = 0.0;
        self.running = true;
    }

    pub fn update(&mut self, dt: f32) {
        if !self.running {
            return;
        }
        self.elapsed += dt;
        if self.elapsed >= self.duration {
            self.running = false;
            self.finished = true;
        }
    }

    pub fn stop(&mut self) {
        *self = Self::default();
    }

    pub fn finished(&self) -> bool {
        self.finished
    }

    pub fn running(&self) -> bool {
        self.running
    }
}

/// Periodic ticker: fires once per elapsed `period`.
///
/// `update` reports how many periods completed instead of calling back, so the owner applies the
/// effect on itself without a self-referential closure.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Interval {
    period: f32,
    acc: f32,
    running: bool,
}

impl Interval {
    pub fn new(period: f32) -> Self {
        Self {
            period,
            acc: 0.0,
            running: false,
        }
    }

    pub fn start(&mut self) {
        self.running = true;
    }

    pub fn stop(&mut self) {
        self.running = false;
        self.acc = 0.0;
    }

    pub fn period(&self) -> f32 {
        self.period
    }

    pub fn update(&mut self, dt: f32) -> u32 {
        if !self.running || self.period <= 0.0 {
            return 0;
        }
        self.acc += dt;
        let mut fired = 0;
        while self.acc >= self.period {
            self.acc -= self.period;
            fired += 1;
        }
        fired
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn timer_finishes_after_duration() {
        let mut t = Timer::new();
        t.start(0.5);
        t.update(0.25);
        assert!(!t.finished());
        t.start(0.5);
        t.update(0.25);
        assert!(t.finished());
        assert!(!t.running());
    }

    #[test]
    fn timer_start_is_idempotent_once_finished() {
        let mut t = Timer::new();
        t.start(0.1);
        t.update(0.2);
        t.start(0.1);
        assert!(t.finished());
        t.stop();
        assert!(!t.finished());
        t.start(0.1);
        assert!(t.running());
    }

    #[test]
    fn interval_counts_elapsed_periods() {
        let mut i = Interval::new(0.5);
        assert_eq!(i.update(1.0), 0);
        i.start();
        assert_eq!(i.update(0.25), 0);
        assert_eq!(i.update(0.25), 1);
        assert_eq!(i.update(1.25), 2);
        i.stop();
        assert_eq!(i.update(1.0), 0);
    }
}
