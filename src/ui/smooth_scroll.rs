//! Row-level smooth scroll with exponential ease-out.
//!
//! The logical scroll target jumps immediately; the displayed position
//! closes a fixed fraction of the remaining distance each frame, so long
//! jumps decelerate visibly and short ones settle in a frame or two.

/// Document scroll position animator, in rows.
#[derive(Debug, Clone)]
pub struct SmoothScroll {
    position: f64,
    target: f64,
    /// Fraction of the remaining distance covered per tick.
    speed: f64,
}

impl SmoothScroll {
    pub fn new(speed: f64) -> Self {
        Self {
            position: 0.0,
            target: 0.0,
            speed: speed.clamp(0.05, 0.95),
        }
    }

    /// Aim at `target`, clamped to `[0, max]`.
    pub fn set_target(&mut self, target: f64, max: f64) {
        self.target = target.clamp(0.0, max.max(0.0));
    }

    /// Move the target by `delta` rows.
    pub fn nudge(&mut self, delta: f64, max: f64) {
        self.set_target(self.target + delta, max);
    }

    /// Re-clamp after the document shrank.
    pub fn clamp(&mut self, max: f64) {
        let max = max.max(0.0);
        self.target = self.target.min(max);
        self.position = self.position.min(max);
    }

    /// Close part of the gap toward the target.  Call once per frame.
    pub fn tick(&mut self) {
        let gap = self.target - self.position;
        if gap.abs() < 0.4 {
            self.position = self.target;
        } else {
            self.position += gap * self.speed;
        }
    }

    pub fn target(&self) -> f64 {
        self.target
    }

    /// Current displayed row.
    pub fn row(&self) -> usize {
        self.position.round().max(0.0) as usize
    }

    /// True while the displayed position has not reached the target.
    pub fn is_animating(&self) -> bool {
        self.position != self.target
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_settles_on_target() {
        let mut s = SmoothScroll::new(0.35);
        s.set_target(40.0, 100.0);
        let mut prev = s.row();
        let mut frames = 0;
        while s.is_animating() {
            s.tick();
            assert!(s.row() >= prev, "never overshoots backwards");
            prev = s.row();
            frames += 1;
            assert!(frames < 100);
        }
        assert_eq!(s.row(), 40);
    }

    #[test]
    fn test_target_clamped() {
        let mut s = SmoothScroll::new(0.5);
        s.nudge(-5.0, 100.0);
        assert_eq!(s.target(), 0.0);
        s.set_target(500.0, 100.0);
        assert_eq!(s.target(), 100.0);
        s.clamp(30.0);
        assert_eq!(s.target(), 30.0);
    }
}
