//! Hero banner fade/scale driven by scroll progress through the banner.

use super::section::{Bounds, ViewportFrame};

/// Scale lost over the full banner height.
pub const SCALE_LOSS: f64 = 0.2;

/// How far the viewport top has travelled through `hero`, clamped to
/// `[0, 1]`.  A zero-height hero jumps from 0 to 1 at its top edge.
pub fn progress_for(scroll_top: f64, hero: Bounds) -> f64 {
    let span = hero.height();
    if span <= 0.0 {
        return if scroll_top < hero.top { 0.0 } else { 1.0 };
    }
    ((scroll_top - hero.top) / span).clamp(0.0, 1.0)
}

pub fn opacity_for(progress: f64) -> f64 {
    1.0 - progress
}

pub fn scale_for(progress: f64) -> f64 {
    1.0 - SCALE_LOSS * progress
}

/// Holds the latest progress sample.  Nothing else is stateful.
#[derive(Debug, Clone, Default)]
pub struct HeroParallaxController {
    progress: f64,
}

impl HeroParallaxController {
    pub fn new() -> Self {
        Self::default()
    }

    /// Resample from `frame`.  Without hero geometry the last sample stands.
    pub fn on_scroll(&mut self, frame: &ViewportFrame) -> f64 {
        if let Some(hero) = frame.layout.hero() {
            self.progress = progress_for(frame.scroll_top, hero);
        }
        self.progress
    }

    pub fn progress(&self) -> f64 {
        self.progress
    }

    pub fn opacity(&self) -> f64 {
        opacity_for(self.progress)
    }

    pub fn scale(&self) -> f64 {
        scale_for(self.progress)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::section::LayoutSnapshot;

    const HERO: Bounds = Bounds { top: 200.0, bottom: 700.0 };

    #[test]
    fn test_endpoints_and_clamping() {
        assert_eq!(progress_for(HERO.top, HERO), 0.0);
        assert_eq!(progress_for(HERO.bottom, HERO), 1.0);
        assert_eq!(progress_for(HERO.top - 1000.0, HERO), 0.0);
        assert_eq!(progress_for(HERO.bottom + 1000.0, HERO), 1.0);
        assert_eq!(progress_for(450.0, HERO), 0.5);
    }

    #[test]
    fn test_linear_outputs() {
        for i in 0..=20 {
            let p = i as f64 / 20.0;
            assert!((opacity_for(p) + p - 1.0).abs() < 1e-12);
            assert!((scale_for(p) + 0.2 * p - 1.0).abs() < 1e-12);
        }
        assert!((scale_for(1.0) - 0.8).abs() < 1e-12);
    }

    #[test]
    fn test_zero_height_hero() {
        let flat = Bounds::new(300.0, 300.0);
        assert_eq!(progress_for(299.0, flat), 0.0);
        assert_eq!(progress_for(300.0, flat), 1.0);
    }

    #[test]
    fn test_controller_follows_scroll_both_ways() {
        let layout = LayoutSnapshot::new().with_hero(HERO);
        let mut c = HeroParallaxController::new();
        assert_eq!(c.opacity(), 1.0);

        c.on_scroll(&ViewportFrame::new(700.0, 400.0, layout.clone()));
        assert_eq!(c.progress(), 1.0);
        assert_eq!(c.opacity(), 0.0);

        c.on_scroll(&ViewportFrame::new(325.0, 400.0, layout));
        assert_eq!(c.progress(), 0.25);
        assert!((c.scale() - 0.95).abs() < 1e-12);
    }

    #[test]
    fn test_missing_hero_keeps_sample() {
        let mut c = HeroParallaxController::new();
        c.on_scroll(&ViewportFrame::new(450.0, 400.0, LayoutSnapshot::new().with_hero(HERO)));
        c.on_scroll(&ViewportFrame::new(0.0, 400.0, LayoutSnapshot::new()));
        assert_eq!(c.progress(), 0.5);
    }
}
