//! Composition root for the scroll-driven components.
//!
//! [`PageController`] owns one tracker, one reveal detector and one parallax
//! controller.  Mounting subscribes them to a [`PageSignals`] pair: the
//! tracker and parallax listen to scroll, the reveal detector to visibility.
//! They never read each other's output.  Unmounting (or dropping the
//! controller) releases every subscription.

use std::cell::RefCell;
use std::rc::Rc;
use std::time::Instant;

use super::parallax::HeroParallaxController;
use super::reveal::{DetectionSupport, Latch, RevealState, ViewportRevealDetector, DEFAULT_REVEAL_MARGIN};
use super::section::{Section, SectionId, ViewportFrame};
use super::signal::{Signal, Subscription};
use super::tracker::{ScrollSectionTracker, DEFAULT_REFERENCE_OFFSET};

/// Tunables for a page instance.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PageConfig {
    pub reference_offset: f64,
    pub reveal_margin: f64,
    pub support: DetectionSupport,
}

impl Default for PageConfig {
    fn default() -> Self {
        Self {
            reference_offset: DEFAULT_REFERENCE_OFFSET,
            reveal_margin: DEFAULT_REVEAL_MARGIN,
            support: DetectionSupport::Available,
        }
    }
}

/// The two raw environment signals the components observe.
#[derive(Debug, Default)]
pub struct PageSignals {
    pub scroll: Signal<ViewportFrame>,
    pub visibility: Signal<ViewportFrame>,
}

impl PageSignals {
    pub fn new() -> Self {
        Self::default()
    }

    /// The viewport moved.  Scrolling also changes what is visible.
    pub fn scrolled(&self, frame: &ViewportFrame) {
        self.scroll.emit(frame);
        self.visibility.emit(frame);
    }

    /// Layout or viewport size changed without a scroll.
    pub fn relaid(&self, frame: &ViewportFrame) {
        self.visibility.emit(frame);
    }
}

/// Read-only view handed to rendering consumers.
#[derive(Debug, Clone)]
pub struct PageSnapshot {
    pub reveal: RevealState,
    /// Entrance latch for the hero, flipped when the page mounts.
    pub hero_entrance: Latch,
    pub hero_opacity: f64,
    pub hero_scale: f64,
}

pub struct PageController {
    tracker: Rc<RefCell<ScrollSectionTracker>>,
    reveal: Rc<RefCell<ViewportRevealDetector>>,
    parallax: Rc<RefCell<HeroParallaxController>>,
    hero_entrance: Latch,
    mounted: Vec<Subscription>,
}

impl PageController {
    pub fn new(config: PageConfig) -> Self {
        let sections = Section::all();
        let reveal = ViewportRevealDetector::new(&sections, config.reveal_margin, config.support);
        let tracker = ScrollSectionTracker::new(sections, config.reference_offset);
        // Without detection there is nothing to animate against.
        let hero_entrance = match config.support {
            DetectionSupport::Available => Latch::Hidden,
            DetectionSupport::Unavailable => Latch::Revealed { at: None },
        };
        Self {
            tracker: Rc::new(RefCell::new(tracker)),
            reveal: Rc::new(RefCell::new(reveal)),
            parallax: Rc::new(RefCell::new(HeroParallaxController::new())),
            hero_entrance,
            mounted: Vec::new(),
        }
    }

    /// Subscribe all three components.  Mounting twice is a no-op.
    pub fn mount(&mut self, signals: &PageSignals) {
        self.mount_at(signals, Instant::now());
    }

    /// As [`mount`](Self::mount); the hero entrance starts at `now` the
    /// first time the page mounts.
    pub fn mount_at(&mut self, signals: &PageSignals, now: Instant) {
        if self.is_mounted() {
            return;
        }
        if self.hero_entrance == Latch::Hidden {
            self.hero_entrance = Latch::Revealed { at: Some(now) };
        }

        let tracker = Rc::clone(&self.tracker);
        self.mounted.push(signals.scroll.subscribe(move |frame| {
            tracker.borrow_mut().on_scroll(frame);
        }));

        let parallax = Rc::clone(&self.parallax);
        self.mounted.push(signals.scroll.subscribe(move |frame| {
            parallax.borrow_mut().on_scroll(frame);
        }));

        let reveal = Rc::clone(&self.reveal);
        self.mounted.push(signals.visibility.subscribe(move |frame| {
            reveal.borrow_mut().on_visibility(frame);
        }));

        tracing::debug!(subscriptions = self.mounted.len(), "page mounted");
    }

    pub fn unmount(&mut self) {
        if self.is_mounted() {
            self.mounted.clear();
            tracing::debug!("page unmounted");
        }
    }

    pub fn is_mounted(&self) -> bool {
        !self.mounted.is_empty()
    }

    /// Listen for active-section changes.  Handlers run while the tracker is
    /// updating, so they must not call back into this controller.
    pub fn on_active_change<F>(&self, handler: F) -> Subscription
    where
        F: FnMut(&SectionId) + 'static,
    {
        self.tracker.borrow().subscribe(handler)
    }

    pub fn active_section(&self) -> SectionId {
        self.tracker.borrow().active()
    }

    pub fn is_revealed(&self, id: SectionId) -> bool {
        self.reveal.borrow().is_revealed(id)
    }

    pub fn snapshot(&self) -> PageSnapshot {
        let parallax = self.parallax.borrow();
        PageSnapshot {
            reveal: self.reveal.borrow().state().clone(),
            hero_entrance: self.hero_entrance,
            hero_opacity: parallax.opacity(),
            hero_scale: parallax.scale(),
        }
    }
}

impl Drop for PageController {
    fn drop(&mut self) {
        self.unmount();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::section::{Bounds, LayoutSnapshot};
    use std::cell::Cell;

    fn layout() -> LayoutSnapshot {
        LayoutSnapshot::new()
            .with_hero(Bounds::new(0.0, 400.0))
            .with_section(SectionId::About, Bounds::new(400.0, 1200.0))
            .with_section(SectionId::Education, Bounds::new(1200.0, 2200.0))
            .with_section(SectionId::Projects, Bounds::new(2200.0, 3600.0))
            .with_section(SectionId::Awards, Bounds::new(3600.0, 4400.0))
            .with_section(SectionId::Contact, Bounds::new(4400.0, 5000.0))
    }

    fn frame(scroll: f64) -> ViewportFrame {
        ViewportFrame::new(scroll, 600.0, layout())
    }

    #[test]
    fn test_mount_fans_out_to_all_components() {
        let signals = PageSignals::new();
        let mut page = PageController::new(PageConfig::default());
        page.mount(&signals);
        assert_eq!(signals.scroll.subscriber_count(), 2);
        assert_eq!(signals.visibility.subscriber_count(), 1);

        signals.scrolled(&frame(1300.0));
        assert_eq!(page.active_section(), SectionId::Education);
        assert!(page.is_revealed(SectionId::Education));
        let snap = page.snapshot();
        assert_eq!(snap.hero_opacity, 0.0);
        assert!((snap.hero_scale - 0.8).abs() < 1e-12);
    }

    #[test]
    fn test_double_mount_is_noop() {
        let signals = PageSignals::new();
        let mut page = PageController::new(PageConfig::default());
        page.mount(&signals);
        page.mount(&signals);
        assert_eq!(signals.scroll.subscriber_count(), 2);
    }

    #[test]
    fn test_unmount_stops_updates() {
        let signals = PageSignals::new();
        let mut page = PageController::new(PageConfig::default());
        page.mount(&signals);
        page.unmount();
        assert!(!page.is_mounted());
        assert_eq!(signals.scroll.subscriber_count(), 0);

        signals.scrolled(&frame(2500.0));
        assert_eq!(page.active_section(), SectionId::About);
        assert!(!page.is_revealed(SectionId::Projects));
    }

    #[test]
    fn test_drop_releases_subscriptions() {
        let signals = PageSignals::new();
        {
            let mut page = PageController::new(PageConfig::default());
            page.mount(&signals);
        }
        assert_eq!(signals.scroll.subscriber_count(), 0);
        assert_eq!(signals.visibility.subscriber_count(), 0);
        signals.scrolled(&frame(100.0));
    }

    #[test]
    fn test_relayout_reveals_without_moving_active() {
        let signals = PageSignals::new();
        let mut page = PageController::new(PageConfig::default());
        page.mount(&signals);

        // A taller viewport after a resize: more of the page is visible.
        signals.relaid(&ViewportFrame::new(0.0, 1500.0, layout()));
        assert!(page.is_revealed(SectionId::Education));
        assert_eq!(page.active_section(), SectionId::About);
        assert_eq!(page.snapshot().hero_opacity, 1.0);
    }

    #[test]
    fn test_independent_instances() {
        let signals_a = PageSignals::new();
        let signals_b = PageSignals::new();
        let mut a = PageController::new(PageConfig::default());
        let mut b = PageController::new(PageConfig::default());
        a.mount(&signals_a);
        b.mount(&signals_b);

        signals_a.scrolled(&frame(3700.0));
        assert_eq!(a.active_section(), SectionId::Awards);
        assert_eq!(b.active_section(), SectionId::About);
        assert!(!b.is_revealed(SectionId::Awards));
    }

    #[test]
    fn test_active_change_notifications() {
        let signals = PageSignals::new();
        let mut page = PageController::new(PageConfig::default());
        page.mount(&signals);

        let changes = Rc::new(Cell::new(0));
        let c = Rc::clone(&changes);
        let _sub = page.on_active_change(move |_| c.set(c.get() + 1));

        for scroll in [0.0, 500.0, 500.0, 1300.0, 1400.0, 6000.0] {
            signals.scrolled(&frame(scroll));
        }
        assert_eq!(changes.get(), 1);
        assert_eq!(page.active_section(), SectionId::Education);
    }

    #[test]
    fn test_fail_open_page() {
        let page = PageController::new(PageConfig {
            support: DetectionSupport::Unavailable,
            ..PageConfig::default()
        });
        assert!(page.snapshot().reveal.is_revealed(SectionId::Contact));
        assert_eq!(page.snapshot().hero_entrance, Latch::Revealed { at: None });
    }

    #[test]
    fn test_hero_entrance_starts_on_first_mount() {
        let signals = PageSignals::new();
        let mut page = PageController::new(PageConfig::default());
        assert_eq!(page.snapshot().hero_entrance, Latch::Hidden);

        let t0 = Instant::now();
        page.mount_at(&signals, t0);
        assert_eq!(page.snapshot().hero_entrance, Latch::Revealed { at: Some(t0) });

        // Remounting does not replay the entrance.
        page.unmount();
        page.mount_at(&signals, t0 + std::time::Duration::from_secs(3));
        assert_eq!(page.snapshot().hero_entrance, Latch::Revealed { at: Some(t0) });
    }
}
