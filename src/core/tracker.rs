//! Active-section tracking.
//!
//! On every scroll event the tracker walks the fixed section list and picks
//! the first section straddling a reference line a fixed distance below the
//! top of the viewport.  When nothing straddles it (the gap above the first
//! section, the footer below the last) the previous answer is kept; there is
//! no "nothing active" state.

use super::section::{Section, SectionId, ViewportFrame};
use super::signal::{Signal, Subscription};

/// Default distance of the reference line from the top of the viewport.
pub const DEFAULT_REFERENCE_OFFSET: f64 = 100.0;

/// Owns `ActiveSectionState` and publishes changes to it.
#[derive(Debug)]
pub struct ScrollSectionTracker {
    sections: Vec<Section>,
    reference_offset: f64,
    active: SectionId,
    changed: Signal<SectionId>,
}

impl ScrollSectionTracker {
    /// The initial active section is the first declared one.
    pub fn new(sections: Vec<Section>, reference_offset: f64) -> Self {
        let active = sections.first().map(|s| s.id).unwrap_or_default();
        Self {
            sections,
            reference_offset,
            active,
            changed: Signal::new(),
        }
    }

    pub fn active(&self) -> SectionId {
        self.active
    }

    /// First section (in declared order) whose viewport-relative bounds
    /// contain the reference line.  Sections without geometry are skipped.
    pub fn hit_test(&self, frame: &ViewportFrame) -> Option<SectionId> {
        let line = self.reference_offset;
        self.sections.iter().find_map(|section| {
            let rect = frame.layout.section(section.id)?.relative_to(frame.scroll_top);
            (rect.top <= line && rect.bottom >= line).then_some(section.id)
        })
    }

    /// Recompute from `frame`.  Subscribers hear about it only when the
    /// active section actually changes.
    pub fn on_scroll(&mut self, frame: &ViewportFrame) -> SectionId {
        if let Some(hit) = self.hit_test(frame) {
            if hit != self.active {
                tracing::debug!(from = %self.active, to = %hit, scroll = frame.scroll_top, "active section");
                self.active = hit;
                self.changed.emit(&hit);
            }
        }
        self.active
    }

    /// Listen for active-section changes (the navigation highlight).
    pub fn subscribe<F>(&self, handler: F) -> Subscription
    where
        F: FnMut(&SectionId) + 'static,
    {
        self.changed.subscribe(handler)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::section::{Bounds, LayoutSnapshot};
    use std::cell::RefCell;
    use std::rc::Rc;

    fn three_sections() -> LayoutSnapshot {
        LayoutSnapshot::new()
            .with_section(SectionId::About, Bounds::new(0.0, 800.0))
            .with_section(SectionId::Education, Bounds::new(800.0, 1800.0))
            .with_section(SectionId::Projects, Bounds::new(1800.0, 3200.0))
    }

    fn frame(scroll: f64) -> ViewportFrame {
        ViewportFrame::new(scroll, 600.0, three_sections())
    }

    fn tracker() -> ScrollSectionTracker {
        ScrollSectionTracker::new(Section::all(), DEFAULT_REFERENCE_OFFSET)
    }

    #[test]
    fn test_default_before_any_scroll() {
        assert_eq!(tracker().active(), SectionId::About);
    }

    #[test]
    fn test_scenario_scroll_sequence() {
        let mut t = tracker();
        assert_eq!(t.on_scroll(&frame(850.0)), SectionId::Education);
        assert_eq!(t.on_scroll(&frame(650.0)), SectionId::About);
        // Reference line at 890 is inside education.
        assert_eq!(t.on_scroll(&frame(790.0)), SectionId::Education);
        assert_eq!(t.on_scroll(&frame(2000.0)), SectionId::Projects);
        // Past everything: the last answer sticks.
        assert_eq!(t.on_scroll(&frame(5000.0)), SectionId::Projects);
    }

    #[test]
    fn test_every_offset_inside_a_section_selects_it() {
        let mut t = tracker();
        let layout = three_sections();
        for id in [SectionId::About, SectionId::Education, SectionId::Projects] {
            let b = layout.section(id).unwrap();
            let mut scroll = (b.top - 100.0).max(0.0) + 1.0;
            while scroll + 100.0 < b.bottom {
                assert_eq!(t.on_scroll(&frame(scroll)), id, "scroll={scroll}");
                scroll += 37.0;
            }
        }
    }

    #[test]
    fn test_earlier_section_wins_overlap() {
        let layout = LayoutSnapshot::new()
            .with_section(SectionId::About, Bounds::new(0.0, 900.0))
            .with_section(SectionId::Education, Bounds::new(800.0, 1800.0));
        let mut t = tracker();
        t.on_scroll(&ViewportFrame::new(1200.0, 600.0, layout.clone()));
        assert_eq!(t.active(), SectionId::Education);
        assert_eq!(
            t.on_scroll(&ViewportFrame::new(750.0, 600.0, layout)),
            SectionId::About
        );
    }

    #[test]
    fn test_missing_geometry_is_skipped() {
        let layout = LayoutSnapshot::new().with_section(SectionId::Projects, Bounds::new(0.0, 500.0));
        let mut t = tracker();
        assert_eq!(
            t.on_scroll(&ViewportFrame::new(0.0, 600.0, layout)),
            SectionId::Projects
        );
        // Nothing laid out at all: keep the previous value.
        assert_eq!(
            t.on_scroll(&ViewportFrame::new(0.0, 600.0, LayoutSnapshot::new())),
            SectionId::Projects
        );
    }

    #[test]
    fn test_publishes_only_on_change() {
        let mut t = tracker();
        let seen = Rc::new(RefCell::new(Vec::new()));
        let s = Rc::clone(&seen);
        let _sub = t.subscribe(move |id| s.borrow_mut().push(*id));

        t.on_scroll(&frame(10.0));
        t.on_scroll(&frame(900.0));
        t.on_scroll(&frame(900.0));
        t.on_scroll(&frame(950.0));
        t.on_scroll(&frame(0.0));

        assert_eq!(*seen.borrow(), vec![SectionId::Education, SectionId::About]);
    }
}
