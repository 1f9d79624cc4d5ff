//! Section identities and the geometry the layout system reports for them.
//!
//! Sections are fixed for the page's lifetime.  Their declaration order is
//! significant: it is both the navigation order and the tie-break priority
//! when more than one section matches a scroll predicate.

use std::fmt;

// ───────────────────────────────────────── identity ──────────

/// One of the page's logical sections.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum SectionId {
    About,
    Education,
    Projects,
    Awards,
    Contact,
}

impl SectionId {
    /// Every section, in declaration order.
    pub const ALL: [SectionId; 5] = [
        SectionId::About,
        SectionId::Education,
        SectionId::Projects,
        SectionId::Awards,
        SectionId::Contact,
    ];

    pub const COUNT: usize = Self::ALL.len();

    /// Stable anchor name (what a URL fragment would use).
    pub fn anchor(self) -> &'static str {
        match self {
            SectionId::About => "about",
            SectionId::Education => "education",
            SectionId::Projects => "projects",
            SectionId::Awards => "awards",
            SectionId::Contact => "contact",
        }
    }

    /// Human-readable navigation label.
    pub fn label(self) -> &'static str {
        match self {
            SectionId::About => "About",
            SectionId::Education => "Education",
            SectionId::Projects => "Projects",
            SectionId::Awards => "Awards",
            SectionId::Contact => "Contact",
        }
    }

    /// Position in declaration order.
    pub fn index(self) -> usize {
        self as usize
    }

    pub fn next(self) -> Option<Self> {
        Self::ALL.get(self.index() + 1).copied()
    }

    pub fn prev(self) -> Option<Self> {
        self.index().checked_sub(1).map(|i| Self::ALL[i])
    }
}

impl Default for SectionId {
    fn default() -> Self {
        SectionId::About
    }
}

impl fmt::Display for SectionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.anchor())
    }
}

// ───────────────────────────────────────── geometry ──────────

/// Vertical extent of a rendered block in document coordinates.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Bounds {
    pub top: f64,
    pub bottom: f64,
}

impl Bounds {
    /// Build bounds, swapping the edges if they arrive inverted.
    pub fn new(top: f64, bottom: f64) -> Self {
        if bottom < top {
            Self { top: bottom, bottom: top }
        } else {
            Self { top, bottom }
        }
    }

    pub fn height(&self) -> f64 {
        self.bottom - self.top
    }

    /// The same bounds relative to a viewport scrolled to `scroll_top`.
    pub fn relative_to(&self, scroll_top: f64) -> Bounds {
        Bounds {
            top: self.top - scroll_top,
            bottom: self.bottom - scroll_top,
        }
    }
}

/// A section definition.  Created once at startup.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Section {
    pub id: SectionId,
    pub label: &'static str,
}

impl Section {
    pub fn new(id: SectionId) -> Self {
        Self { id, label: id.label() }
    }

    /// The full ordered section list.
    pub fn all() -> Vec<Section> {
        SectionId::ALL.into_iter().map(Section::new).collect()
    }
}

/// Geometry read from the layout system after one layout pass.
///
/// A `None` entry means the block has not been laid out yet; consumers
/// skip it for the current cycle.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct LayoutSnapshot {
    sections: [Option<Bounds>; SectionId::COUNT],
    hero: Option<Bounds>,
}

impl LayoutSnapshot {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_section(mut self, id: SectionId, bounds: Bounds) -> Self {
        self.set_section(id, bounds);
        self
    }

    pub fn with_hero(mut self, bounds: Bounds) -> Self {
        self.hero = Some(bounds);
        self
    }

    pub fn set_section(&mut self, id: SectionId, bounds: Bounds) {
        self.sections[id.index()] = Some(bounds);
    }

    pub fn section(&self, id: SectionId) -> Option<Bounds> {
        self.sections[id.index()]
    }

    pub fn hero(&self) -> Option<Bounds> {
        self.hero
    }
}

/// What every scroll or visibility handler sees: where the viewport is and
/// where everything was laid out at that instant.
#[derive(Debug, Clone, PartialEq)]
pub struct ViewportFrame {
    /// Document scroll offset.  Never negative.
    pub scroll_top: f64,
    pub viewport_height: f64,
    pub layout: LayoutSnapshot,
}

impl ViewportFrame {
    pub fn new(scroll_top: f64, viewport_height: f64, layout: LayoutSnapshot) -> Self {
        Self {
            scroll_top: scroll_top.max(0.0),
            viewport_height: viewport_height.max(0.0),
            layout,
        }
    }

    pub fn viewport_bottom(&self) -> f64 {
        self.scroll_top + self.viewport_height
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_order_and_neighbours() {
        assert_eq!(SectionId::ALL[0], SectionId::default());
        assert_eq!(SectionId::About.next(), Some(SectionId::Education));
        assert_eq!(SectionId::Contact.next(), None);
        assert_eq!(SectionId::About.prev(), None);
        assert_eq!(SectionId::Awards.prev(), Some(SectionId::Projects));
    }

    #[test]
    fn test_display_uses_anchor() {
        let anchors: Vec<String> = SectionId::ALL.iter().map(|id| id.to_string()).collect();
        assert_eq!(anchors, ["about", "education", "projects", "awards", "contact"]);
    }

    #[test]
    fn test_bounds_normalise_and_relative() {
        let b = Bounds::new(800.0, 0.0);
        assert_eq!(b.top, 0.0);
        assert_eq!(b.bottom, 800.0);
        let rel = Bounds::new(800.0, 1800.0).relative_to(850.0);
        assert_eq!(rel.top, -50.0);
        assert_eq!(rel.bottom, 950.0);
    }

    #[test]
    fn test_frame_clamps_negative_scroll() {
        let frame = ViewportFrame::new(-40.0, 600.0, LayoutSnapshot::new());
        assert_eq!(frame.scroll_top, 0.0);
        assert_eq!(frame.viewport_bottom(), 600.0);
    }
}
