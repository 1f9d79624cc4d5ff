//! One-shot reveal detection and the entrance transition it triggers.
//!
//! Each registered section starts hidden.  The first visibility event in
//! which the section intersects the viewport (shrunk by a margin on both
//! edges) latches it revealed and the section is no longer observed.  The
//! latch never resets: scrolling back up leaves content visible.
//!
//! When detection is unavailable the detector fails open and reports every
//! section revealed from the start.

use std::collections::BTreeMap;
use std::time::{Duration, Instant};

use super::section::{Bounds, Section, SectionId, ViewportFrame};

/// How far in from the viewport edges a section must reach before it counts.
pub const DEFAULT_REVEAL_MARGIN: f64 = 100.0;
/// Length of the hidden → visible transition.
pub const REVEAL_DURATION: Duration = Duration::from_millis(600);
/// Extra delay per child for staggered sections.
pub const STAGGER_DELAY: Duration = Duration::from_millis(100);
/// Vertical offset of hidden content, in document units.
pub const REVEAL_DISTANCE: f64 = 20.0;

// ───────────────────────────────────────── support ───────────

/// Whether the runtime can tell us what is on screen.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DetectionSupport {
    Available,
    Unavailable,
}

impl DetectionSupport {
    /// Detection needs to be enabled and a real viewport height to work with.
    pub fn detect(enabled: bool, viewport_height: Option<f64>) -> Self {
        match viewport_height {
            Some(h) if enabled && h > 0.0 => DetectionSupport::Available,
            _ => DetectionSupport::Unavailable,
        }
    }
}

// ───────────────────────────────────────── state ─────────────

/// Per-section latch.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Latch {
    Hidden,
    /// `at` is when the latch flipped; `None` means revealed without a
    /// transition (fail-open).
    Revealed { at: Option<Instant> },
}

impl Latch {
    pub fn is_revealed(self) -> bool {
        matches!(self, Latch::Revealed { .. })
    }
}

/// `RevealState`: section → latch.  Monotonic.
#[derive(Debug, Clone, Default)]
pub struct RevealState {
    latches: BTreeMap<SectionId, Latch>,
}

impl RevealState {
    pub fn latch(&self, id: SectionId) -> Latch {
        self.latches.get(&id).copied().unwrap_or(Latch::Hidden)
    }

    pub fn is_revealed(&self, id: SectionId) -> bool {
        self.latch(id).is_revealed()
    }

    /// Flip `id` to revealed.  Returns `false` if it already was.
    fn reveal(&mut self, id: SectionId, at: Option<Instant>) -> bool {
        let slot = self.latches.entry(id).or_insert(Latch::Hidden);
        if slot.is_revealed() {
            return false;
        }
        *slot = Latch::Revealed { at };
        true
    }
}

// ───────────────────────────────────────── detector ──────────

/// Maintains the [`RevealState`] for a set of registered sections.
#[derive(Debug)]
pub struct ViewportRevealDetector {
    /// Sections still being observed, in declared order.
    observed: Vec<SectionId>,
    margin: f64,
    support: DetectionSupport,
    state: RevealState,
}

impl ViewportRevealDetector {
    pub fn new(sections: &[Section], margin: f64, support: DetectionSupport) -> Self {
        let mut state = RevealState::default();
        let mut observed = Vec::with_capacity(sections.len());
        for section in sections {
            state.latches.insert(section.id, Latch::Hidden);
            observed.push(section.id);
        }

        let mut detector = Self {
            observed,
            margin: margin.max(0.0),
            support,
            state,
        };
        if support == DetectionSupport::Unavailable {
            tracing::debug!("reveal detection unavailable, showing all sections");
            detector.reveal_all();
        }
        detector
    }

    pub fn support(&self) -> DetectionSupport {
        self.support
    }

    pub fn state(&self) -> &RevealState {
        &self.state
    }

    pub fn is_revealed(&self, id: SectionId) -> bool {
        self.state.is_revealed(id)
    }

    /// Number of sections that have not fired yet.
    pub fn observed_count(&self) -> usize {
        self.observed.len()
    }

    /// Switch to fail-open mid-life (e.g. the viewport height went away).
    pub fn reveal_all(&mut self) {
        self.support = DetectionSupport::Unavailable;
        for id in self.observed.drain(..) {
            self.state.reveal(id, None);
        }
    }

    pub fn on_visibility(&mut self, frame: &ViewportFrame) -> Vec<SectionId> {
        self.on_visibility_at(frame, Instant::now())
    }

    /// Latch every observed section that now intersects the shrunk
    /// viewport.  Returns the sections that flipped on this call.
    pub fn on_visibility_at(&mut self, frame: &ViewportFrame, now: Instant) -> Vec<SectionId> {
        if self.observed.is_empty() {
            return Vec::new();
        }
        let Some(root) = self.root(frame) else {
            self.reveal_all();
            return Vec::new();
        };

        let mut fired = Vec::new();
        self.observed.retain(|&id| {
            let Some(bounds) = frame.layout.section(id) else {
                return true;
            };
            if !intersects(bounds, root) {
                return true;
            }
            if self.state.reveal(id, Some(now)) {
                tracing::debug!(section = %id, scroll = frame.scroll_top, "revealed");
                fired.push(id);
            }
            false
        });
        fired
    }

    /// The viewport shrunk by the margin on both edges.  A viewport too
    /// short to hold both margins collapses to its midline.
    fn root(&self, frame: &ViewportFrame) -> Option<Bounds> {
        if frame.viewport_height <= 0.0 {
            return None;
        }
        let top = frame.scroll_top + self.margin;
        let bottom = frame.viewport_bottom() - self.margin;
        if bottom >= top {
            Some(Bounds { top, bottom })
        } else {
            let mid = frame.scroll_top + frame.viewport_height / 2.0;
            Some(Bounds { top: mid, bottom: mid })
        }
    }
}

fn intersects(a: Bounds, b: Bounds) -> bool {
    a.top <= b.bottom && a.bottom >= b.top
}

// ───────────────────────────────────────── transition ────────

/// Visual state of revealed content: `opacity` in `[0, 1]`, `offset` in
/// document units below the resting position.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RevealStyle {
    pub opacity: f64,
    pub offset: f64,
}

impl RevealStyle {
    pub const HIDDEN: RevealStyle = RevealStyle {
        opacity: 0.0,
        offset: REVEAL_DISTANCE,
    };
    pub const VISIBLE: RevealStyle = RevealStyle {
        opacity: 1.0,
        offset: 0.0,
    };

    /// Style `elapsed` after the latch flipped, for the `child_index`-th
    /// staggered child.  Child `i` starts `i` stagger steps late.
    pub fn after(elapsed: Duration, child_index: usize) -> Self {
        if elapsed >= settle_time(child_index + 1) {
            return Self::VISIBLE;
        }
        let delay = STAGGER_DELAY * child_index as u32;
        let Some(running) = elapsed.checked_sub(delay) else {
            return Self::HIDDEN;
        };
        let t = (running.as_secs_f64() / REVEAL_DURATION.as_secs_f64()).clamp(0.0, 1.0);
        let eased = ease_out_cubic(t);
        Self {
            opacity: eased,
            offset: REVEAL_DISTANCE * (1.0 - eased),
        }
    }

    /// Style for a latch as of `now`.
    pub fn at(latch: Latch, now: Instant, child_index: usize) -> Self {
        match latch {
            Latch::Hidden => Self::HIDDEN,
            Latch::Revealed { at: None } => Self::VISIBLE,
            Latch::Revealed { at: Some(at) } => {
                Self::after(now.saturating_duration_since(at), child_index)
            }
        }
    }
}

/// When the last of `children` staggered children finishes animating.
pub fn settle_time(children: usize) -> Duration {
    REVEAL_DURATION + STAGGER_DELAY * children.saturating_sub(1) as u32
}

fn ease_out_cubic(t: f64) -> f64 {
    1.0 - (1.0 - t).powi(3)
}
