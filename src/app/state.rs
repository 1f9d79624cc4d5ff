//! Central application state.
//!
//! All mutable state lives here so that the rest of the app can be pure
//! functions over `&AppState` (rendering) or `&mut AppState` (event handling).
//! Each `AppState` owns its own page, signals and scroll position; nothing
//! is global.

use std::cell::Cell;
use std::rc::Rc;

use ratatui::layout::Rect;

use crate::config::AppConfig;
use crate::core::content::Content;
use crate::core::page::{PageConfig, PageController, PageSignals, PageSnapshot};
use crate::core::reveal::DetectionSupport;
use crate::core::section::{SectionId, ViewportFrame};
use crate::core::signal::Subscription;
use crate::ui::document::DocumentLayout;
use crate::ui::layout::AppLayout;
use crate::ui::nav::NavBar;
use crate::ui::smooth_scroll::SmoothScroll;

/// Space left above a section after a navigation jump, in document units.
pub const SCROLL_MARGIN: f64 = 80.0;

/// What the last emitted frame looked like, to decide what changed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct FrameKey {
    scroll_row: usize,
    viewport_rows: u16,
    width: u16,
    award_tab: usize,
}

/// Top-level application state.
pub struct AppState {
    pub config: AppConfig,
    pub content: &'static Content,
    /// The page laid out for the current width.
    pub document: DocumentLayout,
    pub award_tab: usize,
    pub scroll: SmoothScroll,
    /// Full terminal area from the last resize.
    pub terminal_area: Rect,
    pub signals: PageSignals,
    pub page: PageController,
    /// Navigation highlight, fed by active-section notifications.
    pub nav_active: Rc<Cell<SectionId>>,
    nav_subscription: Option<Subscription>,
    last_frame: Option<FrameKey>,
    /// Controls the main event loop.
    pub should_quit: bool,
    /// An optional status message shown in the bottom bar.
    pub status_message: Option<String>,
}

impl AppState {
    /// `terminal_area` is the initial size; `None` when the terminal could
    /// not report one, which disables reveal detection (fail open).
    pub fn new(config: AppConfig, content: &'static Content, terminal_area: Option<Rect>) -> Self {
        let area = terminal_area.unwrap_or_else(|| Rect::new(0, 0, 80, 24));
        let doc_area = AppLayout::from_area(area).doc_area;
        let viewport_height = terminal_area.map(|_| f64::from(doc_area.height) * config.units_per_row);

        let page = PageController::new(PageConfig {
            reference_offset: config.reference_offset,
            reveal_margin: config.reveal_margin,
            support: DetectionSupport::detect(config.reveal_animations, viewport_height),
        });
        let nav_active = Rc::new(Cell::new(page.active_section()));

        Self {
            scroll: SmoothScroll::new(config.scroll_speed),
            document: DocumentLayout::build(content, doc_area.width, 0),
            award_tab: 0,
            terminal_area: area,
            signals: PageSignals::new(),
            page,
            nav_active,
            nav_subscription: None,
            last_frame: None,
            should_quit: false,
            status_message: None,
            config,
            content,
        }
    }

    // ── lifecycle ───────────────────────────────────────────────

    /// Subscribe the page and the nav highlight.
    pub fn mount(&mut self) {
        self.page.mount(&self.signals);
        if self.nav_subscription.is_none() {
            let nav = Rc::clone(&self.nav_active);
            self.nav_subscription = Some(self.page.on_active_change(move |id| nav.set(*id)));
        }
    }

    /// Release every subscription.  Safe to call more than once.
    pub fn unmount(&mut self) {
        self.nav_subscription = None;
        self.page.unmount();
    }

    // ── geometry ────────────────────────────────────────────────

    pub fn layout(&self) -> AppLayout {
        AppLayout::from_area(self.terminal_area)
    }

    pub fn viewport_rows(&self) -> u16 {
        self.layout().doc_area.height
    }

    pub fn resize(&mut self, area: Rect) {
        if area == self.terminal_area {
            return;
        }
        self.terminal_area = area;
        if self.layout().doc_area.width != self.document.width() {
            self.relayout();
        }
        self.scroll.clamp(self.max_scroll());
    }

    fn relayout(&mut self) {
        self.document = DocumentLayout::build(self.content, self.layout().doc_area.width, self.award_tab);
        self.scroll.clamp(self.max_scroll());
    }

    pub fn max_scroll(&self) -> f64 {
        self.document.max_scroll(self.viewport_rows() as usize) as f64
    }

    /// The viewport as the core sees it, at the displayed scroll row.
    pub fn viewport_frame(&self) -> ViewportFrame {
        let upr = self.config.units_per_row;
        ViewportFrame::new(
            self.scroll.row() as f64 * upr,
            f64::from(self.viewport_rows()) * upr,
            self.document.snapshot(upr),
        )
    }

    // ── scrolling ───────────────────────────────────────────────

    pub fn scroll_by(&mut self, rows: f64) {
        let max = self.max_scroll();
        self.scroll.nudge(rows, max);
    }

    pub fn page_by(&mut self, pages: f64) {
        let rows = f64::from(self.viewport_rows().saturating_sub(2).max(1));
        self.scroll_by(rows * pages);
    }

    pub fn scroll_to_row(&mut self, row: f64) {
        let max = self.max_scroll();
        self.scroll.set_target(row, max);
    }

    /// Smooth-scroll so `id` sits just below the top of the viewport.
    pub fn scroll_to_section(&mut self, id: SectionId) {
        let margin_rows = (SCROLL_MARGIN / self.config.units_per_row).round();
        let top = self.document.section_rows(id).start as f64;
        self.scroll_to_row(top - margin_rows);
        tracing::debug!(section = %id, "jump");
    }

    /// Jump to the section after the active one.  Past the last section
    /// nothing happens.
    pub fn next_section(&mut self) {
        if let Some(id) = self.page.active_section().next() {
            self.scroll_to_section(id);
        }
    }

    /// Jump to the section before the active one, or the top of the page
    /// from the first.
    pub fn prev_section(&mut self) {
        match self.page.active_section().prev() {
            Some(id) => self.scroll_to_section(id),
            None => self.scroll_to_row(0.0),
        }
    }

    pub fn set_award_tab(&mut self, tab: usize) {
        let tab = tab % self.content.awards.len().max(1);
        if tab != self.award_tab {
            self.award_tab = tab;
            self.relayout();
            self.status_message = Some(format!("Awards: {}", self.content.awards[tab].title));
        }
    }

    pub fn cycle_award_tab(&mut self) {
        self.set_award_tab(self.award_tab + 1);
    }

    // ── per-frame ───────────────────────────────────────────────

    /// Advance the scroll animation and emit at most one event for this
    /// frame: a scroll event when the displayed row moved, a visibility
    /// event when only the layout or viewport changed.
    pub fn pump(&mut self) {
        self.scroll.tick();
        let key = FrameKey {
            scroll_row: self.scroll.row(),
            viewport_rows: self.viewport_rows(),
            width: self.document.width(),
            award_tab: self.award_tab,
        };
        let previous = self.last_frame.replace(key);
        if previous == Some(key) {
            return;
        }

        let frame = self.viewport_frame();
        match previous {
            Some(prev) if prev.scroll_row != key.scroll_row => self.signals.scrolled(&frame),
            _ => self.signals.relaid(&frame),
        }
    }

    pub fn snapshot(&self) -> PageSnapshot {
        self.page.snapshot()
    }

    pub fn nav_bar(&self) -> NavBar<'static> {
        NavBar {
            name: self.content.profile.name,
            resume: self.content.profile.resume.label,
            active: self.nav_active.get(),
        }
    }

    /// Status text: message or key hints, then the active section and how
    /// far down the page the viewport is.
    pub fn status_line(&self) -> String {
        let hint = self.config.status_bar_hint();
        let left = self.status_message.as_deref().unwrap_or(&hint);
        let max = self.max_scroll();
        let pct = if max > 0.0 { self.scroll.row() as f64 / max * 100.0 } else { 100.0 };
        format!(" {left}  │  {}  {pct:>3.0}%", self.nav_active.get().label())
    }
}

impl Drop for AppState {
    fn drop(&mut self) {
        self.unmount();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::content::CONTENT;

    fn state() -> AppState {
        let mut s = AppState::new(AppConfig::default(), &CONTENT, Some(Rect::new(0, 0, 100, 30)));
        s.mount();
        s
    }

    fn settle(s: &mut AppState) {
        for _ in 0..200 {
            s.pump();
            if !s.scroll.is_animating() {
                s.pump();
                return;
            }
        }
        panic!("scroll never settled");
    }

    #[test]
    fn test_starts_on_about_with_hero_visible() {
        let mut s = state();
        s.pump();
        assert_eq!(s.nav_active.get(), SectionId::About);
        assert_eq!(s.snapshot().hero_opacity, 1.0);
    }

    #[test]
    fn test_jump_to_each_section_highlights_it() {
        let mut s = state();
        for id in SectionId::ALL {
            s.scroll_to_section(id);
            settle(&mut s);
            let max = s.max_scroll();
            if s.scroll.target() < max {
                assert_eq!(s.nav_active.get(), id, "jump to {id}");
                assert!(s.page.is_revealed(id));
            }
        }
    }

    #[test]
    fn test_next_and_prev_section() {
        let mut s = state();
        s.next_section();
        settle(&mut s);
        assert_eq!(s.nav_active.get(), SectionId::Education);
        s.prev_section();
        settle(&mut s);
        assert_eq!(s.nav_active.get(), SectionId::About);
        s.prev_section();
        settle(&mut s);
        assert_eq!(s.scroll.row(), 0);
        // Back at the top the previous section is retained.
        assert_eq!(s.nav_active.get(), SectionId::About);
    }

    #[test]
    fn test_reveals_survive_scrolling_back() {
        let mut s = state();
        s.scroll_to_section(SectionId::Projects);
        settle(&mut s);
        assert!(s.page.is_revealed(SectionId::Projects));
        s.scroll_to_row(0.0);
        settle(&mut s);
        assert!(s.page.is_revealed(SectionId::Projects));
        assert_eq!(s.snapshot().hero_opacity, 1.0);
    }

    #[test]
    fn test_hero_fades_as_it_scrolls_away() {
        let mut s = state();
        let hero_end = s.document.hero_rows().end as f64;
        s.scroll_to_row(hero_end);
        settle(&mut s);
        assert_eq!(s.snapshot().hero_opacity, 0.0);
    }

    #[test]
    fn test_award_tab_relayout_keeps_state() {
        let mut s = state();
        s.scroll_to_section(SectionId::Awards);
        settle(&mut s);
        s.cycle_award_tab();
        assert_eq!(s.award_tab, 1);
        assert_eq!(s.document.award_tab(), 1);
        s.pump();
        assert!(s.page.is_revealed(SectionId::Awards));
        s.set_award_tab(CONTENT.awards.len());
        assert_eq!(s.award_tab, 0);
    }

    #[test]
    fn test_unmount_freezes_page() {
        let mut s = state();
        s.pump();
        s.unmount();
        assert_eq!(s.signals.scroll.subscriber_count(), 0);
        s.scroll_to_section(SectionId::Contact);
        settle(&mut s);
        assert_eq!(s.nav_active.get(), SectionId::About);
        assert!(!s.page.is_revealed(SectionId::Contact));
    }

    #[test]
    fn test_unknown_terminal_size_fails_open() {
        let s = AppState::new(AppConfig::default(), &CONTENT, None);
        assert!(SectionId::ALL.iter().all(|&id| s.page.is_revealed(id)));
    }

    #[test]
    fn test_resize_reflows() {
        let mut s = state();
        let before = s.document.len();
        s.resize(Rect::new(0, 0, 40, 30));
        assert_eq!(s.document.width(), 40);
        assert!(s.document.len() > before);
        assert!(s.scroll.target() <= s.max_scroll());
    }

    #[test]
    fn test_status_line_shows_section_and_position() {
        let mut s = state();
        s.pump();
        let line = s.status_line();
        assert!(line.contains(SectionId::About.label()));
        assert!(line.ends_with("  0%"), "{line}");

        s.scroll_to_row(s.max_scroll());
        settle(&mut s);
        assert!(s.status_line().ends_with("100%"));
    }
}
