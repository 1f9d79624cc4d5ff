//! Input handling — maps key/mouse events to state mutations.
//!
//! Handlers only move scroll targets and flip flags.  The page components
//! hear about the result once per frame through [`AppState::pump`].

use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers, MouseButton, MouseEvent, MouseEventKind};

use crate::config::Action;
use crate::ui::layout::point_in_rect;

use super::state::AppState;

/// Rows moved per mouse wheel notch.
const WHEEL_ROWS: f64 = 3.0;

/// Process a key event.
pub fn handle_key(state: &mut AppState, key: KeyEvent) {
    if key.kind == KeyEventKind::Release {
        return;
    }
    // Ctrl+c always quits.
    if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
        state.should_quit = true;
        return;
    }

    let Some(action) = state.config.match_key(key) else {
        return;
    };
    state.status_message = None;

    match action {
        Action::ScrollUp => state.scroll_by(-1.0),
        Action::ScrollDown => state.scroll_by(1.0),
        Action::PageUp => state.page_by(-1.0),
        Action::PageDown => state.page_by(1.0),
        Action::PrevSection => state.prev_section(),
        Action::NextSection => state.next_section(),
        Action::Top => state.scroll_to_row(0.0),
        Action::Bottom => state.scroll_to_row(state.max_scroll()),
        Action::NextTab => state.cycle_award_tab(),
        Action::Quit => state.should_quit = true,
    }
}

// ── Mouse ───────────────────────────────────────────────────────

pub fn handle_mouse(state: &mut AppState, mouse: MouseEvent) {
    let layout = state.layout();

    match mouse.kind {
        MouseEventKind::ScrollUp => state.scroll_by(-WHEEL_ROWS),
        MouseEventKind::ScrollDown => state.scroll_by(WHEEL_ROWS),
        MouseEventKind::Down(MouseButton::Left) => {
            if let Some(id) = state.nav_bar().hit_test(layout.nav_row(), mouse.column, mouse.row) {
                state.scroll_to_section(id);
                return;
            }
            let doc = layout.doc_area;
            if !point_in_rect(doc, mouse.column, mouse.row) {
                return;
            }
            let doc_row = state.scroll.row() + usize::from(mouse.row - doc.y);
            if let Some(tab) = state.document.tab_at(doc_row, mouse.column - doc.x) {
                state.set_award_tab(tab);
            }
        }
        _ => {}
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::AppConfig;
    use crate::core::content::CONTENT;
    use crate::core::section::SectionId;
    use crossterm::event::KeyEventState;
    use ratatui::layout::Rect;

    fn state() -> AppState {
        let mut s = AppState::new(AppConfig::default(), &CONTENT, Some(Rect::new(0, 0, 120, 30)));
        s.mount();
        s
    }

    fn press(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    fn click(column: u16, row: u16) -> MouseEvent {
        MouseEvent {
            kind: MouseEventKind::Down(MouseButton::Left),
            column,
            row,
            modifiers: KeyModifiers::NONE,
        }
    }

    #[test]
    fn test_quit_keys() {
        let mut s = state();
        handle_key(&mut s, KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL));
        assert!(s.should_quit);

        let mut s = state();
        handle_key(&mut s, press(KeyCode::Char('q')));
        assert!(s.should_quit);
    }

    #[test]
    fn test_release_events_ignored() {
        let mut s = state();
        let mut key = press(KeyCode::Down);
        key.kind = KeyEventKind::Release;
        key.state = KeyEventState::NONE;
        handle_key(&mut s, key);
        assert_eq!(s.scroll.target(), 0.0);
    }

    #[test]
    fn test_scroll_keys_move_target() {
        let mut s = state();
        handle_key(&mut s, press(KeyCode::Down));
        handle_key(&mut s, press(KeyCode::Char('j')));
        assert_eq!(s.scroll.target(), 2.0);
        handle_key(&mut s, press(KeyCode::End));
        assert_eq!(s.scroll.target(), s.max_scroll());
        handle_key(&mut s, press(KeyCode::Home));
        assert_eq!(s.scroll.target(), 0.0);
    }

    #[test]
    fn test_wheel_scrolls() {
        let mut s = state();
        let wheel = MouseEvent {
            kind: MouseEventKind::ScrollDown,
            column: 10,
            row: 10,
            modifiers: KeyModifiers::NONE,
        };
        handle_mouse(&mut s, wheel);
        assert_eq!(s.scroll.target(), WHEEL_ROWS);
    }

    #[test]
    fn test_nav_click_jumps() {
        let mut s = state();
        let nav_row = s.layout().nav_row();
        let (id, rect) = s.nav_bar().label_areas(nav_row)[1];
        assert_eq!(id, SectionId::Education);
        handle_mouse(&mut s, click(rect.x, rect.y));
        let expected = s.document.section_rows(SectionId::Education).start as f64 - 4.0;
        assert_eq!(s.scroll.target(), expected);
    }

    #[test]
    fn test_tab_key_cycles_awards() {
        let mut s = state();
        handle_key(&mut s, press(KeyCode::Char('t')));
        assert_eq!(s.award_tab, 1);
        assert!(s.status_message.is_some());
    }
}
