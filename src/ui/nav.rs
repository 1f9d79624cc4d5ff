//! Sticky header: name, section links with the active one highlighted, and
//! the resume link.

use ratatui::{
    buffer::Buffer,
    layout::Rect,
    text::{Line, Span},
    widgets::{Block, Borders, Widget},
};

use crate::core::section::SectionId;

use super::theme::Theme;

const LABEL_GAP: u16 = 3;

pub struct NavBar<'a> {
    pub name: &'a str,
    pub resume: &'a str,
    pub active: SectionId,
}

impl NavBar<'_> {
    /// Where each section label lands inside `area`.  Labels that do not
    /// fit before the resume button are dropped.
    pub fn label_areas(&self, area: Rect) -> Vec<(SectionId, Rect)> {
        let right_edge = area
            .x
            .saturating_add(area.width)
            .saturating_sub(self.resume_width() + 2);
        let mut x = area.x + 1 + self.name.chars().count() as u16 + LABEL_GAP + 1;
        let mut out = Vec::new();
        for id in SectionId::ALL {
            let w = id.label().len() as u16;
            if x.saturating_add(w) > right_edge {
                break;
            }
            out.push((id, Rect { x, y: area.y, width: w, height: 1 }));
            x += w + LABEL_GAP;
        }
        out
    }

    /// Section whose label is under (`column`, `row`).
    pub fn hit_test(&self, area: Rect, column: u16, row: u16) -> Option<SectionId> {
        self.label_areas(area)
            .into_iter()
            .find(|(_, r)| row == r.y && column >= r.x && column < r.x + r.width)
            .map(|(id, _)| id)
    }

    fn resume_width(&self) -> u16 {
        self.resume.chars().count() as u16 + 2
    }
}

impl Widget for NavBar<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        if area.height == 0 {
            return;
        }
        let block = Block::default()
            .borders(Borders::BOTTOM)
            .border_style(Theme::border_style());
        let inner = block.inner(area);
        block.render(area, buf);
        if inner.height == 0 {
            return;
        }
        let row = inner.y;

        buf.set_line(
            inner.x + 1,
            row,
            &Line::from(Span::styled(self.name, Theme::nav_name_style())),
            inner.width.saturating_sub(1),
        );

        for (id, rect) in self.label_areas(inner) {
            let style = if id == self.active {
                Theme::nav_active_style()
            } else {
                Theme::nav_label_style()
            };
            buf.set_span(rect.x, row, &Span::styled(id.label(), style), rect.width);
        }

        let resume = format!(" {} ", self.resume);
        let rx = inner
            .x
            .saturating_add(inner.width)
            .saturating_sub(self.resume_width() + 1);
        if rx > inner.x {
            buf.set_span(rx, row, &Span::styled(resume, Theme::nav_resume_style()), self.resume_width());
        }
    }
}
