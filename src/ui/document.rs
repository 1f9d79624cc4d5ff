//! The scrollable document: lays the static content out into terminal rows
//! and renders a window of them with reveal and hero effects applied.
//!
//! Layout is the "layout system" the core reads geometry from: every row
//! belongs to the hero, a section, a gap or the footer, and row ranges are
//! converted to document units with a fixed `units_per_row`.

use std::ops::Range;
use std::time::Instant;

use chrono::Datelike;
use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Clear, Widget},
};

use crate::core::content::Content;
use crate::core::page::PageSnapshot;
use crate::core::reveal::RevealStyle;
use crate::core::section::{Bounds, LayoutSnapshot, SectionId};

use super::theme::Theme;

/// Blank rows between consecutive blocks.
const BLOCK_GAP: usize = 2;
/// Left/right margin inside the document area.
const MARGIN: u16 = 2;

// ───────────────────────────────────────── row model ─────────

/// Which block a row belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Owner {
    Hero,
    Section(SectionId),
    Gap,
    Footer,
}

/// Semantic colour of a span.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tone {
    Title,
    Accent,
    Heading,
    Subheading,
    Body,
    Muted,
    Tag,
    Link,
    Field,
    Rule,
    Tab,
    TabActive,
}

/// One laid-out terminal row.
#[derive(Debug, Clone)]
pub struct DocLine {
    pub owner: Owner,
    /// Stagger index within the owning block.  Rows outside a staggered
    /// list share index 0 with the first child.
    pub child: usize,
    pub centered: bool,
    pub spans: Vec<(String, Tone)>,
}

impl DocLine {
    pub fn text(&self) -> String {
        self.spans.iter().map(|(s, _)| s.as_str()).collect()
    }
}

// ───────────────────────────────────────── layout ────────────

/// The whole page laid out for one terminal width.
#[derive(Debug, Clone)]
pub struct DocumentLayout {
    lines: Vec<DocLine>,
    width: u16,
    award_tab: usize,
    hero: Range<usize>,
    sections: [Range<usize>; SectionId::COUNT],
    /// Row holding the awards tab strip and the column span of each tab.
    tab_strip: Option<(usize, Vec<Range<u16>>)>,
}

impl DocumentLayout {
    pub fn build(content: &Content, width: u16, award_tab: usize) -> Self {
        let mut b = Builder::new(width);

        b.blank(Owner::Hero, 2);
        let hero_start = b.row();
        build_hero(&mut b, content);
        let hero = hero_start..b.row();
        b.blank(Owner::Hero, 2);

        let mut sections: [Range<usize>; SectionId::COUNT] = Default::default();
        let mut tab_strip = None;
        for id in SectionId::ALL {
            b.blank(Owner::Gap, BLOCK_GAP);
            let start = b.row();
            let owner = Owner::Section(id);
            b.blank(owner, 1);
            match id {
                SectionId::About => build_about(&mut b, content),
                SectionId::Education => build_education(&mut b, content),
                SectionId::Projects => build_projects(&mut b, content),
                SectionId::Awards => tab_strip = Some(build_awards(&mut b, content, award_tab)),
                SectionId::Contact => build_contact(&mut b, content),
            }
            b.blank(owner, 1);
            sections[id.index()] = start..b.row();
        }

        b.blank(Owner::Gap, BLOCK_GAP);
        build_footer(&mut b, content);

        Self {
            lines: b.lines,
            width,
            award_tab,
            hero,
            sections,
            tab_strip,
        }
    }

    pub fn lines(&self) -> &[DocLine] {
        &self.lines
    }

    pub fn len(&self) -> usize {
        self.lines.len()
    }

    pub fn width(&self) -> u16 {
        self.width
    }

    pub fn award_tab(&self) -> usize {
        self.award_tab
    }

    pub fn hero_rows(&self) -> Range<usize> {
        self.hero.clone()
    }

    pub fn section_rows(&self, id: SectionId) -> Range<usize> {
        self.sections[id.index()].clone()
    }

    /// Largest useful scroll row for a viewport `viewport_rows` tall.
    pub fn max_scroll(&self, viewport_rows: usize) -> usize {
        self.lines.len().saturating_sub(viewport_rows)
    }

    /// Geometry in document units, as the core components consume it.
    pub fn snapshot(&self, units_per_row: f64) -> LayoutSnapshot {
        let to_bounds = |r: &Range<usize>| Bounds::new(r.start as f64 * units_per_row, r.end as f64 * units_per_row);
        let mut snap = LayoutSnapshot::new().with_hero(to_bounds(&self.hero));
        for id in SectionId::ALL {
            let rows = &self.sections[id.index()];
            if !rows.is_empty() {
                snap.set_section(id, to_bounds(rows));
            }
        }
        snap
    }

    /// Which awards tab sits at document `row`, terminal `column` (relative
    /// to the document area).
    pub fn tab_at(&self, row: usize, column: u16) -> Option<usize> {
        let (tab_row, spans) = self.tab_strip.as_ref()?;
        if *tab_row != row {
            return None;
        }
        spans.iter().position(|span| span.contains(&column))
    }
}

// ───────────────────────────────────────── builder ───────────

struct Builder {
    lines: Vec<DocLine>,
    /// Usable text width inside the margins.
    text_width: usize,
}

impl Builder {
    fn new(width: u16) -> Self {
        Self {
            lines: Vec::new(),
            text_width: width.saturating_sub(MARGIN * 2).max(16) as usize,
        }
    }

    fn row(&self) -> usize {
        self.lines.len()
    }

    fn push(&mut self, owner: Owner, child: usize, spans: Vec<(String, Tone)>) {
        self.lines.push(DocLine {
            owner,
            child,
            centered: false,
            spans,
        });
    }

    fn blank(&mut self, owner: Owner, count: usize) {
        for _ in 0..count {
            self.push(owner, 0, Vec::new());
        }
    }

    fn centered(&mut self, owner: Owner, child: usize, spans: Vec<(String, Tone)>) {
        self.lines.push(DocLine {
            owner,
            child,
            centered: true,
            spans,
        });
    }

    /// Word-wrapped paragraph with a hanging `indent`.
    fn paragraph(&mut self, owner: Owner, child: usize, tone: Tone, indent: usize, text: &str) {
        let width = self.text_width.saturating_sub(indent).max(8);
        let words: Vec<String> = text.split_whitespace().map(str::to_string).collect();
        for line in wrap_tokens(&words, width) {
            self.push(owner, child, vec![(" ".repeat(indent) + &line, tone)]);
        }
    }

    fn heading(&mut self, owner: Owner, title: &str) {
        let rule_len = self.text_width.saturating_sub(title.chars().count() + 1);
        self.push(
            owner,
            0,
            vec![
                (format!("{title} "), Tone::Heading),
                ("─".repeat(rule_len), Tone::Rule),
            ],
        );
        self.blank(owner, 1);
    }

    fn tags(&mut self, owner: Owner, child: usize, indent: usize, tags: &[&str]) {
        let tokens: Vec<String> = tags.iter().map(|t| format!("[{t}]")).collect();
        let width = self.text_width.saturating_sub(indent).max(8);
        for line in wrap_tokens(&tokens, width) {
            self.push(owner, child, vec![(" ".repeat(indent) + &line, Tone::Tag)]);
        }
    }
}

/// Greedy packing of whitespace-separated tokens into lines of at most
/// `width` characters.  Tokens longer than `width` are split.
pub fn wrap_tokens(tokens: &[String], width: usize) -> Vec<String> {
    let width = width.max(1);
    let mut lines = Vec::new();
    let mut current = String::new();
    let mut current_len = 0;

    for token in tokens {
        let mut chars: Vec<char> = token.chars().collect();
        while chars.len() > width {
            if current_len > 0 {
                lines.push(std::mem::take(&mut current));
                current_len = 0;
            }
            let rest = chars.split_off(width);
            lines.push(chars.into_iter().collect());
            chars = rest;
        }
        let len = chars.len();
        if len == 0 {
            continue;
        }
        if current_len > 0 && current_len + 1 + len > width {
            lines.push(std::mem::take(&mut current));
            current_len = 0;
        }
        if current_len > 0 {
            current.push(' ');
            current_len += 1;
        }
        current.extend(chars);
        current_len += len;
    }
    if current_len > 0 {
        lines.push(current);
    }
    lines
}

// ───────────────────────────────────────── blocks ────────────

fn build_hero(b: &mut Builder, content: &Content) {
    let p = &content.profile;
    b.centered(
        Owner::Hero,
        0,
        vec![("Hi, I'm ".into(), Tone::Title), (p.name.into(), Tone::Accent)],
    );
    b.blank(Owner::Hero, 1);
    let words: Vec<String> = p.tagline.split_whitespace().map(str::to_string).collect();
    for line in wrap_tokens(&words, b.text_width) {
        b.centered(Owner::Hero, 0, vec![(line, Tone::Body)]);
    }
    b.blank(Owner::Hero, 1);
    b.centered(Owner::Hero, 0, vec![(format!("⌖ {}", p.location), Tone::Muted)]);
    b.blank(Owner::Hero, 1);

    // The link row enters one stagger step after the text.

    let mut links = Vec::new();
    for (i, link) in p.links.iter().enumerate() {
        if i > 0 {
            links.push(("  ·  ".to_string(), Tone::Muted));
        }
        links.push((link.label.to_string(), Tone::Link));
    }
    b.centered(Owner::Hero, 1, links);
}

fn build_about(b: &mut Builder, content: &Content) {
    let owner = Owner::Section(SectionId::About);
    b.heading(owner, "About Me");
    for para in content.about {
        b.paragraph(owner, 0, Tone::Body, 0, para);
        b.blank(owner, 1);
    }
    b.push(owner, 0, vec![("Technical Skills".into(), Tone::Subheading)]);
    b.tags(owner, 0, 2, content.skills);
    b.blank(owner, 1);
    b.push(owner, 0, vec![("Research Interests".into(), Tone::Subheading)]);
    b.tags(owner, 0, 2, content.interests);
}

fn build_education(b: &mut Builder, content: &Content) {
    let owner = Owner::Section(SectionId::Education);
    let edu = &content.education;
    b.heading(owner, "Education");
    let pad = b
        .text_width
        .saturating_sub(edu.school.chars().count() + edu.years.chars().count())
        .max(2);
    b.push(
        owner,
        0,
        vec![
            (edu.school.into(), Tone::Subheading),
            (" ".repeat(pad), Tone::Body),
            (edu.years.into(), Tone::Muted),
        ],
    );
    b.paragraph(owner, 0, Tone::Body, 0, edu.degree);
    b.paragraph(owner, 0, Tone::Muted, 0, &format!("Clubs: {}", edu.clubs));
    b.blank(owner, 1);
    b.push(owner, 0, vec![("Relevant Coursework".into(), Tone::Subheading)]);
    for course in edu.coursework {
        b.paragraph(owner, 0, Tone::Body, 2, &format!("• {course}"));
    }
}

fn build_projects(b: &mut Builder, content: &Content) {
    let owner = Owner::Section(SectionId::Projects);
    b.heading(owner, "Projects");
    for (i, project) in content.projects.iter().enumerate() {
        let child = i;
        b.push(owner, child, vec![(format!("▸ {}", project.title), Tone::Subheading)]);
        b.paragraph(owner, child, Tone::Body, 2, project.summary);
        b.tags(owner, child, 2, project.tags);
        if !project.links.is_empty() {
            let mut spans = vec![("  ".to_string(), Tone::Body)];
            for link in project.links {
                spans.push((format!("{} ↗ ", link.label), Tone::Link));
                spans.push((format!("{}  ", link.url), Tone::Muted));
            }
            b.push(owner, child, spans);
        }
        if i + 1 < content.projects.len() {
            b.blank(owner, 1);
        }
    }
}

fn build_awards(b: &mut Builder, content: &Content, award_tab: usize) -> (usize, Vec<Range<u16>>) {
    let owner = Owner::Section(SectionId::Awards);
    b.heading(owner, "Awards & Publications");

    let tab = award_tab.min(content.awards.len().saturating_sub(1));
    let tab_row = b.row();
    let mut spans = Vec::new();
    let mut columns = Vec::new();
    let mut col = MARGIN;
    for (i, t) in content.awards.iter().enumerate() {
        let label = format!(" {} ", t.title);
        let w = label.chars().count() as u16;
        columns.push(col..col + w);
        col += w + 3;
        let tone = if i == tab { Tone::TabActive } else { Tone::Tab };
        spans.push((label, tone));
        spans.push((" │ ".to_string(), Tone::Rule));
    }
    spans.pop();
    b.push(owner, 0, spans);
    b.blank(owner, 1);

    if let Some(current) = content.awards.get(tab) {
        for (i, entry) in current.entries.iter().enumerate() {
            b.paragraph(owner, i, Tone::Body, 2, &format!("• {entry}"));
        }
    }
    (tab_row, columns)
}

fn build_contact(b: &mut Builder, content: &Content) {
    let owner = Owner::Section(SectionId::Contact);
    let contact = &content.contact;
    b.heading(owner, "Contact Me");
    b.paragraph(owner, 0, Tone::Body, 0, contact.blurb);
    b.blank(owner, 1);
    for (i, channel) in contact.channels.iter().enumerate() {
        b.push(
            owner,
            i,
            vec![
                (format!("  {:<10}", channel.label), Tone::Subheading),
                (channel.url.to_string(), Tone::Link),
            ],
        );
    }
    b.blank(owner, 1);

    let child = contact.channels.len();
    let field_w = b.text_width.saturating_sub(14).clamp(8, 48);
    for field in contact.form_fields {
        let rows = if *field == "Message" { 3 } else { 1 };
        for r in 0..rows {
            let label = if r == 0 { format!("  {field:<10}") } else { " ".repeat(12) };
            b.push(
                owner,
                child,
                vec![(label, Tone::Muted), (format!("[{}]", "_".repeat(field_w)), Tone::Field)],
            );
        }
    }
    b.blank(owner, 1);
    b.push(owner, child, vec![(format!("{}[ Send Message ]", " ".repeat(12)), Tone::Accent)]);
}

fn build_footer(b: &mut Builder, content: &Content) {
    b.push(Owner::Footer, 0, vec![("─".repeat(b.text_width), Tone::Rule)]);
    let year = chrono::Local::now().year();
    b.centered(
        Owner::Footer,
        0,
        vec![(format!("© {year} {}. All rights reserved.", content.profile.name), Tone::Muted)],
    );
    let mut links = Vec::new();
    for (i, link) in content.footer_links.iter().enumerate() {
        if i > 0 {
            links.push(("  ".to_string(), Tone::Muted));
        }
        links.push((link.label.to_string(), Tone::Link));
    }
    b.centered(Owner::Footer, 0, links);
    b.blank(Owner::Footer, 1);
}

// ───────────────────────────────────────── widget ────────────

/// Per-row presentation after effects.
#[derive(Debug, Clone, Copy, PartialEq)]
struct Look {
    opacity: f64,
    /// Rows pushed down from the resting position.
    shift: usize,
    /// Columns trimmed from each side (hero scale).
    inset: u16,
}

/// Renders a window of a [`DocumentLayout`] — created fresh each frame.
pub struct DocumentWidget<'a> {
    layout: &'a DocumentLayout,
    page: &'a PageSnapshot,
    scroll_row: usize,
    units_per_row: f64,
    now: Instant,
}

impl<'a> DocumentWidget<'a> {
    pub fn new(layout: &'a DocumentLayout, page: &'a PageSnapshot, scroll_row: usize) -> Self {
        Self {
            layout,
            page,
            scroll_row,
            units_per_row: 20.0,
            now: Instant::now(),
        }
    }

    pub fn units_per_row(mut self, units: f64) -> Self {
        self.units_per_row = units.max(1.0);
        self
    }

    pub fn now(mut self, now: Instant) -> Self {
        self.now = now;
        self
    }

    /// Rows a transition offset pushes content down.
    fn shift(&self, style: RevealStyle) -> usize {
        (style.offset / self.units_per_row).round() as usize
    }

    fn look(&self, line: &DocLine, width: u16) -> Look {
        match line.owner {
            Owner::Hero => {
                let entrance = RevealStyle::at(self.page.hero_entrance, self.now, line.child);
                let inset = ((1.0 - self.page.hero_scale) * f64::from(width) / 2.0).round() as u16;
                Look {
                    opacity: entrance.opacity * self.page.hero_opacity,
                    shift: self.shift(entrance),
                    inset,
                }
            }
            Owner::Section(id) => {
                let style = RevealStyle::at(self.page.reveal.latch(id), self.now, line.child);
                Look {
                    opacity: style.opacity,
                    shift: self.shift(style),
                    inset: 0,
                }
            }
            Owner::Gap | Owner::Footer => Look {
                opacity: 1.0,
                shift: 0,
                inset: 0,
            },
        }
    }
}

impl Widget for DocumentWidget<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        if area.width == 0 || area.height == 0 {
            return;
        }
        let height = area.height as usize;
        let max_shift = (crate::core::reveal::REVEAL_DISTANCE / self.units_per_row).ceil() as usize;
        let first = self.scroll_row.saturating_sub(max_shift);
        let last = (self.scroll_row + height).min(self.layout.len());

        // Later rows overwrite earlier shifted ones, so draw top-down.
        for row in first..last {
            let line = &self.layout.lines[row];
            let look = self.look(line, area.width);
            let Some(y) = (row + look.shift).checked_sub(self.scroll_row) else {
                continue;
            };
            if y >= height {
                continue;
            }

            let row_area = Rect {
                x: area.x,
                y: area.y + y as u16,
                width: area.width,
                height: 1,
            };
            Clear.render(row_area, buf);
            if look.opacity <= 0.02 || line.spans.is_empty() {
                continue;
            }

            let inner_x = area.x + MARGIN + look.inset;
            let inner_w = area.width.saturating_sub((MARGIN + look.inset) * 2);
            if inner_w == 0 {
                continue;
            }
            let spans: Vec<Span> = line
                .spans
                .iter()
                .map(|(text, tone)| Span::styled(text.clone(), fade(Theme::tone_style(*tone), look.opacity)))
                .collect();
            let rendered = Line::from(spans);
            let x = if line.centered {
                let w = (rendered.width() as u16).min(inner_w);
                inner_x + (inner_w - w) / 2
            } else {
                inner_x
            };
            buf.set_line(x, row_area.y, &rendered, inner_w.saturating_sub(x - inner_x));
        }
    }
}

/// Terminals have no alpha; approximate partial opacity by dimming.
fn fade(style: Style, opacity: f64) -> Style {
    if opacity >= 0.75 {
        style
    } else if opacity >= 0.35 {
        style.add_modifier(Modifier::DIM)
    } else {
        style.fg(Color::DarkGray).add_modifier(Modifier::DIM)
    }
}
