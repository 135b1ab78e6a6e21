//! Drawing of the filter, and the click targets the drawing produced.

use std::io::{self, Write};

use crossterm::{
    cursor::MoveTo,
    queue,
    style::{
        Attribute, Color, Print, ResetColor, SetAttribute, SetBackgroundColor, SetForegroundColor,
    },
    terminal::{self, Clear, ClearType},
};
use tokenize::{ChipView, Rgb, TokenStyle, TokenizerView};
use unicode_width::UnicodeWidthChar;

use crate::app::App;

/// Dropdown rows shown at once.
const DROPDOWN_ROWS: usize = 8;

/// Something clickable on screen.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Target {
    /// The chip line of a tokenizer.
    Container(usize),
    Arrow(usize),
    Resetter(usize),
    ChipClose(usize, String),
    Entry(usize, usize),
    EntryRemove(usize, usize),
}

#[derive(Debug, Clone, Copy)]
struct Span {
    x: u16,
    y: u16,
    width: u16,
}

impl Span {
    fn contains(&self, x: u16, y: u16) -> bool {
        y == self.y && x >= self.x && x < self.x.saturating_add(self.width)
    }
}

/// Click targets and tokenizer row ranges of the last frame.
#[derive(Debug, Default)]
pub struct HitMap {
    targets: Vec<(Span, Target)>,
    groups: Vec<(u16, u16)>,
}

impl HitMap {
    /// The most specific target at a cell.
    pub fn target_at(&self, x: u16, y: u16) -> Option<&Target> {
        self.targets
            .iter()
            .rev()
            .find(|(span, _)| span.contains(x, y))
            .map(|(_, target)| target)
    }

    /// The tokenizer drawn on a row, dropdown included.
    pub fn group_at(&self, y: u16) -> Option<usize> {
        self.groups
            .iter()
            .position(|(start, end)| y >= *start && y < *end)
    }

    fn push(&mut self, x: u16, y: u16, width: u16, target: Target) {
        self.targets.push((Span { x, y, width }, target));
    }
}

fn color(rgb: Rgb) -> Color {
    Color::Rgb {
        r: rgb.r,
        g: rgb.g,
        b: rgb.b,
    }
}

/// Writes clipped text along one row.
struct Painter<'a, W: Write> {
    out: &'a mut W,
    x: u16,
    width: u16,
}

impl<'a, W: Write> Painter<'a, W> {
    fn line(out: &'a mut W, y: u16, width: u16) -> io::Result<Self> {
        queue!(out, MoveTo(0, y))?;
        Ok(Self { out, x: 0, width })
    }

    /// Print text, returning its start column and drawn width.
    fn put(&mut self, text: &str) -> io::Result<(u16, u16)> {
        let start = self.x;
        for c in text.chars() {
            let w = c.width().unwrap_or(0) as u16;
            if self.x + w > self.width {
                break;
            }
            queue!(self.out, Print(c))?;
            self.x += w;
        }
        Ok((start, self.x - start))
    }

    fn styled(&mut self, text: &str, style: &TokenStyle) -> io::Result<(u16, u16)> {
        queue!(
            self.out,
            SetBackgroundColor(color(style.back_color)),
            SetForegroundColor(color(style.fore_color))
        )?;
        let span = self.put(text)?;
        queue!(self.out, ResetColor)?;
        Ok(span)
    }

    fn attr(&mut self, attr: Attribute) -> io::Result<()> {
        queue!(self.out, SetAttribute(attr))
    }
}

/// Draw a full frame.
pub fn draw<W: Write>(out: &mut W, app: &App) -> io::Result<HitMap> {
    let (width, height) = terminal::size()?;
    queue!(out, Clear(ClearType::All))?;

    let mut hits = HitMap::default();
    let mut y = 0;
    for (index, tokenizer) in app.filter().tokenizers().iter().enumerate() {
        if y >= height.saturating_sub(2) {
            break;
        }
        let start = y;
        let view = tokenizer.view();
        y = draw_tokenizer(out, index, &view, y, width, &mut hits)?;
        hits.groups.push((start, y));
        y += 1;
    }

    if app.filter().tokenizers().is_empty() {
        let mut p = Painter::line(out, 0, width)?;
        p.put("No categories to filter.")?;
    }

    draw_footer(out, app, width, height)?;
    out.flush()?;
    Ok(hits)
}

fn draw_tokenizer<W: Write>(
    out: &mut W,
    index: usize,
    view: &TokenizerView,
    mut y: u16,
    width: u16,
    hits: &mut HitMap,
) -> io::Result<u16> {
    if !view.label.is_empty() {
        let mut p = Painter::line(out, y, width)?;
        p.attr(Attribute::Bold)?;
        p.put(&format!("  {}", view.label))?;
        p.attr(Attribute::Reset)?;
        y += 1;
    }

    hits.push(0, y, width, Target::Container(index));
    let mut p = Painter::line(out, y, width)?;
    p.put(if view.focused { "> " } else { "  " })?;
    if view.style.border {
        p.put("[")?;
    }

    for chip in &view.chips {
        match chip {
            ChipView::Token {
                value,
                text,
                pending_delete,
                closable,
            } => {
                if *pending_delete {
                    p.attr(Attribute::Reverse)?;
                }
                p.styled(&format!(" {} ", text), &view.style)?;
                if *closable {
                    let (x, w) = p.styled("x ", &view.style)?;
                    hits.push(x, y, w, Target::ChipClose(index, value.clone()));
                }
                p.attr(Attribute::Reset)?;
            }
            ChipView::Summary { text, .. } => {
                p.styled(&format!(" {} ", text), &view.style)?;
            }
        }
        p.put(" ")?;
    }

    match (&view.input_placeholder, view.input.is_empty()) {
        (Some(placeholder), true) => {
            p.attr(Attribute::Dim)?;
            p.put(&format!("{:<w$}", placeholder, w = view.input_width))?;
            p.attr(Attribute::Reset)?;
        }
        _ => {
            p.attr(Attribute::Underlined)?;
            p.put(&format!("{:<w$}", view.input, w = view.input_width))?;
            p.attr(Attribute::Reset)?;
        }
    }

    if view.style.border {
        p.put("]")?;
    }

    if !view.arrow_enabled || view.disabled {
        p.attr(Attribute::Dim)?;
    }
    let (x, w) = p.put(if view.dropdown.is_some() { " ^" } else { " v" })?;
    p.attr(Attribute::Reset)?;
    hits.push(x, y, w, Target::Arrow(index));

    if view.resetter_visible {
        let (x, w) = p.put(" (clear)")?;
        hits.push(x, y, w, Target::Resetter(index));
    }
    if view.readonly {
        p.attr(Attribute::Dim)?;
        p.put(" read-only")?;
        p.attr(Attribute::Reset)?;
    }
    y += 1;

    let Some(rows) = &view.dropdown else {
        return Ok(y);
    };

    let hovered = rows.iter().position(|r| r.hovered).unwrap_or(0);
    let first = hovered.saturating_sub(DROPDOWN_ROWS - 1);
    for (i, row) in rows.iter().enumerate().skip(first).take(DROPDOWN_ROWS) {
        hits.push(0, y, width, Target::Entry(index, i));
        let mut p = Painter::line(out, y, width)?;
        p.put("    ")?;
        if row.hovered {
            p.styled(&format!(" {} ", row.text), &view.style)?;
        } else {
            p.put(&format!(" {} ", row.text))?;
        }
        if row.selected {
            let (x, w) = p.put(" x")?;
            hits.push(x, y, w, Target::EntryRemove(index, i));
        }
        y += 1;
    }

    let hidden = rows.len().saturating_sub(first + DROPDOWN_ROWS);
    if hidden > 0 {
        let mut p = Painter::line(out, y, width)?;
        p.attr(Attribute::Dim)?;
        p.put(&format!("     ... {} more", hidden))?;
        p.attr(Attribute::Reset)?;
        y += 1;
    }

    Ok(y)
}

fn draw_footer<W: Write>(out: &mut W, app: &App, width: u16, height: u16) -> io::Result<()> {
    let filter = app.filter();
    let status = match app.status() {
        Some(message) => message.to_string(),
        None => format!(
            "{} keys selected | settings: {}",
            filter.selection().applied().len(),
            filter.visible_properties().join(", ")
        ),
    };

    let mut p = Painter::line(out, height.saturating_sub(2), width)?;
    p.put(&status)?;

    let mut p = Painter::line(out, height.saturating_sub(1), width)?;
    p.attr(Attribute::Dim)?;
    p.put("Tab focus  F2 list  ^R clear  ^O observer  ^K compress  ^L label  ^F cross-filter  ^Q quit")?;
    p.attr(Attribute::Reset)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_most_specific_target_wins() {
        let mut hits = HitMap::default();
        hits.push(0, 1, 40, Target::Container(0));
        hits.push(10, 1, 2, Target::ChipClose(0, "A".into()));
        hits.groups.push((0, 3));

        assert_eq!(hits.target_at(10, 1), Some(&Target::ChipClose(0, "A".into())));
        assert_eq!(hits.target_at(12, 1), Some(&Target::Container(0)));
        assert_eq!(hits.target_at(12, 2), None);
        assert_eq!(hits.group_at(2), Some(0));
        assert_eq!(hits.group_at(3), None);
    }

    #[test]
    fn test_painter_clips_to_width() {
        let mut out = Vec::new();
        let mut p = Painter::line(&mut out, 0, 5).unwrap();
        assert_eq!(p.put("abc").unwrap(), (0, 3));
        assert_eq!(p.put("defg").unwrap(), (3, 2));
    }
}
