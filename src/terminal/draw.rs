//! Frame composition for the interactive UI.
//!
//! Every frame is drawn from scratch: the view is turned into styled rows,
//! rows are wrapped to the terminal width, then written to an
//! [`OutputBuffer`] with absolute cursor moves.
//!
//! ```text
//! ┌────────────────────────────┐
//! │ header                     │ row 0
//! │ body (wrapped, scrolled)   │ rows 2..h-1
//! │ footer: key help / status  │ row h-1
//! └────────────────────────────┘
//! ```

use super::color::{Palette, Rgb};
use super::output::OutputBuffer;
use crate::markup::{spans_for, Modifiers};
use crate::view::{Panel, ScenarioView, Screen};
use unicode_segmentation::UnicodeSegmentation;
use unicode_width::UnicodeWidthStr;

const TITLE: &str = "CSA Scenario Generator";
const SELECTION_HELP: &str = "↑/↓ move · Enter generate · 1-9 pick · q quit";
const RESULT_HELP: &str = "↑/↓ PgUp/PgDn scroll · h hints · s steps · e export · b back · q quit";
const LOADING_HELP: &str = "q quit";

/// Per-frame inputs not owned by the view.
#[derive(Debug, Clone, Copy)]
pub struct DrawContext<'a> {
    /// Current content of the problem-statement sink.
    pub problem: &'a str,
    /// Whether `problem` carries markup to interpret.
    pub preserve_markup: bool,
    /// Transient status line (e.g. export result), replaces the key help.
    pub status: Option<&'a str>,
}

/// How the body fitted into a drawn frame.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct BodyFit {
    /// Body rows visible between the header and the footer.
    pub visible: usize,
    /// Largest scroll offset that still fills the visible rows.
    pub max_scroll: usize,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Style {
    modifiers: Modifiers,
    fg: Rgb,
}

impl Style {
    const TEXT: Self = Self::plain(Palette::TEXT);
    const DIM: Self = Self::plain(Palette::DIM);
    const ERROR: Self = Self::plain(Palette::ERROR);
    const HEADING: Self = Self {
        modifiers: Modifiers::BOLD,
        fg: Palette::ACCENT,
    };

    const fn plain(fg: Rgb) -> Self {
        Self {
            modifiers: Modifiers::empty(),
            fg,
        }
    }

    fn from_modifiers(modifiers: Modifiers) -> Self {
        let fg = if modifiers.contains(Modifiers::ACCENT) {
            Palette::ACCENT
        } else {
            Palette::TEXT
        };
        Self { modifiers, fg }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
struct Run {
    text: String,
    style: Style,
}

type Row = Vec<Run>;

/// Word-wrapping row builder.
struct Wrapper {
    width: usize,
    rows: Vec<Row>,
    col: usize,
}

impl Wrapper {
    fn new(width: usize) -> Self {
        Self {
            width: width.max(1),
            rows: Vec::new(),
            col: 0,
        }
    }

    /// Start a fresh logical line.
    fn line(&mut self) {
        self.rows.push(Vec::new());
        self.col = 0;
    }

    fn blank(&mut self) {
        self.line();
    }

    /// Append text to the current line, wrapping as needed.
    ///
    /// `'\n'` forces a break.
    fn push(&mut self, text: &str, style: Style) {
        if self.rows.is_empty() {
            self.line();
        }
        for (i, segment) in text.split('\n').enumerate() {
            if i > 0 {
                self.line();
            }
            for word in segment.split_word_bounds() {
                let w = word.width();
                if self.col + w > self.width && self.col > 0 {
                    self.line();
                    if word.trim().is_empty() {
                        continue;
                    }
                }
                if w > self.width {
                    for g in word.graphemes(true) {
                        let gw = g.width();
                        if self.col + gw > self.width && self.col > 0 {
                            self.line();
                        }
                        self.put(g, gw, style);
                    }
                } else {
                    self.put(word, w, style);
                }
            }
        }
    }

    fn put(&mut self, s: &str, width: usize, style: Style) {
        let Some(row) = self.rows.last_mut() else {
            return;
        };
        match row.last_mut() {
            Some(run) if run.style == style => run.text.push_str(s),
            _ => row.push(Run {
                text: s.to_string(),
                style,
            }),
        }
        self.col += width;
    }

    fn finish(self) -> Vec<Row> {
        self.rows
    }
}

/// Compose a full frame of `view` into `out`.
///
/// The body starts [`ScenarioView::scroll`] rows down and rows past the
/// terminal height are cut off; the header and the footer stay in place.
pub fn draw(view: &ScenarioView, ctx: DrawContext<'_>, width: u16, height: u16, out: &mut OutputBuffer) -> BodyFit {
    let mut body = Wrapper::new(usize::from(width).saturating_sub(2));
    match view.screen() {
        Screen::Selection => selection_body(view, &mut body),
        Screen::Loading => {
            body.line();
            body.push(&format!("Generating scenario for {}…", view.selection().label()), Style::DIM);
        }
        Screen::Result => result_body(view, ctx, &mut body),
    }

    let footer = ctx.status.unwrap_or(match view.screen() {
        Screen::Selection => SELECTION_HELP,
        Screen::Loading => LOADING_HELP,
        Screen::Result => RESULT_HELP,
    });

    out.clear();
    out.reset_attrs();
    out.clear_screen();

    let mut header = Wrapper::new(usize::from(width).saturating_sub(2));
    header.line();
    header.push(TITLE, Style::HEADING);
    let body = body.finish();
    let screen_rows = height.saturating_sub(1);
    let visible = usize::from(screen_rows).saturating_sub(2);
    let max_scroll = body.len().saturating_sub(visible);
    let rows = header
        .finish()
        .into_iter()
        .take(1)
        .chain(std::iter::once(Vec::new()))
        .chain(body.into_iter().skip(view.scroll().min(max_scroll)));

    for (y, row) in (0..screen_rows).zip(rows) {
        out.cursor_move(1, y);
        write_row(&row, out);
    }

    if height > 0 {
        out.cursor_move(1, height - 1);
        let mut line = Wrapper::new(usize::from(width).saturating_sub(2));
        line.line();
        line.push(footer, Style::DIM);
        if let Some(row) = line.finish().first() {
            write_row(row, out);
        }
    }

    BodyFit { visible, max_scroll }
}

fn selection_body(view: &ScenarioView, body: &mut Wrapper) {
    body.line();
    body.push("Choose a module:", Style::TEXT);
    body.blank();
    for (i, entry) in ScenarioView::MENU.iter().enumerate() {
        body.line();
        if i == view.menu_cursor() {
            body.push(&format!("> {}. {}", i + 1, entry.label()), Style::HEADING);
        } else {
            body.push(&format!("  {}. {}", i + 1, entry.label()), Style::TEXT);
        }
    }
    if let Some(alert) = view.alert() {
        body.blank();
        body.line();
        body.push(alert, Style::ERROR);
    }
}

fn result_body(view: &ScenarioView, ctx: DrawContext<'_>, body: &mut Wrapper) {
    heading(body, view.module_label());
    body.blank();

    heading(body, "Problem Statement");
    body.line();
    for span in spans_for(ctx.problem, ctx.preserve_markup) {
        body.push(&span.text, Style::from_modifiers(span.modifiers));
    }
    body.blank();

    heading(body, "Pro Tips");
    body.line();
    body.push(view.tips_label(), Style::TEXT);
    body.blank();

    section(body, "[h] Hints", view.hints(), view.is_open(Panel::Hints), false);
    section(body, "[s] Guided Steps", view.steps(), view.is_open(Panel::Steps), true);

    heading(body, "Theoretical References");
    list(body, view.references(), false);
}

fn heading(body: &mut Wrapper, title: &str) {
    body.line();
    body.push(title, Style::HEADING);
}

fn section(body: &mut Wrapper, title: &str, items: &[String], open: bool, numbered: bool) {
    let marker = if open { "▾" } else { "▸" };
    heading(body, &format!("{marker} {title}"));
    if open {
        list(body, items, numbered);
    }
    body.blank();
}

fn list(body: &mut Wrapper, items: &[String], numbered: bool) {
    for (i, item) in items.iter().enumerate() {
        body.line();
        if numbered {
            body.push(&format!("  {}. {item}", i + 1), Style::TEXT);
        } else {
            body.push(&format!("  • {item}"), Style::TEXT);
        }
    }
}

fn write_row(row: &[Run], out: &mut OutputBuffer) {
    for run in row {
        out.reset_attrs();
        out.set_fg(run.style.fg);
        out.set_modifiers(run.style.modifiers);
        out.write_str(&run.text);
    }
    out.reset_attrs();
}
