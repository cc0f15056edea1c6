//! Export of the result panel as a Markdown document.

use super::shell::ScenarioView;
use crate::error::Result;
use crate::markup::{expand, plain_text};
use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::Path;
use tracing::info;

/// Write the result panel to `out`.
///
/// The problem statement is written in full with markup stripped, even if
/// its reveal is still running.
pub fn write_markdown<W: Write>(view: &ScenarioView, out: &mut W, preserve_markup: bool) -> io::Result<()> {
    let problem = if preserve_markup {
        plain_text(&expand(view.problem_source(), true))
    } else {
        view.problem_source().to_string()
    };

    writeln!(out, "# {}", view.module_label())?;
    writeln!(out)?;
    writeln!(out, "## Problem Statement")?;
    writeln!(out)?;
    writeln!(out, "{problem}")?;
    writeln!(out)?;
    writeln!(out, "## Pro Tips")?;
    writeln!(out)?;
    writeln!(out, "{}", view.tips_label())?;

    write_list(out, "Hints", view.hints(), false)?;
    write_list(out, "Guided Steps", view.steps(), true)?;
    write_list(out, "Theoretical References", view.references(), false)?;
    Ok(())
}

/// Write the result panel to a file at `path`.
pub fn export_to(view: &ScenarioView, path: &Path, preserve_markup: bool) -> Result<()> {
    let mut out = BufWriter::new(File::create(path)?);
    write_markdown(view, &mut out, preserve_markup)?;
    out.flush()?;
    info!(path = %path.display(), "scenario exported");
    Ok(())
}

fn write_list<W: Write>(out: &mut W, title: &str, items: &[String], numbered: bool) -> io::Result<()> {
    writeln!(out)?;
    writeln!(out, "## {title}")?;
    writeln!(out)?;
    for (i, item) in items.iter().enumerate() {
        if numbered {
            writeln!(out, "{}. {item}", i + 1)?;
        } else {
            writeln!(out, "- {item}")?;
        }
    }
    Ok(())
}
