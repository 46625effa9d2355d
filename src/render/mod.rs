//! Terminal rendering of diff rows
//!
//! Thin presentation layer over [`crate::rows`]: lays the generated rows
//! out as a two-column side-by-side view or a single merged column, colored
//! per row kind. Writes into any `std::io::Write`, so output can go to
//! stdout or through the pager.

mod pager;

pub use pager::PagerWriter;

use crate::rows::{DiffRow, RowKind};
use colored::Colorize;
use std::io::Write;

fn style(kind: RowKind, line: String) -> colored::ColoredString {
    match kind {
        RowKind::Equal => line.normal(),
        RowKind::Delete => line.red(),
        RowKind::Insert => line.green(),
        RowKind::Change => line.yellow(),
    }
}

/// Two-column layout with gutter markers: `<` deletions, `>` insertions,
/// `|` changes. The old column is padded to the widest old line.
pub fn side_by_side(writer: &mut dyn Write, rows: &[DiffRow]) -> anyhow::Result<()> {
    let width = rows
        .iter()
        .map(|row| row.old_line.chars().count())
        .max()
        .unwrap_or(0);

    for row in rows {
        let gutter = match row.kind {
            RowKind::Equal => ' ',
            RowKind::Delete => '<',
            RowKind::Insert => '>',
            RowKind::Change => '|',
        };
        let line = format!("{:<width$} {gutter} {}", row.old_line, row.new_line);
        writeln!(writer, "{}", style(row.kind, line))?;
    }

    Ok(())
}

/// Single-column layout for merged rows: the old side already carries the
/// folded-in insertions, so only it is printed.
pub fn merged(writer: &mut dyn Write, rows: &[DiffRow]) -> anyhow::Result<()> {
    for row in rows {
        let prefix = match row.kind {
            RowKind::Equal => ' ',
            RowKind::Delete => '-',
            RowKind::Insert => '+',
            RowKind::Change => '~',
        };
        let line = format!("{prefix} {}", row.old_line);
        writeln!(writer, "{}", style(row.kind, line))?;
    }

    Ok(())
}
