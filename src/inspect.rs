//! Inspector commands.
//!
//! Each command reads a view and writes a plain-text report to any
//! `io::Write`, so tests can run them against a `Vec<u8>`.

use std::cmp::Ordering;
use std::io::Write;

use anyhow::Result;
use serde::Serialize;
use textview_core::{Comparison, TextView, Utf16Buffer};
use unicode_width::UnicodeWidthChar;

use crate::config::InspectConfig;

/// Summary counts reported by the `units` command.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Stats {
    pub units: usize,
    pub lines: usize,
    pub runes: usize,
    pub replacements: usize,
}

impl Stats {
    /// Counts a view. `replacements` is the number of unpaired surrogates.
    pub fn of(view: TextView<'_>) -> Self {
        let replaced = view
            .runes()
            .filter(|&rune| rune == char::REPLACEMENT_CHARACTER)
            .count();
        let literal = view
            .as_units()
            .iter()
            .filter(|&&unit| unit == 0xFFFD)
            .count();

        Self {
            units: view.len(),
            lines: view.lines().count(),
            runes: view.runes().count(),
            replacements: replaced - literal,
        }
    }
}

/// Runs commands against one view using one config.
pub struct Inspector<'c> {
    config: &'c InspectConfig,
}

impl<'c> Inspector<'c> {
    pub fn new(config: &'c InspectConfig) -> Self {
        Self { config }
    }

    /// Prints each line with its index, offset and length.
    pub fn lines(&self, view: TextView<'_>, out: &mut impl Write) -> Result<()> {
        let output = &self.config.output;
        for (index, line) in view.lines().enumerate().take(output.limit()) {
            write!(out, "{index:>5}")?;
            if output.show_offsets {
                write!(out, " @{:<6}", line.offset())?;
            }
            write!(out, " len {:<5}", line.len())?;
            if output.show_text {
                write!(out, " {line}")?;
            }
            writeln!(out)?;
        }
        Ok(())
    }

    /// Prints each code point with its offset, width in code units, display
    /// columns and scalar value.
    pub fn runes(&self, view: TextView<'_>, out: &mut impl Write) -> Result<()> {
        let output = &self.config.output;
        for (offset, rune) in view.rune_indices().take(output.limit()) {
            if output.show_offsets {
                write!(out, "@{offset:<6} ")?;
            }
            let columns = rune.width().unwrap_or(0);
            write!(out, "U+{:04X} units {} cols {columns}", u32::from(rune), rune.len_utf16())?;
            if output.show_text && !rune.is_control() {
                write!(out, " {rune}")?;
            }
            writeln!(out)?;
        }
        Ok(())
    }

    /// Prints summary counts, as JSON when `json` is set.
    pub fn units(&self, view: TextView<'_>, json: bool, out: &mut impl Write) -> Result<()> {
        let stats = Stats::of(view);
        if json {
            serde_json::to_writer_pretty(&mut *out, &stats)?;
            writeln!(out)?;
        } else {
            writeln!(out, "units        {}", stats.units)?;
            writeln!(out, "lines        {}", stats.lines)?;
            writeln!(out, "runes        {}", stats.runes)?;
            writeln!(out, "replacements {}", stats.replacements)?;
        }
        Ok(())
    }

    /// Prints the offset of every match of `needle`, overlapping matches
    /// included.
    pub fn find(
        &self,
        view: TextView<'_>,
        needle: &str,
        mode: Comparison<'_>,
        out: &mut impl Write,
    ) -> Result<()> {
        let needle = Utf16Buffer::from(needle);
        let mut printed = 0;
        let mut start = 0;

        while printed < self.config.output.limit() && start <= view.len() {
            let Some(found) = view.slice_from(start)?.find(&needle, mode) else {
                break;
            };
            let index = start + found;
            if self.config.output.show_offsets {
                writeln!(out, "{index} @{}", view.offset() + index)?;
            } else {
                writeln!(out, "{index}")?;
            }
            printed += 1;
            start = index + 1;
        }

        tracing::info!(matches = printed, "find finished");
        Ok(())
    }

    /// Prints the view with white space and configured extra characters
    /// removed from both ends.
    pub fn trim(&self, view: TextView<'_>, out: &mut impl Write) -> Result<()> {
        let extra = self.config.trim.extra_units();
        let mut trimmed = view.trim();
        if !extra.is_empty() {
            loop {
                let next = trimmed.trim_any(&extra).trim();
                if next.len() == trimmed.len() {
                    break;
                }
                trimmed = next;
            }
        }

        if self.config.output.show_offsets {
            writeln!(out, "@{} len {}", trimmed.offset(), trimmed.len())?;
        }
        writeln!(out, "{trimmed}")?;
        Ok(())
    }

    /// Prints how the view orders against `other`, and whether they are
    /// equal.
    pub fn compare(
        &self,
        view: TextView<'_>,
        other: &str,
        mode: Comparison<'_>,
        out: &mut impl Write,
    ) -> Result<()> {
        let ordering = match view.compare(&Utf16Buffer::from(other), mode) {
            Ordering::Less => "less",
            Ordering::Equal => "equal",
            Ordering::Greater => "greater",
        };
        writeln!(out, "ordering {ordering}")?;
        writeln!(out, "equal    {}", view.equals_str(other, mode))?;
        Ok(())
    }
}
