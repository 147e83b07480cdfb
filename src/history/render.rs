// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2025 Blackman Artificial Intelligence Technologies Inc.

//! Rendering of the visible history list

use std::io::Write;

use super::entry::{EntryId, HistoryEntry};

/// Maximum characters of generated code shown in a preview
pub const CODE_PREVIEW_CHARS: usize = 100;
/// Maximum characters of the requirement shown in a preview
pub const REQUIREMENT_PREVIEW_CHARS: usize = 50;

/// Redraws the visible history list
pub trait HistoryRenderer {
    /// Redraw from the full, newest-first log
    fn render(&mut self, entries: &[HistoryEntry]);
}

impl<F> HistoryRenderer for F
where
    F: FnMut(&[HistoryEntry]),
{
    fn render(&mut self, entries: &[HistoryEntry]) {
        self(entries)
    }
}

/// Renderer that draws nothing
#[derive(Debug, Default, Clone, Copy)]
pub struct NullRenderer;

impl HistoryRenderer for NullRenderer {
    fn render(&mut self, _entries: &[HistoryEntry]) {}
}

/// Display-ready summary of one entry
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HistoryPreview {
    pub id: EntryId,
    pub date: String,
    pub time: String,
    pub language: String,
    pub requirement: String,
    pub code: String,
}

impl HistoryPreview {
    /// Build the preview for an entry
    pub fn from_entry(entry: &HistoryEntry) -> Self {
        Self {
            id: entry.id,
            date: entry.timestamp.format("%Y-%m-%d").to_string(),
            time: entry.timestamp.format("%H:%M").to_string(),
            language: entry.language.clone(),
            requirement: truncate_preview(&entry.requirement, REQUIREMENT_PREVIEW_CHARS),
            code: truncate_preview(&entry.code, CODE_PREVIEW_CHARS),
        }
    }
}

/// Keep the first `max_chars` characters, appending `...` when cut
pub fn truncate_preview(text: &str, max_chars: usize) -> String {
    match text.char_indices().nth(max_chars) {
        Some((byte_idx, _)) => format!("{}...", &text[..byte_idx]),
        None => text.to_string(),
    }
}

/// Plain-text renderer writing one block per entry
pub struct TextRenderer<W: Write> {
    out: W,
}

impl<W: Write> TextRenderer<W> {
    pub fn new(out: W) -> Self {
        Self { out }
    }

    /// Consume the renderer, returning the writer
    pub fn into_inner(self) -> W {
        self.out
    }

    fn write_entries(&mut self, entries: &[HistoryEntry]) -> std::io::Result<()> {
        if entries.is_empty() {
            writeln!(self.out, "\nGeneration history is empty.")?;
            writeln!(self.out, "Generated code will appear here.\n")?;
            return Ok(());
        }

        writeln!(self.out, "\nRecent generations:\n")?;
        for entry in entries {
            let preview = HistoryPreview::from_entry(entry);
            write!(
                self.out,
                "  {} | {} {} | {}",
                preview.id, preview.date, preview.time, preview.language
            )?;
            if let Some(template) = entry.template() {
                write!(self.out, " | template: {}", template)?;
            }
            writeln!(self.out)?;
            writeln!(self.out, "    Task: {}", preview.requirement)?;
            for line in preview.code.lines() {
                writeln!(self.out, "    > {}", line)?;
            }
        }
        writeln!(self.out)?;
        self.out.flush()
    }
}

impl<W: Write> HistoryRenderer for TextRenderer<W> {
    fn render(&mut self, entries: &[HistoryEntry]) {
        if let Err(e) = self.write_entries(entries) {
            tracing::warn!("Failed to render history: {}", e);
        }
    }
}
