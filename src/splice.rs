//! Splice Module for the Component Auto-Import Engine
//!
//! Positional text editing over one source unit. Edits are recorded in
//! original-text byte coordinates and applied in a single pass, so earlier
//! insertions never require recomputing later offsets. The same pass
//! drives source-map v3 emission for the rewritten output.

use serde::{Deserialize, Serialize};

/// Standard source-map v3 object for the rewritten text.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SourceMap {
    pub version: u8,
    pub sources: Vec<String>,
    #[serde(rename = "sourcesContent", skip_serializing_if = "Option::is_none")]
    pub sources_content: Option<Vec<String>>,
    pub names: Vec<String>,
    pub mappings: String,
}

#[derive(Debug, Clone)]
struct Edit {
    start: usize,
    end: usize,
    content: String,
}

/// One output chunk: either text retained from the source (with its
/// original byte offset), inserted replacement text (anchored to the
/// original offset it replaces), or prepended header text (unmapped).
struct Piece<'a> {
    text: &'a str,
    origin: Option<usize>,
    retained: bool,
}

/// Offset-tracking text buffer, modeled on the magic-string library the
/// host ecosystem uses for the same job.
pub struct SpliceBuffer<'a> {
    source: &'a str,
    prepends: Vec<String>,
    edits: Vec<Edit>,
}

impl<'a> SpliceBuffer<'a> {
    pub fn new(source: &'a str) -> Self {
        SpliceBuffer {
            source,
            prepends: Vec::new(),
            edits: Vec::new(),
        }
    }

    /// Insert `content` before everything prepended so far: a later
    /// `prepend` lands first in the output, matching magic-string.
    pub fn prepend(&mut self, content: impl Into<String>) {
        self.prepends.insert(0, content.into());
    }

    /// Replace the original byte range `[start, end)` with `content`.
    /// Ranges must not overlap; byte offsets are against the original
    /// source regardless of other edits.
    pub fn overwrite(&mut self, start: usize, end: usize, content: impl Into<String>) {
        debug_assert!(start <= end && end <= self.source.len());
        self.edits.push(Edit {
            start,
            end,
            content: content.into(),
        });
    }

    fn pieces(&self) -> Vec<Piece<'_>> {
        let mut pieces: Vec<Piece<'_>> = self
            .prepends
            .iter()
            .map(|p| Piece {
                text: p.as_str(),
                origin: None,
                retained: false,
            })
            .collect();

        let mut edits: Vec<&Edit> = self.edits.iter().collect();
        edits.sort_by_key(|e| (e.start, e.end));

        let mut cursor = 0;
        for edit in edits {
            if edit.start > cursor {
                pieces.push(Piece {
                    text: &self.source[cursor..edit.start],
                    origin: Some(cursor),
                    retained: true,
                });
            }
            pieces.push(Piece {
                text: &edit.content,
                origin: Some(edit.start),
                retained: false,
            });
            cursor = cursor.max(edit.end);
        }
        if cursor < self.source.len() {
            pieces.push(Piece {
                text: &self.source[cursor..],
                origin: Some(cursor),
                retained: true,
            });
        }
        pieces
    }

    /// Render the edited text.
    #[allow(clippy::inherent_to_string)]
    pub fn to_string(&self) -> String {
        let mut out = String::with_capacity(self.source.len());
        for piece in self.pieces() {
            out.push_str(piece.text);
        }
        out
    }

    /// Emit a source map from the original text to the rendered output.
    /// Retained chunks map line/column-exact; inserted content maps to the
    /// original position it replaces; prepended lines carry no mappings.
    pub fn generate_map(&self, source: &str, include_content: bool) -> SourceMap {
        let line_starts = line_starts(self.source);
        let line_col = |offset: usize| -> (i64, i64) {
            let line = line_starts.partition_point(|&s| s <= offset) - 1;
            let col = self.source[line_starts[line]..offset].chars().count();
            (line as i64, col as i64)
        };

        let mut encoder = MappingEncoder::default();
        for piece in self.pieces() {
            match piece.origin {
                None => encoder.advance_unmapped(piece.text),
                Some(origin) => {
                    let (src_line, src_col) = line_col(origin);
                    if piece.retained {
                        encoder.advance_retained(piece.text, src_line, src_col);
                    } else {
                        encoder.advance_inserted(piece.text, src_line, src_col);
                    }
                }
            }
        }

        SourceMap {
            version: 3,
            sources: vec![source.to_string()],
            sources_content: include_content.then(|| vec![self.source.to_string()]),
            names: Vec::new(),
            mappings: encoder.mappings,
        }
    }
}

fn line_starts(text: &str) -> Vec<usize> {
    let mut starts = vec![0];
    for (i, b) in text.bytes().enumerate() {
        if b == b'\n' {
            starts.push(i + 1);
        }
    }
    starts
}

/// Relative base64-VLQ segment writer for the `mappings` field.
#[derive(Default)]
struct MappingEncoder {
    mappings: String,
    gen_col: i64,
    prev_gen_col: i64,
    prev_src_line: i64,
    prev_src_col: i64,
    line_has_segment: bool,
}

impl MappingEncoder {
    fn new_line(&mut self) {
        self.mappings.push(';');
        self.gen_col = 0;
        self.prev_gen_col = 0;
        self.line_has_segment = false;
    }

    fn segment(&mut self, src_line: i64, src_col: i64) {
        if self.line_has_segment {
            self.mappings.push(',');
        }
        vlq_encode(self.gen_col - self.prev_gen_col, &mut self.mappings);
        self.prev_gen_col = self.gen_col;
        // Single source, so the source-index delta is always zero.
        vlq_encode(0, &mut self.mappings);
        vlq_encode(src_line - self.prev_src_line, &mut self.mappings);
        self.prev_src_line = src_line;
        vlq_encode(src_col - self.prev_src_col, &mut self.mappings);
        self.prev_src_col = src_col;
        self.line_has_segment = true;
    }

    /// Header text with no original counterpart.
    fn advance_unmapped(&mut self, text: &str) {
        for ch in text.chars() {
            if ch == '\n' {
                self.new_line();
            } else {
                self.gen_col += 1;
            }
        }
    }

    /// Inserted text: one segment anchored at the replaced position.
    fn advance_inserted(&mut self, text: &str, src_line: i64, src_col: i64) {
        if text.is_empty() {
            return;
        }
        self.segment(src_line, src_col);
        self.advance_unmapped(text);
    }

    /// Retained text: segments at the chunk start and at every line start
    /// inside the chunk.
    fn advance_retained(&mut self, text: &str, src_line: i64, src_col: i64) {
        if text.is_empty() {
            return;
        }
        let (mut src_line, mut src_col) = (src_line, src_col);
        self.segment(src_line, src_col);
        let mut chars = text.chars().peekable();
        while let Some(ch) = chars.next() {
            if ch == '\n' {
                self.new_line();
                src_line += 1;
                src_col = 0;
                if chars.peek().is_some() {
                    self.segment(src_line, src_col);
                }
            } else {
                self.gen_col += 1;
                src_col += 1;
            }
        }
    }
}

const BASE64: &[u8] = b"ABCDEFGHIJKLMNOPQRSTUVWXYZabcdefghijklmnopqrstuvwxyz0123456789+/";

fn vlq_encode(value: i64, out: &mut String) {
    let mut v: u64 = if value < 0 {
        (((-value) as u64) << 1) | 1
    } else {
        (value as u64) << 1
    };
    loop {
        let mut digit = (v & 0x1f) as u8;
        v >>= 5;
        if v != 0 {
            digit |= 0x20;
        }
        out.push(BASE64[digit as usize] as char);
        if v == 0 {
            break;
        }
    }
}

// ═══════════════════════════════════════════════════════════════════════════════
// TESTS
// ═══════════════════════════════════════════════════════════════════════════════
