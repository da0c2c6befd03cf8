//! Fenced code tracking for the line-level directive scanner.
//!
//! Directive markers inside fenced code are literal text, so the scanner asks
//! the tracker about every line before treating `:::` as syntax.

/// Open fence: marker character and run length.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct OpenFence {
    marker: char,
    length: usize,
}

/// Line-by-line CommonMark fence tracker.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FenceTracker {
    open: Option<OpenFence>,
}

impl FenceTracker {
    /// Whether the tracker is currently inside a fenced block.
    pub fn in_fence(&self) -> bool {
        self.open.is_some()
    }

    /// Feeds one line (without its newline). Returns `true` when the line is
    /// part of a fenced block, opener and closer included.
    pub fn observe(&mut self, line: &str) -> bool {
        let (columns, offset) = indentation(line);
        let rest = &line[offset..];

        match self.open {
            None => {
                // 4+ columns is an indented code block, not a fence.
                if columns > 3 {
                    return false;
                }
                match marker_run(rest) {
                    Some((marker, length)) => {
                        self.open = Some(OpenFence { marker, length });
                        true
                    }
                    None => false,
                }
            }
            Some(open) => {
                if columns <= 3
                    && let Some((marker, length)) = marker_run(rest)
                    && marker == open.marker
                    && length >= open.length
                    && rest[length * marker.len_utf8()..].trim().is_empty()
                {
                    self.open = None;
                }
                true
            }
        }
    }
}

/// Visual columns and byte length of leading whitespace; tabs stop every 4 columns.
fn indentation(line: &str) -> (usize, usize) {
    let mut columns = 0;
    let mut bytes = 0;
    for b in line.bytes() {
        match b {
            b' ' => columns += 1,
            b'\t' => columns += 4 - (columns % 4),
            _ => break,
        }
        bytes += 1;
    }
    (columns, bytes)
}

/// A run of at least three backticks or tildes at the start of `rest`.
fn marker_run(rest: &str) -> Option<(char, usize)> {
    let marker = rest.chars().next().filter(|c| *c == '`' || *c == '~')?;
    let length = rest.chars().take_while(|c| *c == marker).count();
    (length >= 3).then_some((marker, length))
}
