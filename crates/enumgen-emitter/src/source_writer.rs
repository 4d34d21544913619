//! Indentation-aware text buffer for Go source.

use std::fmt;

/// Accumulates Go source. Indentation uses tabs, as gofmt does, and is
/// applied at the start of each non-empty line.
#[derive(Debug)]
pub struct GoWriter {
    output: String,
    indent: usize,
    line_start: bool,
}

impl Default for GoWriter {
    fn default() -> Self {
        Self::new()
    }
}

impl GoWriter {
    pub fn new() -> Self {
        GoWriter {
            output: String::new(),
            indent: 0,
            line_start: true,
        }
    }

    pub fn write(&mut self, text: &str) {
        if text.is_empty() {
            return;
        }
        if self.line_start {
            for _ in 0..self.indent {
                self.output.push('\t');
            }
            self.line_start = false;
        }
        self.output.push_str(text);
    }

    pub fn write_line(&mut self) {
        self.output.push('\n');
        self.line_start = true;
    }

    /// Write `text` followed by a newline.
    pub fn line(&mut self, text: &str) {
        self.write(text);
        self.write_line();
    }

    pub fn increase_indent(&mut self) {
        self.indent += 1;
    }

    pub fn decrease_indent(&mut self) {
        self.indent = self.indent.saturating_sub(1);
    }

    pub fn is_empty(&self) -> bool {
        self.output.is_empty()
    }

    pub fn finish(self) -> String {
        self.output
    }
}

impl fmt::Write for GoWriter {
    fn write_str(&mut self, s: &str) -> fmt::Result {
        let mut lines = s.split('\n');
        if let Some(first) = lines.next() {
            self.write(first);
        }
        for line in lines {
            self.write_line();
            self.write(line);
        }
        Ok(())
    }
}
