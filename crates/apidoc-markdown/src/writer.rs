//! Indentation-aware text sink

/// Accumulates emitted text, prefixing every line with the active indentation
///
/// Prefixes nest (`"> "` inside `"> "` gives `"> > "`). Blank lines receive the
/// prefix with trailing whitespace removed so that blockquotes stay unbroken.
#[derive(Debug, Default)]
pub struct IndentedWriter {
    buffer: String,
    prefixes: Vec<String>,
    at_line_start: bool,
    line_has_content: bool,
    last_line_blank: bool,
}

impl IndentedWriter {
    pub fn new() -> Self {
        Self {
            at_line_start: true,
            ..Self::default()
        }
    }

    /// Writer for a fragment that continues a line already in progress
    pub fn continuing() -> Self {
        Self::default()
    }

    pub fn at_line_start(&self) -> bool {
        self.at_line_start
    }

    pub fn is_empty(&self) -> bool {
        self.buffer.is_empty()
    }

    /// Writes literal text; embedded newlines start prefixed lines
    pub fn write(&mut self, text: &str) {
        for (index, segment) in text.split('\n').enumerate() {
            if index > 0 {
                self.new_line();
            }
            if !segment.is_empty() {
                if self.at_line_start {
                    let prefix = self.prefix();
                    self.buffer.push_str(&prefix);
                }
                self.buffer.push_str(segment);
                self.at_line_start = false;
                self.line_has_content = true;
            }
        }
    }

    pub fn write_line(&mut self, text: &str) {
        self.write(text);
        self.new_line();
    }

    /// Terminates the current line unconditionally
    pub fn new_line(&mut self) {
        if !self.line_has_content {
            let prefix = self.prefix();
            self.buffer.push_str(prefix.trim_end());
        }
        self.buffer.push('\n');
        self.last_line_blank = !self.line_has_content;
        self.at_line_start = true;
        self.line_has_content = false;
    }

    /// Starts a new line unless already at the start of one
    pub fn ensure_new_line(&mut self) {
        if self.line_has_content {
            self.new_line();
        }
    }

    /// Ensures the previous line is blank, unless nothing has been written
    pub fn ensure_skipped_line(&mut self) {
        self.ensure_new_line();
        if !self.buffer.is_empty() && !self.last_line_blank {
            self.new_line();
        }
    }

    /// Runs `f` with `prefix` added to the indentation
    ///
    /// The prefix is removed again when `f` returns, whatever it returns.
    pub fn with_indent<R>(&mut self, prefix: &str, f: impl FnOnce(&mut Self) -> R) -> R {
        self.prefixes.push(prefix.to_string());
        let result = f(self);
        self.prefixes.pop();
        result
    }

    pub fn into_string(self) -> String {
        self.buffer
    }

    pub fn as_str(&self) -> &str {
        &self.buffer
    }

    fn prefix(&self) -> String {
        self.prefixes.concat()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_write_line_and_skipped_line() {
        let mut writer = IndentedWriter::new();
        writer.ensure_skipped_line();
        writer.write_line("first");
        writer.ensure_skipped_line();
        writer.ensure_skipped_line();
        writer.write("second");

        assert_eq!(writer.into_string(), "first\n\nsecond");
    }

    #[test]
    fn test_indent_prefixes_every_line() {
        let mut writer = IndentedWriter::new();
        writer.with_indent("> ", |w| {
            w.write_line("one");
            w.new_line();
            w.write("two");
        });
        writer.ensure_new_line();
        writer.write("after");

        assert_eq!(writer.into_string(), "> one\n>\n> two\nafter");
    }

    #[test]
    fn test_indent_is_popped_on_error() {
        let mut writer = IndentedWriter::new();
        let result: Result<(), &str> = writer.with_indent("> ", |w| {
            w.write("inside");
            Err("boom")
        });
        assert!(result.is_err());

        writer.ensure_new_line();
        writer.write("outside");
        assert_eq!(writer.into_string(), "> inside\noutside");
    }

    #[test]
    fn test_embedded_newlines_are_prefixed() {
        let mut writer = IndentedWriter::new();
        writer.with_indent("> ", |w| w.write("a\nb"));
        assert_eq!(writer.into_string(), "> a\n> b");
    }

    #[test]
    fn test_continuing_writer_is_mid_line() {
        let writer = IndentedWriter::continuing();
        assert!(!writer.at_line_start());
    }
}
