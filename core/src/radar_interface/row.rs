use crate::prelude::{EngineError, EngineResult};
use serde::{Deserialize, Serialize};
use std::io::BufRead;

pub const TOKEN_DELIMITER: char = ';';

/// One radar sample: the raw binary tokens recorded for a single time step.
///
/// Tokens are kept exactly as read (surrounding whitespace included) so the
/// narrative trace can echo the sample verbatim.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimeStepRow {
    pub tokens: Vec<String>,
}

impl TimeStepRow {
    pub fn new(tokens: Vec<String>) -> Self {
        Self { tokens }
    }

    /// Splits one delimited input line into a row. A blank line is an empty
    /// row, never a row holding a single empty token.
    pub fn parse_line(line: &str) -> Self {
        let line = line.trim_end_matches(&['\r', '\n'][..]);
        if line.is_empty() {
            return Self::default();
        }
        Self {
            tokens: line.split(TOKEN_DELIMITER).map(str::to_owned).collect(),
        }
    }

    pub fn len(&self) -> usize {
        self.tokens.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tokens.is_empty()
    }
}

impl<S: Into<String>> FromIterator<S> for TimeStepRow {
    fn from_iter<T: IntoIterator<Item = S>>(iter: T) -> Self {
        Self::new(iter.into_iter().map(Into::into).collect())
    }
}

/// Sequential row source over any buffered reader, one row per line.
///
/// End of stream is `None`; a blank line is `Some(Ok(empty row))`. Bytes that
/// are not valid UTF-8 decode to U+FFFD so a corrupt sample still yields a
/// row; only reader failures are errors.
pub struct LineSource<R> {
    reader: R,
    buffer: Vec<u8>,
    lines_read: usize,
}

impl<R: BufRead> LineSource<R> {
    pub fn new(reader: R) -> Self {
        Self {
            reader,
            buffer: Vec::new(),
            lines_read: 0,
        }
    }

    pub fn lines_read(&self) -> usize {
        self.lines_read
    }
}

impl<R: BufRead> Iterator for LineSource<R> {
    type Item = EngineResult<TimeStepRow>;

    fn next(&mut self) -> Option<Self::Item> {
        self.buffer.clear();
        match self.reader.read_until(b'\n', &mut self.buffer) {
            Ok(0) => None,
            Ok(_) => {
                self.lines_read += 1;
                let line = String::from_utf8_lossy(&self.buffer);
                Some(Ok(TimeStepRow::parse_line(&line)))
            }
            Err(err) => Some(Err(EngineError::InputUnavailable(format!(
                "reading line {}: {}",
                self.lines_read + 1,
                err
            )))),
        }
    }
}
