use crate::prelude::{EngineError, EngineResult};
use std::io::Write;

/// Line-oriented output capability for the narrative and summary traces.
pub trait LineSink {
    fn write_line(&mut self, line: &str) -> EngineResult<()>;

    fn flush(&mut self) -> EngineResult<()> {
        Ok(())
    }
}

impl<T: LineSink + ?Sized> LineSink for &mut T {
    fn write_line(&mut self, line: &str) -> EngineResult<()> {
        (**self).write_line(line)
    }

    fn flush(&mut self) -> EngineResult<()> {
        (**self).flush()
    }
}

impl<T: LineSink + ?Sized> LineSink for Box<T> {
    fn write_line(&mut self, line: &str) -> EngineResult<()> {
        (**self).write_line(line)
    }

    fn flush(&mut self) -> EngineResult<()> {
        (**self).flush()
    }
}

/// Discards every line. Used by batch sweeps that only need the counters.
#[derive(Debug, Clone, Copy, Default)]
pub struct NullSink;

impl LineSink for NullSink {
    fn write_line(&mut self, _line: &str) -> EngineResult<()> {
        Ok(())
    }
}

/// Keeps lines in memory.
#[derive(Debug, Clone, Default)]
pub struct MemorySink {
    lines: Vec<String>,
}

impl MemorySink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn lines(&self) -> &[String] {
        &self.lines
    }

    pub fn into_lines(self) -> Vec<String> {
        self.lines
    }
}

impl LineSink for MemorySink {
    fn write_line(&mut self, line: &str) -> EngineResult<()> {
        self.lines.push(line.to_owned());
        Ok(())
    }
}

/// Adapts any `io::Write` (console, file) into a sink. Write failures surface
/// as `SinkUnavailable` tagged with the sink label.
pub struct WriterSink<W> {
    label: String,
    writer: W,
}

impl<W: Write> WriterSink<W> {
    pub fn new(label: impl Into<String>, writer: W) -> Self {
        Self {
            label: label.into(),
            writer,
        }
    }

    pub fn into_inner(self) -> W {
        self.writer
    }

    fn unavailable(&self, err: std::io::Error) -> EngineError {
        EngineError::SinkUnavailable(format!("{}: {}", self.label, err))
    }
}

impl<W: Write> LineSink for WriterSink<W> {
    fn write_line(&mut self, line: &str) -> EngineResult<()> {
        writeln!(self.writer, "{}", line).map_err(|err| self.unavailable(err))
    }

    fn flush(&mut self) -> EngineResult<()> {
        self.writer.flush().map_err(|err| self.unavailable(err))
    }
}

/// Fans every line out to two sinks, first `primary` then `secondary`.
pub struct TeeSink<A, B> {
    primary: A,
    secondary: B,
}

impl<A: LineSink, B: LineSink> TeeSink<A, B> {
    pub fn new(primary: A, secondary: B) -> Self {
        Self { primary, secondary }
    }

    pub fn into_parts(self) -> (A, B) {
        (self.primary, self.secondary)
    }
}

impl<A: LineSink, B: LineSink> LineSink for TeeSink<A, B> {
    fn write_line(&mut self, line: &str) -> EngineResult<()> {
        self.primary.write_line(line)?;
        self.secondary.write_line(line)
    }

    fn flush(&mut self) -> EngineResult<()> {
        self.primary.flush()?;
        self.secondary.flush()
    }
}
