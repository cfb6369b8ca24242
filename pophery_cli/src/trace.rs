//! Execution tracing

use std::io::{self, BufRead, Write};

use pophery_vm::Program;

use crate::config::TraceMode;

/// Writes the program state to a sink as a run progresses
pub struct Tracer<T> {
    mode: TraceMode,
    sink: T,
}

impl<T: Write> Tracer<T> {
    pub fn new(mode: TraceMode, sink: T) -> Self {
        Self { mode, sink }
    }

    /// Record the current state of `program`
    pub fn record<R: BufRead, W: Write>(&mut self, program: &Program<R, W>) -> io::Result<()> {
        match self.mode {
            TraceMode::Off => return Ok(()),
            TraceMode::Text => writeln!(self.sink, "[{}]", program.buffer())?,
            TraceMode::Json => {
                serde_json::to_writer(&mut self.sink, &program.snapshot())?;
                writeln!(self.sink)?;
            }
        }
        self.sink.flush()
    }

    pub fn into_inner(self) -> T {
        self.sink
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pophery_vm::{MemoryIo, Semantics};

    fn program(text: &str) -> Program<io::Cursor<Vec<u8>>, Vec<u8>> {
        Program::new(text, Semantics::Selection, MemoryIo::in_memory(""))
    }

    #[test]
    fn test_text_trace() {
        let mut tracer = Tracer::new(TraceMode::Text, Vec::new());
        tracer.record(&program("(^!)O(!$)")).unwrap();
        assert_eq!(String::from_utf8(tracer.into_inner()).unwrap(), "[(^!)O(!$)]\n");
    }

    #[test]
    fn test_json_trace() {
        let mut tracer = Tracer::new(TraceMode::Json, Vec::new());
        tracer.record(&program("(^!)O(!$)")).unwrap();
        let line = String::from_utf8(tracer.into_inner()).unwrap();
        let value: serde_json::Value = serde_json::from_str(line.trim_end()).unwrap();
        assert_eq!(value["buffer"]["text"], "(^!)O(!$)");
        assert_eq!(value["steps"], 0);
        assert_eq!(value["semantics"], "Selection");
    }

    #[test]
    fn test_off_writes_nothing() {
        let mut tracer = Tracer::new(TraceMode::Off, Vec::new());
        tracer.record(&program("(^!)O(!$)")).unwrap();
        assert!(tracer.into_inner().is_empty());
    }
}
