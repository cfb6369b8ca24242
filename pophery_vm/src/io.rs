//! Line-oriented input and output collaborators

use std::borrow::Cow;
use std::fmt::Write as _;
use std::io::{self, BufRead, Cursor, Write};
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use tracing::debug;

/// How output lines are encoded
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum OutputEncoding {
    /// Write text as UTF-8
    #[default]
    Utf8,
    /// Write ASCII; anything else becomes a numeric character reference
    Ascii,
}

impl OutputEncoding {
    /// Encode `text`, replacing characters this encoding cannot represent
    /// with `&#NNNN;` references.
    pub fn encode<'a>(&self, text: &'a str) -> Cow<'a, str> {
        match self {
            OutputEncoding::Utf8 => Cow::Borrowed(text),
            OutputEncoding::Ascii if text.is_ascii() => Cow::Borrowed(text),
            OutputEncoding::Ascii => {
                let mut encoded = String::with_capacity(text.len());
                for ch in text.chars() {
                    if ch.is_ascii() {
                        encoded.push(ch);
                    } else {
                        let _ = write!(encoded, "&#{};", ch as u32);
                    }
                }
                Cow::Owned(encoded)
            }
        }
    }
}

impl FromStr for OutputEncoding {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "utf-8" | "utf8" => Ok(OutputEncoding::Utf8),
            "ascii" => Ok(OutputEncoding::Ascii),
            other => Err(format!("unknown output encoding: {}", other)),
        }
    }
}

/// Input and output streams handed to a running program.
///
/// The program only ever reads one line or writes one line.
pub struct ProgramIo<R, W> {
    input: R,
    output: W,
    encoding: OutputEncoding,
}

impl<R: BufRead, W: Write> ProgramIo<R, W> {
    pub fn new(input: R, output: W) -> Self {
        Self {
            input,
            output,
            encoding: OutputEncoding::default(),
        }
    }

    pub fn with_encoding(mut self, encoding: OutputEncoding) -> Self {
        self.encoding = encoding;
        self
    }

    /// Read one line without its trailing newline.
    ///
    /// Blocks until a line or end of input. At end of input this returns an
    /// empty string, on this and every later call.
    pub fn read_line(&mut self) -> io::Result<String> {
        let mut line = String::new();
        let read = self.input.read_line(&mut line)?;
        if read == 0 {
            debug!("input exhausted");
        }
        if line.ends_with('\n') {
            line.pop();
        }
        Ok(line)
    }

    /// Write `text` followed by a newline
    pub fn write_line(&mut self, text: &str) -> io::Result<()> {
        let encoded = self.encoding.encode(text);
        self.output.write_all(encoded.as_bytes())?;
        self.output.write_all(b"\n")?;
        self.output.flush()
    }

    pub fn into_parts(self) -> (R, W) {
        (self.input, self.output)
    }
}

/// In-memory streams, for tests and embedding
pub type MemoryIo = ProgramIo<Cursor<Vec<u8>>, Vec<u8>>;

impl MemoryIo {
    pub fn in_memory(input: &str) -> Self {
        ProgramIo::new(Cursor::new(input.as_bytes().to_vec()), Vec::new())
    }

    /// Everything written so far
    pub fn output_text(&self) -> String {
        String::from_utf8_lossy(&self.output).into_owned()
    }
}
