//! # Pophery CLI
//!
//! Command line runner for Pophery programs. Programs given with `-e` and
//! as files run one after another over the same input and output streams.

pub mod config;
pub mod loader;
pub mod trace;

use std::io::{self, BufRead, Write};

use pophery_vm::{Program, ProgramError, ProgramIo, StepOutcome};
use thiserror::Error;
use tracing::{debug, info};

use config::{ConfigError, RunConfig};
use loader::LoadError;
use trace::Tracer;

/// Anything that stops a run
#[derive(Debug, Error)]
pub enum CliError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Load(#[from] LoadError),

    #[error(transparent)]
    Program(#[from] ProgramError),

    #[error("trace output failed: {0}")]
    Trace(#[from] io::Error),
}

const LICENSE_NOTICE: &str = "\
Licensed under either of

  * Apache License, Version 2.0 (http://www.apache.org/licenses/LICENSE-2.0)
  * MIT license (http://opensource.org/licenses/MIT)

at your option.

THIS SOFTWARE IS PROVIDED \"AS IS\", WITHOUT WARRANTY OF ANY KIND, EXPRESS OR
IMPLIED, INCLUDING BUT NOT LIMITED TO THE WARRANTIES OF MERCHANTABILITY,
FITNESS FOR A PARTICULAR PURPOSE AND NONINFRINGEMENT.";

/// Text printed by `--show-license`: name and version, usage, license
pub fn license_text() -> String {
    format!(
        "pophery {} ({})\n\n{}\n\n{}",
        env!("CARGO_PKG_VERSION"),
        env!("CARGO_PKG_LICENSE"),
        config::USAGE,
        LICENSE_NOTICE,
    )
}

/// Run every program named by `config` in order.
///
/// Input and output are shared: a line consumed by one program is gone for
/// the next. Returns the streams when all programs have halted.
pub fn execute<R, W, T>(
    config: &RunConfig,
    input: R,
    output: W,
    tracer: &mut Tracer<T>,
) -> Result<(R, W), CliError>
where
    R: BufRead,
    W: Write,
    T: Write,
{
    let mut streams = (input, output);

    if let Some(text) = &config.evaluate {
        info!("running program from command line");
        streams = run_one(config, text, streams, tracer)?;
    }

    for path in &config.files {
        let text = loader::load_program(path)?;
        info!(path = %path.display(), "running program");
        streams = run_one(config, &text, streams, tracer)?;
    }

    Ok(streams)
}

fn run_one<R, W, T>(
    config: &RunConfig,
    text: &str,
    (input, output): (R, W),
    tracer: &mut Tracer<T>,
) -> Result<(R, W), CliError>
where
    R: BufRead,
    W: Write,
    T: Write,
{
    let io = ProgramIo::new(input, output).with_encoding(config.encoding);
    let mut program = Program::new(text, config.semantics, io);

    tracer.record(&program)?;
    while program.step()? == StepOutcome::Running {
        tracer.record(&program)?;
    }

    debug!(steps = program.steps(), "program halted");
    Ok(program.into_io().into_parts())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::TraceMode;
    use pophery_vm::{OutputEncoding, Semantics};
    use std::io::Cursor;

    fn run(config: &RunConfig, input: &str) -> Result<String, CliError> {
        let mut tracer = Tracer::new(TraceMode::Off, io::sink());
        let (_, output) = execute(config, Cursor::new(input), Vec::new(), &mut tracer)?;
        Ok(String::from_utf8(output).unwrap())
    }

    fn evaluate(text: &str) -> RunConfig {
        RunConfig {
            evaluate: Some(text.to_string()),
            ..RunConfig::default()
        }
    }

    #[test]
    fn test_evaluate_hello_world() {
        let output = run(&evaluate("(^?)Hello, world!(?$)(^!)O(!$)"), "").unwrap();
        assert_eq!(output, "Hello, world!\n");
    }

    #[test]
    fn test_register_semantics() {
        let config = RunConfig {
            semantics: Semantics::Register,
            ..evaluate("(^?)hi(?$)(^!)O(!$)O")
        };
        assert_eq!(run(&config, "").unwrap(), "hi\nhi\n");
    }

    #[test]
    fn test_ascii_encoding() {
        let config = RunConfig {
            encoding: OutputEncoding::Ascii,
            ..evaluate("(^?)é(?$)(^!)O(!$)")
        };
        assert_eq!(run(&config, "").unwrap(), "&#233;\n");
    }

    #[test]
    fn test_programs_share_streams() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("echo.pophery");
        std::fs::write(&path, "# echo one line\n(^?)(?$)(^!)I(!$)O\n").unwrap();

        let config = RunConfig {
            files: vec![path],
            ..evaluate("(^?)(?$)(^!)I(!$)O")
        };
        assert_eq!(run(&config, "first\nsecond\n").unwrap(), "first\nsecond\n");
    }

    #[test]
    fn test_text_trace() {
        let config = evaluate("(^?)x(?$)(^!)O(!$)");
        let mut tracer = Tracer::new(TraceMode::Text, Vec::new());
        let (_, output) = execute(&config, Cursor::new(""), Vec::new(), &mut tracer).unwrap();

        assert_eq!(output, b"x\n");
        assert_eq!(
            String::from_utf8(tracer.into_inner()).unwrap(),
            "[(^?)x(?$)(^!)O(!$)]\n[(^?)x(?$)O(^!)(!$)]\n"
        );
    }

    #[test]
    fn test_json_trace_one_line_per_state() {
        let config = evaluate("(^?)(?$)(^!)12(!$)");
        let mut tracer = Tracer::new(TraceMode::Json, Vec::new());
        execute(&config, Cursor::new(""), Vec::new(), &mut tracer).unwrap();

        let trace = String::from_utf8(tracer.into_inner()).unwrap();
        let steps: Vec<u64> = trace
            .lines()
            .map(|line| {
                let value: serde_json::Value = serde_json::from_str(line).unwrap();
                value["steps"].as_u64().unwrap()
            })
            .collect();
        assert_eq!(steps, vec![0, 1, 2]);
    }

    #[test]
    fn test_missing_file_is_load_error() {
        let dir = tempfile::tempdir().unwrap();
        let config = RunConfig {
            files: vec![dir.path().join("nope.pophery")],
            ..RunConfig::default()
        };
        assert!(matches!(run(&config, ""), Err(CliError::Load(_))));
    }

    #[test]
    fn test_program_error_propagates() {
        assert!(matches!(
            run(&evaluate("(^!)X(!$)"), ""),
            Err(CliError::Program(_))
        ));
    }

    #[test]
    fn test_license_text() {
        let text = license_text();
        assert!(text.starts_with(&format!("pophery {} ", env!("CARGO_PKG_VERSION"))));
        assert!(text.contains("MIT OR Apache-2.0"));
        assert!(text.contains(config::USAGE));
        assert!(text.contains("WITHOUT WARRANTY OF ANY KIND"));
    }

    #[test]
    fn test_streams_returned_after_run() {
        let config = evaluate("(^?)(?$)(^!)I(!$)O");
        let mut tracer = Tracer::new(TraceMode::Off, io::sink());
        let (mut input, output) =
            execute(&config, Cursor::new("one\ntwo\n"), Vec::new(), &mut tracer).unwrap();

        let mut rest = String::new();
        input.read_line(&mut rest).unwrap();
        assert_eq!(rest, "two\n");
        assert_eq!(output, b"one\n");
    }
}
