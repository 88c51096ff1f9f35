//! CLI presenter for output formatting
//!
//! stdout carries only machine-readable output (responses, config values);
//! human-facing status goes to stderr.

use std::io::{self, Write};

use colored::*;

use crate::domain::response::Response;

/// Presenter for CLI output formatting
#[derive(Debug, Default)]
pub struct Presenter;

impl Presenter {
    /// Create a new presenter
    pub fn new() -> Self {
        Self
    }

    /// Print success message to stderr
    pub fn success(&self, message: &str) {
        eprintln!("{} {}", "✓".green(), message);
    }

    /// Print error message to stderr
    pub fn error(&self, message: &str) {
        eprintln!("{} {}", "✗".red(), message);
    }

    /// Output text to stdout
    pub fn output(&self, text: &str) {
        println!("{}", text);
    }

    /// Write a response as one JSON document to stdout
    pub fn response(&self, response: &Response, pretty: bool) -> io::Result<()> {
        let rendered = Self::render_response(response, pretty)?;
        let mut stdout = io::stdout().lock();
        writeln!(stdout, "{}", rendered)?;
        stdout.flush()
    }

    /// Serialize a response, compact (one line) or pretty
    pub fn render_response(response: &Response, pretty: bool) -> io::Result<String> {
        let rendered = if pretty {
            serde_json::to_string_pretty(response)
        } else {
            serde_json::to_string(response)
        };
        rendered.map_err(io::Error::other)
    }

    /// Print a key-value pair (for config list)
    pub fn key_value(&self, key: &str, value: &str) {
        println!("{}: {}", key.cyan(), value);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn compact_response_is_single_line() {
        let rendered = Presenter::render_response(&Response::error(400, "bad"), false).unwrap();
        assert_eq!(rendered, r#"{"statusCode":400,"body":{"error":"bad"}}"#);
    }

    #[test]
    fn pretty_response_spans_lines() {
        let rendered = Presenter::render_response(&Response::error(500, "boom"), true).unwrap();
        assert!(rendered.contains('\n'));
        assert!(rendered.contains("\"statusCode\": 500"));
    }
}
