//! JSON-lines I/O for the CLI
//!
//! - Input: one JSON request object per line, blank lines skipped
//! - Output: one JSON response object per line
//! - UTF-8 only

use std::io::{BufRead, Write};

use crate::api::{ApiHandler, Response};

use super::errors::CliResult;

/// Counts of requests served from one input stream
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ServeStats {
    pub handled: usize,
    pub failed: usize,
}

/// Write one response line
pub fn write_response<W: Write>(output: &mut W, response: &Response) -> CliResult<()> {
    writeln!(output, "{}", response.to_json())?;
    output.flush()?;
    Ok(())
}

/// Handle every request line from `input`, writing responses to `output`.
///
/// `on_failure` is called with the 1-based line number and response of
/// each failed request; returning `false` stops processing.
pub fn serve_lines<R, W, F>(
    handler: &mut ApiHandler<'_>,
    input: R,
    output: &mut W,
    mut on_failure: F,
) -> CliResult<ServeStats>
where
    R: BufRead,
    W: Write,
    F: FnMut(usize, &Response) -> bool,
{
    let mut stats = ServeStats::default();

    for (index, line) in input.lines().enumerate() {
        let line = line?;
        if line.trim().is_empty() {
            continue;
        }

        let response = handler.handle(&line);
        write_response(output, &response)?;
        stats.handled += 1;

        if !response.is_success() {
            stats.failed += 1;
            if !on_failure(index + 1, &response) {
                break;
            }
        }
    }

    Ok(stats)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::Catalog;
    use std::io::Cursor;

    #[test]
    fn test_serve_lines_one_response_per_request() {
        let mut catalog = Catalog::new();
        let mut handler = ApiHandler::new(&mut catalog);
        let input = Cursor::new(
            "{\"op\":\"create_database\",\"name\":\"shop\"}\n\n{\"op\":\"list_databases\"}\n",
        );
        let mut output = Vec::new();

        let stats = serve_lines(&mut handler, input, &mut output, |_, _| true).unwrap();
        assert_eq!(stats, ServeStats { handled: 2, failed: 0 });

        let text = String::from_utf8(output).unwrap();
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines.len(), 2);
        let last: serde_json::Value = serde_json::from_str(lines[1]).unwrap();
        assert_eq!(last["data"], serde_json::json!(["shop"]));
    }

    #[test]
    fn test_failure_callback_can_stop() {
        let mut catalog = Catalog::new();
        let mut handler = ApiHandler::new(&mut catalog);
        let input = Cursor::new("{\"op\":\"drop_database\",\"name\":\"x\"}\n{\"op\":\"list_databases\"}\n");
        let mut output = Vec::new();
        let mut failed_lines = Vec::new();

        let stats = serve_lines(&mut handler, input, &mut output, |line, _| {
            failed_lines.push(line);
            false
        })
        .unwrap();

        assert_eq!(stats, ServeStats { handled: 1, failed: 1 });
        assert_eq!(failed_lines, vec![1]);
    }
}
