//! Streaming response handling and protocol line parsing.

use serde::Deserialize;

/// Prefix marking a data-bearing protocol line.
pub const DATA_PREFIX: &str = "data: ";

/// Payload signaling intentional end of stream.
pub const DONE_SENTINEL: &str = "[DONE]";

/// Parsed JSON payload of a data line.
///
/// The server emits at most one meaningful field per event; `error`
/// presence takes precedence over `text`.
#[derive(Debug, Clone, Deserialize)]
pub struct StreamEvent {
    /// Incremental reply text.
    #[serde(default)]
    pub text: Option<String>,
    /// Server-reported error message.
    #[serde(default)]
    pub error: Option<String>,
}

/// Classification of a single data line.
#[derive(Debug)]
pub enum DataLine {
    /// The `[DONE]` sentinel.
    Done,
    /// A successfully parsed stream event.
    Event(StreamEvent),
    /// A data line whose payload was not valid JSON.
    ///
    /// Malformed lines are diagnostic only; the read loop logs and skips
    /// them without aborting the stream.
    Malformed {
        /// The raw payload after the `data: ` prefix.
        payload: String,
        /// The parse failure description.
        reason: String,
    },
}

/// Classifies one protocol line.
///
/// Returns `None` for lines without the `data: ` prefix (blank separator
/// lines, `event:`/`id:` fields a fuller SSE server might emit, comments);
/// those are ignored by contract, never an error.
pub fn parse_data_line(line: &str) -> Option<DataLine> {
    let payload = line.strip_prefix(DATA_PREFIX)?;

    if payload == DONE_SENTINEL {
        return Some(DataLine::Done);
    }

    match serde_json::from_str::<StreamEvent>(payload) {
        Ok(event) => Some(DataLine::Event(event)),
        Err(e) => Some(DataLine::Malformed {
            payload: payload.to_string(),
            reason: e.to_string(),
        }),
    }
}

/// Accumulates raw body chunks and yields complete `\n`-terminated lines.
///
/// Buffering happens at the byte level and text is decoded only once a
/// line is complete, so a multi-byte UTF-8 character whose encoded bytes
/// straddle two network chunks decodes correctly once both chunks have
/// arrived. Decoding each chunk independently would corrupt such
/// characters.
#[derive(Debug, Default)]
pub struct LineBuffer {
    buffer: Vec<u8>,
}

impl LineBuffer {
    /// Creates an empty line buffer.
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a raw chunk and returns every line it completed, in order.
    ///
    /// The text after the last `\n` stays buffered: it may be the start
    /// of a line whose remainder has not arrived yet.
    pub fn push(&mut self, chunk: &[u8]) -> Vec<String> {
        self.buffer.extend_from_slice(chunk);

        let mut lines = Vec::new();
        while let Some(pos) = self.buffer.iter().position(|&b| b == b'\n') {
            let line: Vec<u8> = self.buffer.drain(..=pos).collect();
            // Drop the terminating newline before decoding.
            lines.push(String::from_utf8_lossy(&line[..line.len() - 1]).into_owned());
        }

        lines
    }

    /// Returns the number of buffered bytes not yet resolved into a line.
    pub fn pending_len(&self) -> usize {
        self.buffer.len()
    }

    /// Returns true if no partial line is buffered.
    pub fn is_empty(&self) -> bool {
        self.buffer.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use test_case::test_case;

    #[test]
    fn test_line_buffer_single_complete_line() {
        let mut buffer = LineBuffer::new();
        let lines = buffer.push(b"data: {\"text\": \"hi\"}\n");
        assert_eq!(lines, vec!["data: {\"text\": \"hi\"}"]);
        assert!(buffer.is_empty());
    }

    #[test]
    fn test_line_buffer_holds_partial_line() {
        let mut buffer = LineBuffer::new();
        assert!(buffer.push(b"data: {\"te").is_empty());
        assert_eq!(buffer.pending_len(), 10);

        let lines = buffer.push(b"xt\": \"hi\"}\n");
        assert_eq!(lines, vec!["data: {\"text\": \"hi\"}"]);
    }

    #[test]
    fn test_line_buffer_multiple_lines_in_one_chunk() {
        let mut buffer = LineBuffer::new();
        let lines = buffer.push(b"first\nsecond\nthird");
        assert_eq!(lines, vec!["first", "second"]);
        assert_eq!(buffer.pending_len(), 5);
    }

    #[test]
    fn test_line_buffer_multibyte_char_split_across_chunks() {
        // U+00E9 is 0xC3 0xA9; split between the two bytes.
        let mut buffer = LineBuffer::new();
        assert!(buffer.push(b"caf\xc3").is_empty());
        let lines = buffer.push(b"\xa9\n");
        assert_eq!(lines, vec!["café"]);
    }

    #[test]
    fn test_line_buffer_four_byte_char_split_three_ways() {
        // U+1F600 is 0xF0 0x9F 0x98 0x80.
        let mut buffer = LineBuffer::new();
        assert!(buffer.push(b"\xf0\x9f").is_empty());
        assert!(buffer.push(b"\x98").is_empty());
        let lines = buffer.push(b"\x80\n");
        assert_eq!(lines, vec!["\u{1F600}"]);
    }

    #[test]
    fn test_line_buffer_empty_lines_preserved() {
        let mut buffer = LineBuffer::new();
        let lines = buffer.push(b"\n\ndata: [DONE]\n");
        assert_eq!(lines, vec!["", "", "data: [DONE]"]);
    }

    #[test]
    fn test_parse_data_line_text_event() {
        let parsed = parse_data_line(r#"data: {"text": "Hello"}"#);
        match parsed {
            Some(DataLine::Event(event)) => {
                assert_eq!(event.text.as_deref(), Some("Hello"));
                assert_eq!(event.error, None);
            }
            other => panic!("expected text event, got {:?}", other),
        }
    }

    #[test]
    fn test_parse_data_line_error_event() {
        let parsed = parse_data_line(r#"data: {"error": "quota exceeded"}"#);
        match parsed {
            Some(DataLine::Event(event)) => {
                assert_eq!(event.error.as_deref(), Some("quota exceeded"));
            }
            other => panic!("expected error event, got {:?}", other),
        }
    }

    #[test]
    fn test_parse_data_line_event_carrying_both_fields_keeps_both() {
        // The service layer checks `error` before `text`; the parser must
        // not collapse an event carrying both into a text-only event.
        let parsed = parse_data_line(r#"data: {"text": "partial", "error": "boom"}"#);
        match parsed {
            Some(DataLine::Event(event)) => {
                assert_eq!(event.error.as_deref(), Some("boom"));
                assert_eq!(event.text.as_deref(), Some("partial"));
            }
            other => panic!("expected event, got {:?}", other),
        }
    }

    #[test]
    fn test_parse_data_line_done_sentinel() {
        assert!(matches!(parse_data_line("data: [DONE]"), Some(DataLine::Done)));
    }

    #[test]
    fn test_parse_data_line_malformed_payload() {
        let parsed = parse_data_line("data: {not json");
        match parsed {
            Some(DataLine::Malformed { payload, .. }) => {
                assert_eq!(payload, "{not json");
            }
            other => panic!("expected malformed, got {:?}", other),
        }
    }

    #[test_case("" ; "blank line")]
    #[test_case("event: message" ; "event field")]
    #[test_case("id: 42" ; "id field")]
    #[test_case(": keep-alive comment" ; "comment")]
    #[test_case("data:[DONE]" ; "missing space after colon")]
    fn test_parse_data_line_ignores_non_data_lines(line: &str) {
        assert!(parse_data_line(line).is_none());
    }

    #[test]
    fn test_lines_split_arbitrarily_across_chunks_reassemble() {
        let chunks: [&[u8]; 3] = [
            b"data: {\"text\": \"Hel",
            b"lo\"}\ndata: ",
            b"{\"text\": \" world\"}\ndata: [DONE]\n",
        ];

        let mut buffer = LineBuffer::new();
        let mut texts = Vec::new();
        let mut done = false;
        for chunk in chunks {
            for line in buffer.push(chunk) {
                match parse_data_line(&line) {
                    Some(DataLine::Event(event)) => {
                        texts.extend(event.text);
                    }
                    Some(DataLine::Done) => done = true,
                    other => panic!("unexpected line result {:?}", other),
                }
            }
        }

        assert_eq!(texts, vec!["Hello", " world"]);
        assert!(done);
        assert!(buffer.is_empty());
    }

    #[test]
    fn test_parse_data_line_tolerates_unknown_fields() {
        let parsed = parse_data_line(r#"data: {"text": "hi", "model": "gpt"}"#);
        match parsed {
            Some(DataLine::Event(event)) => assert_eq!(event.text.as_deref(), Some("hi")),
            other => panic!("expected event, got {:?}", other),
        }
    }
}
