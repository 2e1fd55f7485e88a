//! Transport-level decoding for streamed dashboard API responses.
//!
//! The chat endpoint pushes a line-oriented, server-sent-event style body.
//! This module turns raw byte chunks into protocol lines and protocol
//! lines into typed stream events; the service layer decides what each
//! event means for the overall operation.

mod streaming;

pub use streaming::{parse_data_line, DataLine, LineBuffer, StreamEvent, DATA_PREFIX, DONE_SENTINEL};
