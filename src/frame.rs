//! Wire-format definitions for data packets, acknowledgments, and the
//! termination sentinel.
//!
//! Every datagram exchanged between peers is one of three things:
//! - a **data packet** — sequence number, delimiter, raw payload bytes;
//! - an **acknowledgment** — a bare sequence number;
//! - the **termination sentinel** — a fixed literal marking end of stream.
//!
//! This module is responsible for serialising and parsing all three,
//! returning errors for malformed input. No I/O happens here — this is pure
//! data transformation.
//!
//! # Wire format
//!
//! ```text
//! data packet:   <sequence-decimal> ':' <raw-payload-bytes>
//! acknowledgment: <sequence-decimal>
//! termination:   "EndTransmission"
//! ```
//!
//! Only the **first** `:` is significant when parsing a data packet, so the
//! payload may itself contain the delimiter byte without corrupting the
//! frame. The sentinel contains no delimiter and no decimal prefix, so it
//! can never collide with a valid data packet; callers check
//! [`is_termination`] before attempting [`decode_data`].

/// The byte separating the sequence-number prefix from the payload.
pub const DELIMITER: u8 = b':';

/// Fixed end-of-stream sentinel, sent unframed and never acknowledged.
pub const TERMINATION: &[u8] = b"EndTransmission";

/// Errors that can arise when parsing a raw datagram.
#[derive(Debug, PartialEq, Eq)]
pub enum FrameError {
    /// No `:` delimiter anywhere in the datagram.
    MissingDelimiter,
    /// The bytes before the delimiter are not a valid decimal u32.
    BadSequence,
}

impl std::fmt::Display for FrameError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            FrameError::MissingDelimiter => write!(f, "no delimiter in datagram"),
            FrameError::BadSequence => {
                write!(f, "sequence prefix is not a valid decimal number")
            }
        }
    }
}

impl std::error::Error for FrameError {}

/// Serialise a data packet: decimal sequence, delimiter, payload verbatim.
pub fn encode_data(seq: u32, payload: &[u8]) -> Vec<u8> {
    let prefix = seq.to_string();
    let mut buf = Vec::with_capacity(prefix.len() + 1 + payload.len());
    buf.extend_from_slice(prefix.as_bytes());
    buf.push(DELIMITER);
    buf.extend_from_slice(payload);
    buf
}

/// Parse a data packet into `(sequence, payload)`.
///
/// Splits on the **first** delimiter only; everything after it is payload,
/// including any further delimiter bytes.
pub fn decode_data(buf: &[u8]) -> Result<(u32, Vec<u8>), FrameError> {
    let pos = buf
        .iter()
        .position(|&b| b == DELIMITER)
        .ok_or(FrameError::MissingDelimiter)?;
    let prefix = std::str::from_utf8(&buf[..pos]).map_err(|_| FrameError::BadSequence)?;
    let seq: u32 = prefix.parse().map_err(|_| FrameError::BadSequence)?;
    Ok((seq, buf[pos + 1..].to_vec()))
}

/// `true` when the datagram is exactly the termination sentinel.
///
/// Must be checked before [`decode_data`]; the sentinel is not a frame.
pub fn is_termination(buf: &[u8]) -> bool {
    buf == TERMINATION
}

/// Serialise an acknowledgment: the bare decimal sequence number.
pub fn encode_ack(seq: u32) -> Vec<u8> {
    seq.to_string().into_bytes()
}

/// Parse an acknowledgment datagram.
pub fn decode_ack(buf: &[u8]) -> Result<u32, FrameError> {
    let text = std::str::from_utf8(buf).map_err(|_| FrameError::BadSequence)?;
    text.parse().map_err(|_| FrameError::BadSequence)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn encode_decode_roundtrip() {
        let bytes = encode_data(42, b"hello");
        assert_eq!(bytes, b"42:hello");
        let (seq, payload) = decode_data(&bytes).unwrap();
        assert_eq!(seq, 42);
        assert_eq!(payload, b"hello");
    }

    #[test]
    fn payload_may_contain_delimiter() {
        let bytes = encode_data(7, b"a:b:c");
        let (seq, payload) = decode_data(&bytes).unwrap();
        assert_eq!(seq, 7);
        assert_eq!(payload, b"a:b:c");
    }

    #[test]
    fn empty_payload_roundtrip() {
        let (seq, payload) = decode_data(&encode_data(0, b"")).unwrap();
        assert_eq!(seq, 0);
        assert_eq!(payload, Vec::<u8>::new());
    }

    #[test]
    fn binary_payload_survives() {
        let raw = [0u8, 255, 10, 13, b':', 0];
        let (seq, payload) = decode_data(&encode_data(9, &raw)).unwrap();
        assert_eq!(seq, 9);
        assert_eq!(payload, raw);
    }

    #[test]
    fn max_sequence_roundtrip() {
        let (seq, _) = decode_data(&encode_data(u32::MAX, b"x")).unwrap();
        assert_eq!(seq, u32::MAX);
    }

    #[test]
    fn missing_delimiter_rejected() {
        assert_eq!(decode_data(b"12345"), Err(FrameError::MissingDelimiter));
    }

    #[test]
    fn non_numeric_prefix_rejected() {
        assert_eq!(decode_data(b"abc:data"), Err(FrameError::BadSequence));
    }

    #[test]
    fn negative_prefix_rejected() {
        assert_eq!(decode_data(b"-1:data"), Err(FrameError::BadSequence));
    }

    #[test]
    fn empty_prefix_rejected() {
        assert_eq!(decode_data(b":data"), Err(FrameError::BadSequence));
    }

    #[test]
    fn overflowing_prefix_rejected() {
        assert_eq!(decode_data(b"4294967296:x"), Err(FrameError::BadSequence));
    }

    #[test]
    fn sentinel_is_not_a_frame() {
        assert!(is_termination(TERMINATION));
        assert_eq!(decode_data(TERMINATION), Err(FrameError::MissingDelimiter));
    }

    #[test]
    fn sentinel_match_is_exact() {
        assert!(!is_termination(b"EndTransmission "));
        assert!(!is_termination(b"endtransmission"));
        assert!(!is_termination(b""));
    }

    #[test]
    fn ack_roundtrip() {
        assert_eq!(decode_ack(&encode_ack(0)).unwrap(), 0);
        assert_eq!(decode_ack(&encode_ack(u32::MAX)).unwrap(), u32::MAX);
    }

    #[test]
    fn garbage_ack_rejected() {
        assert_eq!(decode_ack(b"nope"), Err(FrameError::BadSequence));
        assert_eq!(decode_ack(b""), Err(FrameError::BadSequence));
    }
}
