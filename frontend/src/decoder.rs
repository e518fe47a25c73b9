/// Turns a byte stream into cumulative UTF-8 text.
///
/// A multi-byte character split across two chunks is held back until its
/// remaining bytes arrive. Invalid bytes become U+FFFD.
#[derive(Debug, Default)]
pub struct StreamDecoder {
    text: String,
    pending: Vec<u8>,
}

impl StreamDecoder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Feeds one chunk and returns everything decoded so far.
    pub fn push(&mut self, bytes: &[u8]) -> &str {
        self.pending.extend_from_slice(bytes);
        loop {
            match std::str::from_utf8(&self.pending) {
                Ok(valid) => {
                    self.text.push_str(valid);
                    self.pending.clear();
                    break;
                }
                Err(err) => {
                    let valid_up_to = err.valid_up_to();
                    self.text
                        .push_str(&String::from_utf8_lossy(&self.pending[..valid_up_to]));
                    match err.error_len() {
                        Some(bad) => {
                            self.text.push(char::REPLACEMENT_CHARACTER);
                            self.pending.drain(..valid_up_to + bad);
                        }
                        // Incomplete sequence at the end: wait for more bytes.
                        None => {
                            self.pending.drain(..valid_up_to);
                            break;
                        }
                    }
                }
            }
        }
        &self.text
    }

    /// Flushes any held-back bytes and returns the final text.
    pub fn finish(mut self) -> String {
        if !self.pending.is_empty() {
            self.text.push_str(&String::from_utf8_lossy(&self.pending));
        }
        self.text
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accumulates_chunks() {
        let mut decoder = StreamDecoder::new();
        assert_eq!(decoder.push(b"Hel"), "Hel");
        assert_eq!(decoder.push(b"lo"), "Hello");
        assert_eq!(decoder.finish(), "Hello");
    }

    #[test]
    fn holds_back_split_characters() {
        let bytes = "möte".as_bytes();
        // 'ö' is two bytes; split between them.
        let mut decoder = StreamDecoder::new();
        assert_eq!(decoder.push(&bytes[..2]), "m");
        assert_eq!(decoder.push(&bytes[2..]), "möte");
    }

    #[test]
    fn finish_flushes_incomplete_tail_lossily() {
        let bytes = "kl ö".as_bytes();
        let mut decoder = StreamDecoder::new();
        assert_eq!(decoder.push(&bytes[..bytes.len() - 1]), "kl ");
        assert_eq!(decoder.finish(), "kl \u{FFFD}");
    }

    #[test]
    fn replaces_invalid_bytes_and_continues() {
        let mut decoder = StreamDecoder::new();
        assert_eq!(decoder.push(&[b'a', 0xFF, b'b']), "a\u{FFFD}b");
        assert_eq!(decoder.push(b"c"), "a\u{FFFD}bc");
    }

    #[test]
    fn empty_stream_decodes_to_empty_text() {
        assert_eq!(StreamDecoder::new().finish(), "");
    }
}
