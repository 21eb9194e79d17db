use bytes::BytesMut;

/// Accumulates bytes read from a socket and splits them into `\n`-terminated
/// lines, tolerating a trailing `\r` (§4.2). Partial trailing content is
/// retained across reads, mirroring the teacher's `Connection::read_buf`.
#[derive(Debug, Default)]
pub struct LineCodec {
    buf: BytesMut,
}

impl LineCodec {
    pub fn new() -> Self {
        Self {
            buf: BytesMut::new(),
        }
    }

    pub fn feed(&mut self, bytes: &[u8]) {
        self.buf.extend_from_slice(bytes);
    }

    /// Pop the next complete line out of the buffer, if any.
    pub fn next_line(&mut self) -> Option<String> {
        let newline_pos = self.buf.iter().position(|&b| b == b'\n')?;
        let mut line = self.buf.split_to(newline_pos);
        self.buf.advance_past_newline();
        if line.last() == Some(&b'\r') {
            line.truncate(line.len() - 1);
        }
        Some(String::from_utf8_lossy(&line).into_owned())
    }
}

/// Small helper trait so `next_line` reads naturally despite `BytesMut`
/// requiring an explicit `advance` call to discard the newline byte itself.
trait AdvancePastNewline {
    fn advance_past_newline(&mut self);
}

impl AdvancePastNewline for BytesMut {
    fn advance_past_newline(&mut self) {
        if !self.is_empty() {
            let _ = self.split_to(1);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn splits_multiple_lines_in_one_feed() {
        let mut codec = LineCodec::new();
        codec.feed(b"GRAPHIC\r\nmsz\n");
        assert_eq!(codec.next_line().as_deref(), Some("GRAPHIC"));
        assert_eq!(codec.next_line().as_deref(), Some("msz"));
        assert_eq!(codec.next_line(), None);
    }

    #[test]
    fn retains_partial_trailing_content() {
        let mut codec = LineCodec::new();
        codec.feed(b"Forw");
        assert_eq!(codec.next_line(), None);
        codec.feed(b"ard\n");
        assert_eq!(codec.next_line().as_deref(), Some("Forward"));
    }
}
