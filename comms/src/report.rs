use std::fmt;

/// Capacity of a report message, terminating NUL included.
pub const MSG_CAPACITY: usize = 256;

/// A fixed capacity, NUL terminated text buffer.
///
/// Writes past the capacity are silently truncated on a character boundary,
/// the terminating NUL always fits.
#[derive(Clone)]
pub struct MsgBuf {
    bytes: [u8; MSG_CAPACITY],
    len: usize,
}

impl Default for MsgBuf {
    fn default() -> Self {
        Self::new()
    }
}

impl MsgBuf {
    /// Creates a new empty `MsgBuf`.
    pub const fn new() -> Self {
        Self {
            bytes: [0; MSG_CAPACITY],
            len: 0,
        }
    }

    pub fn clear(&mut self) {
        self.len = 0;
        self.bytes[0] = 0;
    }

    /// The message length, without the terminating NUL.
    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    pub fn as_str(&self) -> &str {
        // Only whole characters are ever copied in, see `write_str`.
        str::from_utf8(&self.bytes[..self.len]).unwrap_or_default()
    }

    /// The raw message including its terminating NUL.
    pub fn as_bytes_with_nul(&self) -> &[u8] {
        &self.bytes[..=self.len]
    }
}

impl fmt::Write for MsgBuf {
    fn write_str(&mut self, s: &str) -> fmt::Result {
        let room = MSG_CAPACITY - 1 - self.len;

        let mut take = s.len().min(room);
        while !s.is_char_boundary(take) {
            take -= 1;
        }

        self.bytes[self.len..self.len + take].copy_from_slice(&s.as_bytes()[..take]);
        self.len += take;
        self.bytes[self.len] = 0;
        Ok(())
    }
}

impl fmt::Debug for MsgBuf {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(self.as_str(), f)
    }
}

impl fmt::Display for MsgBuf {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// What the worker hands back for a command: a status line and, for
/// inference, the predicted probabilities.
#[derive(Debug, Clone, Default)]
pub struct Report {
    msg: MsgBuf,
    values: Option<Vec<f32>>,
}

impl Report {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn clear(&mut self) {
        self.msg.clear();
        self.values = None;
    }

    pub fn msg(&self) -> &str {
        self.msg.as_str()
    }

    /// The message buffer, to be written with `write!`.
    pub fn msg_mut(&mut self) -> &mut MsgBuf {
        &mut self.msg
    }

    /// The numeric result vector, only present for inference results.
    pub fn values(&self) -> Option<&[f32]> {
        self.values.as_deref()
    }

    pub fn set_values(&mut self, values: &[f32]) {
        let buf = self.values.get_or_insert_with(Vec::new);
        buf.clear();
        buf.extend_from_slice(values);
    }
}

#[cfg(test)]
mod tests {
    use std::fmt::Write;

    use super::*;

    #[test]
    fn short_messages_are_kept_verbatim() {
        let mut buf = MsgBuf::new();
        write!(buf, "train(): n_items={}", 100).unwrap();

        assert_eq!(buf.as_str(), "train(): n_items=100");
        assert_eq!(buf.as_bytes_with_nul().last(), Some(&0));
    }

    #[test]
    fn long_messages_are_truncated_and_terminated() {
        let mut buf = MsgBuf::new();
        let long = "x".repeat(2 * MSG_CAPACITY);
        buf.write_str(&long).unwrap();

        assert_eq!(buf.len(), MSG_CAPACITY - 1);
        assert_eq!(buf.as_bytes_with_nul().len(), MSG_CAPACITY);
        assert_eq!(buf.as_bytes_with_nul()[MSG_CAPACITY - 1], 0);
    }

    #[test]
    fn truncation_keeps_whole_characters() {
        let mut buf = MsgBuf::new();
        buf.write_str(&"a".repeat(MSG_CAPACITY - 2)).unwrap();
        buf.write_str("é").unwrap();

        assert_eq!(buf.len(), MSG_CAPACITY - 2);
        assert!(buf.as_str().chars().all(|c| c == 'a'));
    }

    #[test]
    fn clearing_drops_values() {
        let mut report = Report::new();
        report.set_values(&[0.5, 0.25]);
        write!(report.msg_mut(), "infer()").unwrap();
        assert_eq!(report.values(), Some(&[0.5, 0.25][..]));

        report.clear();
        assert_eq!(report.values(), None);
        assert_eq!(report.msg(), "");
    }
}
