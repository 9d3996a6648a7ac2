// Copyright (C) 2026 Brian Johnson
//
// This program is free software; you can redistribute it and/or modify
// it under the terms of the GNU General Public License as published by
// the Free Software Foundation; either version 2 of the License, or
// (at your option) any later version.
//
// This program is distributed in the hope that it will be useful,
// but WITHOUT ANY WARRANTY; without even the implied warranty of
// MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE.  See the
// GNU General Public License for more details.
//
// You should have received a copy of the GNU General Public License along
// with this program; if not, write to the Free Software Foundation, Inc.,
// 51 Franklin Street, Fifth Floor, Boston, MA 02110-1301 USA.

use std::io::BufRead;
use crate::protocol::*;

// ============================================================================
// Line Buffer
// ============================================================================

/// One line of source text, at most `LINE_SIZE - 1` bytes. Writes past
/// capacity are refused, so an overlong physical line truncates instead
/// of overflowing.
pub struct LineBuffer {
    bytes: [u8; LINE_SIZE],
    len: usize,
}

impl LineBuffer {
    pub fn new() -> Self {
        LineBuffer {
            bytes: [0; LINE_SIZE],
            len: 0,
        }
    }

    pub fn clear(&mut self) {
        self.len = 0;
    }

    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    pub fn is_full(&self) -> bool {
        self.len == LINE_SIZE - 1
    }

    /// Appends one byte. Returns false (and stores nothing) at capacity.
    pub fn push(&mut self, byte: u8) -> bool {
        if self.is_full() {
            return false;
        }
        self.bytes[self.len] = byte;
        self.len += 1;
        true
    }

    pub fn truncate(&mut self, len: usize) {
        if len < self.len {
            self.len = len;
        }
    }

    /// Removes the first `count` bytes, shifting the remainder left.
    pub fn drain_front(&mut self, count: usize) {
        if count == 0 {
            return;
        }
        let count = count.min(self.len);
        self.bytes.copy_within(count..self.len, 0);
        self.len -= count;
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.bytes[..self.len]
    }
}

// ============================================================================
// Line Reader
// ============================================================================

/// Reads one line into `line`, which is cleared first.
///
/// CR and LF each end a line on their own; a CRLF pair therefore yields
/// an extra blank line on the following call. The terminator is stored
/// as a single CR, never the original LF. Any other control byte is
/// stored as a space. Reading stops early, without a CR, when the
/// buffer fills; the rest of the physical line is picked up by the next
/// call. Returns the number of payload bytes stored, excluding the CR
/// marker. At end of file the buffer comes back empty.
pub fn read_line<R: BufRead>(reader: &mut R, line: &mut LineBuffer) -> std::io::Result<usize> {
    line.clear();
    let mut produced = 0;

    loop {
        let byte = match next_byte(reader)? {
            Some(b) => b,
            None => break,
        };

        if byte == CR || byte == LF {
            line.push(CR);
            break;
        }

        let byte = if byte < 32 { BLANK } else { byte };
        line.push(byte);
        produced += 1;

        if line.is_full() {
            break;
        }
    }

    Ok(produced)
}

fn next_byte<R: BufRead>(reader: &mut R) -> std::io::Result<Option<u8>> {
    let available = reader.fill_buf()?;
    if available.is_empty() {
        return Ok(None);
    }
    let byte = available[0];
    reader.consume(1);
    Ok(Some(byte))
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::BufReader;

    fn read_from(input: &[u8]) -> (Vec<Vec<u8>>, Vec<usize>) {
        let mut reader = BufReader::new(input);
        let mut line = LineBuffer::new();
        let mut lines = Vec::new();
        let mut counts = Vec::new();
        loop {
            let n = read_line(&mut reader, &mut line).unwrap();
            if line.is_empty() {
                break;
            }
            lines.push(line.as_bytes().to_vec());
            counts.push(n);
        }
        (lines, counts)
    }

    #[test]
    fn test_lf_terminated_line() {
        let (lines, counts) = read_from(b"HELLO\n");
        assert_eq!(lines, vec![b"HELLO\r".to_vec()]);
        assert_eq!(counts, vec![5]);
    }

    #[test]
    fn test_cr_terminated_line() {
        let (lines, _) = read_from(b"HELLO\r");
        assert_eq!(lines, vec![b"HELLO\r".to_vec()]);
    }

    #[test]
    fn test_crlf_yields_extra_blank_line() {
        let (lines, counts) = read_from(b"A\r\nB\n");
        assert_eq!(lines, vec![b"A\r".to_vec(), b"\r".to_vec(), b"B\r".to_vec()]);
        assert_eq!(counts, vec![1, 0, 1]);
    }

    #[test]
    fn test_control_bytes_become_spaces() {
        let (lines, _) = read_from(b"A\tB\x01C\n");
        assert_eq!(lines, vec![b"A B C\r".to_vec()]);
    }

    #[test]
    fn test_overlong_line_splits_at_capacity() {
        let mut input = vec![b'X'; 100];
        input.push(b'\n');
        let (lines, counts) = read_from(&input);

        assert_eq!(lines.len(), 2);
        assert_eq!(lines[0], vec![b'X'; LINE_SIZE - 1]);
        assert_eq!(counts[0], LINE_SIZE - 1);

        let mut rest = vec![b'X'; 100 - (LINE_SIZE - 1)];
        rest.push(CR);
        assert_eq!(lines[1], rest);
    }

    #[test]
    fn test_last_line_without_newline_has_no_cr() {
        let (lines, counts) = read_from(b"ABC");
        assert_eq!(lines, vec![b"ABC".to_vec()]);
        assert_eq!(counts, vec![3]);
    }

    #[test]
    fn test_eof_is_empty() {
        let mut reader = BufReader::new(&b""[..]);
        let mut line = LineBuffer::new();
        let n = read_line(&mut reader, &mut line).unwrap();
        assert_eq!(n, 0);
        assert!(line.is_empty());
    }

    #[test]
    fn test_push_refused_at_capacity() {
        let mut line = LineBuffer::new();
        for _ in 0..LINE_SIZE - 1 {
            assert!(line.push(b'A'));
        }
        assert!(!line.push(b'A'));
        assert_eq!(line.len(), LINE_SIZE - 1);
    }

    #[test]
    fn test_drain_front() {
        let mut line = LineBuffer::new();
        for &b in b"   HELLO\r" {
            line.push(b);
        }
        line.drain_front(3);
        assert_eq!(line.as_bytes(), b"HELLO\r");
        line.drain_front(0);
        assert_eq!(line.as_bytes(), b"HELLO\r");
    }
}
