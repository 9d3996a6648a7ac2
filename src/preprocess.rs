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

use crate::line::LineBuffer;
use crate::protocol::*;

/// Runs both preprocessing passes. A line that comes back empty is not
/// transmitted.
pub fn preprocess(line: &mut LineBuffer) {
    strip_leading_blanks(line);
    remove_comment(line);
}

/// Removes the leading run of literal spaces. Tabs never reach this
/// point; the reader already stored them as spaces.
pub fn strip_leading_blanks(line: &mut LineBuffer) {
    let run = line
        .as_bytes()
        .iter()
        .take_while(|&&b| b == BLANK)
        .count();
    line.drain_front(run);
}

/// Drops comment-only and blank lines entirely, and cuts inline
/// comments.
///
/// A line starting with CR, LF, or backslash-space becomes empty. For
/// an inline comment the first backslash must be surrounded by spaces;
/// the cut starts one byte before the backslash, consuming the space in
/// front of it, and the line is re-terminated with a single CR:
/// `DUP . \ print` becomes `DUP .` + CR. A backslash in any other
/// position passes through untouched.
pub fn remove_comment(line: &mut LineBuffer) {
    let bytes = line.as_bytes();
    if bytes.is_empty() {
        return;
    }

    if bytes[0] == CR || bytes[0] == LF || (bytes[0] == COMMENT && bytes.get(1) == Some(&BLANK)) {
        line.clear();
        return;
    }

    if let Some(pos) = bytes.iter().position(|&b| b == COMMENT) {
        if pos > 0 && bytes[pos - 1] == BLANK && bytes.get(pos + 1) == Some(&BLANK) {
            line.truncate(pos - 1);
            line.push(CR);
        }
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn buffer(bytes: &[u8]) -> LineBuffer {
        let mut line = LineBuffer::new();
        for &b in bytes {
            line.push(b);
        }
        line
    }

    fn processed(bytes: &[u8]) -> Vec<u8> {
        let mut line = buffer(bytes);
        preprocess(&mut line);
        line.as_bytes().to_vec()
    }

    #[test]
    fn test_comment_only_line_is_dropped() {
        assert_eq!(processed(b"\\ comment only\r"), b"");
    }

    #[test]
    fn test_bare_terminator_is_dropped() {
        assert_eq!(processed(b"\r"), b"");
    }

    #[test]
    fn test_blank_line_is_dropped() {
        assert_eq!(processed(b"    \r"), b"");
    }

    #[test]
    fn test_inline_comment_cut_boundary() {
        // The space before the backslash goes with the comment.
        assert_eq!(processed(b"DUP . \\ print\r"), b"DUP .\r");
    }

    #[test]
    fn test_leading_blanks_stripped() {
        assert_eq!(processed(b"   : SQ DUP * ;\r"), b": SQ DUP * ;\r");
    }

    #[test]
    fn test_indented_comment_line_is_dropped() {
        assert_eq!(processed(b"   \\ note\r"), b"");
    }

    #[test]
    fn test_backslash_without_surrounding_spaces_kept() {
        assert_eq!(processed(b"CHAR \\A EMIT\r"), b"CHAR \\A EMIT\r");
        assert_eq!(processed(b"A\\B\r"), b"A\\B\r");
    }

    #[test]
    fn test_leading_backslash_without_space_kept() {
        assert_eq!(processed(b"\\x\r"), b"\\x\r");
    }

    #[test]
    fn test_trailing_backslash_before_terminator_kept() {
        assert_eq!(processed(b"TEXT \\\r"), b"TEXT \\\r");
    }

    #[test]
    fn test_empty_line_stays_empty() {
        assert_eq!(processed(b""), b"");
    }

    #[test]
    fn test_preprocess_is_idempotent() {
        let mut line = buffer(b"  1 2 + . \\ sum\r");
        preprocess(&mut line);
        let once = line.as_bytes().to_vec();
        assert_eq!(once, b"1 2 + .\r");

        preprocess(&mut line);
        assert_eq!(line.as_bytes(), &once[..]);
    }
}
