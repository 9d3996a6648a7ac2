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

//! Line discipline constants for the eForth console

/// Carriage return - terminates every transmitted line and flushes the
/// interpreter's input buffer at end of file
pub const CR: u8 = 0x0D;

/// Line feed - accepted as a line terminator on input, never transmitted
pub const LF: u8 = 0x0A;

/// Space - leading runs are stripped, and control characters are
/// replaced with it before transmission
pub const BLANK: u8 = b' ';

/// Backslash - begins a Forth line comment when surrounded by blanks
pub const COMMENT: u8 = b'\\';

/// Line buffer size; one line of source may hold at most one byte less
pub const LINE_SIZE: usize = 79;

/// Upper bound on the number of files accepted on the command line
pub const MAX_FILES: usize = 100;

/// Fixed serial speed; the target console runs 115200 8N1 with no flow control
pub const BAUD_RATE: u32 = 115_200;

/// Poll interval for the echo read; the wait itself is unbounded
pub const ECHO_POLL_MS: u64 = 100;
