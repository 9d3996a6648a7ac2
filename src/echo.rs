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

//! Echo-synchronized transmission. The interpreter echoes every byte it
//! receives; waiting for each echo before sending the next byte keeps
//! the tool from outrunning the device, and forwarding the echoes to
//! the console is the only live view of the transfer the operator gets.

use std::io::Write;
use std::time::Duration;
use crate::protocol::ECHO_POLL_MS;
use crate::serial::SerialPort;

/// Writes one byte, blocks for its echo, and forwards the echo to the
/// console.
pub fn send_byte(
    serial: &mut dyn SerialPort,
    console: &mut dyn Write,
    byte: u8,
) -> std::io::Result<()> {
    serial.write_all(&[byte])?;
    let echo = read_echo(serial)?;
    console.write_all(&[echo])?;
    console.flush()?;
    Ok(())
}

/// Sends every byte of a processed line, terminator included,
/// echo-synchronized.
pub fn send_line(
    serial: &mut dyn SerialPort,
    console: &mut dyn Write,
    line: &[u8],
) -> std::io::Result<()> {
    for &byte in line {
        send_byte(serial, console, byte)?;
    }
    Ok(())
}

/// Blocks until one byte arrives. There is no overall deadline: a
/// device that stops echoing hangs the transfer here, by contract. The
/// poll interval keeps the call expressible with a bounded wait should
/// one ever be wanted.
fn read_echo(serial: &mut dyn SerialPort) -> std::io::Result<u8> {
    let mut buf = [0u8; 1];
    loop {
        match serial.read_timeout(&mut buf, Duration::from_millis(ECHO_POLL_MS)) {
            Ok(n) if n > 0 => return Ok(buf[0]),
            Ok(_) => continue,
            Err(e) if e.kind() == std::io::ErrorKind::TimedOut => continue,
            Err(e) if e.kind() == std::io::ErrorKind::Interrupted => continue,
            Err(e) => return Err(e),
        }
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::serial::MockSerialPort;

    #[test]
    fn test_send_byte_forwards_echo_to_console() {
        let mut serial = MockSerialPort::new(vec![b'A']);
        let mut console: Vec<u8> = Vec::new();

        send_byte(&mut serial, &mut console, b'A').unwrap();

        assert_eq!(console, b"A");
    }

    #[test]
    fn test_send_line_echoes_every_byte_in_order() {
        let mut serial = MockSerialPort::new(b"DUP .\r".to_vec());
        let mut console: Vec<u8> = Vec::new();

        send_line(&mut serial, &mut console, b"DUP .\r").unwrap();

        assert_eq!(console, b"DUP .\r");
    }

    #[test]
    fn test_send_line_empty_writes_nothing() {
        let mut serial = MockSerialPort::new(Vec::new());
        let mut console: Vec<u8> = Vec::new();

        send_line(&mut serial, &mut console, b"").unwrap();

        assert!(console.is_empty());
    }
}
