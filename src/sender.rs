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

use std::marker::PhantomData;
use std::fs::File;
use std::io::{BufReader, Write};
use std::path::PathBuf;
use std::time::Duration;
use crate::echo::{send_byte, send_line};
use crate::line::{LineBuffer, read_line};
use crate::pace::Pacer;
use crate::preprocess::preprocess;
use crate::protocol::CR;
use crate::serial::SerialPort;

// ============================================================================
// Error Types
// ============================================================================

#[derive(Debug)]
pub enum SenderError {
    Io(std::io::Error),
    TransferComplete,
}

impl std::fmt::Display for SenderError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SenderError::Io(e) => write!(f, "I/O error: {}", e),
            SenderError::TransferComplete => write!(f, "Transfer complete"),
        }
    }
}

impl std::error::Error for SenderError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            SenderError::Io(e) => Some(e),
            _ => None,
        }
    }
}

impl From<std::io::Error> for SenderError {
    fn from(err: std::io::Error) -> Self {
        SenderError::Io(err)
    }
}

// ============================================================================
// States
// ============================================================================

pub struct Idle;
pub struct OpeningFile;
pub struct StreamingLines;
pub struct Flushing;

// ============================================================================
// FSM Structure
// ============================================================================

pub struct SenderFsm<State> {
    state: PhantomData<State>,
    serial: Box<dyn SerialPort>,
    console: Box<dyn Write + Send>,
    pacer: Box<dyn Pacer>,
    files: Vec<PathBuf>,
    reader: Option<BufReader<File>>,
    line: LineBuffer,
    lines_sent: u32,
    line_delay: Duration,
}

// ============================================================================
// Trait
// ============================================================================

pub trait SenderState: Send {
    fn step(self: Box<Self>) -> Result<Box<dyn SenderState>, SenderError>;
}

// ============================================================================
// Helper to transition states
// ============================================================================

impl<S> SenderFsm<S> {
    fn transition<T>(self) -> Box<SenderFsm<T>> {
        Box::new(SenderFsm {
            state: PhantomData,
            serial: self.serial,
            console: self.console,
            pacer: self.pacer,
            files: self.files,
            reader: self.reader,
            line: self.line,
            lines_sent: self.lines_sent,
            line_delay: self.line_delay,
        })
    }

    fn io_error(&self, e: std::io::Error) -> SenderError {
        let type_name = std::any::type_name::<S>();
        let state_name = type_name.split("::").last().unwrap_or(type_name);
        SenderError::Io(std::io::Error::new(
            e.kind(),
            format!("{} (in state: {})", e, state_name)
        ))
    }
}

// ============================================================================
// State Implementations
// ============================================================================

impl SenderState for SenderFsm<Idle> {
    fn step(self: Box<Self>) -> Result<Box<dyn SenderState>, SenderError> {
        let mut fsm = *self;
        if fsm.files.is_empty() {
            let done = writeln!(fsm.console);
            done.map_err(|e| fsm.io_error(e))?;
            Err(SenderError::TransferComplete)
        } else {
            let next = fsm.transition::<OpeningFile>();
            Ok(next as Box<dyn SenderState>)
        }
    }
}

impl SenderState for SenderFsm<OpeningFile> {
    fn step(self: Box<Self>) -> Result<Box<dyn SenderState>, SenderError> {
        let mut fsm = *self;
        let path = fsm.files[0].clone();

        match File::open(&path) {
            Err(_) => {
                // Not fatal: report and move on to the next file.
                let report = writeln!(fsm.console, "{} is not a file.", path.display());
                report.map_err(|e| fsm.io_error(e))?;
                fsm.files.remove(0);
                fsm.pacer.pause(fsm.line_delay);
                let next = fsm.transition::<Idle>();
                Ok(next as Box<dyn SenderState>)
            }
            Ok(file) => {
                let report = writeln!(fsm.console, "Sending file {}", path.display());
                report.map_err(|e| fsm.io_error(e))?;
                fsm.reader = Some(BufReader::new(file));
                fsm.lines_sent = 0;
                fsm.pacer.pause(fsm.line_delay);
                let next = fsm.transition::<StreamingLines>();
                Ok(next as Box<dyn SenderState>)
            }
        }
    }
}

impl SenderState for SenderFsm<StreamingLines> {
    fn step(self: Box<Self>) -> Result<Box<dyn SenderState>, SenderError> {
        let mut fsm = *self;

        let read = match fsm.reader {
            Some(ref mut reader) => read_line(reader, &mut fsm.line),
            None => {
                fsm.line.clear();
                Ok(0)
            }
        };
        read.map_err(|e| fsm.io_error(e))?;

        // An empty buffer after a read means end of file.
        if fsm.line.is_empty() {
            let next = fsm.transition::<Flushing>();
            return Ok(next as Box<dyn SenderState>);
        }

        preprocess(&mut fsm.line);

        // Lines emptied by preprocessing are filtered, not sent.
        if !fsm.line.is_empty() {
            let sent = send_line(&mut *fsm.serial, &mut *fsm.console, fsm.line.as_bytes());
            sent.map_err(|e| fsm.io_error(e))?;
            fsm.pacer.pause(fsm.line_delay);
            fsm.lines_sent += 1;
        }

        Ok(Box::new(fsm) as Box<dyn SenderState>)
    }
}

impl SenderState for SenderFsm<Flushing> {
    fn step(self: Box<Self>) -> Result<Box<dyn SenderState>, SenderError> {
        let mut fsm = *self;

        // A bare CR closes out the interpreter's input buffer.
        let flushed = send_byte(&mut *fsm.serial, &mut *fsm.console, CR);
        flushed.map_err(|e| fsm.io_error(e))?;

        fsm.reader = None;
        let report = writeln!(fsm.console, "{} lines sent", fsm.lines_sent);
        report.map_err(|e| fsm.io_error(e))?;

        fsm.files.remove(0);
        fsm.pacer.pause(fsm.line_delay);

        let next = fsm.transition::<Idle>();
        Ok(next as Box<dyn SenderState>)
    }
}

// ============================================================================
// Constructor
// ============================================================================

impl SenderFsm<Idle> {
    pub fn new(
        serial: Box<dyn SerialPort>,
        console: Box<dyn Write + Send>,
        pacer: Box<dyn Pacer>,
        files: Vec<PathBuf>,
        line_delay: Duration,
    ) -> Box<dyn SenderState> {
        Box::new(SenderFsm {
            state: PhantomData::<Idle>,
            serial,
            console,
            pacer,
            files,
            reader: None,
            line: LineBuffer::new(),
            lines_sent: 0,
            line_delay,
        })
    }
}

// ============================================================================
// Tests
// ============================================================================
