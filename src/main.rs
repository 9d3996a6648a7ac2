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

// Echo-synchronized Forth source loader
mod protocol;
mod line;
mod preprocess;
mod echo;
mod pace;
mod serial;
mod sender;

use clap::Parser;
use std::path::PathBuf;
use std::time::Duration;
use pace::ThreadPacer;
use protocol::{BAUD_RATE, MAX_FILES};
use serial::RealSerialPort;

#[derive(Parser)]
#[command(name = "sendfile")]
#[command(about = "Send Forth source files to an eForth MCU over a serial line", long_about = None)]
struct Cli {
    /// Serial port to use (e.g., /dev/ttyUSB0)
    #[arg(short = 's', long = "serial", value_name = "DEVICE")]
    serial: String,

    /// Delay in milliseconds between text lines
    #[arg(short = 'd', long = "delay", default_value = "100", value_name = "MSEC")]
    delay: u64,

    /// Files to send, in the given order
    #[arg(required = true, value_name = "FILE")]
    files: Vec<PathBuf>,
}

fn main() {
    let cli = Cli::parse();

    let mut files = cli.files;
    files.truncate(MAX_FILES);

    println!("Opening serial port: {}", cli.serial);
    println!("Settings: {} baud, 8N1, no flow control, {} ms line delay", BAUD_RATE, cli.delay);

    let serial_port = match RealSerialPort::open(&cli.serial) {
        Ok(port) => port,
        Err(e) => {
            eprintln!("Failed to open serial port: {}", e);
            std::process::exit(1);
        }
    };

    if let Err(e) = send_files(serial_port, files, cli.delay) {
        eprintln!("Transfer failed: {}", e);
        std::process::exit(1);
    }
}

fn send_files(
    serial_port: RealSerialPort,
    files: Vec<PathBuf>,
    delay_ms: u64,
) -> Result<(), sender::SenderError> {
    use sender::{SenderFsm, Idle};

    let mut state = SenderFsm::<Idle>::new(
        Box::new(serial_port),
        Box::new(std::io::stdout()),
        Box::new(ThreadPacer),
        files,
        Duration::from_millis(delay_ms),
    );

    loop {
        match state.step() {
            Ok(next_state) => {
                state = next_state;
            }
            Err(sender::SenderError::TransferComplete) => {
                return Ok(());
            }
            Err(e) => {
                return Err(e);
            }
        }
    }
}
