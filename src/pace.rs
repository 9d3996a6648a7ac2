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

use std::time::Duration;

/// Trait for the inter-line pacing delay
pub trait Pacer: Send {
    fn pause(&mut self, duration: Duration);
}

/// Suspends the calling thread for the duration
pub struct ThreadPacer;

impl Pacer for ThreadPacer {
    fn pause(&mut self, duration: Duration) {
        std::thread::sleep(duration);
    }
}

/// Counts pauses instead of sleeping; on drop it checks the count
#[cfg(test)]
pub struct MockPacer {
    pauses: usize,
    expected_pauses: usize,
}

#[cfg(test)]
impl MockPacer {
    pub fn new(expected_pauses: usize) -> Self {
        MockPacer {
            pauses: 0,
            expected_pauses,
        }
    }
}

#[cfg(test)]
impl Pacer for MockPacer {
    fn pause(&mut self, _duration: Duration) {
        self.pauses += 1;
    }
}

#[cfg(test)]
impl Drop for MockPacer {
    fn drop(&mut self) {
        assert_eq!(
            self.pauses, self.expected_pauses,
            "MockPacer dropped after {} pauses, expected {}",
            self.pauses, self.expected_pauses
        );
    }
}
