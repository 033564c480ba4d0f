// Copyright 2025 Sushanth (https://github.com/sushanthpy)
//
// This program is free software: you can redistribute it and/or modify
// it under the terms of the GNU Affero General Public License as published by
// the Free Software Foundation, either version 3 of the License, or
// (at your option) any later version.
//
// This program is distributed in the hope that it will be useful,
// but WITHOUT ANY WARRANTY; without even the implied warranty of
// MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE. See the
// GNU Affero General Public License for more details.
//
// You should have received a copy of the GNU Affero General Public License
// along with this program. If not, see <https://www.gnu.org/licenses/>.

//! Recency list lifecycle.
//!
//! A list is created lazily on the first recorded view and never destroyed by
//! the engine; it returns to `Empty` only when storage expires it.

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ListState {
    Empty,
    Populated(usize),
}

impl ListState {
    pub fn from_len(len: usize) -> Self {
        if len == 0 {
            ListState::Empty
        } else {
            ListState::Populated(len)
        }
    }

    pub fn len(self) -> usize {
        match self {
            ListState::Empty => 0,
            ListState::Populated(len) => len,
        }
    }

    pub fn is_empty(self) -> bool {
        matches!(self, ListState::Empty)
    }

    /// True when going from `self` to `next` creates the list
    pub fn is_creation(self, next: ListState) -> bool {
        self.is_empty() && !next.is_empty()
    }
}
