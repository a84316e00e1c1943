//! A pairing and standings engine for Swiss-system tournaments.
//!
//! The engine works on a [`Tournament`](tournament::Tournament) snapshot. Every
//! mutation consumes the snapshot and returns the next one, so a caller that
//! wants to keep the previous state clones it first. Nothing in the engine
//! performs I/O: loading and saving snapshots is the job of a
//! [`TournamentStore`](store::TournamentStore) held by the caller.
//!
//! ## Modules
//!
//! * [`standings`] - points, record and OMW% tie-break for every player
//! * [`swiss`] - the next round's pairings, byes and rematch avoidance
//! * [`tournament`] - roster and result edits
//! * [`store`] - persistence used by the `swiss` binary
//!
//! ## Feature Flags
//!
//! * bench - enable the criterion benchmarks

// This file is part of swiss-tournament.
//
// swiss-tournament is free software: you can redistribute it and/or modify
// it under the terms of the GNU Affero General Public License as published by
// the Free Software Foundation, either version 3 of the License, or
// (at your option) any later version.
//
// swiss-tournament is distributed in the hope that it will be useful,
// but WITHOUT ANY WARRANTY; without even the implied warranty of
// MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE.  See the
// GNU Affero General Public License for more details.
//
// You should have received a copy of the GNU Affero General Public License
// along with this program.  If not, see <https://www.gnu.org/licenses/>.

#![deny(clippy::panic)]

pub mod id;
pub mod outcome;
pub mod pairing;
pub mod player;
pub mod standings;
pub mod status;
pub mod store;
pub mod swiss;
pub mod timestamp;
pub mod tournament;
pub mod utils;

pub const HOME: &str = "swiss-tournament";

pub const COPYRIGHT: &str = r".SH COPYRIGHT
Copyright (C) 2026 Developers of the swiss-tournament project

This program is free software: you can redistribute it and/or modify
it under the terms of the GNU Affero General Public License as published by
the Free Software Foundation, either version 3 of the License, or
(at your option) any later version.

This program is distributed in the hope that it will be useful,
but WITHOUT ANY WARRANTY; without even the implied warranty of
MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE.  See the
GNU Affero General Public License for more details.

You should have received a copy of the GNU Affero General Public License
along with this program.  If not, see <https://www.gnu.org/licenses/>.
";

pub const LONG_VERSION: &str = concat!(
    env!("CARGO_PKG_VERSION"),
    "
Copyright (c) 2026 Developers of the swiss-tournament project
Licensed under the AGPLv3"
);
