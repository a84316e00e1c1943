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

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::timestamp::Timestamp;

/// A competitor on the roster.
///
/// The drop fields default when missing so older snapshots still load.
#[derive(Clone, Debug, Deserialize, Eq, PartialEq, Serialize)]
pub struct Player {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub dropped: bool,
    #[serde(default)]
    pub dropped_at: Option<Timestamp>,
    #[serde(default)]
    pub drop_round: Option<usize>,
    #[serde(default)]
    pub drop_reason: String,
}

impl Player {
    #[must_use]
    pub fn new(id: String, name: String) -> Self {
        Self {
            id,
            name,
            dropped: false,
            dropped_at: None,
            drop_round: None,
            drop_reason: String::new(),
        }
    }

    /// Marks the player inactive for future pairing.
    pub(crate) fn drop_out(&mut self, round: usize, reason: &str) {
        self.dropped = true;
        self.dropped_at = Some(Timestamp::now());
        self.drop_round = Some(round);
        self.drop_reason = reason.to_string();
    }

    pub(crate) fn reinstate(&mut self) {
        self.dropped = false;
        self.dropped_at = None;
        self.drop_round = None;
        self.drop_reason.clear();
    }
}

impl fmt::Display for Player {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.dropped {
            write!(f, "{} {} (drop", self.id, self.name)?;
            if let Some(round) = self.drop_round {
                write!(f, " after round {round}")?;
            }
            if !self.drop_reason.is_empty() {
                write!(f, ": {}", self.drop_reason)?;
            }
            write!(f, ")")
        } else {
            write!(f, "{} {}", self.id, self.name)
        }
    }
}
