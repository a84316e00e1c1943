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

use crate::outcome::Outcome;

/// One match of a round. `p2` is `None` exactly when the match is a bye.
#[derive(Clone, Debug, Deserialize, Eq, PartialEq, Serialize)]
pub struct Pairing {
    pub id: String,
    pub table: u32,
    pub p1: String,
    #[serde(default)]
    pub p2: Option<String>,
    #[serde(default)]
    pub result: Option<Outcome>,
}

impl Pairing {
    #[must_use]
    pub fn bye(id: String, table: u32, player: String) -> Self {
        Self {
            id,
            table,
            p1: player,
            p2: None,
            result: Some(Outcome::Bye),
        }
    }

    #[must_use]
    pub fn pending(id: String, table: u32, p1: String, p2: String) -> Self {
        Self {
            id,
            table,
            p1,
            p2: Some(p2),
            result: None,
        }
    }

    #[must_use]
    pub fn is_bye(&self) -> bool {
        self.p2.is_none()
    }

    #[must_use]
    pub fn is_pending(&self) -> bool {
        self.result.is_none()
    }

    #[must_use]
    pub fn involves(&self, player: &str) -> bool {
        self.p1 == player || self.p2.as_deref() == Some(player)
    }

    /// Both sides of a match, `None` for a bye.
    #[must_use]
    pub fn opponents(&self) -> Option<(&str, &str)> {
        self.p2.as_deref().map(|p2| (self.p1.as_str(), p2))
    }

    /// Whether `a` and `b` sit on opposite sides of this match, in either order.
    #[must_use]
    pub fn is_between(&self, a: &str, b: &str) -> bool {
        self.opponents()
            .is_some_and(|(p1, p2)| (p1 == a && p2 == b) || (p1 == b && p2 == a))
    }

    /// Any match that carries the bye result counts as a bye for `p1`, even a
    /// stored one that has a second player.
    #[must_use]
    pub fn is_bye_for(&self, player: &str) -> bool {
        self.p1 == player && self.result == Some(Outcome::Bye)
    }
}

impl fmt::Display for Pairing {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let result = self
            .result
            .map_or_else(|| "pending".to_string(), |result| result.to_string());

        match &self.p2 {
            Some(p2) => write!(f, "{} table {}: {} vs {} {result}", self.id, self.table, self.p1, p2),
            None => write!(f, "{} table {}: {} bye {result}", self.id, self.table, self.p1),
        }
    }
}

/// The matches of one round, in table order.
#[derive(Clone, Debug, Default, Deserialize, Eq, PartialEq, Serialize)]
pub struct Round {
    pub pairings: Vec<Pairing>,
}

impl Round {
    #[must_use]
    pub fn has_pending(&self) -> bool {
        self.pairings.iter().any(Pairing::is_pending)
    }

    #[must_use]
    pub fn max_table(&self) -> Option<u32> {
        self.pairings.iter().map(|pairing| pairing.table).max()
    }

    #[must_use]
    pub fn get(&self, match_id: &str) -> Option<&Pairing> {
        self.pairings.iter().find(|pairing| pairing.id == match_id)
    }
}

impl From<Vec<Pairing>> for Round {
    fn from(pairings: Vec<Pairing>) -> Self {
        Self { pairings }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bye_is_recognised() {
        let bye = Pairing::bye("m_1".to_string(), 1, "p_1".to_string());

        assert!(bye.is_bye());
        assert!(bye.is_bye_for("p_1"));
        assert!(!bye.is_pending());
        assert!(!bye.is_between("p_1", "p_2"));
        assert_eq!(bye.opponents(), None);
    }

    #[test]
    fn a_bye_result_on_a_match_counts_for_p1() {
        let mut pairing =
            Pairing::pending("m_1".to_string(), 1, "p_2".to_string(), "p_1".to_string());
        pairing.result = Some(Outcome::Bye);

        assert!(pairing.is_bye_for("p_2"));
        assert!(!pairing.is_bye_for("p_1"));
        assert_eq!(pairing.opponents(), Some(("p_2", "p_1")));
    }

    #[test]
    fn is_between_ignores_order() {
        let pairing = Pairing::pending("m_1".to_string(), 3, "p_1".to_string(), "p_2".to_string());

        assert!(pairing.is_between("p_1", "p_2"));
        assert!(pairing.is_between("p_2", "p_1"));
        assert!(!pairing.is_between("p_1", "p_3"));
        assert!(pairing.involves("p_2"));
        assert!(pairing.is_pending());
    }

    #[test]
    fn round_tracks_pending_and_tables() {
        let mut round = Round::from(vec![
            Pairing::pending("m_1".to_string(), 4, "p_1".to_string(), "p_2".to_string()),
            Pairing::bye("m_2".to_string(), 5, "p_3".to_string()),
        ]);

        assert!(round.has_pending());
        assert_eq!(round.max_table(), Some(5));

        round.pairings[0].result = Some(Outcome::Draw);
        assert!(!round.has_pending());
        assert_eq!(round.get("m_2").map(|pairing| pairing.table), Some(5));
    }
}
