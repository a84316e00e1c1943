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

use chrono::{Local, NaiveDate};
use log::{info, warn};
use rustc_hash::FxHashSet;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::{
    id::{IdGenerator, PLAYER_PREFIX, unique_id},
    outcome::Outcome,
    pairing::{Pairing, Round},
    player::Player,
    status::Status,
    swiss,
    timestamp::Timestamp,
};

pub const DEFAULT_MAX_ROUNDS: usize = 5;
pub const DEFAULT_SLUG: &str = "tournament";

#[derive(Clone, Debug, Deserialize, Eq, PartialEq, Serialize)]
pub struct Meta {
    pub name: String,
    pub date: NaiveDate,
    pub max_rounds: usize,
}

/// A complete tournament snapshot.
///
/// Every edit consumes the snapshot and hands back the next one. Edits that
/// name an unknown player or match, or an empty player name, return the
/// snapshot unchanged.
#[derive(Clone, Debug, Deserialize, PartialEq, Serialize)]
pub struct Tournament {
    pub slug: String,
    pub meta: Meta,
    #[serde(default)]
    pub players: Vec<Player>,
    #[serde(default)]
    pub rounds: Vec<Round>,
    #[serde(default)]
    pub finished: bool,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

#[derive(Error, Debug, Eq, PartialEq)]
pub enum RoundError {
    #[error("start_round: the tournament is finished")]
    Finished,
    #[error("start_round: all {0} rounds have been played")]
    MaxRounds(usize),
    #[error("start_round: there are no active players")]
    NoActivePlayers,
    #[error("start_round: round {0} still has pending matches")]
    Pending(usize),
}

impl Tournament {
    #[must_use]
    pub fn new(name: &str) -> Self {
        let now = Timestamp::now();

        Self {
            slug: slugify(name),
            meta: Meta {
                name: name.trim().to_string(),
                date: Local::now().date_naive(),
                max_rounds: DEFAULT_MAX_ROUNDS,
            },
            players: Vec::new(),
            rounds: Vec::new(),
            finished: false,
            created_at: now,
            updated_at: now,
        }
    }

    #[must_use]
    pub fn player(&self, id: &str) -> Option<&Player> {
        self.players.iter().find(|player| player.id == id)
    }

    pub fn active_players(&self) -> impl Iterator<Item = &Player> {
        self.players.iter().filter(|player| !player.dropped)
    }

    #[must_use]
    pub fn current_round(&self) -> Option<&Round> {
        self.rounds.last()
    }

    #[must_use]
    pub fn pairing(&self, match_id: &str) -> Option<&Pairing> {
        self.rounds.iter().find_map(|round| round.get(match_id))
    }

    /// Whether `a` and `b` met in any round, pending matches included.
    #[must_use]
    pub fn has_played(&self, a: &str, b: &str) -> bool {
        self.rounds
            .iter()
            .any(|round| round.pairings.iter().any(|pairing| pairing.is_between(a, b)))
    }

    #[must_use]
    pub fn has_had_bye(&self, player: &str) -> bool {
        self.rounds
            .iter()
            .any(|round| round.pairings.iter().any(|pairing| pairing.is_bye_for(player)))
    }

    /// One more than the highest table number used so far, starting at 1.
    #[must_use]
    pub fn next_table(&self) -> u32 {
        self.rounds
            .iter()
            .filter_map(Round::max_table)
            .max()
            .unwrap_or(0)
            + 1
    }

    /// Every player and match identifier in the snapshot, including the ids
    /// of removed players that past matches still refer to.
    #[must_use]
    pub fn used_ids(&self) -> FxHashSet<String> {
        let mut used: FxHashSet<String> =
            self.players.iter().map(|player| player.id.clone()).collect();

        for pairing in self.rounds.iter().flat_map(|round| &round.pairings) {
            used.insert(pairing.id.clone());
            used.insert(pairing.p1.clone());
            if let Some(p2) = &pairing.p2 {
                used.insert(p2.clone());
            }
        }

        used
    }

    #[must_use]
    pub fn status(&self) -> Status {
        if self.finished {
            Status::Finished
        } else if self.current_round().is_some_and(Round::has_pending) {
            Status::RoundInProgress
        } else {
            Status::Ongoing
        }
    }

    #[must_use]
    pub fn round_counter(&self) -> String {
        format!("{} / {}", self.rounds.len(), self.meta.max_rounds)
    }

    fn touch(mut self) -> Self {
        self.updated_at = Timestamp::now();
        self
    }

    #[must_use]
    pub fn add_player(mut self, name: &str, ids: &mut dyn IdGenerator) -> Self {
        let name = name.trim();
        if name.is_empty() {
            return self;
        }

        let id = unique_id(ids, PLAYER_PREFIX, &mut self.used_ids());
        info!("{}: add player {id} {name}", self.slug);
        self.players.push(Player::new(id, name.to_string()));
        self.touch()
    }

    /// Adds every name in `text`, separated by newlines, commas or semicolons.
    ///
    /// Names already on the roster, compared case-insensitively, are skipped,
    /// as are repeats within `text`.
    #[must_use]
    pub fn bulk_add(mut self, text: &str, ids: &mut dyn IdGenerator) -> Self {
        let mut known: FxHashSet<String> = self
            .players
            .iter()
            .map(|player| player.name.to_lowercase())
            .collect();
        let mut used = self.used_ids();
        let mut added = 0;

        for name in text
            .split(['\n', ',', ';'])
            .map(str::trim)
            .filter(|name| !name.is_empty())
        {
            if !known.insert(name.to_lowercase()) {
                continue;
            }

            let id = unique_id(ids, PLAYER_PREFIX, &mut used);
            self.players.push(Player::new(id, name.to_string()));
            added += 1;
        }

        if added == 0 {
            return self;
        }

        info!("{}: bulk add {added} players", self.slug);
        self.touch()
    }

    /// Deletes the player from the roster. Their past matches stay as they are.
    #[must_use]
    pub fn remove_player(mut self, id: &str) -> Self {
        let len = self.players.len();
        self.players.retain(|player| player.id != id);

        if self.players.len() == len {
            warn!("{}: remove_player: unknown player {id}", self.slug);
            return self;
        }

        info!("{}: remove player {id}", self.slug);
        self.touch()
    }

    /// Drops an active player, or reinstates a dropped one.
    ///
    /// `reason` is only kept when dropping.
    #[must_use]
    pub fn toggle_drop(mut self, id: &str, reason: &str) -> Self {
        let round = self.rounds.len();
        let Some(player) = self.players.iter_mut().find(|player| player.id == id) else {
            warn!("{}: toggle_drop: unknown player {id}", self.slug);
            return self;
        };

        if player.dropped {
            player.reinstate();
            info!("{}: reinstate {id}", self.slug);
        } else {
            player.drop_out(round, reason);
            info!("{}: drop {id} after round {round}", self.slug);
        }

        self.touch()
    }

    /// Sets or overwrites the result of a match.
    #[must_use]
    pub fn record_result(self, match_id: &str, outcome: Outcome) -> Self {
        self.set_result(match_id, Some(outcome))
    }

    /// Puts a match back to pending.
    #[must_use]
    pub fn clear_result(self, match_id: &str) -> Self {
        self.set_result(match_id, None)
    }

    fn set_result(mut self, match_id: &str, outcome: Option<Outcome>) -> Self {
        let Some(pairing) = self
            .rounds
            .iter_mut()
            .flat_map(|round| round.pairings.iter_mut())
            .find(|pairing| pairing.id == match_id)
        else {
            warn!("{}: unknown match {match_id}", self.slug);
            return self;
        };

        if outcome == Some(Outcome::Bye) && !pairing.is_bye() {
            warn!("{}: {match_id} has two players and can't be a bye", self.slug);
            return self;
        }

        pairing.result = outcome;
        match outcome {
            Some(outcome) => info!("{}: {match_id} {outcome}", self.slug),
            None => info!("{}: {match_id} pending", self.slug),
        }

        self.touch()
    }

    /// Appends an already generated round.
    #[must_use]
    pub fn push_round(mut self, pairings: Vec<Pairing>) -> Self {
        self.rounds.push(Round::from(pairings));
        info!("{}: start round {}", self.slug, self.rounds.len());
        self.touch()
    }

    /// Checks what a caller should check before pairing another round.
    ///
    /// # Errors
    ///
    /// If the tournament is finished, every configured round has been played,
    /// the current round still has pending matches, or nobody is active.
    pub fn can_start_round(&self) -> Result<(), RoundError> {
        if self.finished {
            return Err(RoundError::Finished);
        }
        if self.rounds.len() >= self.meta.max_rounds {
            return Err(RoundError::MaxRounds(self.meta.max_rounds));
        }
        if self.current_round().is_some_and(Round::has_pending) {
            return Err(RoundError::Pending(self.rounds.len()));
        }
        if self.active_players().next().is_none() {
            return Err(RoundError::NoActivePlayers);
        }

        Ok(())
    }

    /// Pairs the next round and returns the snapshot with that round appended.
    ///
    /// # Errors
    ///
    /// See [`Tournament::can_start_round`].
    pub fn start_round(&self, ids: &mut dyn IdGenerator) -> Result<Self, RoundError> {
        self.can_start_round()?;
        let pairings = swiss::generate_pairings(self, ids);

        Ok(self.clone().push_round(pairings))
    }

    #[must_use]
    pub fn finish(mut self) -> Self {
        self.finished = true;
        info!("{}: finished", self.slug);
        self.touch()
    }

    #[must_use]
    pub fn reopen(mut self) -> Self {
        self.finished = false;
        info!("{}: reopened", self.slug);
        self.touch()
    }

    /// Changes the display name. The slug stays, it is the storage identity.
    #[must_use]
    pub fn rename(mut self, name: &str) -> Self {
        let name = name.trim();
        if name.is_empty() {
            return self;
        }

        self.meta.name = name.to_string();
        self.touch()
    }

    #[must_use]
    pub fn set_max_rounds(mut self, max_rounds: usize) -> Self {
        self.meta.max_rounds = max_rounds;
        self.touch()
    }

    #[must_use]
    pub fn set_date(mut self, date: NaiveDate) -> Self {
        self.meta.date = date;
        self.touch()
    }
}

impl fmt::Display for Tournament {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{} ({})", self.meta.name, self.slug)?;
        writeln!(
            f,
            "{} | round {} | {}",
            self.meta.date,
            self.round_counter(),
            self.status()
        )?;

        writeln!(f, "\nplayers ({}):", self.players.len())?;
        for player in &self.players {
            writeln!(f, "  {player}")?;
        }

        for (i, round) in self.rounds.iter().enumerate() {
            writeln!(f, "\nround {}:", i + 1)?;
            for pairing in &round.pairings {
                writeln!(f, "  {pairing}")?;
            }
        }

        Ok(())
    }
}

/// Turns a tournament name into a lowercase, URL-safe storage key.
#[must_use]
pub fn slugify(name: &str) -> String {
    let mut slug = String::with_capacity(name.len());
    let mut dash = false;

    for character in name.chars() {
        if character.is_ascii_alphanumeric() {
            if dash && !slug.is_empty() {
                slug.push('-');
            }
            slug.push(character.to_ascii_lowercase());
            dash = false;
        } else {
            dash = true;
        }
    }

    if slug.is_empty() {
        DEFAULT_SLUG.to_string()
    } else {
        slug
    }
}
