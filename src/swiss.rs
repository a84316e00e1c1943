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

use std::collections::VecDeque;

use log::{debug, warn};
use rustc_hash::{FxHashMap, FxHashSet};

use crate::{
    id::{IdGenerator, MATCH_PREFIX, unique_id},
    pairing::Pairing,
    player::Player,
    standings::compute_standings,
    tournament::Tournament,
};

/// Who has already met whom, and who has already had a bye.
struct History<'a> {
    played: FxHashSet<(&'a str, &'a str)>,
    byes: FxHashSet<&'a str>,
}

impl<'a> History<'a> {
    fn new(tournament: &'a Tournament) -> Self {
        let mut played = FxHashSet::default();
        let mut byes = FxHashSet::default();

        for pairing in tournament.rounds.iter().flat_map(|round| &round.pairings) {
            if let Some((p1, p2)) = pairing.opponents() {
                played.insert(ordered(p1, p2));
            }
            if pairing.is_bye_for(&pairing.p1) {
                byes.insert(pairing.p1.as_str());
            }
        }

        Self { played, byes }
    }

    fn has_played(&self, a: &str, b: &str) -> bool {
        self.played.contains(&ordered(a, b))
    }

    fn has_had_bye(&self, player: &str) -> bool {
        self.byes.contains(player)
    }
}

fn ordered<'a>(a: &'a str, b: &'a str) -> (&'a str, &'a str) {
    if a <= b { (a, b) } else { (b, a) }
}

/// Pairs the next round of `tournament` without changing it.
///
/// Active players are seeded by points, then by name. With an odd count the
/// lowest seeded player who never had a bye sits out first; if everybody has
/// had one, the lowest seeded player gets another. Then the top of the pool
/// meets the highest seeded player they have not played yet, or the next one
/// in line when no such player is left.
///
/// The bye takes the first table, counting on from the highest table of
/// earlier rounds.
#[must_use]
pub fn generate_pairings(tournament: &Tournament, ids: &mut dyn IdGenerator) -> Vec<Pairing> {
    let mut table = tournament.next_table();
    let standings = compute_standings(tournament);
    let points: FxHashMap<&str, u32> = standings
        .iter()
        .map(|row| (row.id.as_str(), row.points))
        .collect();

    let mut seeded: Vec<&Player> = tournament.active_players().collect();
    seeded.sort_by(|a, b| {
        let points_a = points.get(a.id.as_str()).copied().unwrap_or(0);
        let points_b = points.get(b.id.as_str()).copied().unwrap_or(0);
        points_b.cmp(&points_a).then_with(|| a.name.cmp(&b.name))
    });

    let history = History::new(tournament);
    let mut used = tournament.used_ids();
    let mut pairings = Vec::with_capacity(seeded.len().div_ceil(2));

    if seeded.len() % 2 == 1 {
        let index = seeded
            .iter()
            .rposition(|player| !history.has_had_bye(&player.id))
            .unwrap_or_else(|| {
                warn!(
                    "{}: every active player has had a bye, repeating one",
                    tournament.slug
                );
                seeded.len() - 1
            });

        let player = seeded.remove(index);
        debug!("{}: bye for {}", tournament.slug, player.id);
        pairings.push(Pairing::bye(
            unique_id(ids, MATCH_PREFIX, &mut used),
            table,
            player.id.clone(),
        ));
        table += 1;
    }

    let mut pool: VecDeque<&str> = seeded.iter().map(|player| player.id.as_str()).collect();

    while let Some(a) = pool.pop_front() {
        let index = pool
            .iter()
            .position(|b| !history.has_played(a, b))
            .unwrap_or_else(|| {
                debug!("{}: {a} has played everyone left, rematch", tournament.slug);
                0
            });

        let Some(b) = pool.remove(index) else {
            warn!("{}: {a} is left without an opponent", tournament.slug);
            break;
        };

        pairings.push(Pairing::pending(
            unique_id(ids, MATCH_PREFIX, &mut used),
            table,
            a.to_string(),
            b.to_string(),
        ));
        table += 1;
    }

    pairings
}
