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

use rand::{Rng, rngs::ThreadRng};
use rustc_hash::FxHashSet;

pub const PLAYER_PREFIX: &str = "p";
pub const MATCH_PREFIX: &str = "m";

const ALPHABET: &[u8; 36] = b"0123456789abcdefghijklmnopqrstuvwxyz";
const RANDOM_LEN: usize = 7;
const ATTEMPTS: usize = 16;

/// Hands out opaque identifiers for players and matches.
///
/// The tournament checks every identifier against the ones already in use,
/// so a generator only has to make collisions unlikely.
pub trait IdGenerator {
    fn next_id(&mut self, prefix: &str) -> String;
}

/// `prefix_` followed by seven random base 36 characters.
#[derive(Clone, Debug, Default)]
pub struct RandomIds {
    rng: ThreadRng,
}

impl RandomIds {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

impl IdGenerator for RandomIds {
    fn next_id(&mut self, prefix: &str) -> String {
        let suffix: String = (0..RANDOM_LEN)
            .map(|_| char::from(ALPHABET[self.rng.random_range(0..ALPHABET.len())]))
            .collect();

        format!("{prefix}_{suffix}")
    }
}

/// `prefix_1`, `prefix_2`, ... with one counter shared by all prefixes.
#[derive(Clone, Debug, Default)]
pub struct SequentialIds {
    next: u64,
}

impl SequentialIds {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

impl IdGenerator for SequentialIds {
    fn next_id(&mut self, prefix: &str) -> String {
        self.next += 1;
        format!("{prefix}_{}", self.next)
    }
}

/// Draws identifiers until one is not in `used`, then records it there.
///
/// A generator that keeps repeating itself gets a numeric suffix appended.
pub fn unique_id(
    ids: &mut dyn IdGenerator,
    prefix: &str,
    used: &mut FxHashSet<String>,
) -> String {
    let mut id = ids.next_id(prefix);

    for _ in 1..ATTEMPTS {
        if !used.contains(&id) {
            break;
        }
        id = ids.next_id(prefix);
    }

    let mut candidate = id.clone();
    let mut suffix = 1;
    while used.contains(&candidate) {
        suffix += 1;
        candidate = format!("{id}_{suffix}");
    }

    used.insert(candidate.clone());
    candidate
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn random_ids_have_the_prefix_and_length() {
        let mut ids = RandomIds::new();
        let id = ids.next_id(PLAYER_PREFIX);

        assert!(id.starts_with("p_"));
        assert_eq!(id.len(), 2 + RANDOM_LEN);
        assert!(id[2..].bytes().all(|byte| ALPHABET.contains(&byte)));
    }

    #[test]
    fn sequential_ids_count_up() {
        let mut ids = SequentialIds::new();

        assert_eq!(ids.next_id(PLAYER_PREFIX), "p_1");
        assert_eq!(ids.next_id(MATCH_PREFIX), "m_2");
        assert_eq!(ids.next_id(PLAYER_PREFIX), "p_3");
    }

    struct Fixed;

    impl IdGenerator for Fixed {
        fn next_id(&mut self, prefix: &str) -> String {
            format!("{prefix}_x")
        }
    }

    #[test]
    fn unique_id_works_around_a_stuck_generator() {
        let mut used = FxHashSet::default();

        assert_eq!(unique_id(&mut Fixed, MATCH_PREFIX, &mut used), "m_x");
        assert_eq!(unique_id(&mut Fixed, MATCH_PREFIX, &mut used), "m_x_2");
        assert_eq!(unique_id(&mut Fixed, MATCH_PREFIX, &mut used), "m_x_3");
        assert_eq!(used.len(), 3);
    }
}
