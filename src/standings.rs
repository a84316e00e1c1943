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

use std::{cmp::Ordering, collections::BTreeSet, fmt};

use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};

use crate::{
    outcome::{BYE_POINTS, DRAW_POINTS, LOSS_POINTS, Outcome, WIN_POINTS},
    tournament::Tournament,
};

/// One line of the ranking.
#[derive(Clone, Debug, Default, Deserialize, PartialEq, Serialize)]
pub struct StandingRow {
    pub rank: usize,
    pub id: String,
    pub name: String,
    pub points: u32,
    pub wins: u32,
    pub draws: u32,
    pub losses: u32,
    /// Opponents' match-win percentage, from 0.0 to 1.0.
    pub omw: f64,
    pub byes: u32,
    pub dropped: bool,
}

impl StandingRow {
    #[must_use]
    pub fn games_count(&self) -> u32 {
        self.wins + self.draws + self.losses
    }

    /// `(wins + draws / 2) / games`, or 0.0 before the first completed match.
    #[must_use]
    pub fn match_win_rate(&self) -> f64 {
        let games = self.games_count();
        if games == 0 {
            return 0.0;
        }

        (f64::from(self.wins) + 0.5 * f64::from(self.draws)) / f64::from(games)
    }

    fn ranking(&self, other: &Self) -> Ordering {
        other
            .points
            .cmp(&self.points)
            .then_with(|| other.omw.total_cmp(&self.omw))
            .then_with(|| other.wins.cmp(&self.wins))
            .then_with(|| self.name.cmp(&other.name))
    }
}

#[derive(Clone, Debug, Default, Deserialize, PartialEq, Serialize)]
pub struct Standings(pub Vec<StandingRow>);

impl Standings {
    #[must_use]
    pub fn get(&self, id: &str) -> Option<&StandingRow> {
        self.0.iter().find(|row| row.id == id)
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = &StandingRow> {
        self.0.iter()
    }
}

impl fmt::Display for Standings {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(
            f,
            "{:>4}  {:<24} {:>4} {:>3} {:>3} {:>3} {:>7} {:>4}",
            "#", "Player", "Pts", "W", "D", "L", "OMW%", "Byes"
        )?;
        writeln!(f, "{}", "-".repeat(60))?;

        for row in &self.0 {
            let name = if row.dropped {
                format!("{} (drop)", row.name)
            } else {
                row.name.clone()
            };

            writeln!(
                f,
                "{:>4}  {:<24} {:>4} {:>3} {:>3} {:>3} {:>7.2} {:>4}",
                row.rank,
                name,
                row.points,
                row.wins,
                row.draws,
                row.losses,
                row.omw * 100.0,
                row.byes
            )?;
        }

        Ok(())
    }
}

#[derive(Default)]
struct Tally<'a> {
    row: StandingRow,
    opponents: BTreeSet<&'a str>,
}

/// Ranks every player on the roster, dropped players included.
///
/// Ordered by points, then OMW%, then wins, all descending, then by name.
/// Players with equal keys keep their roster order.
///
/// Matches against players no longer on the roster still count for the
/// remaining player, but the removed player is nobody's opponent for OMW%.
#[allow(clippy::cast_precision_loss)]
#[must_use]
pub fn compute_standings(tournament: &Tournament) -> Standings {
    let mut tallies: Vec<Tally> = tournament
        .players
        .iter()
        .map(|player| Tally {
            row: StandingRow {
                id: player.id.clone(),
                name: player.name.clone(),
                dropped: player.dropped,
                ..StandingRow::default()
            },
            opponents: BTreeSet::new(),
        })
        .collect();

    let mut index: FxHashMap<&str, usize> = FxHashMap::default();
    for (i, player) in tournament.players.iter().enumerate() {
        index.entry(player.id.as_str()).or_insert(i);
    }

    for pairing in tournament.rounds.iter().flat_map(|round| &round.pairings) {
        let a = index.get(pairing.p1.as_str()).copied();

        let Some(p2) = pairing.p2.as_deref() else {
            if pairing.result == Some(Outcome::Bye)
                && let Some(a) = a
            {
                let row = &mut tallies[a].row;
                row.points += BYE_POINTS;
                row.wins += 1;
                row.byes += 1;
            }
            continue;
        };
        let b = index.get(p2).copied();

        if let (Some(a), Some(b)) = (a, b) {
            tallies[a].opponents.insert(p2);
            tallies[b].opponents.insert(pairing.p1.as_str());
        }

        let (winner, loser) = match pairing.result {
            Some(Outcome::P1Win) => (a, b),
            Some(Outcome::P2Win) => (b, a),
            Some(Outcome::Draw) => {
                for i in [a, b].into_iter().flatten() {
                    tallies[i].row.points += DRAW_POINTS;
                    tallies[i].row.draws += 1;
                }
                continue;
            }
            Some(Outcome::Bye) | None => continue,
        };

        if let Some(winner) = winner {
            tallies[winner].row.points += WIN_POINTS;
            tallies[winner].row.wins += 1;
        }
        if let Some(loser) = loser {
            tallies[loser].row.points += LOSS_POINTS;
            tallies[loser].row.losses += 1;
        }
    }

    let match_win_rates: FxHashMap<&str, f64> = tallies
        .iter()
        .map(|tally| (tally.row.id.as_str(), tally.row.match_win_rate()))
        .collect();

    let omws: Vec<f64> = tallies
        .iter()
        .map(|tally| {
            if tally.opponents.is_empty() {
                return 0.0;
            }

            let sum: f64 = tally
                .opponents
                .iter()
                .map(|opponent| match_win_rates.get(opponent).copied().unwrap_or(0.0))
                .sum();

            sum / tally.opponents.len() as f64
        })
        .collect();

    let mut rows: Vec<StandingRow> = tallies
        .into_iter()
        .zip(omws)
        .map(|(tally, omw)| StandingRow { omw, ..tally.row })
        .collect();

    rows.sort_by(StandingRow::ranking);
    for (i, row) in rows.iter_mut().enumerate() {
        row.rank = i + 1;
    }

    Standings(rows)
}

#[cfg(test)]
mod tests {
    use crate::{id::SequentialIds, pairing::Pairing};

    use super::*;

    fn roster(names: &str) -> Tournament {
        Tournament::new("t").bulk_add(names, &mut SequentialIds::new())
    }

    fn pairing(id: &str, p1: &str, p2: &str, result: Option<Outcome>) -> Pairing {
        Pairing {
            result,
            ..Pairing::pending(id.to_string(), 1, p1.to_string(), p2.to_string())
        }
    }

    fn order(standings: &Standings) -> Vec<&str> {
        standings.iter().map(|row| row.name.as_str()).collect()
    }

    #[test]
    fn no_players_no_rows() {
        assert!(compute_standings(&Tournament::new("t")).is_empty());
    }

    #[test]
    fn no_rounds_ranks_by_name() {
        let standings = compute_standings(&roster("Cy, Ada, bob, Dee"));

        assert_eq!(order(&standings), ["Ada", "Cy", "Dee", "bob"]);
        assert!(
            standings
                .iter()
                .all(|row| row.points == 0 && row.omw.abs() < f64::EPSILON)
        );
        assert_eq!(
            standings.iter().map(|row| row.rank).collect::<Vec<_>>(),
            [1, 2, 3, 4]
        );
    }

    #[test]
    fn win_and_loss() {
        let tournament = roster("Ada, Bob").push_round(vec![pairing(
            "m_1",
            "p_1",
            "p_2",
            Some(Outcome::P1Win),
        )]);
        let standings = compute_standings(&tournament);

        let ada = standings.get("p_1").cloned().unwrap_or_default();
        let bob = standings.get("p_2").cloned().unwrap_or_default();
        assert_eq!((ada.points, ada.wins, ada.losses, ada.rank), (3, 1, 0, 1));
        assert_eq!((bob.points, bob.wins, bob.losses, bob.rank), (0, 0, 1, 2));
        assert!((bob.omw - 1.0).abs() < f64::EPSILON);
        assert!(ada.omw.abs() < f64::EPSILON);
    }

    #[test]
    fn draw_gives_both_a_point() {
        let tournament = roster("Ada, Bob").push_round(vec![pairing(
            "m_1",
            "p_1",
            "p_2",
            Some(Outcome::Draw),
        )]);
        let standings = compute_standings(&tournament);

        for row in standings.iter() {
            assert_eq!((row.points, row.draws), (1, 1));
            assert!((row.match_win_rate() - 0.5).abs() < f64::EPSILON);
            assert!((row.omw - 0.5).abs() < f64::EPSILON);
        }
    }

    #[test]
    fn bye_counts_as_a_win_without_an_opponent() {
        let tournament = roster("Ada, Bob, Cy").push_round(vec![
            Pairing::bye("m_1".to_string(), 1, "p_3".to_string()),
            pairing("m_2", "p_1", "p_2", Some(Outcome::P2Win)),
        ]);
        let standings = compute_standings(&tournament);

        let cy = standings.get("p_3").cloned().unwrap_or_default();
        assert_eq!((cy.points, cy.wins, cy.byes), (3, 1, 1));
        assert!(cy.omw.abs() < f64::EPSILON);
        // Bob and Cy tie on points, wins and OMW% (both 0.0): the name decides.
        assert_eq!(order(&standings), ["Bob", "Cy", "Ada"]);
    }

    #[test]
    fn pending_match_counts_the_opponent_only() {
        let tournament =
            roster("Ada, Bob").push_round(vec![pairing("m_1", "p_1", "p_2", None)]);
        let standings = compute_standings(&tournament);

        assert!(standings.iter().all(|row| row.points == 0 && row.games_count() == 0));
        assert!(standings.iter().all(|row| row.omw.abs() < f64::EPSILON));
    }

    #[test]
    fn equal_omw_falls_back_to_the_name() {
        // Ada beats Bob and Cy; Bob beats Dee; Cy beats Dee. Bob and Cy both
        // faced Ada (1.0) and Dee (0.0).
        let tournament = roster("Ada, Bob, Cy, Dee")
            .push_round(vec![
                pairing("m_1", "p_1", "p_2", Some(Outcome::P1Win)),
                pairing("m_2", "p_3", "p_4", Some(Outcome::P1Win)),
            ])
            .push_round(vec![
                pairing("m_3", "p_1", "p_3", Some(Outcome::P1Win)),
                pairing("m_4", "p_2", "p_4", Some(Outcome::P1Win)),
            ]);
        let standings = compute_standings(&tournament);

        assert_eq!(order(&standings), ["Ada", "Bob", "Cy", "Dee"]);
        let bob = standings.get("p_2").cloned().unwrap_or_default();
        assert!((bob.omw - 0.5).abs() < f64::EPSILON);
    }

    #[test]
    fn omw_breaks_ties_on_points() {
        // Ada beats Bob and Zed; Zed beats Cy; Cy beats Bob. Zed and Cy have
        // 3 points each, Zed faced Cy (0.5) and Ada (1.0), Cy faced Zed (0.5)
        // and Bob (0.0).
        let tournament = roster("Ada, Bob, Zed, Cy")
            .push_round(vec![
                pairing("m_1", "p_1", "p_2", Some(Outcome::P1Win)),
                pairing("m_2", "p_3", "p_4", Some(Outcome::P1Win)),
            ])
            .push_round(vec![
                pairing("m_3", "p_1", "p_3", Some(Outcome::P1Win)),
                pairing("m_4", "p_4", "p_2", Some(Outcome::P1Win)),
            ]);
        let standings = compute_standings(&tournament);

        assert_eq!(order(&standings), ["Ada", "Zed", "Cy", "Bob"]);
        let zed = standings.get("p_3").cloned().unwrap_or_default();
        let cy = standings.get("p_4").cloned().unwrap_or_default();
        assert!((zed.omw - 0.75).abs() < f64::EPSILON);
        assert!((cy.omw - 0.25).abs() < f64::EPSILON);
    }

    #[test]
    fn wins_break_ties_on_points_and_omw() {
        // Ada and Bob reach 3 points with a win, Abe and Al with three draws
        // against each other. Every one of them has an OMW% of 0.5.
        let tournament = roster("Ada, Bob, Abe, Al, Eve")
            .push_round(vec![
                pairing("m_1", "p_1", "p_2", Some(Outcome::P1Win)),
                pairing("m_2", "p_3", "p_4", Some(Outcome::Draw)),
            ])
            .push_round(vec![
                pairing("m_3", "p_2", "p_5", Some(Outcome::P1Win)),
                pairing("m_4", "p_3", "p_4", Some(Outcome::Draw)),
            ])
            .push_round(vec![pairing("m_5", "p_3", "p_4", Some(Outcome::Draw))]);
        let standings = compute_standings(&tournament);

        assert_eq!(order(&standings), ["Ada", "Bob", "Abe", "Al", "Eve"]);
        assert!(
            standings
                .iter()
                .take(4)
                .all(|row| row.points == 3 && (row.omw - 0.5).abs() < f64::EPSILON)
        );
    }

    #[test]
    fn ranking_is_stable_across_calls() {
        let tournament = roster("Ada, Bob, Cy").push_round(vec![
            Pairing::bye("m_1".to_string(), 1, "p_3".to_string()),
            pairing("m_2", "p_1", "p_2", Some(Outcome::Draw)),
        ]);

        assert_eq!(compute_standings(&tournament), compute_standings(&tournament));
    }

    #[test]
    fn removed_opponent_keeps_the_result() {
        let tournament = roster("Ada, Bob")
            .push_round(vec![pairing("m_1", "p_1", "p_2", Some(Outcome::P1Win))])
            .remove_player("p_2");
        let standings = compute_standings(&tournament);

        assert_eq!(standings.len(), 1);
        let ada = standings.get("p_1").cloned().unwrap_or_default();
        assert_eq!((ada.points, ada.wins), (3, 1));
        assert!(ada.omw.abs() < f64::EPSILON);
    }

    #[test]
    fn dropped_players_stay_ranked() {
        let tournament = roster("Ada, Bob")
            .push_round(vec![pairing("m_1", "p_1", "p_2", Some(Outcome::P2Win))])
            .toggle_drop("p_2", "");
        let standings = compute_standings(&tournament);

        let bob = standings.get("p_2").cloned().unwrap_or_default();
        assert!(bob.dropped);
        assert_eq!((bob.rank, bob.points), (1, 3));
        assert!(standings.to_string().contains("Bob (drop)"));
    }
}
