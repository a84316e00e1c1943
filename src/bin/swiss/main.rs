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

#![deny(clippy::expect_used)]
#![deny(clippy::indexing_slicing)]
#![deny(clippy::panic)]
#![deny(clippy::unwrap_used)]

mod command_line;

use clap::{CommandFactory, Parser};
use log::info;
use swiss_tournament::{
    id::{IdGenerator, RandomIds},
    standings::compute_standings,
    store::{RonStore, TournamentStore},
    tournament::Tournament,
    utils,
};

use crate::command_line::{Args, Command};

fn main() -> anyhow::Result<()> {
    let args = Args::parse();
    utils::init_logger(args.debug, args.systemd);

    if args.man {
        return Args::generate_man_page();
    }

    let Some(command) = args.command else {
        Args::command().print_help()?;
        return Ok(());
    };

    let mut store = RonStore::new(args.data_dir.unwrap_or_else(utils::data_folder))?;
    info!("data folder: {}", store.dir().display());

    let output = run(command, &mut store, &mut RandomIds::new())?;
    if !output.is_empty() {
        println!("{output}");
    }

    Ok(())
}

/// Applies one command to the store and returns what to print.
fn run(
    command: Command,
    store: &mut dyn TournamentStore,
    ids: &mut dyn IdGenerator,
) -> anyhow::Result<String> {
    match command {
        Command::New {
            name,
            max_rounds,
            date,
        } => {
            let mut tournament = Tournament::new(&name).set_max_rounds(max_rounds);
            if let Some(date) = date {
                tournament = tournament.set_date(date);
            }

            if store.contains(&tournament.slug)? {
                return Err(anyhow::Error::msg(format!(
                    "new: the tournament '{}' already exists",
                    tournament.slug
                )));
            }

            store.save(&tournament)?;
            Ok(tournament.slug)
        }
        Command::List { status } => {
            let mut lines = Vec::new();
            for slug in store.list()? {
                let tournament = store.load(&slug)?;
                if status.is_some_and(|status| status != tournament.status()) {
                    continue;
                }

                lines.push(format!(
                    "{slug} | {} | {} | round {} | {}",
                    tournament.meta.name,
                    tournament.meta.date,
                    tournament.round_counter(),
                    tournament.status()
                ));
            }

            Ok(lines.join("\n"))
        }
        Command::Delete { slug } => {
            store.delete(&slug)?;
            Ok(String::new())
        }
        Command::Show { slug } => Ok(store.load(&slug)?.to_string()),
        Command::Add { slug, name } => {
            let before = store.load(&slug)?.players.len();
            let tournament = update(store, &slug, |tournament| tournament.add_player(&name, ids))?;
            if tournament.players.len() == before {
                return Ok(String::new());
            }

            Ok(tournament
                .players
                .last()
                .map(ToString::to_string)
                .unwrap_or_default())
        }
        Command::BulkAdd { slug, text } => {
            let tournament = update(store, &slug, |tournament| tournament.bulk_add(&text, ids))?;
            Ok(format!("{} players", tournament.players.len()))
        }
        Command::Remove { slug, player } => {
            update(store, &slug, |tournament| tournament.remove_player(&player))?;
            Ok(String::new())
        }
        Command::Drop {
            slug,
            player,
            reason,
        } => {
            let tournament =
                update(store, &slug, |tournament| tournament.toggle_drop(&player, &reason))?;
            Ok(tournament
                .player(&player)
                .map(ToString::to_string)
                .unwrap_or_default())
        }
        Command::Pair { slug } => {
            let tournament = store.load(&slug)?.start_round(ids)?;
            store.save(&tournament)?;

            let mut lines = Vec::new();
            if let Some(round) = tournament.current_round() {
                for pairing in &round.pairings {
                    lines.push(pairing.to_string());
                }
            }

            Ok(lines.join("\n"))
        }
        Command::Result {
            slug,
            match_id,
            outcome,
        } => {
            update(store, &slug, |tournament| {
                tournament.record_result(&match_id, outcome)
            })?;
            Ok(String::new())
        }
        Command::ClearResult { slug, match_id } => {
            update(store, &slug, |tournament| tournament.clear_result(&match_id))?;
            Ok(String::new())
        }
        Command::Standings { slug } => {
            let tournament = store.load(&slug)?;
            Ok(compute_standings(&tournament).to_string())
        }
        Command::Finish { slug } => {
            update(store, &slug, Tournament::finish)?;
            Ok(String::new())
        }
        Command::Reopen { slug } => {
            update(store, &slug, Tournament::reopen)?;
            Ok(String::new())
        }
        Command::Rename { slug, name } => {
            update(store, &slug, |tournament| tournament.rename(&name))?;
            Ok(String::new())
        }
        Command::MaxRounds { slug, rounds } => {
            update(store, &slug, |tournament| tournament.set_max_rounds(rounds))?;
            Ok(String::new())
        }
    }
}

/// Loads, edits and saves one tournament.
fn update(
    store: &mut dyn TournamentStore,
    slug: &str,
    edit: impl FnOnce(Tournament) -> Tournament,
) -> anyhow::Result<Tournament> {
    let tournament = edit(store.load(slug)?);
    store.save(&tournament)?;
    Ok(tournament)
}
