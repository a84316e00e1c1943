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

use std::{io::Write as _, path::PathBuf};

use chrono::NaiveDate;
use clap::{CommandFactory, Parser, Subcommand};
use swiss_tournament::{
    COPYRIGHT, LONG_VERSION, outcome::Outcome, status::Status, tournament::DEFAULT_MAX_ROUNDS,
};

/// Swiss Tournament
///
/// Pairs rounds, records results and ranks the players of Swiss-system
/// tournaments kept in the data folder.
#[derive(Parser, Debug)]
#[command(long_version = LONG_VERSION, about = "Swiss Tournament")]
pub(crate) struct Args {
    /// Whether to log on the debug level
    #[arg(long)]
    pub debug: bool,

    /// Whether the application is being run by systemd
    #[arg(long)]
    pub systemd: bool,

    /// Where the tournaments are stored
    #[arg(long, value_name = "path")]
    pub data_dir: Option<PathBuf>,

    /// Build the manpage
    #[arg(long)]
    pub man: bool,

    #[command(subcommand)]
    pub command: Option<Command>,
}

#[derive(Subcommand, Debug)]
pub(crate) enum Command {
    /// Create a tournament
    New {
        name: String,

        /// How many rounds will be paired at most
        #[arg(default_value_t = DEFAULT_MAX_ROUNDS, long)]
        max_rounds: usize,

        /// The day of the tournament, defaults to today
        #[arg(long, value_name = "YYYY-MM-DD")]
        date: Option<NaiveDate>,
    },

    /// List the stored tournaments
    List {
        /// Only list tournaments that are finished, ongoing or
        /// round_in_progress
        #[arg(long)]
        status: Option<Status>,
    },

    /// Delete a tournament
    Delete { slug: String },

    /// Show the players and every round
    Show { slug: String },

    /// Add one player
    Add { slug: String, name: String },

    /// Add players separated by newlines, commas or semicolons
    BulkAdd { slug: String, text: String },

    /// Remove a player from the roster, keeping their past matches
    Remove { slug: String, player: String },

    /// Drop a player, or reinstate a dropped one
    Drop {
        slug: String,
        player: String,

        /// Why the player drops
        #[arg(default_value = "", long)]
        reason: String,
    },

    /// Pair the next round
    Pair { slug: String },

    /// Record the result of a match: p1, p2, draw or bye
    Result {
        slug: String,
        match_id: String,
        outcome: Outcome,
    },

    /// Put a match back to pending
    ClearResult { slug: String, match_id: String },

    /// Rank the players
    Standings { slug: String },

    /// Mark the tournament as finished
    Finish { slug: String },

    /// Allow pairing again after finishing
    Reopen { slug: String },

    /// Change the display name
    Rename { slug: String, name: String },

    /// Change how many rounds will be paired at most
    MaxRounds { slug: String, rounds: usize },
}

impl Args {
    pub(crate) fn generate_man_page() -> anyhow::Result<()> {
        let mut buffer: Vec<u8> = Vec::default();
        let cmd = Self::command().name("swiss").long_version(None);
        let man = clap_mangen::Man::new(cmd).date("2026-10-19");

        man.render(&mut buffer)?;
        write!(buffer, "{COPYRIGHT}")?;

        std::fs::write("swiss.1", buffer)?;
        Ok(())
    }
}
