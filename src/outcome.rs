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

use std::{fmt, str::FromStr};

use serde::{Deserialize, Serialize};

pub const WIN_POINTS: u32 = 3;
pub const DRAW_POINTS: u32 = 1;
pub const LOSS_POINTS: u32 = 0;
pub const BYE_POINTS: u32 = 3;

/// The recorded result of a match. A pending match has no outcome.
#[derive(Clone, Copy, Debug, Deserialize, Eq, Hash, PartialEq, Serialize)]
pub enum Outcome {
    #[serde(rename = "P1_WIN")]
    P1Win,
    #[serde(rename = "P2_WIN")]
    P2Win,
    #[serde(rename = "DRAW")]
    Draw,
    #[serde(rename = "BYE")]
    Bye,
}

impl fmt::Display for Outcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::P1Win => write!(f, "P1_WIN"),
            Self::P2Win => write!(f, "P2_WIN"),
            Self::Draw => write!(f, "DRAW"),
            Self::Bye => write!(f, "BYE"),
        }
    }
}

impl FromStr for Outcome {
    type Err = anyhow::Error;

    fn from_str(value: &str) -> anyhow::Result<Self> {
        match value.to_uppercase().as_str() {
            "P1" | "P1_WIN" | "1-0" => Ok(Self::P1Win),
            "P2" | "P2_WIN" | "0-1" => Ok(Self::P2Win),
            "DRAW" | "D" | "1/2" => Ok(Self::Draw),
            "BYE" => Ok(Self::Bye),
            _ => Err(anyhow::Error::msg(format!("invalid outcome: {value}"))),
        }
    }
}
