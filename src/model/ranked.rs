use std::{fmt, str::FromStr};

use serde::{Deserialize, Serialize};

use super::ids::{Puuid, QueueType};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum Tier {
    Iron,
    Bronze,
    Silver,
    Gold,
    Platinum,
    Emerald,
    Diamond,
    Master,
    Grandmaster,
    Challenger,
    #[default]
    Unranked,
}

impl Tier {
    /// Base points of the tier ladder. Tiers outside the ladder (emerald, unranked) contribute nothing.
    pub fn base_points(self) -> u32 {
        match self {
            Tier::Iron => 100,
            Tier::Bronze => 200,
            Tier::Silver => 300,
            Tier::Gold => 400,
            Tier::Platinum => 500,
            Tier::Diamond => 600,
            Tier::Master => 700,
            Tier::Grandmaster => 800,
            Tier::Challenger => 900,
            Tier::Emerald | Tier::Unranked => 0,
        }
    }

    pub fn is_ranked(self) -> bool {
        self != Tier::Unranked
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Tier::Iron => "IRON",
            Tier::Bronze => "BRONZE",
            Tier::Silver => "SILVER",
            Tier::Gold => "GOLD",
            Tier::Platinum => "PLATINUM",
            Tier::Emerald => "EMERALD",
            Tier::Diamond => "DIAMOND",
            Tier::Master => "MASTER",
            Tier::Grandmaster => "GRANDMASTER",
            Tier::Challenger => "CHALLENGER",
            Tier::Unranked => "UNRANKED",
        }
    }

    /// Parses an upstream tier. Empty and unknown values are treated as unranked.
    pub fn parse(value: &str) -> Self {
        match value.trim().to_ascii_uppercase().as_str() {
            "IRON" => Tier::Iron,
            "BRONZE" => Tier::Bronze,
            "SILVER" => Tier::Silver,
            "GOLD" => Tier::Gold,
            "PLATINUM" => Tier::Platinum,
            "EMERALD" => Tier::Emerald,
            "DIAMOND" => Tier::Diamond,
            "MASTER" => Tier::Master,
            "GRANDMASTER" => Tier::Grandmaster,
            "CHALLENGER" => Tier::Challenger,
            _ => Tier::Unranked,
        }
    }
}

impl fmt::Display for Tier {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl From<String> for Tier {
    fn from(value: String) -> Self {
        Tier::parse(&value)
    }
}

impl From<Tier> for String {
    fn from(tier: Tier) -> Self {
        tier.as_str().to_string()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Division {
    IV,
    III,
    II,
    I,
}

impl Division {
    pub fn base_points(self) -> u32 {
        match self {
            Division::IV => 0,
            Division::III => 25,
            Division::II => 50,
            Division::I => 75,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Division::IV => "IV",
            Division::III => "III",
            Division::II => "II",
            Division::I => "I",
        }
    }

    /// Lenient parse used for upstream and snapshot data: anything unknown means "no division".
    pub fn parse_optional(value: &str) -> Option<Self> {
        value.trim().parse().ok()
    }
}

impl fmt::Display for Division {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownDivision(pub String);

impl fmt::Display for UnknownDivision {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "unknown division: {}", self.0)
    }
}

impl FromStr for Division {
    type Err = UnknownDivision;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "IV" => Ok(Division::IV),
            "III" => Ok(Division::III),
            "II" => Ok(Division::II),
            "I" => Ok(Division::I),
            other => Err(UnknownDivision(other.to_string())),
        }
    }
}

/// One competitive queue placement of an account.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RankedEntry {
    pub puuid: Puuid,
    pub queue_type: QueueType,
    pub tier: Tier,
    pub division: Option<Division>,
    pub league_points: u32,
    pub wins: u32,
    pub losses: u32,
    pub hot_streak: bool,
    pub veteran: bool,
    pub fresh_blood: bool,
}
