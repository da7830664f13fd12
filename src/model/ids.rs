use std::fmt::Display;

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Puuid(String);

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct QueueType(String);

impl Puuid {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl QueueType {
    pub const SOLO_DUO: &'static str = "RANKED_SOLO_5x5";
    pub const FLEX: &'static str = "RANKED_FLEX_SR";
    pub const FLEX_TWISTED_TREELINE: &'static str = "RANKED_FLEX_TT";

    pub fn solo_duo() -> Self {
        QueueType(Self::SOLO_DUO.to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn is_solo_duo(&self) -> bool {
        self.0 == Self::SOLO_DUO
    }

    /// Human readable queue name, falling back to the raw upstream identifier.
    pub fn display_name(&self) -> &str {
        match self.0.as_str() {
            Self::SOLO_DUO => "Solo 5v5",
            Self::FLEX => "Flex 5v5",
            Self::FLEX_TWISTED_TREELINE => "Flex 3v3",
            other => other,
        }
    }
}

impl Display for Puuid {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl Display for QueueType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<String> for Puuid {
    fn from(value: String) -> Self {
        Puuid(value)
    }
}

impl From<&str> for Puuid {
    fn from(value: &str) -> Self {
        Puuid(value.to_string())
    }
}

impl From<String> for QueueType {
    fn from(value: String) -> Self {
        QueueType(value)
    }
}

impl From<&str> for QueueType {
    fn from(value: &str) -> Self {
        QueueType(value.to_string())
    }
}
