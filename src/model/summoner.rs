use serde::{Deserialize, Serialize};

use super::ids::Puuid;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AccountIdentity {
    pub puuid: Puuid,
    pub game_name: String,
    pub tag_line: String,
}

impl AccountIdentity {
    pub fn riot_id(&self) -> String {
        format!("{}#{}", self.game_name, self.tag_line)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProfileRecord {
    pub puuid: Puuid,
    pub level: u32,
    pub icon_id: u32,
}
