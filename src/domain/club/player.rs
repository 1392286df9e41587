use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::value_objects::PlayerRef;

/// Player record as held by the player registry
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Player {
    pub id: Uuid,
    pub name: String,
    pub current_club_id: Uuid,
    pub active: bool,
    pub source_name: String,
}

pub fn to_player_ref(player: &Player) -> PlayerRef {
    PlayerRef {
        id: player.id,
        name: player.name.clone(),
        current_club_id: player.current_club_id,
        active: player.active,
        source_name: player.source_name.clone(),
    }
}
