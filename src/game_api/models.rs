//! Wire types for the game API
//!
//! Every field is optional on the wire. Display defaults are applied in one
//! place, [`PlayerProfile::from`], rather than at each formatting site.

use serde::de::{self, Deserializer};
use serde::Deserialize;

/// Player snapshot as served by `GET /player/{id}`
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct PlayerSnapshot {
    pub first_name: Option<String>,
    pub level: Option<i64>,
    pub experience: Option<i64>,
    pub gold: Option<i64>,
    pub gems: Option<i64>,
    pub fame: Option<i64>,
    pub energy: Option<i64>,
    pub max_energy: Option<i64>,
    pub last_login: Option<String>,
    #[serde(deserialize_with = "game_data_from_object_or_string")]
    pub game_data: GameData,
}

/// Nested game state. Only the gladiator roster is read by the bot.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct GameData {
    pub gladiators: Vec<serde_json::Value>,
}

/// `game_data` arrives either as an object or as the same object JSON-encoded
/// into a string, depending on how the API serialized the column.
#[derive(Deserialize)]
#[serde(untagged)]
enum RawGameData {
    Structured(GameData),
    Encoded(String),
}

fn game_data_from_object_or_string<'de, D>(deserializer: D) -> Result<GameData, D::Error>
where
    D: Deserializer<'de>,
{
    match Option::<RawGameData>::deserialize(deserializer)? {
        None => Ok(GameData::default()),
        Some(RawGameData::Structured(data)) => Ok(data),
        Some(RawGameData::Encoded(text)) if text.trim().is_empty() => Ok(GameData::default()),
        Some(RawGameData::Encoded(text)) => serde_json::from_str::<Option<GameData>>(&text)
            .map(Option::unwrap_or_default)
            .map_err(|e| de::Error::custom(format!("game_data is not valid JSON: {}", e))),
    }
}

/// Body of `GET /leaderboard`
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct LeaderboardResponse {
    pub leaderboard: Vec<LeaderboardEntry>,
}

/// One leaderboard row. Extra columns (rank, gold, level, ...) are ignored.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct LeaderboardEntry {
    pub first_name: Option<String>,
    pub username: Option<String>,
    pub fame: Option<i64>,
}

impl LeaderboardEntry {
    /// Name shown in the ranking: first name, then username, then a generic label
    pub fn display_name(&self) -> &str {
        non_blank(self.first_name.as_deref())
            .or_else(|| non_blank(self.username.as_deref()))
            .unwrap_or("Игрок")
    }

    pub fn fame(&self) -> i64 {
        self.fame.unwrap_or(0)
    }
}

/// Player snapshot with display defaults applied
#[derive(Debug, Clone, PartialEq)]
pub struct PlayerProfile {
    pub first_name: String,
    pub level: i64,
    pub experience: i64,
    pub gold: i64,
    pub gems: i64,
    pub fame: i64,
    pub energy: i64,
    pub max_energy: i64,
    pub last_login: Option<String>,
    pub gladiator_count: usize,
}

impl PlayerProfile {
    /// Experience needed for the next level
    pub fn experience_goal(&self) -> i64 {
        self.level.saturating_mul(500)
    }
}

impl From<PlayerSnapshot> for PlayerProfile {
    fn from(snapshot: PlayerSnapshot) -> Self {
        Self {
            first_name: non_blank(snapshot.first_name.as_deref())
                .unwrap_or("Гладиатор")
                .to_string(),
            level: snapshot.level.unwrap_or(1),
            experience: snapshot.experience.unwrap_or(0),
            gold: snapshot.gold.unwrap_or(0),
            gems: snapshot.gems.unwrap_or(0),
            fame: snapshot.fame.unwrap_or(0),
            energy: snapshot.energy.unwrap_or(0),
            max_energy: snapshot.max_energy.unwrap_or(100),
            last_login: snapshot.last_login.filter(|s| !s.trim().is_empty()),
            gladiator_count: snapshot.game_data.gladiators.len(),
        }
    }
}

fn non_blank(value: Option<&str>) -> Option<&str> {
    value.filter(|s| !s.trim().is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    #[test]
    fn test_game_data_string_and_object_decode_the_same() {
        let structured: PlayerSnapshot = serde_json::from_value(json!({
            "game_data": { "gladiators": [{ "id": 1 }, { "id": 2 }, { "id": 3 }] }
        }))
        .unwrap();
        let encoded: PlayerSnapshot = serde_json::from_value(json!({
            "game_data": "{\"gladiators\": [{\"id\": 1}, {\"id\": 2}, {\"id\": 3}]}"
        }))
        .unwrap();

        assert_eq!(structured.game_data, encoded.game_data);
        assert_eq!(structured.game_data.gladiators.len(), 3);
    }

    #[test]
    fn test_missing_or_null_game_data_means_no_gladiators() {
        let missing: PlayerSnapshot = serde_json::from_value(json!({})).unwrap();
        let null: PlayerSnapshot = serde_json::from_value(json!({ "game_data": null })).unwrap();
        let empty_object: PlayerSnapshot = serde_json::from_value(json!({ "game_data": {} })).unwrap();
        let encoded_null: PlayerSnapshot = serde_json::from_value(json!({ "game_data": "null" })).unwrap();

        for snapshot in [missing, null, empty_object, encoded_null] {
            assert!(snapshot.game_data.gladiators.is_empty());
        }
    }

    #[test]
    fn test_malformed_encoded_game_data_is_an_error() {
        let result = serde_json::from_value::<PlayerSnapshot>(json!({ "game_data": "{not json" }));
        assert!(result.is_err());
    }

    #[test]
    fn test_profile_defaults() {
        let profile = PlayerProfile::from(PlayerSnapshot::default());

        assert_eq!(profile.first_name, "Гладиатор");
        assert_eq!(profile.level, 1);
        assert_eq!(profile.experience, 0);
        assert_eq!(profile.max_energy, 100);
        assert_eq!(profile.experience_goal(), 500);
        assert_eq!(profile.last_login, None);
        assert_eq!(profile.gladiator_count, 0);
    }

    #[test]
    fn test_profile_nulls_take_defaults() {
        let snapshot: PlayerSnapshot = serde_json::from_value(json!({
            "first_name": null,
            "level": null,
            "max_energy": null,
            "gold": 250
        }))
        .unwrap();
        let profile = PlayerProfile::from(snapshot);

        assert_eq!(profile.first_name, "Гладиатор");
        assert_eq!(profile.level, 1);
        assert_eq!(profile.max_energy, 100);
        assert_eq!(profile.gold, 250);
    }

    #[test]
    fn test_leaderboard_entry_name_fallbacks() {
        let entry: LeaderboardEntry =
            serde_json::from_value(json!({ "username": "maximus", "fame": 10, "rank": 1 })).unwrap();
        assert_eq!(entry.display_name(), "maximus");
        assert_eq!(entry.fame(), 10);

        let entry: LeaderboardEntry = serde_json::from_value(json!({ "first_name": "", "username": null })).unwrap();
        assert_eq!(entry.display_name(), "Игрок");
        assert_eq!(entry.fame(), 0);
    }
}
