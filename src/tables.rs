use chrono::{DateTime, Utc};
use serde::Serialize;

pub const TEAM_SIZE: usize = 5;
pub const ROSTER_SIZE: usize = 2 * TEAM_SIZE;
pub const ITEM_SLOTS: usize = 6;
pub const ABILITY_SLOTS: usize = 25;

/// Filler for item slots left empty at match end.
pub const EMPTY_ITEM: &str = "none";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Side {
    Radiant,
    Dire,
}

impl Side {
    /// Roster tables list radiant first, then dire.
    pub fn from_roster_index(index: usize) -> Side {
        if index < TEAM_SIZE {
            Side::Radiant
        } else {
            Side::Dire
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MatchRow {
    pub match_id: u64,
    pub tournament: String,
    pub mode: String,
    pub region: String,
    pub duration_secs: i64,
    pub start_time: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PlayerMatchRow {
    pub match_id: u64,
    pub side: Side,
    pub team: String,
    pub player_id: u64,
    pub player: String,
    pub hero: String,
    pub level: i64,
    pub kills: i64,
    pub deaths: i64,
    pub assists: i64,
    pub gold: i64,
    pub last_hits: i64,
    pub denies: i64,
    pub xpm: i64,
    pub gpm: i64,
    pub hero_damage: i64,
    pub hero_healing: i64,
    pub tower_damage: i64,
    pub items: [String; ITEM_SLOTS],
}

/// `levels[n]` is the ability taken at level `n + 1`; `None` is a level the
/// player never reached or spent on attributes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AbilityBuildRow {
    pub match_id: u64,
    pub side: Side,
    pub player_id: u64,
    pub hero: String,
    pub levels: [Option<String>; ABILITY_SLOTS],
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ItemPurchaseRow {
    pub match_id: u64,
    pub time_stamp: i64,
    pub hero: String,
    pub item: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum DraftAction {
    Pick,
    Ban,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PickBanRow {
    pub match_id: u64,
    pub sequence: u64,
    pub action: DraftAction,
    pub hero: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TeamSeriesRow {
    pub match_id: u64,
    pub time: i64,
    pub team_xp: i64,
    pub team_gold: i64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct HeroSeriesRow {
    pub match_id: u64,
    pub time: i64,
    pub hero: String,
    pub last_hits: i64,
    pub gold: i64,
}

/// Per-hero counters from the objectives, runes or vision report.
/// `columns` names every entry of each row's `values`, in order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FactionTable {
    pub kind: &'static str,
    pub columns: Vec<&'static str>,
    pub rows: Vec<FactionRow>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FactionRow {
    pub match_id: u64,
    pub hero: String,
    pub values: Vec<i64>,
}

impl FactionTable {
    pub fn value(&self, hero: &str, column: &str) -> Option<i64> {
        let idx = self.columns.iter().position(|c| *c == column)?;
        self.rows
            .iter()
            .find(|r| r.hero == hero)
            .and_then(|r| r.values.get(idx).copied())
    }
}
