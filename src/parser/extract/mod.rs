pub mod abilities;
pub mod charts;
pub mod details;
pub mod faction;
pub mod items;
pub mod picks;
pub mod roster;

use scraper::Html;
use serde::Serialize;
use tracing::warn;

use super::error::{ParseError, Result};
use super::Section;
use crate::tables::*;

/// A table that could not be built, with the reason.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SectionFailure {
    pub section: &'static str,
    pub table: &'static str,
    pub error: String,
}

/// Every table for one match. `None` means the table failed and has an
/// entry in `failures`.
#[derive(Debug, Default, Serialize)]
pub struct MatchTables {
    pub match_id: u64,
    pub details: Option<MatchRow>,
    pub players: Option<Vec<PlayerMatchRow>>,
    pub picks_bans: Option<Vec<PickBanRow>>,
    pub abilities: Option<Vec<AbilityBuildRow>>,
    pub items: Option<Vec<ItemPurchaseRow>>,
    pub team_series: Option<Vec<TeamSeriesRow>>,
    pub hero_series: Option<Vec<HeroSeriesRow>>,
    pub objectives: Option<FactionTable>,
    pub runes: Option<FactionTable>,
    pub vision: Option<FactionTable>,
    pub failures: Vec<SectionFailure>,
}

impl MatchTables {
    pub fn new(match_id: u64) -> Self {
        MatchTables {
            match_id,
            ..Default::default()
        }
    }

    /// Row count per table, `None` for failed tables.
    pub fn row_counts(&self) -> Vec<(&'static str, Option<usize>)> {
        vec![
            ("match", self.details.as_ref().map(|_| 1)),
            ("players", self.players.as_ref().map(Vec::len)),
            ("picks_bans", self.picks_bans.as_ref().map(Vec::len)),
            ("abilities", self.abilities.as_ref().map(Vec::len)),
            ("items", self.items.as_ref().map(Vec::len)),
            ("team_series", self.team_series.as_ref().map(Vec::len)),
            ("hero_series", self.hero_series.as_ref().map(Vec::len)),
            ("objectives", self.objectives.as_ref().map(|t| t.rows.len())),
            ("runes", self.runes.as_ref().map(|t| t.rows.len())),
            ("vision", self.vision.as_ref().map(|t| t.rows.len())),
        ]
    }

    /// Record `error` against every table the section would have produced.
    pub fn fail_section(&mut self, section: Section, error: &ParseError) {
        for &table in section.tables() {
            self.fail(section, table, error);
        }
    }

    fn fail(&mut self, section: Section, table: &'static str, error: &ParseError) {
        warn!(
            match_id = self.match_id,
            section = section.name(),
            table,
            %error,
            "table skipped"
        );
        self.failures.push(SectionFailure {
            section: section.name(),
            table,
            error: error.to_string(),
        });
    }

    fn keep<T>(&mut self, section: Section, table: &'static str, result: Result<T>) -> Option<T> {
        match result {
            Ok(rows) => Some(rows),
            Err(e) => {
                self.fail(section, table, &e);
                None
            }
        }
    }
}

/// Run every parser that reads `section` and store what they produce.
/// A failing table leaves its siblings untouched.
pub fn extract_section(tables: &mut MatchTables, section: Section, doc: &Html) {
    let id = tables.match_id;

    match section {
        Section::Overview => {
            tables.details = tables.keep(section, "match", details::extract(id, doc));
            tables.players = tables.keep(section, "players", roster::extract(id, doc));
            tables.picks_bans = tables.keep(section, "picks_bans", picks::extract(id, doc));
        }
        Section::Builds => {
            tables.abilities = tables.keep(section, "abilities", abilities::extract(id, doc));
            tables.items = tables.keep(section, "items", items::extract(id, doc));
        }
        Section::Farm => match charts::farm(id, doc) {
            Ok((team, heroes)) => {
                tables.team_series = Some(team);
                tables.hero_series = Some(heroes);
            }
            Err(e) => tables.fail_section(section, &e),
        },
        Section::Objectives => {
            let result = faction::extract(id, doc, &faction::OBJECTIVES);
            tables.objectives = tables.keep(section, "objectives", result);
        }
        Section::Runes => {
            let result = faction::extract(id, doc, &faction::RUNES);
            tables.runes = tables.keep(section, "runes", result);
        }
        Section::Vision => {
            let result = faction::extract(id, doc, &faction::VISION);
            tables.vision = tables.keep(section, "vision", result);
        }
    }
}
