use std::ops::Range;
use std::sync::LazyLock;

use scraper::{ElementRef, Html, Selector};

use crate::parser::error::{ParseError, Result};
use crate::parser::{ident, normalize};
use crate::tables::{PlayerMatchRow, Side, EMPTY_ITEM, ITEM_SLOTS, ROSTER_SIZE, TEAM_SIZE};

static RADIANT_SEL: LazyLock<Selector> =
    LazyLock::new(|| Selector::parse("section.radiant").unwrap());
static DIRE_SEL: LazyLock<Selector> = LazyLock::new(|| Selector::parse("section.dire").unwrap());
static TITLE_SEL: LazyLock<Selector> = LazyLock::new(|| Selector::parse("header").unwrap());
static ROW_SEL: LazyLock<Selector> = LazyLock::new(|| Selector::parse("table tr").unwrap());
static CELL_SEL: LazyLock<Selector> = LazyLock::new(|| Selector::parse("td").unwrap());

// Fixed cell layout of one scoreboard row.
const CELLS_PER_ROW: usize = 16;
const HERO_CELL: usize = 0;
const PLAYER_CELL: usize = 1;
const STAT_CELLS: Range<usize> = 3..15;
const ITEM_CELL: usize = 15;

/// One scoreboard row before side and match id are attached.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SectionRow {
    pub team: String,
    pub hero: String,
    pub player: String,
    pub player_id: u64,
    /// level, kills, deaths, assists, gold, last hits, denies, xpm, gpm,
    /// hero damage, hero healing, tower damage
    pub stats: [i64; 12],
    pub items: [String; ITEM_SLOTS],
}

/// Full ten-player scoreboard: radiant section, then dire.
pub fn extract(match_id: u64, doc: &Html) -> Result<Vec<PlayerMatchRow>> {
    let mut rows = Vec::with_capacity(ROSTER_SIZE);
    for (side, sel) in [(Side::Radiant, &*RADIANT_SEL), (Side::Dire, &*DIRE_SEL)] {
        let section = doc
            .select(sel)
            .next()
            .ok_or(ParseError::ElementNotFound {
                context: match side {
                    Side::Radiant => "radiant scoreboard (section.radiant)",
                    Side::Dire => "dire scoreboard (section.dire)",
                },
            })?;
        rows.extend(parse_section(section)?);
    }

    if rows.len() != ROSTER_SIZE {
        return Err(ParseError::RowCount {
            table: "players",
            expected: ROSTER_SIZE,
            found: rows.len(),
        });
    }

    Ok(rows
        .into_iter()
        .enumerate()
        .map(|(i, row)| into_player_row(match_id, Side::from_roster_index(i), row))
        .collect())
}

/// One team's scoreboard: the five data rows after the header row.
pub fn parse_section(section: ElementRef) -> Result<Vec<SectionRow>> {
    let team = section
        .select(&TITLE_SEL)
        .next()
        .map(ident::text_of)
        .ok_or(ParseError::ElementNotFound {
            context: "scoreboard team title (header)",
        })?;

    let trs: Vec<ElementRef> = section.select(&ROW_SEL).skip(1).take(TEAM_SIZE).collect();
    if trs.len() != TEAM_SIZE {
        return Err(ParseError::RowCount {
            table: "scoreboard",
            expected: TEAM_SIZE,
            found: trs.len(),
        });
    }

    trs.into_iter()
        .enumerate()
        .map(|(i, tr)| parse_row(&team, i, tr))
        .collect()
}

fn parse_row(team: &str, idx: usize, tr: ElementRef) -> Result<SectionRow> {
    let cells: Vec<ElementRef> = tr.select(&CELL_SEL).collect();
    if cells.len() != CELLS_PER_ROW {
        return Err(ParseError::CellCount {
            table: "scoreboard",
            row: idx,
            expected: CELLS_PER_ROW,
            found: cells.len(),
        });
    }

    let hero = ident::first_image(cells[HERO_CELL], "title", "scoreboard hero avatar")?;
    let player = ident::text_of(cells[PLAYER_CELL]);
    let player_id = ident::player_id(cells[PLAYER_CELL])?;

    let mut stats = [0i64; 12];
    for (slot, cell) in stats.iter_mut().zip(&cells[STAT_CELLS]) {
        *slot = normalize::amount(&cell.text().collect::<String>());
    }

    let bought = ident::image_names(cells[ITEM_CELL]);
    if bought.len() > ITEM_SLOTS {
        return Err(ParseError::ValueCount {
            table: "scoreboard",
            row: idx,
            column: "items",
            expected: ITEM_SLOTS,
            found: bought.len(),
        });
    }
    let items = std::array::from_fn(|i| {
        bought
            .get(i)
            .cloned()
            .unwrap_or_else(|| EMPTY_ITEM.to_string())
    });

    Ok(SectionRow {
        team: team.to_string(),
        hero,
        player,
        player_id,
        stats,
        items,
    })
}

fn into_player_row(match_id: u64, side: Side, row: SectionRow) -> PlayerMatchRow {
    let [
        level,
        kills,
        deaths,
        assists,
        gold,
        last_hits,
        denies,
        xpm,
        gpm,
        hero_damage,
        hero_healing,
        tower_damage,
    ] = row.stats;
    PlayerMatchRow {
        match_id,
        side,
        team: row.team,
        player_id: row.player_id,
        player: row.player,
        hero: row.hero,
        level,
        kills,
        deaths,
        assists,
        gold,
        last_hits,
        denies,
        xpm,
        gpm,
        hero_damage,
        hero_healing,
        tower_damage,
        items: row.items,
    }
}
