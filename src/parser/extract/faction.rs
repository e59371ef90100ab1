use std::sync::LazyLock;

use scraper::{ElementRef, Html, Selector};

use crate::parser::error::{ParseError, Result};
use crate::parser::{ident, normalize};
use crate::tables::{FactionRow, FactionTable};

static FACTION_ROW_SEL: LazyLock<Selector> =
    LazyLock::new(|| Selector::parse(r#"tr[class*="faction-"]"#).unwrap());
static TD_SEL: LazyLock<Selector> = LazyLock::new(|| Selector::parse("td").unwrap());

/// Avatar and player name come before the decoded cells.
const LEADING_CELLS: usize = 2;

/// How one source cell turns into output values.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Cell {
    Count(&'static str),
    /// `"a/b"` pair, e.g. used/total.
    Pair(&'static str, &'static str),
    /// `"MM:SS"` duration in seconds.
    Clock(&'static str),
}

impl Cell {
    fn names(self) -> Vec<&'static str> {
        match self {
            Cell::Count(n) | Cell::Clock(n) => vec![n],
            Cell::Pair(a, b) => vec![a, b],
        }
    }

    fn width(self) -> usize {
        match self {
            Cell::Count(_) | Cell::Clock(_) => 1,
            Cell::Pair(..) => 2,
        }
    }

    /// With `split`, count cells go through [`normalize::counts`] and must
    /// yield exactly their declared width.
    fn decode(self, text: &str, split: bool, row: usize, kind: &'static str) -> Result<Vec<i64>> {
        let values = match self {
            Cell::Clock(_) => return Ok(vec![normalize::seconds(text)]),
            Cell::Count(_) if !split => return Ok(vec![normalize::amount(text)]),
            Cell::Count(_) | Cell::Pair(..) => normalize::counts(text),
        };
        if values.len() != self.width() {
            return Err(ParseError::ValueCount {
                table: kind,
                row,
                column: self.names()[0],
                expected: self.width(),
                found: values.len(),
            });
        }
        Ok(values)
    }
}

/// Column layout of one per-hero report.
#[derive(Debug)]
pub struct FactionSpec {
    pub kind: &'static str,
    pub cells: &'static [Cell],
    /// Report writes counts in `a/b` notation, so a lone count cell must
    /// not carry a separator.
    pub split_cells: bool,
}

impl FactionSpec {
    pub fn columns(&self) -> Vec<&'static str> {
        self.cells.iter().flat_map(|c| c.names()).collect()
    }
}

pub const OBJECTIVES: FactionSpec = FactionSpec {
    kind: "objectives",
    split_cells: false,
    cells: &[
        Cell::Count("tower_kills"),
        Cell::Count("barracks_kills"),
        Cell::Count("roshan_kills"),
        Cell::Count("tower_dmg"),
        Cell::Count("structure_dmg"),
        Cell::Count("aegis_pickup"),
        Cell::Count("aegis_use"),
        Cell::Count("cheese_pickup"),
        Cell::Count("cheese_use"),
        Cell::Count("rune_pickup"),
        Cell::Count("rune_use"),
    ],
};

pub const RUNES: FactionSpec = FactionSpec {
    kind: "runes",
    split_cells: false,
    cells: &[
        Cell::Count("activated"),
        Cell::Count("bottled"),
        Cell::Count("top"),
        Cell::Count("bottom"),
        Cell::Count("double_damage"),
        Cell::Count("haste"),
        Cell::Count("regen"),
        Cell::Count("invis"),
        Cell::Count("illusion"),
        Cell::Count("bounty"),
    ],
};

pub const VISION: FactionSpec = FactionSpec {
    kind: "vision",
    split_cells: true,
    cells: &[
        Cell::Pair("obs_owned", "sent_owned"),
        Cell::Pair("obs_placed", "sent_placed"),
        Cell::Pair("obs_killed", "sent_killed"),
        Cell::Pair("dust_owned", "dust_used"),
        Cell::Count("dust_hits"),
        Cell::Count("dust_acc"),
        Cell::Pair("smoke_owned", "smoke_used"),
        Cell::Count("smoke_hits"),
        Cell::Count("gem_owned"),
        Cell::Count("gem_dropped"),
        Cell::Clock("gem_time_carried"),
    ],
};

/// Walk every faction-tagged row in document order and decode it per `spec`.
pub fn extract(match_id: u64, doc: &Html, spec: &FactionSpec) -> Result<FactionTable> {
    let columns = spec.columns();
    let rows = doc
        .select(&FACTION_ROW_SEL)
        .enumerate()
        .map(|(i, tr)| parse_row(match_id, i, tr, spec))
        .collect::<Result<Vec<_>>>()?;

    if rows.is_empty() {
        return Err(ParseError::ElementNotFound {
            context: "faction rows (tr.faction-*)",
        });
    }

    Ok(FactionTable {
        kind: spec.kind,
        columns,
        rows,
    })
}

fn parse_row(match_id: u64, idx: usize, tr: ElementRef, spec: &FactionSpec) -> Result<FactionRow> {
    let hero = ident::first_image(tr, "alt", "faction row avatar")?;

    let tds: Vec<ElementRef> = tr.select(&TD_SEL).collect();
    let expected = LEADING_CELLS + spec.cells.len();
    if tds.len() != expected {
        return Err(ParseError::CellCount {
            table: spec.kind,
            row: idx,
            expected,
            found: tds.len(),
        });
    }

    let mut values = Vec::new();
    for (cell, td) in spec.cells.iter().zip(&tds[LEADING_CELLS..]) {
        let text: String = td.text().collect();
        values.extend(cell.decode(&text, spec.split_cells, idx, spec.kind)?);
    }

    Ok(FactionRow {
        match_id,
        hero,
        values,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser::fixtures;

    fn doc_of(body: &str) -> Html {
        Html::parse_document(&fixtures::page(1, body))
    }

    #[test]
    fn declared_widths() {
        assert_eq!(OBJECTIVES.columns().len(), 11);
        assert_eq!(RUNES.columns().len(), 10);
        let vision = VISION.columns();
        assert_eq!(vision.len(), 16);
        assert_eq!(vision[0], "obs_owned");
        assert_eq!(vision[15], "gem_time_carried");
    }

    #[test]
    fn objectives_rows() {
        let table = extract(1, &doc_of(&fixtures::objectives_body()), &OBJECTIVES).unwrap();
        assert_eq!(table.rows.len(), 10);
        assert_eq!(table.kind, "objectives");
        assert_eq!(table.value("Axe", "tower_kills"), Some(2));
        assert_eq!(table.value("Axe", "tower_dmg"), Some(3400));
        assert_eq!(table.value("Luna", "structure_dmg"), Some(500));
        assert_eq!(table.rows[9].hero, "Luna");
    }

    #[test]
    fn runes_rows() {
        let table = extract(1, &doc_of(&fixtures::runes_body()), &RUNES).unwrap();
        assert!(table.rows.iter().all(|r| r.values.len() == 10));
        assert_eq!(table.value("Zeus", "bounty"), Some(2));
    }

    #[test]
    fn vision_pairs_and_clock() {
        let table = extract(1, &doc_of(&fixtures::vision_body()), &VISION).unwrap();
        let row = &table.rows[0];
        assert_eq!(
            row.values,
            vec![4, 6, 3, 5, 1, 2, 2, 1, 1, 50, 1, 1, 2, 1, 0, 750]
        );
        assert_eq!(table.value("Axe", "dust_acc"), Some(50));
        assert_eq!(table.value("Axe", "gem_time_carried"), Some(750));
    }

    #[test]
    fn short_row_aborts_table() {
        let body = fixtures::faction_body(&[
            fixtures::faction_row("radiant", "Axe", &["1"; 10]),
            fixtures::faction_row("radiant", "Lina", &["1"; 9]),
        ]);
        let err = extract(1, &doc_of(&body), &RUNES).unwrap_err();
        assert!(matches!(
            err,
            ParseError::CellCount { row: 1, expected: 12, found: 11, .. }
        ));
    }

    #[test]
    fn pair_cell_without_separator() {
        let mut cells = vec!["1/1"; 4];
        cells[0] = "7";
        cells.extend(["1", "1", "1/1", "1", "1", "1", "1:00"]);
        let body = fixtures::faction_body(&[fixtures::faction_row("dire", "Axe", &cells)]);
        assert!(matches!(
            extract(1, &doc_of(&body), &VISION),
            Err(ParseError::ValueCount { column: "obs_owned", found: 1, .. })
        ));
    }

    #[test]
    fn vision_single_count_with_separator() {
        let cells = [
            "1/1", "1/1", "1/1", "1/1", "1/2", "1", "1/1", "1", "1", "1", "1:00",
        ];
        let body = fixtures::faction_body(&[fixtures::faction_row("dire", "Axe", &cells)]);
        assert!(matches!(
            extract(1, &doc_of(&body), &VISION),
            Err(ParseError::ValueCount { column: "dust_hits", expected: 1, found: 2, .. })
        ));
    }

    #[test]
    fn objectives_counts_stay_lenient() {
        let mut cells = vec!["0"; 11];
        cells[0] = "1/2";
        let body = fixtures::faction_body(&[fixtures::faction_row("radiant", "Axe", &cells)]);
        let table = extract(1, &doc_of(&body), &OBJECTIVES).unwrap();
        assert_eq!(table.value("Axe", "tower_kills"), Some(12));
    }

    #[test]
    fn no_rows_is_structural() {
        assert!(extract(1, &doc_of("<table></table>"), &RUNES).is_err());
    }
}
