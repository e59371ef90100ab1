use std::sync::LazyLock;

use scraper::{ElementRef, Html, Selector};

use crate::parser::error::{ParseError, Result};
use crate::parser::{ident, normalize};
use crate::tables::{AbilityBuildRow, Side, ABILITY_SLOTS, ROSTER_SIZE};

static PLAYER_ROW_SEL: LazyLock<Selector> =
    LazyLock::new(|| Selector::parse("article.ability-builds tr").unwrap());
static TD_SEL: LazyLock<Selector> = LazyLock::new(|| Selector::parse("td").unwrap());
static CHOICE_SEL: LazyLock<Selector> =
    LazyLock::new(|| Selector::parse(".skill-choice").unwrap());
static ENTRY_SEL: LazyLock<Selector> = LazyLock::new(|| Selector::parse(".entry").unwrap());

/// Dense 25-slot skill build per player, in document order.
pub fn extract(match_id: u64, doc: &Html) -> Result<Vec<AbilityBuildRow>> {
    let players: Vec<ElementRef> = doc
        .select(&PLAYER_ROW_SEL)
        .filter(|tr| tr.select(&TD_SEL).next().is_some())
        .collect();
    if players.len() != ROSTER_SIZE {
        return Err(ParseError::RowCount {
            table: "ability builds",
            expected: ROSTER_SIZE,
            found: players.len(),
        });
    }

    players
        .into_iter()
        .enumerate()
        .map(|(i, tr)| -> Result<AbilityBuildRow> {
            Ok(AbilityBuildRow {
                match_id,
                side: Side::from_roster_index(i),
                player_id: ident::player_id(tr)?,
                hero: ident::hero_avatar(tr)?,
                levels: skill_slots(tr)?,
            })
        })
        .collect()
}

/// Scatter the sparse "chosen at level N" entries into fixed slots.
/// A level listed twice keeps whichever ability came last.
pub fn skill_slots(player: ElementRef) -> Result<[Option<String>; ABILITY_SLOTS]> {
    let mut slots: [Option<String>; ABILITY_SLOTS] = Default::default();

    for choice in player.select(&CHOICE_SEL) {
        let ability = ident::first_image(choice, "alt", "skill choice icon")?;
        for entry in choice.select(&ENTRY_SEL) {
            let level = normalize::amount(&ident::text_of(entry));
            if !(1..=ABILITY_SLOTS as i64).contains(&level) {
                return Err(ParseError::LevelOutOfRange { ability, level });
            }
            slots[(level - 1) as usize] = Some(ability.clone());
        }
    }

    Ok(slots)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser::fixtures;

    fn one_player(choices: &[(&str, &[u32])]) -> Html {
        Html::parse_document(&fixtures::page(
            1,
            &fixtures::ability_article(&[fixtures::ability_row("Axe", 9, choices)]),
        ))
    }

    fn slots_of(doc: &Html) -> Result<[Option<String>; ABILITY_SLOTS]> {
        let tr = doc
            .select(&PLAYER_ROW_SEL)
            .find(|tr| tr.select(&TD_SEL).next().is_some())
            .unwrap();
        skill_slots(tr)
    }

    #[test]
    fn sparse_entries_scattered() {
        let doc = one_player(&[("Q", &[1, 3]), ("W", &[2]), ("R", &[6])]);
        let slots = slots_of(&doc).unwrap();
        assert_eq!(slots[0].as_deref(), Some("Q"));
        assert_eq!(slots[1].as_deref(), Some("W"));
        assert_eq!(slots[2].as_deref(), Some("Q"));
        assert_eq!(slots[3], None);
        assert_eq!(slots[5].as_deref(), Some("R"));
        assert!(slots[6..].iter().all(Option::is_none));
    }

    #[test]
    fn repeated_level_last_write_wins() {
        let doc = one_player(&[("Q", &[4]), ("E", &[4])]);
        let slots = slots_of(&doc).unwrap();
        assert_eq!(slots[3].as_deref(), Some("E"));
    }

    #[test]
    fn level_out_of_range() {
        let doc = one_player(&[("Q", &[26])]);
        assert!(matches!(
            slots_of(&doc),
            Err(ParseError::LevelOutOfRange { level: 26, .. })
        ));
        let doc = one_player(&[("Q", &[0])]);
        assert!(slots_of(&doc).is_err());
    }

    #[test]
    fn full_match_has_ten_rows() {
        let doc = Html::parse_document(&fixtures::page(
            fixtures::MATCH_ID,
            &fixtures::builds_body(),
        ));
        let rows = extract(fixtures::MATCH_ID, &doc).unwrap();
        assert_eq!(rows.len(), 10);
        for (i, row) in rows.iter().enumerate() {
            assert_eq!(row.hero, fixtures::HEROES[i]);
            assert_eq!(row.player_id, fixtures::player_id(i));
            assert_eq!(row.levels.len(), 25);
            assert_eq!(row.levels.iter().filter(|s| s.is_some()).count(), 8);
        }
        assert_eq!(rows[4].side, Side::Radiant);
        assert_eq!(rows[5].side, Side::Dire);
    }

    #[test]
    fn nine_players_is_structural() {
        let rows: Vec<String> = (0..9)
            .map(|i| fixtures::ability_row(fixtures::HEROES[i], 1, &[("Q", &[1])]))
            .collect();
        let doc = Html::parse_document(&fixtures::page(1, &fixtures::ability_article(&rows)));
        assert!(matches!(
            extract(1, &doc),
            Err(ParseError::RowCount { expected: 10, found: 9, .. })
        ));
    }
}
