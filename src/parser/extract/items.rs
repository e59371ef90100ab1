use std::sync::LazyLock;

use scraper::{Html, Selector};
use tracing::debug;

use crate::parser::error::Result;
use crate::parser::{ident, normalize};
use crate::tables::ItemPurchaseRow;

static ARTIFACT_SEL: LazyLock<Selector> =
    LazyLock::new(|| Selector::parse("section.performance-artifact").unwrap());
static GROUP_SEL: LazyLock<Selector> =
    LazyLock::new(|| Selector::parse("div.segment.expanded").unwrap());
static TIME_SEL: LazyLock<Selector> = LazyLock::new(|| Selector::parse("div.time").unwrap());

/// Purchase events sorted by (hero, timestamp).
///
/// Groups without a readable timestamp are still in progress at match end
/// and are dropped whole, items included.
pub fn extract(match_id: u64, doc: &Html) -> Result<Vec<ItemPurchaseRow>> {
    let mut rows = Vec::new();

    for player in doc.select(&ARTIFACT_SEL) {
        let hero = ident::hero_avatar(player)?;

        for group in player.select(&GROUP_SEL) {
            let Some(time_stamp) = group
                .select(&TIME_SEL)
                .next()
                .and_then(|t| normalize::clock_seconds(&ident::text_of(t)))
            else {
                debug!(%hero, "skipping purchase group without timestamp");
                continue;
            };

            for item in ident::image_names(group) {
                rows.push(ItemPurchaseRow {
                    match_id,
                    time_stamp,
                    hero: hero.clone(),
                    item,
                });
            }
        }
    }

    // stable: same-second purchases keep document order
    rows.sort_by(|a, b| (&a.hero, a.time_stamp).cmp(&(&b.hero, b.time_stamp)));
    Ok(rows)
}
