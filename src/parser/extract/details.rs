use std::sync::LazyLock;

use chrono::{DateTime, Utc};
use scraper::{Html, Selector};

use crate::parser::error::{ParseError, Result};
use crate::parser::{ident, normalize};
use crate::tables::MatchRow;

static DD_SEL: LazyLock<Selector> =
    LazyLock::new(|| Selector::parse("#content-header-secondary dd").unwrap());
static TIME_SEL: LazyLock<Selector> = LazyLock::new(|| Selector::parse("time").unwrap());

/// tournament, mode, region, duration, start time
const DETAIL_FIELDS: usize = 5;

pub fn extract(match_id: u64, doc: &Html) -> Result<MatchRow> {
    let dds: Vec<_> = doc.select(&DD_SEL).collect();
    if dds.len() != DETAIL_FIELDS {
        return Err(ParseError::CellCount {
            table: "match details",
            row: 0,
            expected: DETAIL_FIELDS,
            found: dds.len(),
        });
    }

    let time = dds[4]
        .select(&TIME_SEL)
        .next()
        .ok_or(ParseError::ElementNotFound {
            context: "match start (time)",
        })?;
    let stamp = ident::attr(time, "datetime", "match start (time)")?;
    let start_time = DateTime::parse_from_rfc3339(&stamp)?.with_timezone(&Utc);

    Ok(MatchRow {
        match_id,
        tournament: ident::text_of(dds[0]),
        mode: ident::text_of(dds[1]),
        region: ident::text_of(dds[2]),
        duration_secs: normalize::seconds(&ident::text_of(dds[3])),
        start_time,
    })
}
