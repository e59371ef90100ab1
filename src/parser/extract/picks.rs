use std::sync::LazyLock;

use scraper::{Html, Selector};

use crate::parser::error::{ParseError, Result};
use crate::parser::ident;
use crate::tables::{DraftAction, PickBanRow};

static DRAFT_SEL: LazyLock<Selector> =
    LazyLock::new(|| Selector::parse(r#"div[class*="pick"], div[class*="ban"]"#).unwrap());
static SEQ_SEL: LazyLock<Selector> = LazyLock::new(|| Selector::parse(".seq").unwrap());

/// Draft events sorted by sequence. Only divs whose first class is exactly
/// `pick` or `ban` are events; inline-pick markers and wrappers are not.
pub fn extract(match_id: u64, doc: &Html) -> Result<Vec<PickBanRow>> {
    let mut rows = Vec::new();

    for el in doc.select(&DRAFT_SEL) {
        let first_class = el
            .value()
            .attr("class")
            .and_then(|c| c.split_whitespace().next())
            .unwrap_or_default();
        let action = match first_class {
            "pick" => DraftAction::Pick,
            "ban" => DraftAction::Ban,
            _ => continue,
        };

        let hero = ident::first_image(el, "alt", "draft hero")?;
        let seq = el.select(&SEQ_SEL).next().ok_or(ParseError::ElementNotFound {
            context: "draft sequence (.seq)",
        })?;

        rows.push(PickBanRow {
            match_id,
            sequence: ident::first_number(&ident::text_of(seq), "draft sequence (.seq)")?,
            action,
            hero,
        });
    }

    rows.sort_by_key(|r| r.sequence);
    if let Some(dup) = rows.windows(2).find(|w| w[0].sequence == w[1].sequence) {
        return Err(ParseError::DuplicateSequence(dup[0].sequence));
    }

    Ok(rows)
}
