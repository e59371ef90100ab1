pub mod error;
pub mod extract;
pub mod ident;
pub mod normalize;

#[cfg(test)]
pub(crate) mod fixtures;

use std::collections::HashMap;

use scraper::Html;
use tracing::{debug, info};

use error::{ParseError, Result};
pub use extract::MatchTables;

/// One saved report page of a match.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Section {
    Overview,
    Builds,
    Farm,
    Objectives,
    Runes,
    Vision,
}

impl Section {
    /// Header ids are resolved in this order, overview first.
    pub const ALL: [Section; 6] = [
        Section::Overview,
        Section::Builds,
        Section::Farm,
        Section::Objectives,
        Section::Runes,
        Section::Vision,
    ];

    pub fn name(self) -> &'static str {
        match self {
            Section::Overview => "overview",
            Section::Builds => "builds",
            Section::Farm => "farm",
            Section::Objectives => "objectives",
            Section::Runes => "runes",
            Section::Vision => "vision",
        }
    }

    /// Tables built from this section's document.
    pub fn tables(self) -> &'static [&'static str] {
        match self {
            Section::Overview => &["match", "players", "picks_bans"],
            Section::Builds => &["abilities", "items"],
            Section::Farm => &["team_series", "hero_series"],
            Section::Objectives => &["objectives"],
            Section::Runes => &["runes"],
            Section::Vision => &["vision"],
        }
    }
}

/// Raw page text per section for a single match.
#[derive(Debug, Clone, Default)]
pub struct MatchDocuments {
    pages: HashMap<Section, String>,
}

impl MatchDocuments {
    pub fn insert(&mut self, section: Section, text: String) {
        self.pages.insert(section, text);
    }

    pub fn get(&self, section: Section) -> Option<&str> {
        self.pages.get(&section).map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.pages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pages.is_empty()
    }
}

/// Parse every document of one match into its tables.
///
/// The match id is read once from the first header that yields one and
/// stamped on every row. A section whose own header disagrees, or whose
/// document is absent, fails only its own tables. Errors only when no
/// document carries a usable header.
pub fn process_match(docs: &MatchDocuments) -> Result<MatchTables> {
    let parsed: Vec<(Section, Option<Html>)> = Section::ALL
        .iter()
        .map(|&s| (s, docs.get(s).map(Html::parse_document)))
        .collect();

    let match_id = parsed
        .iter()
        .filter_map(|(_, doc)| doc.as_ref())
        .find_map(|doc| ident::match_id(doc).ok())
        .ok_or(ParseError::ElementNotFound {
            context: "match header in any document",
        })?;

    let mut tables = MatchTables::new(match_id);
    for (section, doc) in &parsed {
        let Some(doc) = doc else {
            tables.fail_section(*section, &ParseError::MissingDocument(section.name()));
            continue;
        };
        match ident::match_id(doc) {
            Ok(found) if found == match_id => {
                debug!(match_id, section = section.name(), "extracting");
                extract::extract_section(&mut tables, *section, doc);
            }
            Ok(found) => tables.fail_section(
                *section,
                &ParseError::MatchIdMismatch {
                    expected: match_id,
                    found,
                },
            ),
            Err(e) => tables.fail_section(*section, &e),
        }
    }

    info!(match_id, failures = tables.failures.len(), "match parsed");
    Ok(tables)
}
