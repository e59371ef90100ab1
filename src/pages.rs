use std::collections::HashSet;
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use tracing::debug;

use crate::parser::{MatchDocuments, Section};

/// `<dir>/<section>/<id>_<section>.txt`
pub fn document_path(dir: &Path, match_id: u64, section: Section) -> PathBuf {
    let name = section.name();
    dir.join(name).join(format!("{match_id}_{name}.txt"))
}

/// Every saved page of one match. Absent pages are left out; the
/// assembler reports them per table.
pub fn load_documents(dir: &Path, match_id: u64) -> Result<MatchDocuments> {
    let mut docs = MatchDocuments::default();
    for section in Section::ALL {
        let path = document_path(dir, match_id, section);
        match fs::read_to_string(&path) {
            Ok(text) => docs.insert(section, text),
            Err(e) if e.kind() == ErrorKind::NotFound => {
                debug!(match_id, section = section.name(), "no saved page");
            }
            Err(e) => return Err(e).with_context(|| format!("reading {}", path.display())),
        }
    }
    Ok(docs)
}

/// Match ids with a saved overview page, ascending.
pub fn discover_ids(dir: &Path) -> Result<Vec<u64>> {
    let overview = dir.join(Section::Overview.name());
    let suffix = format!("_{}.txt", Section::Overview.name());

    let mut ids = Vec::new();
    for entry in fs::read_dir(&overview)
        .with_context(|| format!("listing {}", overview.display()))?
    {
        let name = entry?.file_name();
        let Some(id) = name
            .to_str()
            .and_then(|n| n.strip_suffix(&suffix))
            .and_then(|stem| stem.parse::<u64>().ok())
        else {
            continue;
        };
        ids.push(id);
    }
    ids.sort_unstable();
    Ok(ids)
}

/// Already-processed ids, one per line. Blank lines are ignored.
pub fn read_known(path: &Path) -> Result<HashSet<u64>> {
    let text =
        fs::read_to_string(path).with_context(|| format!("reading {}", path.display()))?;
    text.lines()
        .map(str::trim)
        .filter(|l| !l.is_empty())
        .map(|l| {
            l.parse::<u64>()
                .with_context(|| format!("bad match id {l:?} in {}", path.display()))
        })
        .collect()
}

/// Candidates not yet in `known`, first occurrence order, no repeats.
pub fn new_ids(candidates: &[u64], known: &HashSet<u64>) -> Vec<u64> {
    let mut seen = HashSet::new();
    candidates
        .iter()
        .copied()
        .filter(|id| !known.contains(id) && seen.insert(*id))
        .collect()
}
