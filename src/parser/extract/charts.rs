use std::collections::HashMap;
use std::hash::Hash;
use std::sync::LazyLock;

use scraper::{ElementRef, Html, Selector};
use serde::Deserialize;

use crate::parser::error::{ParseError, Result};
use crate::tables::{HeroSeriesRow, TeamSeriesRow};

static CHART_SEL: LazyLock<Selector> =
    LazyLock::new(|| Selector::parse(r#"div[data-flot="chart-value-minute"]"#).unwrap());

/// team xp, team gold, hero last hits, hero gold
const FARM_CHARTS: usize = 4;

/// One Flot series. A `null` value is a gap in the line.
#[derive(Debug, Deserialize)]
struct FlotSeries {
    #[serde(default)]
    label: Option<String>,
    #[serde(default)]
    data: Vec<(f64, Option<f64>)>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Point {
    pub time: i64,
    pub value: i64,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HeroPoint {
    pub time: i64,
    pub hero: String,
    pub value: i64,
}

/// Team-level and hero-level farm tables from the farm page.
pub fn farm(match_id: u64, doc: &Html) -> Result<(Vec<TeamSeriesRow>, Vec<HeroSeriesRow>)> {
    let charts: Vec<ElementRef> = doc.select(&CHART_SEL).take(FARM_CHARTS).collect();
    if charts.len() != FARM_CHARTS {
        return Err(ParseError::RowCount {
            table: "farm charts",
            expected: FARM_CHARTS,
            found: charts.len(),
        });
    }

    let xp = keyed_by_time(team_series(charts[0])?);
    let gold = keyed_by_time(team_series(charts[1])?);
    let team = inner_join(xp, gold)
        .into_iter()
        .map(|(time, team_xp, team_gold)| TeamSeriesRow {
            match_id,
            time,
            team_xp,
            team_gold,
        })
        .collect();

    let last_hits = keyed_by_time_and_hero(hero_series(charts[2])?);
    let hero_gold = keyed_by_time_and_hero(hero_series(charts[3])?);
    let heroes = inner_join(last_hits, hero_gold)
        .into_iter()
        .map(|((time, hero), last_hits, gold)| HeroSeriesRow {
            match_id,
            time,
            hero,
            last_hits,
            gold,
        })
        .collect();

    Ok((team, heroes))
}

/// The data series of a single-line chart. Index 0 of the payload is the
/// axis placeholder; the real series sits at index 1.
pub fn team_series(chart: ElementRef) -> Result<Vec<Point>> {
    let mut series = payload(chart)?;
    if series.len() < 2 {
        return Err(ParseError::RowCount {
            table: "chart series",
            expected: 2,
            found: series.len(),
        });
    }
    Ok(points(series.swap_remove(1)).collect())
}

/// Every series of a per-hero chart, concatenated in payload order and
/// labelled with the series name.
pub fn hero_series(chart: ElementRef) -> Result<Vec<HeroPoint>> {
    let mut out = Vec::new();
    for mut series in payload(chart)? {
        let hero = series.label.take().ok_or(ParseError::MissingAttribute {
            context: "hero chart series",
            attr: "label",
        })?;
        out.extend(points(series).map(|p| HeroPoint {
            time: p.time,
            hero: hero.clone(),
            value: p.value,
        }));
    }
    Ok(out)
}

/// Strict equality join: keys present on one side only are dropped.
/// Output follows the left side's order.
pub fn inner_join<K, L, R>(left: Vec<(K, L)>, right: Vec<(K, R)>) -> Vec<(K, L, R)>
where
    K: Eq + Hash + Clone,
    L: Clone,
    R: Clone,
{
    let mut by_key: HashMap<K, Vec<R>> = HashMap::new();
    for (k, r) in right {
        by_key.entry(k).or_default().push(r);
    }

    let mut out = Vec::new();
    for (k, l) in left {
        if let Some(matches) = by_key.get(&k) {
            for r in matches {
                out.push((k.clone(), l.clone(), r.clone()));
            }
        }
    }
    out
}

fn payload(chart: ElementRef) -> Result<Vec<FlotSeries>> {
    let raw = chart
        .value()
        .attr("data-json")
        .ok_or(ParseError::MissingAttribute {
            context: "farm chart",
            attr: "data-json",
        })?;
    Ok(serde_json::from_str(raw)?)
}

fn points(series: FlotSeries) -> impl Iterator<Item = Point> {
    series.data.into_iter().filter_map(|(t, v)| {
        v.map(|v| Point {
            time: t.round() as i64,
            value: v.round() as i64,
        })
    })
}

fn keyed_by_time(points: Vec<Point>) -> Vec<(i64, i64)> {
    points.into_iter().map(|p| (p.time, p.value)).collect()
}

fn keyed_by_time_and_hero(points: Vec<HeroPoint>) -> Vec<((i64, String), i64)> {
    points
        .into_iter()
        .map(|p| ((p.time, p.hero), p.value))
        .collect()
}
