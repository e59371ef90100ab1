//! Synthetic report pages for tests.

pub const MATCH_ID: u64 = 7712345;

pub const HEROES: [&str; 10] = [
    "Axe", "Lina", "Pudge", "Lion", "Sven", "Tiny", "Zeus", "Mirana", "Viper", "Luna",
];

pub fn player_id(idx: usize) -> u64 {
    101 + idx as u64
}

pub fn header(match_id: u64) -> String {
    format!(r#"<div class="content-header-title">Match {match_id}</div>"#)
}

pub fn page(match_id: u64, body: &str) -> String {
    format!(
        "<!DOCTYPE html><html><head><title>Match</title></head><body>{}{}</body></html>",
        header(match_id),
        body
    )
}

pub fn roster_row(hero: &str, pid: u64, stats: &[&str], items: &[&str]) -> String {
    let stat_cells: String = stats.iter().map(|s| format!("<td>{s}</td>")).collect();
    let item_imgs: String = items
        .iter()
        .map(|i| format!(r#"<a href="/items/x"><img alt="{i}" src="x.png"></a>"#))
        .collect();
    format!(
        r#"<tr><td><a href="/heroes/x"><img title="{hero}" alt="{hero}" src="h.png"></a></td><td><a href="/players/{pid}">Player {pid}</a></td><td></td>{stat_cells}<td>{item_imgs}</td></tr>"#
    )
}

pub fn roster_section(side: &str, title: &str, rows: &[String]) -> String {
    format!(
        r#"<section class="{side}"><header>{title}</header><article><table><thead><tr><th>Hero</th><th>Player</th><th></th><th>LVL</th></tr></thead><tbody>{}</tbody></table></article></section>"#,
        rows.concat()
    )
}

fn default_roster_rows(range: std::ops::Range<usize>) -> Vec<String> {
    range
        .map(|i| {
            roster_row(
                HEROES[i],
                player_id(i),
                &[
                    "25", "10", "2", "8", "1.2k", "300", "12", "700", "650", "30k", "0", "4k",
                ],
                &["Blink Dagger", "Black King Bar"],
            )
        })
        .collect()
}

pub fn overview_body() -> String {
    let details = r#"<div id="content-header-secondary"><dl><dd>The International</dd><dd>Captains Mode</dd><dd>Europe West</dd><dd>34:12</dd><dd><time datetime="2016-08-13T18:05:00+00:00">Sat</time></dd></dl></div>"#;
    let draft = r#"<div class="match-picks-bans"><div class="ban"><img alt="Techies"><div class="seq">2</div></div><div class="pick"><img alt="Axe"><div class="seq">1</div></div><div class="picks-inline"><img alt="Axe"><div class="seq">1</div></div><div class="pick"><img alt="Lina"><div class="seq">3</div></div></div>"#;
    format!(
        "{details}{}{}{draft}",
        roster_section("radiant", "Radiant Team", &default_roster_rows(0..5)),
        roster_section("dire", "Dire Team", &default_roster_rows(5..10)),
    )
}

pub fn ability_row(hero: &str, pid: u64, choices: &[(&str, &[u32])]) -> String {
    let skills: String = choices
        .iter()
        .map(|(ability, levels)| {
            let entries: String = levels
                .iter()
                .map(|l| format!(r#"<div class="entry"><span>{l}</span></div>"#))
                .collect();
            format!(r#"<div class="skill-choice"><img alt="{ability}">{entries}</div>"#)
        })
        .collect();
    format!(
        r#"<tr><td><a href="/heroes/x"><img alt="{hero}"></a></td><td><a href="/players/{pid}">p</a></td><td>{skills}</td></tr>"#
    )
}

pub fn ability_article(rows: &[String]) -> String {
    format!(
        r#"<article class="ability-builds"><table><tr><th>Hero</th><th>Player</th><th>Build</th></tr>{}</table></article>"#,
        rows.concat()
    )
}

pub fn artifact(hero: &str, groups: &[(Option<&str>, &[&str])]) -> String {
    let segments: String = groups
        .iter()
        .map(|(time, items)| {
            let time = time
                .map(|t| format!(r#"<div class="time">{t}</div>"#))
                .unwrap_or_default();
            let imgs: String = items
                .iter()
                .map(|i| format!(r#"<img alt="{i}">"#))
                .collect();
            format!(r#"<div class="segment expanded">{time}<div class="items">{imgs}</div></div>"#)
        })
        .collect();
    format!(
        r#"<section class="performance-artifact"><a href="/heroes/x"><img alt="{hero}"></a>{segments}</section>"#
    )
}

pub fn builds_body() -> String {
    let rows: Vec<String> = (0..10)
        .map(|i| {
            ability_row(
                HEROES[i],
                player_id(i),
                &[("Q", &[1, 3, 5, 7]), ("W", &[2, 8]), ("R", &[6, 11])],
            )
        })
        .collect();
    let artifacts: String = (0..10)
        .map(|i| {
            artifact(
                HEROES[i],
                &[
                    (Some("-1:30"), &["Tango", "Healing Salve"]),
                    (Some("12:04"), &["Blink Dagger"]),
                    (None, &["Town Portal Scroll"]),
                ],
            )
        })
        .collect();
    format!(
        "{}{}{artifacts}",
        ability_article(&rows[..5]),
        ability_article(&rows[5..])
    )
}

pub fn chart(json: &str) -> String {
    format!(
        r#"<div data-flot="chart-value-minute" data-json='{json}'></div>"#
    )
}

pub fn farm_body() -> String {
    let team_xp = r#"[{"data":[]},{"label":"XP","data":[[0,0],[1,120],[2,300]]}]"#;
    let team_gold = r#"[{"data":[]},{"label":"Gold","data":[[1,600],[2,1100],[3,1500]]}]"#;
    let last_hits = r#"[{"label":"Axe","data":[[0,0],[1,4]]},{"label":"Lina","data":[[0,0],[1,6]]}]"#;
    let hero_gold = r#"[{"label":"Axe","data":[[0,600],[1,800]]},{"label":"Lina","data":[[1,900],[2,1200]]}]"#;
    [team_xp, team_gold, last_hits, hero_gold]
        .into_iter()
        .map(chart)
        .collect()
}

pub fn faction_row(side: &str, hero: &str, cells: &[&str]) -> String {
    let cells: String = cells.iter().map(|c| format!("<td>{c}</td>")).collect();
    format!(
        r#"<tr class="faction-{side}"><td><img alt="{hero}"></td><td>name</td>{cells}</tr>"#
    )
}

pub fn faction_body(rows: &[String]) -> String {
    format!(
        r#"<table><thead><tr><th>Hero</th></tr></thead><tbody>{}</tbody></table>"#,
        rows.concat()
    )
}

pub fn objectives_body() -> String {
    let rows: Vec<String> = HEROES
        .iter()
        .enumerate()
        .map(|(i, hero)| {
            let side = if i < 5 { "radiant" } else { "dire" };
            faction_row(
                side,
                hero,
                &["2", "1", "0", "3.4k", "5k", "1", "0", "0", "0", "6", "4"],
            )
        })
        .collect();
    faction_body(&rows)
}

pub fn runes_body() -> String {
    let rows: Vec<String> = HEROES
        .iter()
        .map(|hero| {
            faction_row(
                "radiant",
                hero,
                &["5", "2", "3", "2", "1", "1", "0", "1", "0", "2"],
            )
        })
        .collect();
    faction_body(&rows)
}

pub fn vision_body() -> String {
    let rows: Vec<String> = HEROES
        .iter()
        .map(|hero| {
            faction_row(
                "dire",
                hero,
                &[
                    "4/6", "3/5", "1/2", "2/1", "1", "50%", "1/1", "2", "1", "0", "12:30",
                ],
            )
        })
        .collect();
    faction_body(&rows)
}
