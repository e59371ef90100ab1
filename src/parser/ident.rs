use std::sync::LazyLock;

use regex::Regex;
use scraper::{ElementRef, Html, Selector};

use super::error::{ParseError, Result};
use super::normalize::squash;

static DIGITS_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"[0-9]+").unwrap());

static HEADER_SEL: LazyLock<Selector> =
    LazyLock::new(|| Selector::parse("div.content-header-title").unwrap());
static PLAYER_LINK_SEL: LazyLock<Selector> =
    LazyLock::new(|| Selector::parse(r#"a[href*="/players/"]"#).unwrap());
static HERO_AVATAR_SEL: LazyLock<Selector> =
    LazyLock::new(|| Selector::parse(r#"a[href*="/heroes/"] img"#).unwrap());
static IMG_SEL: LazyLock<Selector> = LazyLock::new(|| Selector::parse("img").unwrap());

/// Match id: first run of digits in the page header.
pub fn match_id(doc: &Html) -> Result<u64> {
    let header = doc
        .select(&HEADER_SEL)
        .next()
        .ok_or(ParseError::ElementNotFound {
            context: "match header (div.content-header-title)",
        })?;
    first_number(&text_of(header), "match header")
}

/// Player id from the first profile link under `scope`. Digits are read
/// from the path segment after `/players/`, so host names never leak in.
pub fn player_id(scope: ElementRef) -> Result<u64> {
    let link = scope
        .select(&PLAYER_LINK_SEL)
        .next()
        .ok_or(ParseError::ElementNotFound {
            context: "player profile link",
        })?;
    let href = link.value().attr("href").ok_or(ParseError::MissingAttribute {
        context: "player profile link",
        attr: "href",
    })?;
    let target = href
        .find("/players/")
        .map(|at| &href[at..])
        .unwrap_or(href);
    first_number(target, "player profile link")
}

/// Hero name from the avatar image inside a `/heroes/` link.
pub fn hero_avatar(scope: ElementRef) -> Result<String> {
    let img = scope
        .select(&HERO_AVATAR_SEL)
        .next()
        .ok_or(ParseError::ElementNotFound {
            context: "hero avatar",
        })?;
    attr(img, "alt", "hero avatar")
}

/// `attr` of the first `img` under `scope`.
pub fn first_image(
    scope: ElementRef,
    attr_name: &'static str,
    context: &'static str,
) -> Result<String> {
    let img = scope
        .select(&IMG_SEL)
        .next()
        .ok_or(ParseError::ElementNotFound { context })?;
    attr(img, attr_name, context)
}

/// Names of every `img` under `scope` that carries `alt`.
pub fn image_names(scope: ElementRef) -> Vec<String> {
    scope
        .select(&IMG_SEL)
        .filter_map(|img| img.value().attr("alt"))
        .map(squash)
        .collect()
}

pub fn attr(el: ElementRef, name: &'static str, context: &'static str) -> Result<String> {
    el.value()
        .attr(name)
        .map(squash)
        .ok_or(ParseError::MissingAttribute {
            context,
            attr: name,
        })
}

pub fn first_number(text: &str, context: &'static str) -> Result<u64> {
    DIGITS_RE
        .find(text)
        .and_then(|m| m.as_str().parse().ok())
        .ok_or_else(|| ParseError::MissingDigits {
            context,
            text: text.to_string(),
        })
}

/// Whitespace-collapsed text content.
pub fn text_of(el: ElementRef) -> String {
    squash(&el.text().collect::<String>())
}
