// src/fetch/urls.rs
use anyhow::{Context, Result};
use once_cell::sync::Lazy;
use regex::Regex;
use reqwest::Client;
use scraper::{Html, Selector};
use std::collections::BTreeMap;
use tracing::{debug, trace};
use url::Url;

/// The download buttons carry the archive path as the quoted argument of
/// their `onclick` handler, e.g. `download('data/datagis2019.zip')`.
static BUTTON_SELECTOR: Lazy<Selector> = Lazy::new(|| {
    Selector::parse(".btn.btn-sm.btn-primary[onclick]").expect("button selector should parse")
});
static LINK_SELECTOR: Lazy<Selector> =
    Lazy::new(|| Selector::parse(r#"a[href$=".zip"]"#).expect("selector should parse"));
static QUOTED: Lazy<Regex> = Lazy::new(|| Regex::new(r"'([^']+)'").expect("quoted regex"));
static DIGITS: Lazy<Regex> = Lazy::new(|| Regex::new(r"\d+").expect("digits regex"));

/// Rank of a whole-year archive; months rank 1..=12 below it.
const WHOLE_YEAR: u32 = 13;

/// Fetch the listing page and return every archive link on it, in page order.
pub async fn fetch_archive_links(client: &Client, base: &Url) -> Result<Vec<Url>> {
    let html = client
        .get(base.clone())
        .send()
        .await
        .with_context(|| format!("GET {}", base))?
        .error_for_status()?
        .text()
        .await
        .with_context(|| format!("reading body from {}", base))?;

    let links = extract_archive_links(&html, base);
    debug!(count = links.len(), "archive links on page");
    Ok(links)
}

/// Archive links from the page's download buttons. Pages without buttons
/// fall back to plain `.zip` anchors.
pub fn extract_archive_links(html: &str, base: &Url) -> Vec<Url> {
    let document = Html::parse_document(html);

    let from_buttons: Vec<Url> = document
        .select(&BUTTON_SELECTOR)
        .filter_map(|elem| elem.value().attr("onclick"))
        .filter_map(|onclick| QUOTED.captures(onclick))
        .filter_map(|caps| base.join(&caps[1]).ok())
        .collect();
    if !from_buttons.is_empty() {
        return from_buttons;
    }

    document
        .select(&LINK_SELECTOR)
        .filter_map(|elem| elem.value().attr("href"))
        .filter_map(|href| base.join(href).ok())
        .collect()
}

/// `(year, rank)` read off an archive file name: the 4-digit group is the
/// year; a 1-2 digit group in 1..=12 is the month, otherwise the archive
/// covers the whole year.
pub fn archive_period(url: &Url) -> Option<(u32, u32)> {
    let name = url.path_segments()?.last()?;
    let mut year = None;
    let mut month = None;
    for m in DIGITS.find_iter(name) {
        let digits = m.as_str();
        let value: u32 = digits.parse().ok()?;
        match digits.len() {
            4 => year = Some(value),
            1 | 2 if (1..=12).contains(&value) => month = Some(value),
            _ => {}
        }
    }
    Some((year?, month.unwrap_or(WHOLE_YEAR)))
}

/// Pick the archives worth downloading: the most recent one of every year,
/// plus the last listed (newest) archive. Page order, no duplicates.
pub fn select_archives(links: &[Url]) -> Vec<Url> {
    let mut best: BTreeMap<u32, (u32, usize)> = BTreeMap::new();
    for (idx, link) in links.iter().enumerate() {
        let Some((year, rank)) = archive_period(link) else {
            trace!(url = %link, "no period in archive name");
            continue;
        };
        let entry = best.entry(year).or_insert((rank, idx));
        // later listing wins a tie
        if rank >= entry.0 {
            *entry = (rank, idx);
        }
    }

    let mut picked: Vec<usize> = best.values().map(|&(_, idx)| idx).collect();
    if let Some(last) = links.len().checked_sub(1) {
        picked.push(last);
    }
    picked.sort_unstable();
    picked.dedup();
    picked.into_iter().map(|idx| links[idx].clone()).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    const PAGE: &str = r#"<html><body><table>
        <tr><td>2016</td><td><button class="btn btn-sm btn-primary" onclick="download('data/datagis2016.zip')">ZIP</button></td></tr>
        <tr><td>2017</td><td><button class="btn btn-sm btn-primary" onclick="download('data/datagis-03-2017.zip')">03</button>
            <button class="btn btn-sm btn-primary" onclick="download('data/datagis2017.zip')">ZIP</button></td></tr>
        <tr><td>2021</td><td><button class="btn btn-sm btn-primary" onclick="download('data/datagis-01-2021.zip')">01</button>
            <button class="btn btn-sm btn-primary" onclick="download('data/datagis-09-2021.zip')">09</button>
            <button class="btn btn-sm btn-primary" onclick="download('data/datagis-10-2021.zip')">10</button></td></tr>
        <tr><td><button class="btn btn-sm" onclick="other('x')">noise</button></td></tr>
        </table></body></html>"#;

    fn base() -> Url {
        Url::parse("https://ehw.fit.vutbr.cz/izv/").unwrap()
    }

    fn names(urls: &[Url]) -> Vec<String> {
        urls.iter()
            .map(|u| u.path_segments().unwrap().last().unwrap().to_string())
            .collect()
    }

    #[test]
    fn buttons_give_absolute_links() {
        let links = extract_archive_links(PAGE, &base());
        assert_eq!(links.len(), 6);
        assert_eq!(
            links[0].as_str(),
            "https://ehw.fit.vutbr.cz/izv/data/datagis2016.zip"
        );
    }

    #[test]
    fn anchors_are_a_fallback() {
        let html = r#"<a href="files/a2019.zip">a</a><a href="readme.txt">b</a>"#;
        let links = extract_archive_links(html, &base());
        assert_eq!(names(&links), vec!["a2019.zip"]);
    }

    #[test]
    fn periods() {
        let u = |s: &str| base().join(s).unwrap();
        assert_eq!(archive_period(&u("data/datagis2016.zip")), Some((2016, WHOLE_YEAR)));
        assert_eq!(archive_period(&u("data/datagis-09-2021.zip")), Some((2021, 9)));
        assert_eq!(archive_period(&u("data/latest.zip")), None);
    }

    #[test]
    fn newest_per_year_plus_overall_latest() {
        let links = extract_archive_links(PAGE, &base());
        let picked = select_archives(&links);
        assert_eq!(
            names(&picked),
            vec!["datagis2016.zip", "datagis2017.zip", "datagis-10-2021.zip"]
        );
    }

    #[test]
    fn last_link_is_kept_even_without_period() {
        let links: Vec<Url> = ["data/datagis2019.zip", "data/latest.zip"]
            .iter()
            .map(|s| base().join(s).unwrap())
            .collect();
        assert_eq!(names(&select_archives(&links)), vec!["datagis2019.zip", "latest.zip"]);
        assert!(select_archives(&[]).is_empty());
    }
}
