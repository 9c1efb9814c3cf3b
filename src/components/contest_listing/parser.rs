use super::models::Contest;
use super::time::{parse_duration, parse_start_time};
use crate::error::{listing_error, AppResult};
use scraper::{ElementRef, Html, Selector};
use tracing::{debug, warn};
use url::Url;

/// Contest type whose rows are left out of the calendar
const SKIPPED_CONTEST_TYPE: &str = "Heuristic";

struct Selectors {
    row: Selector,
    cell: Selector,
    link: Selector,
    type_icon: Selector,
}

impl Selectors {
    fn new() -> AppResult<Self> {
        Ok(Self {
            row: selector("#contest-table-upcoming tbody tr")?,
            cell: selector("td")?,
            link: selector("a")?,
            type_icon: selector("span")?,
        })
    }
}

fn selector(css: &str) -> AppResult<Selector> {
    Selector::parse(css).map_err(|e| listing_error(&format!("Invalid selector '{}': {}", css, e)))
}

/// Parse the upcoming contest table.
///
/// Rows that cannot be parsed are logged and skipped. A page without the
/// upcoming table is an error.
pub fn parse_upcoming(html: &str, base_url: &Url) -> AppResult<Vec<Contest>> {
    let selectors = Selectors::new()?;
    let document = Html::parse_document(html);

    let table = selector("#contest-table-upcoming")?;
    if document.select(&table).next().is_none() {
        return Err(listing_error("Upcoming contest table not found"));
    }

    let mut contests = Vec::new();
    for (index, row) in document.select(&selectors.row).enumerate() {
        match parse_row(row, &selectors, base_url) {
            Ok(Some(contest)) => contests.push(contest),
            Ok(None) => {}
            Err(e) => warn!("Failed to parse contest row {}: {}", index, e),
        }
    }

    Ok(contests)
}

/// Parse one table row; `None` for contests that are deliberately skipped
fn parse_row(row: ElementRef, selectors: &Selectors, base_url: &Url) -> AppResult<Option<Contest>> {
    let cells: Vec<ElementRef> = row.select(&selectors.cell).collect();
    if cells.len() < 4 {
        return Err(listing_error(&format!("Expected 4 columns, found {}", cells.len())));
    }

    if let Some(contest_type) = contest_type(cells[1], selectors) {
        if contest_type == SKIPPED_CONTEST_TYPE {
            debug!("Skipping {} contest", contest_type);
            return Ok(None);
        }
    }

    let start_text = text_of(cells[0]);
    let start = parse_start_time(&start_text)
        .ok_or_else(|| listing_error(&format!("Invalid start time '{}'", start_text)))?;

    let link = cells[1]
        .select(&selectors.link)
        .next()
        .ok_or_else(|| listing_error("Contest link not found"))?;
    let name = text_of(link);
    let href = link
        .value()
        .attr("href")
        .ok_or_else(|| listing_error(&format!("Contest '{}' has no link", name)))?;
    let url = base_url
        .join(href)
        .map_err(|e| listing_error(&format!("Invalid contest link '{}': {}", href, e)))?;

    let duration_text = text_of(cells[2]);
    let duration = parse_duration(&duration_text)
        .ok_or_else(|| listing_error(&format!("Invalid duration '{}'", duration_text)))?;

    let rated = text_of(cells[3]);
    let code = series_code(&url);

    Contest::new(name, url.to_string(), start, duration, rated, code).map(Some)
}

/// Contest type from the tooltip of the icon in the name column
fn contest_type<'a>(cell: ElementRef<'a>, selectors: &Selectors) -> Option<&'a str> {
    cell.select(&selectors.type_icon).find_map(|span| {
        let element = span.value();
        element
            .attr("data-original-title")
            .or_else(|| element.attr("title"))
    })
}

fn text_of(element: ElementRef) -> String {
    element
        .text()
        .collect::<String>()
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
}

/// Series codes that get their own calendar color
const SERIES: [&str; 3] = ["abc", "arc", "agc"];

/// Series of the contest slug, `/contests/abc340` gives `ABC`
pub fn series_code(url: &Url) -> Option<String> {
    let slug = url.path_segments()?.filter(|s| !s.is_empty()).last()?;
    let prefix: String = slug
        .chars()
        .take_while(|c| c.is_ascii_alphabetic())
        .collect::<String>()
        .to_ascii_lowercase();
    SERIES
        .contains(&prefix.as_str())
        .then(|| prefix.to_ascii_uppercase())
}
