//! Provider profile page → [`ProviderRecord`].
//!
//! Only the name block is mandatory. Every other section is read on a
//! best-effort basis: a missing or malformed section contributes empty
//! fields instead of failing the record.

use std::sync::LazyLock;

use provdir_core::{InsuranceAcceptance, ParsedAddress, ProviderRecord};
use scraper::{ElementRef, Html, Selector};

use crate::address::parse_address;
use crate::error::ScraperError;
use crate::names::parse_full_name;

// Selector strings are constants; `Selector::parse` only fails on invalid CSS.
fn selector(css: &'static str) -> Selector {
    Selector::parse(css).unwrap_or_else(|e| panic!("invalid selector {css:?}: {e}"))
}

static NAME: LazyLock<Selector> = LazyLock::new(|| selector("div.ProviderLeadStyleTwo-title"));
static INSURANCE_LIST: LazyLock<Selector> =
    LazyLock::new(|| selector("ul.ProviderInsuranceAccepted-description"));
static LIST_ITEM: LazyLock<Selector> = LazyLock::new(|| selector("li"));
static LABEL: LazyLock<Selector> = LazyLock::new(|| selector("label"));
static ARTICLE: LazyLock<Selector> = LazyLock::new(|| selector("article"));
static DIV: LazyLock<Selector> = LazyLock::new(|| selector("div"));
static ADDRESS: LazyLock<Selector> = LazyLock::new(|| selector("address"));
static SPAN: LazyLock<Selector> = LazyLock::new(|| selector("span"));
static SPECIALTY: LazyLock<Selector> =
    LazyLock::new(|| selector("div.ProviderAboutStatsItem-list-box-item"));
static CONTACT_BLOCK: LazyLock<Selector> =
    LazyLock::new(|| selector("div.ProviderLocationsModuleAlternative-buttons"));
static PHONE_LINK: LazyLock<Selector> =
    LazyLock::new(|| selector(r#"a[data-analytics="make-appointment__phone--existing"]"#));

/// Parses a profile page and extracts its record.
///
/// # Errors
///
/// Returns [`ScraperError::MissingField`] if the page has no name block.
pub fn extract_record(html: &str) -> Result<ProviderRecord, ScraperError> {
    let document = Html::parse_document(html);
    extract_from_document(&document)
}

/// Extracts a record from an already-parsed profile page. Read-only: the
/// same document always yields the same record.
///
/// # Errors
///
/// Returns [`ScraperError::MissingField`] if the page has no name block.
pub fn extract_from_document(document: &Html) -> Result<ProviderRecord, ScraperError> {
    let name_el = document
        .select(&NAME)
        .next()
        .ok_or(ScraperError::MissingField { field: "name" })?;
    let full_name_raw = strip_line_breaks(&element_text(name_el)).trim().to_string();
    let name = parse_full_name(&full_name_raw);

    Ok(ProviderRecord {
        name,
        full_name_raw,
        addresses: extract_addresses(document),
        specialties: extract_specialties(document),
        phone_numbers: extract_phone_numbers(document),
        insurances: extract_insurances(document),
    })
}

fn extract_insurances(document: &Html) -> InsuranceAcceptance {
    let mut acceptance = InsuranceAcceptance::new();
    let Some(list) = document.select(&INSURANCE_LIST).next() else {
        return acceptance;
    };

    for item in list.select(&LIST_ITEM) {
        let Some(label_el) = item.select(&LABEL).next() else {
            tracing::debug!("insurance item has no label; skipping");
            continue;
        };
        let label = element_text(label_el).trim().to_string();

        // No article resets the label; an article without divs adds nothing.
        match item.select(&ARTICLE).next() {
            Some(article) => {
                for div in article.select(&DIV) {
                    acceptance.push_detail(&label, element_text(div).trim().to_string());
                }
            }
            None => acceptance.insert_label_only(&label),
        }
    }

    acceptance
}

fn extract_addresses(document: &Html) -> Vec<ParsedAddress> {
    document
        .select(&ADDRESS)
        .filter_map(|block| {
            let span = block.select(&SPAN).nth(1);
            if span.is_none() {
                tracing::debug!("address block has no second span; skipping");
            }
            span
        })
        .map(|span| parse_address(&element_text(span)))
        .collect()
}

fn extract_specialties(document: &Html) -> Vec<String> {
    document
        .select(&SPECIALTY)
        .map(|item| strip_line_breaks(&element_text(item)).trim().to_string())
        .collect()
}

fn extract_phone_numbers(document: &Html) -> Vec<String> {
    document
        .select(&CONTACT_BLOCK)
        .filter_map(|block| {
            // Only anchors whose data-phone is missing or empty.
            block
                .select(&PHONE_LINK)
                .find(|link| link.value().attr("data-phone").is_none_or(str::is_empty))
        })
        .filter_map(|link| link.value().attr("href"))
        .map(|href| {
            let href = href.trim();
            href.strip_prefix("tel:").unwrap_or(href).trim().to_string()
        })
        .filter(|number| !number.is_empty())
        .collect()
}

fn element_text(element: ElementRef<'_>) -> String {
    element.text().collect()
}

fn strip_line_breaks(text: &str) -> String {
    text.chars().filter(|c| !matches!(c, '\n' | '\r')).collect()
}

#[cfg(test)]
#[path = "extract_test.rs"]
mod tests;
