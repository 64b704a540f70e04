//! Splitting provider display names into first / middle / last.
//!
//! Display names carry credentials and generational suffixes, often with a
//! trailing comma: `"Jane A. Doe, DDS"`, `"Dr. John Smith Jr, DMD, MS"`.

use provdir_core::ParsedName;
use thiserror::Error;

/// Credentials and suffixes dropped from display names. Matching is exact
/// and case-sensitive, after comma cleanup.
pub const TITLE_VOCABULARY: &[&str] = &[
    "BDS", "BDent", "BDSc", "BScD", "BM", "MS", "MSc", "MSD", "MMSc", "MDent", "MDS", "MDentSci",
    "MCS", "MSM", "DDS", "DMD", "DClinDent", "DDSc", "DScD", "DMSc", "DDent", "PhD", "Dr.", "Jr",
    "Sr", "I", "II", "III", "IV", "V",
];

/// Why a display name could not be split.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum NameAnomaly {
    #[error("no name tokens remain after removing titles")]
    NoNameTokens,

    #[error("{count} name tokens remain after removing titles (expected 1 to 3)")]
    TooManyTokens { count: usize },
}

/// Splits `full_name` into its parts, logging and returning an all-empty
/// [`ParsedName`] when the name does not reduce to one to three tokens.
#[must_use]
pub fn parse_full_name(full_name: &str) -> ParsedName {
    try_parse_full_name(full_name).unwrap_or_else(|anomaly| {
        tracing::warn!(full_name, %anomaly, "unable to parse full name");
        ParsedName::default()
    })
}

/// Splits `full_name` into its parts.
///
/// Tokens ending in a comma lose every `,` and `.` before being checked
/// against [`TITLE_VOCABULARY`]; other tokens are compared as written. The
/// surviving tokens map by count:
///
/// | tokens | first | middle | last |
/// |--------|-------|--------|------|
/// | 3 | t0 | t1 | t2 |
/// | 2 | t0 | "" | t1 |
/// | 1 | t0 | "" | "" |
///
/// # Errors
///
/// Returns a [`NameAnomaly`] when zero or more than three tokens remain.
pub fn try_parse_full_name(full_name: &str) -> Result<ParsedName, NameAnomaly> {
    let mut names: Vec<String> = full_name
        .split_whitespace()
        .map(clean_token)
        .filter(|token| !token.is_empty() && !is_title(token))
        .collect();

    match names.len() {
        0 => Err(NameAnomaly::NoNameTokens),
        1 => Ok(ParsedName {
            first: names.remove(0),
            ..ParsedName::default()
        }),
        2 => {
            let last = names.remove(1);
            Ok(ParsedName {
                first: names.remove(0),
                middle: String::new(),
                last,
            })
        }
        3 => {
            let last = names.remove(2);
            let middle = names.remove(1);
            Ok(ParsedName {
                first: names.remove(0),
                middle,
                last,
            })
        }
        count => Err(NameAnomaly::TooManyTokens { count }),
    }
}

fn clean_token(token: &str) -> String {
    if token.ends_with(',') {
        token.chars().filter(|c| !matches!(c, ',' | '.')).collect()
    } else {
        token.to_owned()
    }
}

fn is_title(token: &str) -> bool {
    TITLE_VOCABULARY.contains(&token)
}

#[cfg(test)]
#[path = "names_test.rs"]
mod tests;
