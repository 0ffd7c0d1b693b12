//! Postal address formatting.
//!
//! # Responsibility
//! - Reorder a raw `index, city, street...` address into
//!   `street..., city, Россия, index`.
//! - Recase city and street parts and lower-case generic keywords.
//!
//! # Invariants
//! - Keyword rules are evaluated in list order; the first match wins and no
//!   other rule is applied.
//! - A matched rule emits `Адрес: ` with a space, the fallback emits `Адрес:`
//!   without one.
//! - Keywords match full title-cased words only (`Улица`, not `Ул`).

use crate::normalize::casing::title_case;
use std::error::Error;
use std::fmt::{Display, Formatter};

/// Separator between raw address segments.
pub const SEGMENT_SEPARATOR: &str = ", ";

const COUNTRY: &str = "Россия";
const CITY_WORD: &str = "Город";
const CITY_WORD_LOWER: &str = "город";

/// Default keyword rules, highest priority first.
pub const DEFAULT_KEYWORD_RULES: &[KeywordRule] = &[
    KeywordRule::strip_with_prefix("Улица", "улица "),
    KeywordRule::lowercase("Набережная"),
    KeywordRule::lowercase("Переулок"),
];

/// Raw address does not have the segments the formatter indexes into.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AddressShapeError {
    /// Fewer than two segments: no city after the postal index.
    MissingCity { segments: usize },
    /// Only postal index and city: no street segments to format.
    MissingStreet,
}

impl Display for AddressShapeError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::MissingCity { segments } => write!(
                f,
                "address has {segments} segment(s); expected postal index, city and street"
            ),
            Self::MissingStreet => write!(f, "address has no street segments after the city"),
        }
    }
}

impl Error for AddressShapeError {}

/// How a matched keyword is rewritten inside the street portion.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeywordRewrite {
    /// Replace every occurrence with one space and put `prefix` before the body.
    StripWithPrefix { prefix: &'static str },
    /// Lower-case every occurrence in place.
    Lowercase,
}

/// One (keyword, rewrite) pair of the ordered rule list.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct KeywordRule {
    pub keyword: &'static str,
    pub rewrite: KeywordRewrite,
}

impl KeywordRule {
    pub const fn strip_with_prefix(keyword: &'static str, prefix: &'static str) -> Self {
        Self {
            keyword,
            rewrite: KeywordRewrite::StripWithPrefix { prefix },
        }
    }

    pub const fn lowercase(keyword: &'static str) -> Self {
        Self {
            keyword,
            rewrite: KeywordRewrite::Lowercase,
        }
    }

    /// Returns the rewritten street body, or `None` when the keyword is absent.
    pub fn apply(&self, street: &str) -> Option<String> {
        if !street.contains(self.keyword) {
            return None;
        }
        let body = match self.rewrite {
            KeywordRewrite::StripWithPrefix { prefix } => {
                format!("{prefix}{}", street.replace(self.keyword, " "))
            }
            KeywordRewrite::Lowercase => {
                street.replace(self.keyword, self.keyword.to_lowercase().as_str())
            }
        };
        Some(body)
    }
}

/// Formats a raw address with [`DEFAULT_KEYWORD_RULES`].
pub fn format_address(raw: &str) -> Result<String, AddressShapeError> {
    format_address_with(raw, DEFAULT_KEYWORD_RULES)
}

/// Formats a raw address with a caller-supplied ordered rule list.
///
/// # Errors
/// - [`AddressShapeError::MissingCity`] for fewer than two segments.
/// - [`AddressShapeError::MissingStreet`] for exactly two segments.
pub fn format_address_with(raw: &str, rules: &[KeywordRule]) -> Result<String, AddressShapeError> {
    let segments: Vec<&str> = raw.split(SEGMENT_SEPARATOR).collect();
    let (index, city, street) = match segments.as_slice() {
        [index, city, street @ ..] if !street.is_empty() => (*index, *city, street),
        [_, _] => return Err(AddressShapeError::MissingStreet),
        _ => {
            return Err(AddressShapeError::MissingCity {
                segments: segments.len(),
            })
        }
    };

    let city = title_case(city).replace(CITY_WORD, CITY_WORD_LOWER);
    let street = title_case(street.join(" ").as_str());

    let formatted = match rules.iter().find_map(|rule| rule.apply(&street)) {
        Some(body) => format!("Адрес: {body}, {city}, {COUNTRY}, {index}"),
        None => format!("Адрес:{street}, {city}, {COUNTRY}, {index}"),
    };
    Ok(formatted)
}
