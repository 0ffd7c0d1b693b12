//! Record normalizer orchestrating the three field formatters.

use crate::model::record::{CanonicalRecord, RawRecord};
use crate::normalize::address::{
    format_address_with, AddressShapeError, KeywordRule, DEFAULT_KEYWORD_RULES,
};
use crate::normalize::name::format_name;
use crate::normalize::numbers::format_numbers;
use std::error::Error;
use std::fmt::{Display, Formatter};

/// Failure to normalize one raw record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NormalizeError {
    Address(AddressShapeError),
}

impl Display for NormalizeError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Address(err) => write!(f, "cannot format address: {err}"),
        }
    }
}

impl Error for NormalizeError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Address(err) => Some(err),
        }
    }
}

impl From<AddressShapeError> for NormalizeError {
    fn from(value: AddressShapeError) -> Self {
        Self::Address(value)
    }
}

/// Converts [`RawRecord`] values into [`CanonicalRecord`] display strings.
///
/// Holds only the immutable address rule list, so one instance can be shared
/// across threads and reused for any number of records.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecordNormalizer {
    address_rules: Vec<KeywordRule>,
}

impl Default for RecordNormalizer {
    fn default() -> Self {
        Self::with_rules(DEFAULT_KEYWORD_RULES.to_vec())
    }
}

impl RecordNormalizer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a normalizer with a custom address rule list (priority order).
    pub fn with_rules(address_rules: Vec<KeywordRule>) -> Self {
        Self { address_rules }
    }

    pub fn address_rules(&self) -> &[KeywordRule] {
        &self.address_rules
    }

    /// Formats all three fields of `record`.
    ///
    /// # Errors
    /// - Returns [`NormalizeError::Address`] when the raw address has no city
    ///   or street segments.
    pub fn normalize(&self, record: &RawRecord) -> Result<CanonicalRecord, NormalizeError> {
        let final_name = format_name(&record.name);
        let final_numbers = format_numbers(&record.ogrn, &record.inn, &record.kpp);
        let final_address = format_address_with(&record.address, &self.address_rules)?;
        Ok(CanonicalRecord {
            final_name,
            final_numbers,
            final_address,
        })
    }
}
