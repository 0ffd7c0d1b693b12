//! Registry record model.
//!
//! # Responsibility
//! - Hold the five raw fields of one registry row verbatim.
//! - Hold the three formatted strings that make one outgoing reply.
//!
//! # Invariants
//! - `RawRecord` fields are plain strings; no numeric validation happens here.
//! - `CanonicalRecord::message()` is the exact reply text, with no separators
//!   added beyond what each formatted field already carries.

use serde::{Deserialize, Serialize};
use std::fmt::{Display, Formatter};

/// One registry row as returned by the lookup service.
///
/// Serialized with the registry's short keys (`n`, `o`, `i`, `p`, `a`).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RawRecord {
    /// Upper-cased legal form followed by a quoted short name.
    #[serde(rename = "n")]
    pub name: String,
    /// Primary state registration number.
    #[serde(rename = "o")]
    pub ogrn: String,
    /// Taxpayer identifier.
    #[serde(rename = "i")]
    pub inn: String,
    /// Tax-registration-reason code.
    #[serde(rename = "p")]
    pub kpp: String,
    /// `index, city, street...` in upper case.
    #[serde(rename = "a")]
    pub address: String,
}

impl RawRecord {
    pub fn new(
        name: impl Into<String>,
        ogrn: impl Into<String>,
        inn: impl Into<String>,
        kpp: impl Into<String>,
        address: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            ogrn: ogrn.into(),
            inn: inn.into(),
            kpp: kpp.into(),
            address: address.into(),
        }
    }
}

/// Display-ready strings computed from one [`RawRecord`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CanonicalRecord {
    pub final_name: String,
    pub final_numbers: String,
    pub final_address: String,
}

impl CanonicalRecord {
    /// Returns the outgoing reply text: name, numbers, then address.
    pub fn message(&self) -> String {
        let mut message = String::with_capacity(
            self.final_name.len() + self.final_numbers.len() + self.final_address.len(),
        );
        message.push_str(&self.final_name);
        message.push_str(&self.final_numbers);
        message.push_str(&self.final_address);
        message
    }

    pub fn into_message(self) -> String {
        let mut message = self.final_name;
        message.push_str(&self.final_numbers);
        message.push_str(&self.final_address);
        message
    }
}

impl Display for CanonicalRecord {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{}{}{}",
            self.final_name, self.final_numbers, self.final_address
        )
    }
}
