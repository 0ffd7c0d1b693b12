//! Registration numbers block.

/// Renders `(ОГРН <ogrn>, ИНН <inn>, КПП <kpp>)` followed by a blank line.
///
/// Values are passed through verbatim; no digit or length checks.
pub fn format_numbers(ogrn: &str, inn: &str, kpp: &str) -> String {
    format!("(ОГРН {ogrn}, ИНН {inn}, КПП {kpp})\n\n")
}
