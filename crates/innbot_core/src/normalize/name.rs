//! Legal name formatting.

/// Delimiter between the legal-form prefix and the short name.
pub const NAME_QUOTE: char = '"';

/// Formats a raw legal name as `<legal form>«<short name>» `.
///
/// The part before the first quotation mark is the legal form and is
/// lower-cased. The rest is the short name with its case kept and any further
/// quotation marks dropped. A name without quotes is treated as a bare legal
/// form with an empty short name.
pub fn format_name(raw: &str) -> String {
    let (legal_form, rest) = raw.split_once(NAME_QUOTE).unwrap_or((raw, ""));
    let short_name: String = rest.chars().filter(|c| *c != NAME_QUOTE).collect();
    format!("{}«{}» ", legal_form.to_lowercase(), short_name)
}
