//! Word-start casing helpers shared by formatters.

/// Upper-cases the first cased character of every word and lower-cases the rest.
///
/// A word starts after any character without case (space, digit, hyphen,
/// punctuation), so `1-Я УЛИЦА` becomes `1-Я Улица`. Titlecase letters such
/// as `ǅ` count as cased and start a word in their titlecase form.
pub fn title_case(value: &str) -> String {
    let mut out = String::with_capacity(value.len());
    let mut prev_cased = false;
    for c in value.chars() {
        if prev_cased {
            out.extend(c.to_lowercase());
        } else if let Some(title) = to_titlecase(c) {
            out.push(title);
        } else {
            out.extend(c.to_uppercase());
        }
        prev_cased = is_cased(c);
    }
    out
}

fn is_cased(c: char) -> bool {
    c.is_uppercase() || c.is_lowercase() || is_titlecase(c)
}

/// Letters of general category Lt.
fn is_titlecase(c: char) -> bool {
    matches!(
        c,
        '\u{01C5}'
            | '\u{01C8}'
            | '\u{01CB}'
            | '\u{01F2}'
            | '\u{1F88}'..='\u{1F8F}'
            | '\u{1F98}'..='\u{1F9F}'
            | '\u{1FA8}'..='\u{1FAF}'
            | '\u{1FBC}'
            | '\u{1FCC}'
            | '\u{1FFC}'
    )
}

/// Titlecase mapping for characters whose titlecase differs from uppercase.
fn to_titlecase(c: char) -> Option<char> {
    let title = match c {
        '\u{01C4}'..='\u{01C6}' => '\u{01C5}',
        '\u{01C7}'..='\u{01C9}' => '\u{01C8}',
        '\u{01CA}'..='\u{01CC}' => '\u{01CB}',
        '\u{01F1}'..='\u{01F3}' => '\u{01F2}',
        '\u{1F80}'..='\u{1F87}' | '\u{1F90}'..='\u{1F97}' | '\u{1FA0}'..='\u{1FA7}' => {
            char::from_u32(c as u32 + 8)?
        }
        '\u{1FB3}' => '\u{1FBC}',
        '\u{1FC3}' => '\u{1FCC}',
        '\u{1FF3}' => '\u{1FFC}',
        c if is_titlecase(c) => c,
        _ => return None,
    };
    Some(title)
}
