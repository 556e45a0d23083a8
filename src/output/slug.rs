//! Filesystem-safe names for categories and product titles

/// Used when a display string contains nothing slug-worthy
const EMPTY_SLUG: &str = "untitled";

/// Converts a display string to a lowercase, hyphen-separated slug
///
/// Common accented Latin letters are folded to ASCII; every other run of
/// non-alphanumeric characters becomes a single `-`.
///
/// # Examples
///
/// ```
/// use shelf_harvest::output::slugify;
///
/// assert_eq!(slugify("Historical Fiction"), "historical-fiction");
/// assert_eq!(slugify("It's Only the Himalayas"), "it-s-only-the-himalayas");
/// ```
pub fn slugify(text: &str) -> String {
    let mut slug = String::with_capacity(text.len());
    let mut pending_separator = false;

    for c in text.chars() {
        let lower = c.to_ascii_lowercase();
        let folded = if lower.is_ascii_alphanumeric() {
            None
        } else {
            match fold_latin(c) {
                Some(ascii) => Some(ascii),
                None => {
                    pending_separator = true;
                    continue;
                }
            }
        };

        if pending_separator && !slug.is_empty() {
            slug.push('-');
        }
        pending_separator = false;

        match folded {
            Some(ascii) => slug.push_str(ascii),
            None => slug.push(lower),
        }
    }

    if slug.is_empty() {
        EMPTY_SLUG.to_string()
    } else {
        slug
    }
}

/// Returns the ASCII spelling of an accented Latin letter
fn fold_latin(c: char) -> Option<&'static str> {
    let ascii = match c {
        'à' | 'á' | 'â' | 'ã' | 'ä' | 'å' | 'À' | 'Á' | 'Â' | 'Ã' | 'Ä' | 'Å' => "a",
        'æ' | 'Æ' => "ae",
        'ç' | 'Ç' => "c",
        'è' | 'é' | 'ê' | 'ë' | 'È' | 'É' | 'Ê' | 'Ë' => "e",
        'ì' | 'í' | 'î' | 'ï' | 'Ì' | 'Í' | 'Î' | 'Ï' => "i",
        'ñ' | 'Ñ' => "n",
        'ò' | 'ó' | 'ô' | 'õ' | 'ö' | 'ø' | 'Ò' | 'Ó' | 'Ô' | 'Õ' | 'Ö' | 'Ø' => "o",
        'œ' | 'Œ' => "oe",
        'ß' => "ss",
        'ù' | 'ú' | 'û' | 'ü' | 'Ù' | 'Ú' | 'Û' | 'Ü' => "u",
        'ý' | 'ÿ' | 'Ý' => "y",
        _ => return None,
    };
    Some(ascii)
}

/// Returns at most the first `max_chars` characters of `text`
pub fn truncate_chars(text: &str, max_chars: usize) -> &str {
    match text.char_indices().nth(max_chars) {
        Some((offset, _)) => &text[..offset],
        None => text,
    }
}
