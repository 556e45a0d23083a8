//! Named string transformations applied to extracted text
//!
//! The storefront encodes a few structural facts in fixed-width string
//! surgery; each one lives here under a name instead of inline offsets.

/// Length of the `../../../` prefix on product hrefs in category listings
pub const PRODUCT_HREF_PREFIX_LEN: usize = 9;

/// Length of the `../..` prefix on product image sources, which leaves the
/// `/media/...` path in place
pub const IMAGE_SRC_PREFIX_LEN: usize = 5;

/// Drops the first `len` characters of `text`
///
/// The prefix is not inspected; an input shorter than `len` yields "".
pub fn strip_known_prefix(text: &str, len: usize) -> &str {
    match text.char_indices().nth(len) {
        Some((offset, _)) => &text[offset..],
        None => "",
    }
}

/// Drops exactly the first and the last character of `text`
///
/// Breadcrumb items carry one wrapping character on each side.
pub fn strip_enclosing_chars(text: &str) -> &str {
    let inner = strip_known_prefix(text, 1);
    match inner.char_indices().last() {
        Some((offset, _)) => &inner[..offset],
        None => "",
    }
}

/// Drops the single leading currency symbol of a price cell
pub fn strip_currency_symbol(text: &str) -> &str {
    strip_known_prefix(text, 1)
}

/// Returns the first run of ASCII digits in `text`
pub fn first_digit_run(text: &str) -> Option<&str> {
    let start = text.find(|c: char| c.is_ascii_digit())?;
    let rest = &text[start..];
    let end = rest
        .find(|c: char| !c.is_ascii_digit())
        .unwrap_or(rest.len());
    Some(&rest[..end])
}

/// Parses a stock cell such as `In stock (22 available)` into its count
pub fn parse_stock_count(text: &str) -> Result<u32, String> {
    let digits =
        first_digit_run(text).ok_or_else(|| format!("no digits found in '{}'", text.trim()))?;
    digits
        .parse::<u32>()
        .map_err(|e| format!("'{}' is not a valid count: {}", digits, e))
}

/// Converts an English cardinal word to a star rating in `1..=5`
///
/// Matching is case-insensitive; any other word, including "zero", is rejected.
pub fn rating_from_word(word: &str) -> Option<u8> {
    match word.to_ascii_lowercase().as_str() {
        "one" => Some(1),
        "two" => Some(2),
        "three" => Some(3),
        "four" => Some(4),
        "five" => Some(5),
        _ => None,
    }
}
