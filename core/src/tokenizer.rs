use unicode_normalization::char::is_combining_mark;
use unicode_normalization::UnicodeNormalization;

/// Letters that carry no combining mark under decomposition but still have a plain-ASCII
/// spelling.
fn fold_letter(c: char) -> Option<&'static str> {
    Some(match c {
        'ß' => "ss",
        'æ' => "ae",
        'œ' => "oe",
        'ø' => "o",
        'đ' | 'ð' => "d",
        'ł' => "l",
        'þ' => "th",
        'ı' => "i",
        _ => return None,
    })
}

/// Lowercase a term and fold accented letters to their unaccented form ("Café" -> "cafe").
///
/// Indexing and querying both go through this function, so the two sides always agree.
/// Applying it twice gives the same result as applying it once.
pub fn normalize(term: &str) -> String {
    let mut folded = String::with_capacity(term.len());
    for c in term.to_lowercase().nfkd().filter(|c| !is_combining_mark(*c)) {
        match fold_letter(c) {
            Some(s) => folded.push_str(s),
            None => folded.push(c),
        }
    }
    folded.to_lowercase()
}

/// Split on whitespace and normalize each piece. Pieces that normalize to nothing are skipped.
pub fn tokenize(text: &str) -> Vec<String> {
    text.split_whitespace()
        .map(normalize)
        .filter(|t| !t.is_empty())
        .collect()
}
