/// Split caption text into words on runs of whitespace. Empty strings are never emitted.
pub fn split_words(text: &str) -> Vec<&str> {
    text.split_whitespace().collect()
}

/// True when both texts have the same words in the same order, ignoring case.
pub fn same_words_ignore_case(old_text: &str, new_text: &str) -> bool {
    let mut old_words = old_text.split_whitespace();
    let mut new_words = new_text.split_whitespace();
    loop {
        match (old_words.next(), new_words.next()) {
            (None, None) => return true,
            (Some(a), Some(b)) if eq_ignore_case(a, b) => continue,
            _ => return false,
        }
    }
}

/// Case-insensitive equality over full Unicode lowercasing.
pub fn eq_ignore_case(a: &str, b: &str) -> bool {
    if a.is_ascii() && b.is_ascii() {
        return a.eq_ignore_ascii_case(b);
    }
    a.to_lowercase() == b.to_lowercase()
}
