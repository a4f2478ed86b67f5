use crate::alignment::tokenization::eq_ignore_case;

/// Case-insensitive Levenshtein distance with unit costs, counted in chars.
pub fn edit_distance(a: &str, b: &str) -> usize {
    let a_chars: Vec<char> = a.to_lowercase().chars().collect();
    let b_chars: Vec<char> = b.to_lowercase().chars().collect();
    char_distance(&a_chars, &b_chars)
}

fn char_distance(a: &[char], b: &[char]) -> usize {
    let m = a.len();
    let n = b.len();
    if m == 0 {
        return n;
    }
    if n == 0 {
        return m;
    }

    let mut prev_row: Vec<usize> = (0..=n).collect();
    let mut curr_row: Vec<usize> = vec![0; n + 1];
    for i in 1..=m {
        curr_row[0] = i;
        for j in 1..=n {
            let cost = usize::from(a[i - 1] != b[j - 1]);
            curr_row[j] = (prev_row[j] + 1)
                .min(curr_row[j - 1] + 1)
                .min(prev_row[j - 1] + cost);
        }
        std::mem::swap(&mut prev_row, &mut curr_row);
    }
    prev_row[n]
}

/// `1 - distance / max_len`, in [0, 1]. Two empty words score 1.
pub fn similarity_ratio(a: &str, b: &str) -> f64 {
    let a_chars: Vec<char> = a.to_lowercase().chars().collect();
    let b_chars: Vec<char> = b.to_lowercase().chars().collect();
    let max_len = a_chars.len().max(b_chars.len());
    if max_len == 0 {
        return 1.0;
    }
    let distance = char_distance(&a_chars, &b_chars);
    1.0 - distance as f64 / max_len as f64
}

/// Fuzzy word equality: exact case-insensitive match, or a similarity ratio at
/// or above `threshold`.
pub fn are_words_similar(a: &str, b: &str, threshold: f64) -> bool {
    if eq_ignore_case(a, b) {
        return true;
    }
    similarity_ratio(a, b) >= threshold
}
