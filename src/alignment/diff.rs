use crate::types::EditOp;

/// Fuzzy LCS over two word lists, returned as ascending `(old_idx, new_idx)` pairs.
///
/// `matches` replaces `==` in the classic recurrence. Backtracking takes the
/// diagonal whenever the pair matches; otherwise it moves to the neighbour with
/// the longer subsequence and, on a tie, decrements the old index. The tie-break
/// only picks which of several maximal alignments is returned.
pub fn lcs_pairs<F>(old: &[&str], new: &[&str], matches: F) -> Vec<(usize, usize)>
where
    F: Fn(&str, &str) -> bool,
{
    let m = old.len();
    let n = new.len();
    if m == 0 || n == 0 {
        return Vec::new();
    }

    // Match results are reused by the backtrack, so evaluate the predicate once per cell.
    let mut matched = vec![false; m * n];
    for (i, &old_word) in old.iter().enumerate() {
        for (j, &new_word) in new.iter().enumerate() {
            matched[i * n + j] = matches(old_word, new_word);
        }
    }

    let width = n + 1;
    let mut table = vec![0usize; (m + 1) * width];
    for i in 1..=m {
        for j in 1..=n {
            table[i * width + j] = if matched[(i - 1) * n + (j - 1)] {
                table[(i - 1) * width + (j - 1)] + 1
            } else {
                table[(i - 1) * width + j].max(table[i * width + (j - 1)])
            };
        }
    }

    let mut pairs = Vec::with_capacity(table[m * width + n]);
    let (mut i, mut j) = (m, n);
    while i > 0 && j > 0 {
        if matched[(i - 1) * n + (j - 1)] {
            pairs.push((i - 1, j - 1));
            i -= 1;
            j -= 1;
        } else if table[(i - 1) * width + j] >= table[i * width + (j - 1)] {
            i -= 1;
        } else {
            j -= 1;
        }
    }
    pairs.reverse();
    pairs
}

/// Edit script turning `old` into `new`.
///
/// Words that sit between two matched pairs on both sides are emitted as
/// one-for-one `Replace` steps, so a changed word inherits the slot of the word
/// it replaced instead of becoming a delete plus an insert.
pub fn diff_words<F>(old: &[&str], new: &[&str], matches: F) -> Vec<EditOp>
where
    F: Fn(&str, &str) -> bool,
{
    let pairs = lcs_pairs(old, new, matches);
    build_script(&pairs, old.len(), new.len())
}

pub(crate) fn build_script(pairs: &[(usize, usize)], old_len: usize, new_len: usize) -> Vec<EditOp> {
    let mut script = Vec::with_capacity(old_len.max(new_len));
    let mut next_pair = pairs.iter().copied().peekable();
    let (mut old_idx, mut new_idx) = (0usize, 0usize);

    while old_idx < old_len || new_idx < new_len {
        let (pair_old, pair_new) = next_pair.peek().copied().unwrap_or((old_len, new_len));

        if (old_idx, new_idx) == (pair_old, pair_new) {
            script.push(EditOp::Keep {
                old: old_idx,
                new: new_idx,
            });
            next_pair.next();
            old_idx += 1;
            new_idx += 1;
        } else if old_idx < pair_old && new_idx < pair_new {
            script.push(EditOp::Replace {
                old: old_idx,
                new: new_idx,
            });
            old_idx += 1;
            new_idx += 1;
        } else if old_idx < pair_old {
            script.push(EditOp::Delete { old: old_idx });
            old_idx += 1;
        } else {
            debug_assert!(new_idx < pair_new, "diff cursor overran a matched pair");
            script.push(EditOp::Insert { new: new_idx });
            new_idx += 1;
        }
    }

    script
}
