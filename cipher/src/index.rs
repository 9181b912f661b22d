use std::collections::HashMap;

/// Per-character occurrence lists of a reference text, built once per
/// `encode`/`decode` call so that nearest-occurrence lookups are a binary
/// search instead of a linear scan of the whole text for every character.
pub(crate) struct CharIndex {
    occurrences: HashMap<char, Vec<usize>>,
}

impl CharIndex {
    /// Indexes every character of `reference` by its 0-based position. Each
    /// per-character vector is naturally sorted ascending because the
    /// reference is walked left to right.
    pub(crate) fn build(reference: &[char]) -> Self {
        let mut occurrences: HashMap<char, Vec<usize>> = HashMap::new();
        for (idx, &ch) in reference.iter().enumerate() {
            occurrences.entry(ch).or_default().push(idx);
        }
        Self { occurrences }
    }

    /// Returns the sorted occurrence list for `ch`, or `None` if it never
    /// appears in the reference text.
    pub(crate) fn occurrences(&self, ch: char) -> Option<&[usize]> {
        self.occurrences.get(&ch).map(Vec::as_slice)
    }

    /// Finds the index in `occurrences` nearest to `anchor`. Ties are broken
    /// in favor of the larger (more forward) index. `occurrences` must be
    /// sorted ascending and non-empty.
    pub(crate) fn nearest(&self, occurrences: &[usize], anchor: i64) -> usize {
        let point = occurrences.partition_point(|&idx| (idx as i64) < anchor);

        let above = occurrences.get(point).copied();
        let below = point.checked_sub(1).and_then(|i| occurrences.get(i)).copied();

        match (below, above) {
            (None, Some(a)) => a,
            (Some(b), None) => b,
            (Some(b), Some(a)) => {
                let dist_below = anchor - b as i64;
                let dist_above = a as i64 - anchor;
                if dist_above <= dist_below {
                    a
                } else {
                    b
                }
            }
            (None, None) => unreachable!("occurrences must be non-empty"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn nearest_picks_closer_side() {
        let chars: Vec<char> = "a..a....a".chars().collect();
        let index = CharIndex::build(&chars);
        let occ = index.occurrences('a').unwrap();
        assert_eq!(occ, &[0, 3, 8]);
        assert_eq!(index.nearest(occ, 4), 3);
        assert_eq!(index.nearest(occ, 6), 8);
    }

    #[test]
    fn nearest_tie_prefers_forward_index() {
        let chars: Vec<char> = "a?a".chars().collect();
        let index = CharIndex::build(&chars);
        let occ = index.occurrences('a').unwrap();
        assert_eq!(index.nearest(occ, 1), 2);
    }

    #[test]
    fn nearest_with_single_occurrence() {
        let chars: Vec<char> = "xyz".chars().collect();
        let index = CharIndex::build(&chars);
        let occ = index.occurrences('y').unwrap();
        assert_eq!(index.nearest(occ, 0), 1);
        assert_eq!(index.nearest(occ, 100), 1);
    }
}
