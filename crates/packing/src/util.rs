//! Small utilities: k-combinations and row deduplication.

/// Positional k-combinations of `items`, in lexicographic index order.
///
/// Duplicate elements are treated as distinct positions, so the result always
/// has `C(n, k)` rows. `k == 0` yields one empty row; `k > n` yields none.
pub fn combinations<T: Clone>(items: &[T], k: usize) -> Vec<Vec<T>> {
    let n = items.len();
    if k > n {
        return Vec::new();
    }
    let mut idxs: Vec<usize> = (0..k).collect();
    let mut out = Vec::new();
    loop {
        out.push(idxs.iter().map(|&i| items[i].clone()).collect());
        // Rightmost index that can still advance.
        let Some(i) = (0..k).rev().find(|&i| idxs[i] != i + n - k) else {
            break;
        };
        idxs[i] += 1;
        for j in i + 1..k {
            idxs[j] = idxs[j - 1] + 1;
        }
    }
    out
}

/// `combinations` followed by `uniqueify`.
pub fn combinations_dedup<T: Clone + PartialEq>(items: &[T], k: usize) -> Vec<Vec<T>> {
    let mut rows = combinations(items, k);
    uniqueify(&mut rows);
    rows
}

/// Remove repeated rows, keeping the first occurrence of each.
///
/// Only `PartialEq` is required, so rows of floats work too; the cost is
/// quadratic in the number of rows.
pub fn uniqueify<T: PartialEq>(rows: &mut Vec<T>) {
    let mut kept: Vec<T> = Vec::with_capacity(rows.len());
    for row in rows.drain(..) {
        if !kept.contains(&row) {
            kept.push(row);
        }
    }
    *rows = kept;
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn binomial(n: usize, k: usize) -> usize {
        if k > n {
            return 0;
        }
        (0..k).fold(1, |acc, i| acc * (n - i) / (i + 1))
    }

    /// Lexicographic reference via bitmask filtering and sorting.
    fn reference(n: usize, k: usize) -> Vec<Vec<usize>> {
        let mut rows: Vec<Vec<usize>> = (0u32..(1 << n))
            .filter(|m| m.count_ones() as usize == k)
            .map(|m| (0..n).filter(|i| m & (1 << i) != 0).collect())
            .collect();
        rows.sort();
        rows
    }

    #[test]
    fn small_fixture() {
        let rows = combinations(&['a', 'b', 'c', 'd'], 2);
        assert_eq!(
            rows,
            vec![
                vec!['a', 'b'],
                vec!['a', 'c'],
                vec!['a', 'd'],
                vec!['b', 'c'],
                vec!['b', 'd'],
                vec!['c', 'd'],
            ]
        );
    }

    #[test]
    fn edge_sizes() {
        let items = [1, 2, 3];
        assert_eq!(combinations(&items, 0), vec![Vec::<i32>::new()]);
        assert!(combinations(&items, 4).is_empty());
        assert_eq!(combinations(&items, 3), vec![vec![1, 2, 3]]);
        assert!(combinations::<i32>(&[], 1).is_empty());
    }

    #[test]
    fn duplicates_are_positional() {
        let rows = combinations(&[0, 0, 1], 2);
        assert_eq!(rows, vec![vec![0, 0], vec![0, 1], vec![0, 1]]);
        let rows = combinations_dedup(&[0, 0, 1], 2);
        assert_eq!(rows, vec![vec![0, 0], vec![0, 1]]);
    }

    #[test]
    fn uniqueify_keeps_first_occurrence() {
        let mut rows = vec![vec![2, 1], vec![1, 2], vec![2, 1], vec![3], vec![1, 2]];
        uniqueify(&mut rows);
        assert_eq!(rows, vec![vec![2, 1], vec![1, 2], vec![3]]);
    }

    proptest! {
        #[test]
        fn count_and_order_match_reference(n in 0usize..10, k in 0usize..10) {
            let items: Vec<usize> = (0..n).collect();
            let rows = combinations(&items, k);
            prop_assert_eq!(rows.len(), binomial(n, k));
            if k <= n {
                prop_assert_eq!(rows, reference(n, k));
            }
        }

        #[test]
        fn uniqueify_idempotent(
            rows in prop::collection::vec(prop::collection::vec(0u8..3, 0..3), 0..20),
        ) {
            let mut once = rows.clone();
            uniqueify(&mut once);
            let mut twice = once.clone();
            uniqueify(&mut twice);
            prop_assert_eq!(&once, &twice);
            for row in &rows {
                prop_assert!(once.contains(row));
            }
        }
    }
}
