// Columnar transposition: write row by row, read columns in keyword order

use kana_core::Alphabet;

use crate::adapter;

/// Keyword used when the supplied one has no member symbols.
pub const DEFAULT_KEYWORD: &str = "ひみつ";

/// Column read order derived from a keyword.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ColumnarKey {
    order: Vec<usize>,
}

impl ColumnarKey {
    /// One column per member symbol of `keyword`. Columns are read in the
    /// alphabet order of their key symbol; equal symbols keep their
    /// left-to-right position.
    pub fn new(alphabet: &Alphabet, keyword: &str) -> Self {
        let mut indices = adapter::member_indices(alphabet, keyword);
        if indices.is_empty() {
            tracing::debug!(keyword, "columnar keyword has no member symbols, using default");
            indices = adapter::member_indices(alphabet, DEFAULT_KEYWORD);
        }
        Self {
            order: column_order(&indices),
        }
    }

    /// Number of columns.
    pub fn width(&self) -> usize {
        self.order.len()
    }

    /// Original column positions in the order they are read.
    pub fn order(&self) -> &[usize] {
        &self.order
    }
}

/// Stable argsort of the key indices.
pub fn column_order(key: &[usize]) -> Vec<usize> {
    let mut order: Vec<usize> = (0..key.len()).collect();
    order.sort_by_key(|&col| key[col]);
    order
}

pub fn encrypt<T: Copy>(items: &[T], order: &[usize]) -> Vec<T> {
    let cols = order.len();
    if cols <= 1 {
        return items.to_vec();
    }
    order
        .iter()
        .flat_map(|&col| items.iter().skip(col).step_by(cols).copied())
        .collect()
}

pub fn decrypt<T: Copy>(items: &[T], order: &[usize]) -> Vec<T> {
    let cols = order.len();
    let n = items.len();
    if cols <= 1 || n <= 1 {
        return items.to_vec();
    }
    let full_rows = n / cols;
    let remainder = n % cols;
    // The short last row only reaches the first `remainder` columns.
    let col_len = |col: usize| full_rows + usize::from(col < remainder);

    let mut out: Vec<Option<T>> = vec![None; n];
    let mut next = 0;
    for &col in order {
        for row in 0..col_len(col) {
            out[row * cols + col] = Some(items[next]);
            next += 1;
        }
    }
    out.into_iter().flatten().collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    const G: Alphabet = Alphabet::GOJUON;

    fn positions(n: usize) -> Vec<usize> {
        (0..n).collect()
    }

    #[test]
    fn default_keyword_order() {
        // ひ(26) み(31) つ(17): つ first, then ひ, then み.
        let key = ColumnarKey::new(&G, DEFAULT_KEYWORD);
        assert_eq!(key.order(), &[2, 0, 1]);
        assert_eq!(key.width(), 3);
    }

    #[test]
    fn keyword_without_members_falls_back() {
        assert_eq!(ColumnarKey::new(&G, "abc"), ColumnarKey::new(&G, DEFAULT_KEYWORD));
        assert_eq!(ColumnarKey::new(&G, ""), ColumnarKey::new(&G, DEFAULT_KEYWORD));
    }

    #[test]
    fn katakana_keyword_is_normalized() {
        assert_eq!(ColumnarKey::new(&G, "ヒミツ"), ColumnarKey::new(&G, "ひみつ"));
    }

    #[test]
    fn ties_keep_column_position() {
        assert_eq!(column_order(&[5, 1, 5, 1]), vec![1, 3, 0, 2]);
    }

    #[test]
    fn encrypt_reads_columns_in_order() {
        let out = encrypt(&positions(11), &[2, 0, 1]);
        assert_eq!(out, vec![2, 5, 8, 0, 3, 6, 9, 1, 4, 7, 10]);
    }

    #[test]
    fn round_trip_exact_multiple_and_remainder() {
        for order in [vec![2, 0, 1], vec![3, 1, 0, 2], vec![0, 4, 1, 3, 2]] {
            for n in 0..40 {
                let items = positions(n);
                assert_eq!(
                    decrypt(&encrypt(&items, &order), &order),
                    items,
                    "n={n} order={order:?}"
                );
            }
        }
    }

    #[test]
    fn single_column_is_identity() {
        let items = positions(7);
        assert_eq!(encrypt(&items, &[0]), items);
        assert_eq!(decrypt(&items, &[0]), items);
        let key = ColumnarKey::new(&G, "か");
        assert_eq!(key.width(), 1);
    }
}
