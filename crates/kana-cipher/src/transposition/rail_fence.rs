// Rail fence: write items in a bouncing zigzag over R rails, read rail by rail

/// Rail visited by the item at `pos` (zigzag 0, 1, .., R-1, R-2, .., 1, 0, ..).
///
/// `rails` must be at least 2.
fn rail_of(pos: usize, rails: usize) -> usize {
    let cycle = 2 * (rails - 1);
    let phase = pos % cycle;
    if phase < rails { phase } else { cycle - phase }
}

/// Number of items each rail receives for a sequence of length `n`.
///
/// One zigzag cycle has `2(R-1)` positions: the top and bottom rails are
/// visited once per cycle, every middle rail twice (at phases `r` and
/// `cycle - r`). The trailing partial cycle covers phases `0..n % cycle`.
pub fn rail_lengths(n: usize, rails: usize) -> Vec<usize> {
    if rails <= 1 {
        return vec![n];
    }
    let cycle = 2 * (rails - 1);
    let full = n / cycle;
    let rem = n % cycle;
    (0..rails)
        .map(|r| {
            if r == 0 {
                full + usize::from(rem > 0)
            } else if r == rails - 1 {
                full + usize::from(rem > r)
            } else {
                2 * full + usize::from(rem > r) + usize::from(rem > cycle - r)
            }
        })
        .collect()
}

pub fn encrypt<T: Copy>(items: &[T], rails: usize) -> Vec<T> {
    if rails <= 1 || items.len() <= 1 {
        return items.to_vec();
    }
    let mut fence: Vec<Vec<T>> = rail_lengths(items.len(), rails)
        .into_iter()
        .map(Vec::with_capacity)
        .collect();
    for (pos, &item) in items.iter().enumerate() {
        fence[rail_of(pos, rails)].push(item);
    }
    fence.concat()
}

pub fn decrypt<T: Copy>(items: &[T], rails: usize) -> Vec<T> {
    if rails <= 1 || items.len() <= 1 {
        return items.to_vec();
    }
    // Start offset of each rail inside the ciphertext.
    let mut cursor = Vec::with_capacity(rails);
    let mut start = 0;
    for len in rail_lengths(items.len(), rails) {
        cursor.push(start);
        start += len;
    }
    // Replay the zigzag, taking the next unread item of the visited rail.
    (0..items.len())
        .map(|pos| {
            let rail = rail_of(pos, rails);
            let item = items[cursor[rail]];
            cursor[rail] += 1;
            item
        })
        .collect()
}
