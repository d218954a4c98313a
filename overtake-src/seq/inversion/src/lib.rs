//! Inversion counting by merge sort.
//!
//! An inversion is a pair `i < j` with `a[i] > a[j]`. Counting is done
//! while merge-sorting the slice in place, so the slice is left sorted.

use tracing::trace;

pub trait Inversion {
    /// Counts inversions and sorts `self` ascending as a side effect.
    fn sort_inversion(&mut self) -> u64;

    /// Counts inversions on a private copy, leaving `self` untouched.
    fn inversion(&self) -> u64;
}

impl<T: Ord + Clone> Inversion for [T] {
    fn sort_inversion(&mut self) -> u64 {
        MergeCounter::new().sort_count(self)
    }

    fn inversion(&self) -> u64 {
        let mut tmp = self.to_vec();
        MergeCounter::with_capacity(tmp.len()).sort_count(&mut tmp)
    }
}

/// Merge-sort inversion counter owning its scratch buffer.
///
/// The buffer grows to the longest slice seen and is reused by later
/// calls; only the prefix for the current slice is touched, and each
/// merge writes a cell before reading it.
pub struct MergeCounter<T> {
    buf: Vec<T>,
}

impl<T> Default for MergeCounter<T> {
    fn default() -> Self { Self::new() }
}

impl<T> MergeCounter<T> {
    pub fn new() -> Self { Self { buf: vec![] } }
    pub fn with_capacity(n: usize) -> Self {
        Self { buf: Vec::with_capacity(n) }
    }
    pub fn scratch_len(&self) -> usize { self.buf.len() }
}

impl<T: Ord + Clone> MergeCounter<T> {
    pub fn sort_count(&mut self, a: &mut [T]) -> u64 {
        let n = a.len();
        if n <= 1 {
            return 0;
        }
        if self.buf.len() < n {
            trace!(from = self.buf.len(), to = n, "growing scratch buffer");
            self.buf.resize(n, a[0].clone());
        }
        sort_count(a, &mut self.buf[..n])
    }
}

// `a` and `buf` have the same length. On return, `a` is sorted.
fn sort_count<T: Ord + Clone>(a: &mut [T], buf: &mut [T]) -> u64 {
    let n = a.len();
    if n <= 1 {
        return 0;
    }

    // the lower half takes the extra element
    let mid = (n + 1) / 2;
    let mut res = {
        let (lo, hi) = a.split_at_mut(mid);
        let (lo_buf, hi_buf) = buf.split_at_mut(mid);
        sort_count(lo, lo_buf) + sort_count(hi, hi_buf)
    };

    // Both halves are now sorted in place and adjacent, so
    // `max(lo) <= min(hi)` means `a` is already sorted as a whole.
    if a[mid - 1] <= a[mid] {
        return res;
    }

    let (mut i, mut j, mut k) = (0, mid, 0);
    while i < mid && j < n {
        if a[j] < a[i] {
            // a[j] is smaller than every one of a[i..mid]
            res += (mid - i) as u64;
            buf[k] = a[j].clone();
            j += 1;
        } else {
            buf[k] = a[i].clone();
            i += 1;
        }
        k += 1;
    }
    if i < mid {
        buf[k..].clone_from_slice(&a[i..mid]);
    } else {
        buf[k..].clone_from_slice(&a[j..]);
    }
    a.clone_from_slice(buf);
    res
}

#[test]
fn sanity_check() {
    assert_eq!([1, 5, 4, 2, 3].inversion(), 5);
    assert_eq!([1, 2, 3, 4, 5].inversion(), 0);
    assert_eq!([5, 4, 3, 2, 1].inversion(), 10);
    assert_eq!([1, 1, 1, 1, 1].inversion(), 0);
    assert_eq!([2, 0, 1].inversion(), 2);

    let empty: [(); 0] = [];
    assert_eq!(empty.inversion(), 0);
    assert_eq!([42].inversion(), 0);
}

#[test]
fn sorts_in_place() {
    let mut a = [3, 1, 4, 1, 5, 9, 2, 6, 5, 3, 5];
    let expected = a.inversion();
    assert_eq!(a.sort_inversion(), expected);
    assert_eq!(a, [1, 1, 2, 3, 3, 4, 5, 5, 5, 6, 9]);

    let mut chars: Vec<_> = "inversion".chars().collect();
    assert_eq!(chars.sort_inversion(), 16);
    assert!(chars.windows(2).all(|w| w[0] <= w[1]));
}

#[test]
fn extremes() {
    for n in 0..=300_u64 {
        let mut asc: Vec<_> = (0..n).collect();
        assert_eq!(asc.sort_inversion(), 0);
        assert!(asc.iter().copied().eq(0..n));

        let mut desc: Vec<_> = (1..=n).rev().collect();
        assert_eq!(desc.sort_inversion(), n * n.saturating_sub(1) / 2);
        assert!(desc.iter().copied().eq(1..=n));
    }
}

#[test]
fn wide_count() {
    // n * (n - 1) / 2 exceeds u32::MAX
    let n = 100_000_u64;
    let mut desc: Vec<_> = (0..n).rev().collect();
    let count = desc.sort_inversion();
    assert_eq!(count, n * (n - 1) / 2);
    assert!(count > u64::from(u32::MAX));
}

#[test]
fn fast_path_keeps_order() {
    // the upper half is already above the lower one, but neither is sorted
    let mut a = [2, 1, 0, 5, 4, 3];
    assert_eq!(a.sort_inversion(), 6);
    assert_eq!(a, [0, 1, 2, 3, 4, 5]);

    let mut a = [0, 1, 2, 3, 5, 4];
    assert_eq!(a.sort_inversion(), 1);
    assert_eq!(a, [0, 1, 2, 3, 4, 5]);
}

#[test]
fn reuse_scratch() {
    use inversion_pairs::InversionPairs;
    use rand::SeedableRng;
    use rand_chacha::ChaCha20Rng;
    use randgen::{Gen, Perm};

    let mut rng = ChaCha20Rng::from_seed([1; 32]);
    let mut counter = MergeCounter::new();
    for len in [500, 3, 0, 1, 200, 1000, 7, 999] {
        let mut a = Perm { len }.generate(&mut rng);
        let expected = a.inversion_pairs();
        assert_eq!(counter.sort_count(&mut a), expected);
        assert!(a.iter().copied().eq(0..len));
    }
    assert_eq!(counter.scratch_len(), 1000);
}

#[test]
fn random_permutations() {
    use inversion_pairs::InversionPairs;
    use rand::SeedableRng;
    use rand_chacha::ChaCha20Rng;
    use randgen::{Gen, NearlySorted, Perm};

    let mut rng = ChaCha20Rng::from_seed([0; 32]);
    for _ in 0..30 {
        let len = (0..3000_usize).generate(&mut rng);
        let a = Perm { len }.generate(&mut rng);
        assert_eq!(a.inversion(), a.inversion_pairs());

        let b = NearlySorted { len, swaps: 20 }.generate(&mut rng);
        assert_eq!(b.inversion(), b.inversion_pairs());
    }
}

#[test]
fn exhaustive_small() {
    use inversion_pairs::InversionPairs;

    // all sequences of length 6 over 0..4, duplicates included
    for x in 0..4_u32.pow(6) {
        let a: Vec<_> = std::iter::successors(Some(x), |x| Some(x / 4))
            .map(|x| x % 4)
            .take(6)
            .collect();
        let mut sorted = a.clone();
        assert_eq!(sorted.sort_inversion(), a.inversion_pairs());
        assert!(sorted.windows(2).all(|w| w[0] <= w[1]));
    }
}
