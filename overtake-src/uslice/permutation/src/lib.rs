/// Operations on 0-based permutations of `0..n`.
///
/// Values are used as indices, so every element must be below `len()`.
pub trait Permutation {
    /// `res[self[i]] == i`: where each value sits in `self`.
    fn inv(&self) -> Vec<usize>;

    /// `other` rewritten as positions in `self`, i.e.
    /// `res[k] == self.inv()[other[k]]`.
    ///
    /// The number of inversions of the result is the number of adjacent
    /// swaps turning the order `self` into the order `other`.
    fn relabel(&self, other: &[usize]) -> Vec<usize>;
}

impl Permutation for [usize] {
    fn inv(&self) -> Vec<usize> {
        let n = self.len();
        let mut res = vec![0; n];
        for i in 0..n {
            res[self[i]] = i;
        }
        res
    }

    fn relabel(&self, other: &[usize]) -> Vec<usize> {
        let pos = self.inv();
        other.iter().map(|&x| pos[x]).collect()
    }
}

#[test]
fn sanity_check() {
    let a = [1, 5, 2, 3, 6, 0, 4];
    assert_eq!(a.inv(), [5, 0, 2, 3, 6, 1, 4]);
    assert_eq!(a.inv().inv(), a);

    let empty: [usize; 0] = [];
    assert!(empty.inv().is_empty());
}

#[test]
fn relabel() {
    // start [1, 2, 3], finish [3, 1, 2], 0-based
    let start = [0, 1, 2];
    let finish = [2, 0, 1];
    assert_eq!(start.relabel(&finish), [2, 0, 1]);

    let start = [2, 0, 1];
    assert_eq!(start.relabel(&start), [0, 1, 2]);
    assert_eq!(start.relabel(&[1, 0, 2]), [2, 1, 0]);
}
