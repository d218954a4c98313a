use std::ops::Range;

use rand::{
    distributions::{Distribution, Uniform},
    seq::SliceRandom,
    Rng,
};

pub trait Gen {
    type Output;
    fn generate<R: Rng>(&self, rng: &mut R) -> Self::Output;
}

/// Uniformly random permutation of `0..len`.
pub struct Perm {
    pub len: usize,
}

/// `0..len` with `swaps` random adjacent transpositions applied.
pub struct NearlySorted {
    pub len: usize,
    pub swaps: usize,
}

impl Gen for Range<usize> {
    type Output = usize;
    fn generate<R: Rng>(&self, rng: &mut R) -> Self::Output {
        let between = Uniform::from(self.clone());
        between.sample(rng)
    }
}

impl Gen for Perm {
    type Output = Vec<usize>;
    fn generate<R: Rng>(&self, rng: &mut R) -> Self::Output {
        let mut res: Vec<_> = (0..self.len).collect();
        res.shuffle(rng);
        res
    }
}

impl Gen for NearlySorted {
    type Output = Vec<usize>;
    fn generate<R: Rng>(&self, rng: &mut R) -> Self::Output {
        let Self { len, swaps } = *self;
        let mut res: Vec<_> = (0..len).collect();
        if len < 2 {
            return res;
        }
        for _ in 0..swaps {
            let i = (0..len - 1).generate(rng);
            res.swap(i, i + 1);
        }
        res
    }
}

#[test]
fn uniformity() {
    use std::collections::BTreeMap;

    use rand::SeedableRng;
    use rand_chacha::ChaCha20Rng;

    let mut rng = ChaCha20Rng::from_seed([0; 32]);
    let n = 10_usize.pow(6);

    let mut map = BTreeMap::new();
    for _ in 0..n {
        let tmp = Perm { len: 3 }.generate(&mut rng);
        *map.entry(tmp).or_insert(0) += 1;
    }
    let k = 6;
    assert_eq!(map.len(), k);
    for &v in map.values() {
        assert!(v >= (n / k) * 99 / 100);
        assert!(v <= (n / k) * 101 / 100);
    }
}

#[test]
fn nearly_sorted() {
    use rand::SeedableRng;
    use rand_chacha::ChaCha20Rng;

    let mut rng = ChaCha20Rng::from_seed([0; 32]);
    for len in 0..50 {
        let mut a = NearlySorted { len, swaps: 5 }.generate(&mut rng);
        let moved = a.iter().enumerate().filter(|&(i, &x)| i != x).count();
        assert!(moved <= 10);
        a.sort_unstable();
        assert!(a.into_iter().eq(0..len));
    }
}
