pub trait InversionPairs {
    fn inversion_pairs(&self) -> u64;
}

impl<T: Ord> InversionPairs for [T] {
    fn inversion_pairs(&self) -> u64 {
        let n = self.len();
        let mut res = 0;
        for i in 0..n {
            for j in i + 1..n {
                if self[i] > self[j] {
                    res += 1;
                }
            }
        }
        res
    }
}

#[test]
fn sanity_check() {
    assert_eq!([1, 5, 4, 2, 3].inversion_pairs(), 5);
    assert_eq!([2, 0, 1].inversion_pairs(), 2);
    assert_eq!([1, 1, 1].inversion_pairs(), 0);
    assert_eq!([3, 2, 1].inversion_pairs(), 3);

    let empty: [(); 0] = [];
    assert_eq!(empty.inversion_pairs(), 0);
}
