use input::{InputError, Readable, Source};

/// A 1-based index, read as its 0-based counterpart.
pub enum Usize1 {}
/// A 1-based signed offset, read as its 0-based counterpart.
pub enum Isize1 {}

impl Readable for Usize1 {
    type Output = usize;
    fn try_read<S: Source>(
        source: &mut S,
    ) -> Result<Option<usize>, InputError> {
        let Some(value) = source.next_int()? else {
            return Ok(None);
        };
        match usize::try_from(value).ok().and_then(|u| u.checked_sub(1)) {
            Some(u) => Ok(Some(u)),
            None => Err(InputError::OutOfRange { value, ty: "Usize1" }),
        }
    }
}

impl Readable for Isize1 {
    type Output = isize;
    fn try_read<S: Source>(
        source: &mut S,
    ) -> Result<Option<isize>, InputError> {
        let Some(value) = source.next_int()? else {
            return Ok(None);
        };
        match isize::try_from(value).ok().and_then(|i| i.checked_sub(1)) {
            Some(i) => Ok(Some(i)),
            None => Err(InputError::OutOfRange { value, ty: "Isize1" }),
        }
    }
}

#[test]
fn sanity_check() -> Result<(), InputError> {
    use input::{scan, ByteSource};

    let src = ByteSource::from("10 20 3 -5");
    scan! {
        from src,
        l: Usize1,
        r: usize,
        y: Isize1,
        z: Isize1,
    }

    assert_eq!(l..r, 9..20);
    assert_eq!(y, 2);
    assert_eq!(z, -6);
    Ok(())
}

#[test]
fn zero_is_out_of_range() {
    use input::ByteSource;

    let mut src = ByteSource::from("1 0");
    assert!(matches!(src.next::<Usize1>(), Ok(Some(0))));
    assert!(matches!(
        src.next::<Usize1>(),
        Err(InputError::OutOfRange { value: 0, ty: "Usize1" })
    ));
    assert!(matches!(src.next::<Usize1>(), Ok(None)));
}
