//! Whitespace-separated integer input.
//!
//! [`ByteSource`] pulls signed decimal integers out of a raw byte stream
//! without going through `String`. Every byte `<= b' '` is a separator.
//! The probe [`Source::next_int`] is tri-state:
//!
//! - `Ok(Some(v))`: a value,
//! - `Ok(None)`: the stream ended before any further token,
//! - `Err(_)`: the token was malformed or the reader failed.
//!
//! Accumulation wraps on overflow; inputs are expected to fit in `i32`.

use std::any::type_name;
use std::io::{self, ErrorKind, Read};

use thiserror::Error;

const BUF_SIZE: usize = 1 << 16;

#[derive(Debug, Error)]
pub enum InputError {
    #[error("expected a digit at byte {offset}, found {}", describe(.found))]
    ExpectedDigit { found: Option<u8>, offset: usize },
    #[error("`{value}` is out of range for `{ty}`")]
    OutOfRange { value: i64, ty: &'static str },
    #[error("unexpected end of input")]
    UnexpectedEof,
    #[error("failed to read input")]
    Io(#[from] io::Error),
}

fn describe(found: &Option<u8>) -> String {
    match *found {
        Some(b) if b.is_ascii_graphic() => format!("`{}`", b as char),
        Some(b) => format!("byte {b:#04x}"),
        None => "end of input".to_owned(),
    }
}

pub trait Source {
    fn next_int(&mut self) -> Result<Option<i64>, InputError>;

    fn next<T: Readable>(&mut self) -> Result<Option<T::Output>, InputError>
    where
        Self: Sized,
    {
        T::try_read(self)
    }
}

impl<S: Source> Source for &'_ mut S {
    fn next_int(&mut self) -> Result<Option<i64>, InputError> {
        (*self).next_int()
    }
}

pub struct ByteSource<R> {
    reader: R,
    buf: Box<[u8]>,
    pos: usize,
    len: usize,
    consumed: usize,
}

impl<R: Read> ByteSource<R> {
    pub fn new(reader: R) -> Self {
        Self {
            reader,
            buf: vec![0; BUF_SIZE].into_boxed_slice(),
            pos: 0,
            len: 0,
            consumed: 0,
        }
    }

    /// Number of bytes handed out so far.
    pub fn offset(&self) -> usize { self.consumed + self.pos }

    fn fill(&mut self) -> Result<bool, InputError> {
        self.consumed += self.len;
        self.pos = 0;
        self.len = 0;
        loop {
            match self.reader.read(&mut self.buf) {
                Ok(len) => {
                    self.len = len;
                    return Ok(len > 0);
                }
                Err(e) if e.kind() == ErrorKind::Interrupted => continue,
                Err(e) => return Err(e.into()),
            }
        }
    }

    fn bump(&mut self) -> Result<Option<u8>, InputError> {
        if self.pos == self.len && !self.fill()? {
            return Ok(None);
        }
        let b = self.buf[self.pos];
        self.pos += 1;
        Ok(Some(b))
    }

    /// Next byte that is not a separator, if any.
    fn token_start(&mut self) -> Result<Option<u8>, InputError> {
        while let Some(b) = self.bump()? {
            if b > b' ' {
                return Ok(Some(b));
            }
        }
        Ok(None)
    }

    fn expected_digit(&self, found: Option<u8>) -> InputError {
        let offset = self.offset() - usize::from(found.is_some());
        InputError::ExpectedDigit { found, offset }
    }
}

impl<R: Read> Source for ByteSource<R> {
    fn next_int(&mut self) -> Result<Option<i64>, InputError> {
        let Some(mut c) = self.token_start()? else {
            return Ok(None);
        };

        let neg = c == b'-';
        if neg {
            c = match self.bump()? {
                Some(b) if b.is_ascii_digit() => b,
                found => return Err(self.expected_digit(found)),
            };
        }

        let mut x = 0_i64;
        loop {
            if !c.is_ascii_digit() {
                return Err(self.expected_digit(Some(c)));
            }
            x = x.wrapping_mul(10).wrapping_add(i64::from(c - b'0'));
            match self.bump()? {
                Some(b) if b > b' ' => c = b,
                _ => break,
            }
        }
        Ok(Some(if neg { x.wrapping_neg() } else { x }))
    }
}

impl<'a> From<&'a str> for ByteSource<&'a [u8]> {
    fn from(s: &'a str) -> Self { ByteSource::new(s.as_bytes()) }
}

pub trait Readable {
    type Output;

    fn try_read<S: Source>(
        source: &mut S,
    ) -> Result<Option<Self::Output>, InputError>;

    fn read<S: Source>(source: &mut S) -> Result<Self::Output, InputError> {
        Self::try_read(source)?.ok_or(InputError::UnexpectedEof)
    }
}

macro_rules! impl_readable {
    ( $($ty:ty)* ) => { $(
        impl Readable for $ty {
            type Output = $ty;
            fn try_read<S: Source>(
                source: &mut S,
            ) -> Result<Option<$ty>, InputError> {
                let Some(value) = source.next_int()? else {
                    return Ok(None);
                };
                match <$ty>::try_from(value) {
                    Ok(v) => Ok(Some(v)),
                    Err(_) => Err(InputError::OutOfRange {
                        value,
                        ty: type_name::<$ty>(),
                    }),
                }
            }
        }
    )* };
}

impl_readable! { i32 i64 isize u32 u64 usize }

#[macro_export]
macro_rules! scan {
    // terminator
    (@from [$source:expr] @rest) => {};

    // parse mutability
    (@from [$source:expr] @rest mut $($rest:tt)*) => {
        $crate::scan! {
            @from [$source]
            @mut [mut]
            @rest $($rest)*
        }
    };
    (@from [$source:expr] @rest $($rest:tt)*) => {
        $crate::scan! {
            @from [$source]
            @mut []
            @rest $($rest)*
        }
    };

    // parse variable
    (@from [$source:expr] @mut [$($mut:tt)?] @rest $var:ident: $($rest:tt)*) => {
        $crate::scan! {
            @from [$source]
            @mut [$($mut)?]
            @var $var
            @kind []
            @rest $($rest)*
        }
    };

    // parse kind (type)
    (@from [$source:expr] @mut [$($mut:tt)?] @var $var:ident @kind [$($kind:tt)*] @rest) => {
        let $($mut)? $var = $crate::read_value!(@source [$source] @kind [$($kind)*])?;
    };
    (@from [$source:expr] @mut [$($mut:tt)?] @var $var:ident @kind [$($kind:tt)*] @rest, $($rest:tt)*) => {
        $crate::scan!(@from [$source] @mut [$($mut)?] @var $var @kind [$($kind)*] @rest);
        $crate::scan!(@from [$source] @rest $($rest)*);
    };
    (@from [$source:expr] @mut [$($mut:tt)?] @var $var:ident @kind [$($kind:tt)*] @rest $tt:tt $($rest:tt)*) => {
        $crate::scan!(@from [$source] @mut [$($mut)?] @var $var @kind [$($kind)* $tt] @rest $($rest)*);
    };

    (from $source:expr, $($rest:tt)*) => {
        #[allow(unused_mut)]
        let mut s = $source;
        $crate::scan! {
            @from [&mut s]
            @rest $($rest)*
        }
    };
}

#[macro_export]
macro_rules! read_value {
    // variable-length array
    (@source [$source:expr] @kind [[$($kind:tt)*]]) => {
        $crate::read_value!(@vec @source [$source] @kind [] @rest $($kind)*)
    };
    (@vec @source [$source:expr] @kind [$($kind:tt)*] @rest ; $($len:tt)*) => {{
        let len: usize = $($len)*;
        (0..len)
            .map(|_| $crate::read_value!(@source [$source] @kind [$($kind)*]))
            .collect::<::std::result::Result<::std::vec::Vec<_>, $crate::InputError>>()
    }};
    (@vec @source [$source:expr] @kind [$($kind:tt)*] @rest $tt:tt $($rest:tt)*) => {
        $crate::read_value!(@vec @source [$source] @kind [$($kind)* $tt] @rest $($rest)*)
    };

    // unreachable
    (@source [$source:expr] @kind []) => {
        compile_error!("Reached unreachable statement while parsing macro input.")
    };

    // normal other
    (@source [$source:expr] @kind [$kind:ty]) => {
        <$kind as $crate::Readable>::read($source)
    };
}

#[test]
fn sanity_check() -> Result<(), InputError> {
    let mut src = ByteSource::from("1 -2\t30\r\n  456\n");
    assert_eq!(src.next_int()?, Some(1));
    assert_eq!(src.next_int()?, Some(-2));
    assert_eq!(src.next_int()?, Some(30));
    assert_eq!(src.next_int()?, Some(456));
    assert_eq!(src.next_int()?, None);
    assert_eq!(src.next_int()?, None);

    let mut src = ByteSource::from("");
    assert_eq!(src.next_int()?, None);
    let mut src = ByteSource::from(" \n\t\r ");
    assert_eq!(src.next_int()?, None);
    let mut src = ByteSource::from("0 -0 007");
    assert_eq!(src.next_int()?, Some(0));
    assert_eq!(src.next_int()?, Some(0));
    assert_eq!(src.next_int()?, Some(7));
    Ok(())
}

#[test]
fn malformed() {
    let mut src = ByteSource::from("3\n1 x 3\n");
    assert!(matches!(src.next_int(), Ok(Some(3))));
    assert!(matches!(src.next_int(), Ok(Some(1))));
    assert!(matches!(
        src.next_int(),
        Err(InputError::ExpectedDigit { found: Some(b'x'), offset: 4 })
    ));

    let mut src = ByteSource::from("12a");
    assert!(matches!(
        src.next_int(),
        Err(InputError::ExpectedDigit { found: Some(b'a'), offset: 2 })
    ));

    let mut src = ByteSource::from("- 1");
    assert!(matches!(
        src.next_int(),
        Err(InputError::ExpectedDigit { found: Some(b' '), offset: 1 })
    ));

    let mut src = ByteSource::from("-");
    assert!(matches!(
        src.next_int(),
        Err(InputError::ExpectedDigit { found: None, offset: 1 })
    ));

    let mut src = ByteSource::from("--1");
    assert!(matches!(
        src.next_int(),
        Err(InputError::ExpectedDigit { found: Some(b'-'), offset: 1 })
    ));
}

#[test]
fn chunked_reader() -> Result<(), InputError> {
    /// Hands out at most one byte per `read`, interrupting every other call.
    struct Trickle<'a> {
        rest: &'a [u8],
        interrupt: bool,
    }

    impl Read for Trickle<'_> {
        fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
            self.interrupt = !self.interrupt;
            if self.interrupt {
                return Err(ErrorKind::Interrupted.into());
            }
            let Some((&first, rest)) = self.rest.split_first() else {
                return Ok(0);
            };
            buf[0] = first;
            self.rest = rest;
            Ok(1)
        }
    }

    let text = b"  12345 -678\n9";
    let mut src = ByteSource::new(Trickle { rest: text, interrupt: false });
    assert_eq!(src.next_int()?, Some(12345));
    assert_eq!(src.next_int()?, Some(-678));
    assert_eq!(src.next_int()?, Some(9));
    assert_eq!(src.next_int()?, None);
    assert_eq!(src.offset(), text.len());
    Ok(())
}

#[test]
fn long_input_crosses_buffer() -> Result<(), InputError> {
    let n = BUF_SIZE / 3 + 17;
    let text: String = (0..n).map(|i| format!("{i} ")).collect();
    let mut src = ByteSource::from(text.as_str());
    for i in 0..n {
        assert_eq!(src.next_int()?, Some(i as i64));
    }
    assert_eq!(src.next_int()?, None);
    Ok(())
}

#[test]
fn read_failure() {
    struct Broken;

    impl Read for Broken {
        fn read(&mut self, _: &mut [u8]) -> io::Result<usize> {
            Err(ErrorKind::BrokenPipe.into())
        }
    }

    let mut src = ByteSource::new(Broken);
    assert!(matches!(src.next_int(), Err(InputError::Io(_))));
}

#[test]
fn typed() -> Result<(), InputError> {
    let mut src = ByteSource::from("7 -1 4294967296");
    assert_eq!(src.next::<usize>()?, Some(7));
    assert!(matches!(
        src.next::<usize>(),
        Err(InputError::OutOfRange { value: -1, .. })
    ));
    assert!(matches!(
        u32::read(&mut src),
        Err(InputError::OutOfRange { value: 4294967296, .. })
    ));
    assert_eq!(src.next::<i32>()?, None);
    assert!(matches!(i32::read(&mut src), Err(InputError::UnexpectedEof)));
    Ok(())
}

#[test]
fn macros() -> Result<(), InputError> {
    let src = ByteSource::from("2 1 2 3 1 2 3 -4");
    scan! {
        from src,
        n: usize,
        vec_n: [u32; n],
        array: [i64; 3],
        mut x: i32,
        y: i32,
    }
    x += 1;
    assert_eq!((vec_n, array, x, y), (vec![1, 2], vec![3, 1, 2], 4, -4));

    let mut src = ByteSource::from("3 1 2");
    let res = (|| -> Result<Vec<u32>, InputError> {
        scan! { from &mut src, n: usize, a: [u32; n] }
        Ok(a)
    })();
    assert!(matches!(res, Err(InputError::UnexpectedEof)));
    Ok(())
}
