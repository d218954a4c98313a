/// Re-exports each member crate of a category both as a module and
/// glob-imported into the category root, inlined in rustdoc.
#[macro_export]
macro_rules! doc_inline_reexport {
    ( $($lib:ident,)* ) => { $(
        #[doc(inline)]
        pub use $lib::{self, *};
    )* };
}
