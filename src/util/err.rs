/// Generates `From` conversions from module error types into
/// the matching `routers_overlay::Error` variants.
///
/// ```rust,ignore
/// use routers_overlay::engine::EngineError;
/// use routers_overlay::style::StyleError;
///
/// routers_overlay::impl_err! {
///     EngineError => Engine,
///     StyleError => Style,
/// }
/// ```
pub mod err_macro {
    #[macro_export]
    macro_rules! impl_err {
        ($($from:ty => $variant:ident),+ $(,)?) => {
            $(
                impl From<$from> for $crate::Error {
                    fn from(value: $from) -> Self {
                        $crate::Error::$variant(value)
                    }
                }
            )+
        };
    }

    pub use impl_err;
}
