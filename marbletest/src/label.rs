use std::borrow::Cow;

/// Human-readable label for an error category or value variant.
///
/// Used by [`Assertion::error_kind`](crate::Assertion::error_kind) to match
/// an error by category without runtime type inspection: the label of the
/// recorded error is compared with the expected one.
///
/// # Example
///
/// ```rust
/// use std::borrow::Cow;
/// use marbletest::Label;
///
/// enum FetchError {
///     Timeout,
///     NotFound(String),
/// }
///
/// impl Label for FetchError {
///     fn label(&self) -> Cow<'static, str> {
///         Cow::Borrowed(match self {
///             FetchError::Timeout => "Timeout",
///             FetchError::NotFound(_) => "NotFound",
///         })
///     }
/// }
///
/// assert_eq!(FetchError::NotFound("a".into()).label(), "NotFound");
/// ```
pub trait Label {
    /// Returns a human-readable label for this item.
    fn label(&self) -> Cow<'static, str>;
}

impl Label for std::convert::Infallible {
    fn label(&self) -> Cow<'static, str> {
        match *self {}
    }
}
