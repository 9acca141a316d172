//! Raw value conversion for `#[safe_decode]` enums
//!
//! Every enum expanded by [`safe_decode`](crate::safe_decode) implements
//! [`RawRepresentable`]: an exact mapping between its variants and their raw
//! values, including the fallback variant.

use std::fmt;

/// Logging macros - no-op when logging feature is disabled
#[cfg(not(feature = "logging"))]
macro_rules! log_debug {
    ($($arg:tt)*) => {};
}

/// Logging macros - use log crate when logging feature is enabled
#[cfg(feature = "logging")]
macro_rules! log_debug {
    ($($arg:tt)*) => { log::debug!($($arg)*) };
}

/// A type whose values map one-to-one onto raw scalar values
///
/// # Example
///
/// ```rust
/// use safe_decode::{safe_decode, RawRepresentable};
///
/// #[safe_decode]
/// #[derive(Debug, PartialEq)]
/// #[repr(String)]
/// enum Currency {
///     Euro = "EUR",
///     Dollar = "USD",
/// }
///
/// assert_eq!(Currency::from_raw_value("EUR".to_string()), Some(Currency::Euro));
/// assert_eq!(Currency::from_raw_value("JPY".to_string()), None);
/// assert_eq!(Currency::from_raw_value_or("JPY".to_string(), Currency::Unknown), Currency::Unknown);
/// assert_eq!(Currency::Dollar.raw_value(), "USD");
/// ```
pub trait RawRepresentable: Sized {
    /// The scalar representation, `String` or `i64`
    type RawValue: fmt::Debug;

    /// The variant with exactly this raw value, if any
    fn from_raw_value(raw_value: Self::RawValue) -> Option<Self>;

    /// This variant's raw value
    fn raw_value(&self) -> Self::RawValue;

    /// The variant with this raw value, or `fallback` when none matches
    fn from_raw_value_or(raw_value: Self::RawValue, fallback: Self) -> Self {
        #[cfg(feature = "logging")]
        let shown = format!("{:?}", raw_value);
        match Self::from_raw_value(raw_value) {
            Some(value) => value,
            None => {
                log_debug!(
                    "unrecognized raw value {} for {}, using fallback",
                    shown,
                    std::any::type_name::<Self>()
                );
                fallback
            }
        }
    }
}
