//! Safe Decode - enums that never fail on unrecognized raw values
//!
//! Deserializing a plain enum fails as soon as the data contains a value the
//! enum doesn't know, which breaks clients every time a server adds a case.
//! `#[safe_decode]` adds a fallback variant and a decoder that maps any
//! unrecognized raw value onto it:
//!
//! - a fallback variant (`Unknown` by default)
//! - `from_decoder`, reading a single `String` or `i64` and falling back when
//!   no variant matches
//! - an implementation of [`RawRepresentable`]
//! - a `serde::Deserialize` implementation, replacing a derived one if present
//!
//! Only *unrecognized* values fall back. A value of the wrong shape (a number
//! where text was expected, a truncated document) is still an error.
//!
//! ## Quick Start
//!
//! ```rust
//! use safe_decode::safe_decode;
//!
//! #[safe_decode]
//! #[derive(Debug, PartialEq)]
//! #[repr(String)]
//! pub enum OperationType {
//!     Credit = "CREDIT",
//!     Debit = "DEBIT",
//! }
//!
//! let known: OperationType = serde_json::from_str("\"CREDIT\"").unwrap();
//! assert_eq!(known, OperationType::Credit);
//!
//! let unknown: OperationType = serde_json::from_str("\"REFUND\"").unwrap();
//! assert_eq!(unknown, OperationType::Unknown);
//!
//! assert!(serde_json::from_str::<OperationType>("42").is_err());
//! ```
//!
//! ## Integer Raw Values
//!
//! ```rust
//! use safe_decode::safe_decode;
//!
//! #[safe_decode(raw_value = -3, safe_case = General)]
//! #[derive(Debug, PartialEq)]
//! #[repr(i64)]
//! pub enum OperationType {
//!     Credit,
//!     Debit,
//! }
//!
//! let value: OperationType = serde_json::from_str("1").unwrap();
//! assert_eq!(value, OperationType::Debit);
//! assert_eq!(OperationType::General as i64, -3);
//! assert_eq!(serde_json::from_str::<OperationType>("7").unwrap(), OperationType::General);
//! ```
//!
//! ## Feature Flags
//!
//! - `logging` - Enable debug logging using the `log` crate

#![warn(missing_docs)]
#![warn(rustdoc::missing_crate_level_docs)]
#![warn(clippy::all)]

// Generated code refers to `::safe_decode`, including inside this crate's tests
extern crate self as safe_decode;

pub mod prelude;
mod raw;

pub use raw::RawRepresentable;
pub use safe_decode_derive::safe_decode;

#[doc(hidden)]
pub mod __private {
    pub use serde;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[safe_decode(safe_case = Undefined)]
    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    #[repr(String)]
    enum Channel {
        Email = "email",
        Sms,
    }

    #[test]
    fn test_expansion_inside_crate() {
        assert_eq!(Channel::from_raw_value("Sms".into()), Some(Channel::Sms));
        assert_eq!(Channel::Undefined.raw_value(), "UNDEFINED");
        let decoded: Channel = serde_json::from_str("\"fax\"").unwrap();
        assert_eq!(decoded, Channel::Undefined);
        let decoded: Channel = serde_json::from_str("\"email\"").unwrap();
        assert_eq!(decoded, Channel::Email);
    }
}
