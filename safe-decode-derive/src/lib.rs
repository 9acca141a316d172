//! Attribute macro for safe-decode
//!
//! This crate provides `#[safe_decode]`, which makes a raw-valued enum
//! decodable without ever failing on an unrecognized value. Use it through the
//! `safe-decode` crate, which re-exports the macro and the runtime trait the
//! generated code relies on.
//!
//! # Example
//!
//! ```rust,ignore
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
//! // expands to (roughly):
//! //
//! // pub enum OperationType { Credit, Debit, Unknown }
//! //
//! // impl OperationType {
//! //     pub fn from_decoder<'de, D>(decoder: D) -> Result<Self, D::Error> { .. }
//! // }
//! //
//! // impl RawRepresentable for OperationType { .. }
//! // impl<'de> Deserialize<'de> for OperationType { .. }
//! ```

use proc_macro::TokenStream;
use syn::{parse_macro_input, Item};

mod analyze;
mod args;
mod conformance;
mod diagnostic;
mod expand;
mod raw;
mod synth;

use args::SafeDecodeArgs;

/// Attribute macro adding a fallback variant and a never-failing decoder
///
/// # Raw-value type
///
/// The enum declares its raw-value type with `#[repr(String)]` or
/// `#[repr(i64)]`. Text raw values are written as string discriminants
/// (`Credit = "CREDIT"`) and default to the variant name; integer raw values
/// are ordinary discriminants.
///
/// # Arguments
///
/// - `safe_case = Name` - Name of the fallback variant (default `Unknown`;
///   conventionally `Unknown`, `Undefined`, `None` or `General`)
/// - `raw_value = "TEXT"` / `raw_value = -1` - Raw value of the fallback
///   variant. Must match the enum's raw-value type. Defaults to the upper-cased
///   fallback name for text and `-1` for integers.
///
/// # Generated items
///
/// - the fallback variant, unless a variant with that name already exists
/// - `pub fn from_decoder(decoder)`, decoding one raw scalar and mapping
///   unrecognized values to the fallback; deserializer errors propagate
/// - `impl safe_decode::RawRepresentable`
/// - `impl serde::Deserialize` forwarding to `from_decoder`; a derived
///   `Deserialize` or `Deserialize_repr` is removed in its favor
///
/// Place `#[safe_decode]` above `#[derive(...)]` so the derive list is visible
/// to the macro.
///
/// # Example
///
/// ```rust,ignore
/// use safe_decode::safe_decode;
///
/// #[safe_decode(raw_value = -3, safe_case = General)]
/// #[repr(i64)]
/// pub enum OperationType {
///     Credit,
///     Debit,
/// }
/// ```
#[proc_macro_attribute]
pub fn safe_decode(args: TokenStream, input: TokenStream) -> TokenStream {
    let args = parse_macro_input!(args as SafeDecodeArgs);
    let item = parse_macro_input!(input as Item);
    let expansion = expand::expand(&item, &args);
    expand::render(&item, &expansion).into()
}
