//! Diagnostics reported by the `safe_decode` expansion
//!
//! Every diagnostic is an error anchored at the declaration (or variant) that
//! caused it. The reporter only builds values; the caller decides to stop the
//! expansion and surface them.

use std::fmt;

use proc_macro2::{Span, TokenStream};
use syn::spanned::Spanned;

/// The cause of a failed expansion
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DiagnosticKind {
    /// The macro was attached to something other than an enum
    NotAnEnum,
    /// The enum declares no raw-value type, or one that isn't `String` or `i64`
    InvalidRawValue,
    /// The `raw_value` argument is of the other scalar kind
    RawValueMismatch,
    /// A variant carries fields or a discriminant of the wrong kind
    InvalidVariantRawValue,
    /// Two variants share the same text raw value
    DuplicateRawValue,
}

impl DiagnosticKind {
    /// Fixed message text for this kind
    pub fn message(self) -> &'static str {
        match self {
            Self::NotAnEnum => "`safe_decode` macro can only be attached to enums",
            Self::InvalidRawValue => "`safe_decode` valid raw values are text and integer",
            Self::RawValueMismatch => {
                "the `raw_value` argument doesn't match the enum's raw-value conformance type"
            }
            Self::InvalidVariantRawValue => {
                "`safe_decode` variants must be unit variants whose raw value matches the enum's raw-value type"
            }
            Self::DuplicateRawValue => "`safe_decode` raw value is not unique",
        }
    }

    /// Stable identifier, usable for matching in tooling
    pub fn id(self) -> &'static str {
        match self {
            Self::NotAnEnum => "safe_decode::not_an_enum",
            Self::InvalidRawValue => "safe_decode::invalid_raw_value",
            Self::RawValueMismatch => "safe_decode::raw_value_mismatch",
            Self::InvalidVariantRawValue => "safe_decode::invalid_variant_raw_value",
            Self::DuplicateRawValue => "safe_decode::duplicate_raw_value",
        }
    }
}

/// A single error-level diagnostic with its source anchor
#[derive(Debug, Clone)]
pub struct Diagnostic {
    kind: DiagnosticKind,
    span: Span,
}

impl Diagnostic {
    /// Build a diagnostic of `kind` anchored at `anchor`
    pub fn report(kind: DiagnosticKind, anchor: &impl Spanned) -> Self {
        Self {
            kind,
            span: anchor.span(),
        }
    }

    /// What went wrong
    pub fn kind(&self) -> DiagnosticKind {
        self.kind
    }

    /// Where it went wrong
    pub fn span(&self) -> Span {
        self.span
    }

    /// The fixed message for this diagnostic's kind
    pub fn message(&self) -> &'static str {
        self.kind.message()
    }

    /// Render as a `compile_error!` invocation
    pub fn to_compile_error(&self) -> TokenStream {
        syn::Error::from(self.clone()).to_compile_error()
    }
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "error[{}]: {}", self.kind.id(), self.kind.message())
    }
}

impl From<Diagnostic> for syn::Error {
    fn from(diagnostic: Diagnostic) -> Self {
        syn::Error::new(diagnostic.span(), diagnostic.message())
    }
}
