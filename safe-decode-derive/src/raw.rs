//! Raw scalar kinds and raw literal values

use proc_macro2::{Literal, TokenStream};
use quote::{quote, ToTokens};

/// The single scalar representation behind a raw-valued enum
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RawScalarKind {
    /// `String` raw values
    Text,
    /// `i64` raw values
    Integer,
}

impl RawScalarKind {
    /// Resolve a declared raw-value type name.
    ///
    /// Only the two supported names resolve; anything else is `None`.
    pub fn from_type_name(name: &str) -> Option<Self> {
        [Self::Text, Self::Integer]
            .into_iter()
            .find(|kind| kind.type_name() == name)
    }

    /// The Rust type name as written in `#[repr(...)]`
    pub fn type_name(self) -> &'static str {
        match self {
            Self::Text => "String",
            Self::Integer => "i64",
        }
    }

    /// Fully qualified scalar type for generated code
    pub fn scalar_type(self) -> TokenStream {
        match self {
            Self::Text => quote!(::std::string::String),
            Self::Integer => quote!(i64),
        }
    }
}

/// A literal raw value of either kind
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RawValue {
    /// A text literal, emitted quoted
    Text(String),
    /// An integer literal, emitted as bare decimal
    Integer(i64),
}

impl RawValue {
    /// The scalar kind this value belongs to
    pub fn kind(&self) -> RawScalarKind {
        match self {
            Self::Text(_) => RawScalarKind::Text,
            Self::Integer(_) => RawScalarKind::Integer,
        }
    }
}

impl ToTokens for RawValue {
    fn to_tokens(&self, tokens: &mut TokenStream) {
        match self {
            Self::Text(value) => Literal::string(value).to_tokens(tokens),
            Self::Integer(value) if *value < 0 => {
                let magnitude = Literal::u64_unsuffixed(value.unsigned_abs());
                tokens.extend(quote!(-#magnitude));
            }
            Self::Integer(value) => Literal::i64_unsuffixed(*value).to_tokens(tokens),
        }
    }
}
