//! Member synthesis
//!
//! Builds the fallback variant, the decode routine and the raw-value lookup as
//! `syn` nodes. Everything here runs only after the configuration resolved and
//! the variants validated, so nothing can fail.

use proc_macro2::Span;
use syn::{parse_quote, Ident, ImplItemFn, ItemImpl, Variant};

use crate::analyze::Analysis;
use crate::args::GeneratorConfig;
use crate::raw::{RawScalarKind, RawValue};

/// Name of the synthesized decode routine
pub const DECODE_ROUTINE: &str = "from_decoder";

/// The decode routine's identifier
pub fn decode_routine_ident() -> Ident {
    Ident::new(DECODE_ROUTINE, Span::call_site())
}

/// New members for the annotated enum
#[derive(Debug, Clone)]
pub struct Synthesized {
    /// `None` when a variant with the fallback name already exists
    pub fallback_variant: Option<Variant>,
    /// The never-failing-on-unknown-value decode routine
    pub decode_routine: ImplItemFn,
}

/// Synthesize the fallback variant and the decode routine.
pub fn synthesize(analysis: &Analysis<'_>, config: &GeneratorConfig) -> Synthesized {
    Synthesized {
        fallback_variant: fallback_variant(analysis, config),
        decode_routine: decode_routine(config),
    }
}

fn fallback_variant(analysis: &Analysis<'_>, config: &GeneratorConfig) -> Option<Variant> {
    if analysis.has_variant(&config.safe_case) {
        return None;
    }
    let safe_case = &config.safe_case;
    let literal = &config.fallback_literal;
    Some(parse_quote! {
        #[doc = "Any raw value that matches no other variant."]
        #safe_case = #literal
    })
}

// Only the scalar type and the fallback name vary between expansions.
fn decode_routine(config: &GeneratorConfig) -> ImplItemFn {
    let routine = decode_routine_ident();
    let scalar = config.raw_kind.scalar_type();
    let safe_case = &config.safe_case;
    parse_quote! {
        /// Decode a single raw value, mapping unrecognized values to the
        /// fallback variant. Errors from the deserializer are returned as is.
        pub fn #routine<'de, D>(decoder: D) -> ::core::result::Result<Self, D::Error>
        where
            D: ::safe_decode::__private::serde::Deserializer<'de>,
        {
            let raw_value =
                <#scalar as ::safe_decode::__private::serde::Deserialize<'de>>::deserialize(decoder)?;
            ::core::result::Result::Ok(
                <Self as ::safe_decode::RawRepresentable>::from_raw_value_or(
                    raw_value,
                    Self::#safe_case,
                ),
            )
        }
    }
}

/// Synthesize the `RawRepresentable` impl covering every variant, including
/// a newly inserted fallback.
pub fn synthesize_raw_lookup(analysis: &Analysis<'_>, config: &GeneratorConfig) -> ItemImpl {
    let name = analysis.ident();
    let inserted = !analysis.has_variant(&config.safe_case);

    let mut idents: Vec<&Ident> = analysis.variants().iter().map(|v| v.ident()).collect();
    if inserted {
        idents.push(&config.safe_case);
    }

    match config.raw_kind {
        RawScalarKind::Text => {
            let mut literals: Vec<String> =
                analysis.variants().iter().map(|v| v.text_value()).collect();
            if inserted {
                if let RawValue::Text(literal) = &config.fallback_literal {
                    literals.push(literal.clone());
                }
            }
            parse_quote! {
                impl ::safe_decode::RawRepresentable for #name {
                    type RawValue = ::std::string::String;

                    fn from_raw_value(raw_value: Self::RawValue) -> ::core::option::Option<Self> {
                        match raw_value.as_str() {
                            #( #literals => ::core::option::Option::Some(Self::#idents), )*
                            _ => ::core::option::Option::None,
                        }
                    }

                    fn raw_value(&self) -> Self::RawValue {
                        let raw_value: &str = match self {
                            #( Self::#idents => #literals, )*
                        };
                        ::std::borrow::ToOwned::to_owned(raw_value)
                    }
                }
            }
        }
        RawScalarKind::Integer => parse_quote! {
            impl ::safe_decode::RawRepresentable for #name {
                type RawValue = i64;

                fn from_raw_value(raw_value: Self::RawValue) -> ::core::option::Option<Self> {
                    #(
                        if raw_value == (Self::#idents as i64) {
                            return ::core::option::Option::Some(Self::#idents);
                        }
                    )*
                    ::core::option::Option::None
                }

                fn raw_value(&self) -> Self::RawValue {
                    match self {
                        #( Self::#idents => Self::#idents as i64, )*
                    }
                }
            }
        },
    }
}
