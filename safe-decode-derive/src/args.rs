//! Macro arguments and their resolution
//!
//! `#[safe_decode(raw_value = ..., safe_case = ...)]` is parsed into a typed
//! [`SafeDecodeArgs`] and then resolved against the enum's raw scalar kind.

use proc_macro2::Span;
use syn::{
    ext::IdentExt,
    parse::{Parse, ParseStream},
    spanned::Spanned,
    Ident, Lit, Token,
};

use crate::diagnostic::{Diagnostic, DiagnosticKind};
use crate::raw::{RawScalarKind, RawValue};

/// Name of the fallback variant when `safe_case` is not given
pub const DEFAULT_SAFE_CASE: &str = "Unknown";

/// Literal of an integer fallback when `raw_value` is not given
pub const DEFAULT_INTEGER_RAW_VALUE: i64 = -1;

mod kw {
    syn::custom_keyword!(raw_value);
    syn::custom_keyword!(safe_case);
}

/// The two recognized macro arguments, both optional
#[derive(Debug, Default, Clone)]
pub struct SafeDecodeArgs {
    /// Overrides the fallback variant's literal
    pub raw_value: Option<RawValue>,
    /// Names the fallback variant
    pub safe_case: Option<Ident>,
}

impl Parse for SafeDecodeArgs {
    fn parse(input: ParseStream) -> syn::Result<Self> {
        let mut args = SafeDecodeArgs::default();

        while !input.is_empty() {
            let lookahead = input.lookahead1();
            if lookahead.peek(kw::raw_value) {
                let key = input.parse::<kw::raw_value>()?;
                input.parse::<Token![=]>()?;
                if args.raw_value.is_some() {
                    return Err(syn::Error::new(key.span, "duplicate `raw_value` argument"));
                }
                args.raw_value = Some(parse_raw_value(input)?);
            } else if lookahead.peek(kw::safe_case) {
                let key = input.parse::<kw::safe_case>()?;
                input.parse::<Token![=]>()?;
                if args.safe_case.is_some() {
                    return Err(syn::Error::new(key.span, "duplicate `safe_case` argument"));
                }
                args.safe_case = Some(input.parse()?);
            } else {
                return Err(lookahead.error());
            }

            if input.peek(Token![,]) {
                input.parse::<Token![,]>()?;
            } else if !input.is_empty() {
                return Err(input.error("expected `,`"));
            }
        }

        Ok(args)
    }
}

fn parse_raw_value(input: ParseStream) -> syn::Result<RawValue> {
    let negative = input.parse::<Option<Token![-]>>()?;
    let lit: Lit = input.parse()?;
    match (negative, lit) {
        (None, Lit::Str(lit)) => Ok(RawValue::Text(lit.value())),
        (sign, Lit::Int(lit)) => {
            let digits = match sign {
                Some(_) => format!("-{}", lit.base10_digits()),
                None => lit.base10_digits().to_string(),
            };
            digits
                .parse::<i64>()
                .map(RawValue::Integer)
                .map_err(|_| syn::Error::new(lit.span(), "integer `raw_value` must fit in i64"))
        }
        (_, other) => Err(syn::Error::new(
            other.span(),
            "`raw_value` must be a string or integer literal",
        )),
    }
}

/// Fully resolved generator configuration
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GeneratorConfig {
    /// Name of the fallback variant
    pub safe_case: Ident,
    /// Literal raw value of the fallback variant
    pub fallback_literal: RawValue,
    /// The enum's raw scalar kind
    pub raw_kind: RawScalarKind,
}

/// Resolve arguments against the enum's raw scalar kind.
///
/// An explicit `raw_value` of the other kind fails with
/// [`DiagnosticKind::RawValueMismatch`] anchored at `anchor`.
pub fn resolve(
    raw_kind: RawScalarKind,
    args: &SafeDecodeArgs,
    anchor: &impl Spanned,
) -> Result<GeneratorConfig, Diagnostic> {
    let safe_case = args
        .safe_case
        .clone()
        .unwrap_or_else(|| Ident::new(DEFAULT_SAFE_CASE, Span::call_site()));

    let fallback_literal = match &args.raw_value {
        Some(value) if value.kind() != raw_kind => {
            return Err(Diagnostic::report(DiagnosticKind::RawValueMismatch, anchor));
        }
        Some(value) => value.clone(),
        None => match raw_kind {
            RawScalarKind::Integer => RawValue::Integer(DEFAULT_INTEGER_RAW_VALUE),
            RawScalarKind::Text => RawValue::Text(safe_case.unraw().to_string().to_uppercase()),
        },
    };

    Ok(GeneratorConfig {
        safe_case,
        fallback_literal,
        raw_kind,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use syn::parse_quote;

    fn anchor() -> syn::ItemEnum {
        parse_quote! {
            enum OperationType {}
        }
    }

    #[test]
    fn test_parse_empty() {
        let args: SafeDecodeArgs = syn::parse_str("").unwrap();
        assert!(args.raw_value.is_none());
        assert!(args.safe_case.is_none());
    }

    #[test]
    fn test_parse_both_arguments() {
        let args: SafeDecodeArgs = syn::parse_str("raw_value = -3, safe_case = General").unwrap();
        assert_eq!(args.raw_value, Some(RawValue::Integer(-3)));
        assert_eq!(args.safe_case.unwrap(), "General");
    }

    #[test]
    fn test_parse_text_raw_value_and_trailing_comma() {
        let args: SafeDecodeArgs = syn::parse_str("safe_case = None, raw_value = \"n/a\",").unwrap();
        assert_eq!(args.raw_value, Some(RawValue::Text("n/a".into())));
        assert_eq!(args.safe_case.unwrap(), "None");
    }

    #[test]
    fn test_parse_suffixed_integer() {
        let args: SafeDecodeArgs = syn::parse_str("raw_value = 42i64").unwrap();
        assert_eq!(args.raw_value, Some(RawValue::Integer(42)));
    }

    #[test]
    fn test_parse_i64_min() {
        let args: SafeDecodeArgs = syn::parse_str("raw_value = -9223372036854775808").unwrap();
        assert_eq!(args.raw_value, Some(RawValue::Integer(i64::MIN)));
    }

    #[test]
    fn test_parse_rejects_overflow() {
        let err = syn::parse_str::<SafeDecodeArgs>("raw_value = 9223372036854775808").unwrap_err();
        assert!(err.to_string().contains("fit in i64"));
    }

    #[test]
    fn test_parse_rejects_float() {
        let err = syn::parse_str::<SafeDecodeArgs>("raw_value = 1.5").unwrap_err();
        assert!(err.to_string().contains("string or integer literal"));
    }

    #[test]
    fn test_parse_rejects_negative_text() {
        assert!(syn::parse_str::<SafeDecodeArgs>("raw_value = -\"x\"").is_err());
    }

    #[test]
    fn test_parse_rejects_unknown_key() {
        assert!(syn::parse_str::<SafeDecodeArgs>("rawValue = 1").is_err());
    }

    #[test]
    fn test_parse_rejects_duplicate_key() {
        let err =
            syn::parse_str::<SafeDecodeArgs>("safe_case = General, safe_case = None").unwrap_err();
        assert!(err.to_string().contains("duplicate"));
    }

    #[test]
    fn test_parse_rejects_missing_comma() {
        assert!(syn::parse_str::<SafeDecodeArgs>("safe_case = General raw_value = 1").is_err());
    }

    #[test]
    fn test_resolve_defaults_text() {
        let config =
            resolve(RawScalarKind::Text, &SafeDecodeArgs::default(), &anchor()).unwrap();
        assert_eq!(config.safe_case, "Unknown");
        assert_eq!(config.fallback_literal, RawValue::Text("UNKNOWN".into()));
        assert_eq!(config.raw_kind, RawScalarKind::Text);
    }

    #[test]
    fn test_resolve_defaults_integer() {
        let config =
            resolve(RawScalarKind::Integer, &SafeDecodeArgs::default(), &anchor()).unwrap();
        assert_eq!(config.fallback_literal, RawValue::Integer(-1));
    }

    #[test]
    fn test_resolve_upper_cases_safe_case_name() {
        let args: SafeDecodeArgs = syn::parse_str("safe_case = General").unwrap();
        let config = resolve(RawScalarKind::Text, &args, &anchor()).unwrap();
        assert_eq!(config.fallback_literal, RawValue::Text("GENERAL".into()));
    }

    #[test]
    fn test_resolve_keeps_text_override_verbatim() {
        let args: SafeDecodeArgs = syn::parse_str("raw_value = \"Not Known\"").unwrap();
        let config = resolve(RawScalarKind::Text, &args, &anchor()).unwrap();
        assert_eq!(config.fallback_literal, RawValue::Text("Not Known".into()));
    }

    #[test]
    fn test_resolve_mismatch_integer_for_text() {
        let args: SafeDecodeArgs = syn::parse_str("raw_value = -10").unwrap();
        let err = resolve(RawScalarKind::Text, &args, &anchor()).unwrap_err();
        assert_eq!(err.kind(), DiagnosticKind::RawValueMismatch);
    }

    #[test]
    fn test_resolve_mismatch_text_for_integer() {
        let args: SafeDecodeArgs = syn::parse_str("raw_value = \"x\"").unwrap();
        let err = resolve(RawScalarKind::Integer, &args, &anchor()).unwrap_err();
        assert_eq!(err.kind(), DiagnosticKind::RawValueMismatch);
    }

    proptest! {
        /// Any override of the other kind is rejected
        #[test]
        fn test_kind_gate(text in ".*", integer in any::<i64>()) {
            let text_args = SafeDecodeArgs {
                raw_value: Some(RawValue::Text(text)),
                safe_case: None,
            };
            let err = resolve(RawScalarKind::Integer, &text_args, &anchor()).unwrap_err();
            prop_assert_eq!(err.kind(), DiagnosticKind::RawValueMismatch);

            let integer_args = SafeDecodeArgs {
                raw_value: Some(RawValue::Integer(integer)),
                safe_case: None,
            };
            let err = resolve(RawScalarKind::Text, &integer_args, &anchor()).unwrap_err();
            prop_assert_eq!(err.kind(), DiagnosticKind::RawValueMismatch);
        }

        /// A matching override becomes the fallback literal unchanged
        #[test]
        fn test_matching_override_is_verbatim(text in "[a-z ]{0,12}", integer in any::<i64>()) {
            let args = SafeDecodeArgs {
                raw_value: Some(RawValue::Text(text.clone())),
                safe_case: None,
            };
            let config = resolve(RawScalarKind::Text, &args, &anchor()).unwrap();
            prop_assert_eq!(config.fallback_literal, RawValue::Text(text));

            let args = SafeDecodeArgs {
                raw_value: Some(RawValue::Integer(integer)),
                safe_case: None,
            };
            let config = resolve(RawScalarKind::Integer, &args, &anchor()).unwrap();
            prop_assert_eq!(config.fallback_literal, RawValue::Integer(integer));
        }

        /// Without an override, text fallbacks are the upper-cased name
        #[test]
        fn test_default_text_is_upper_cased(name in "[A-Z][a-zA-Z0-9]{0,10}") {
            let args = SafeDecodeArgs {
                raw_value: None,
                safe_case: Some(Ident::new(&name, Span::call_site())),
            };
            let config = resolve(RawScalarKind::Text, &args, &anchor()).unwrap();
            prop_assert_eq!(config.fallback_literal, RawValue::Text(name.to_uppercase()));
        }
    }
}
