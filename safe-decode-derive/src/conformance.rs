//! `Deserialize` conformance
//!
//! The decode routine lives on the enum itself; the conformance impl only
//! forwards to it. An enum that already derives `Deserialize` keeps a single
//! impl: the derive is taken off the enum and replaced by the forwarding impl,
//! so decoding always goes through the fallback.

use syn::{parse_quote, punctuated::Punctuated, Ident, ItemEnum, ItemImpl, Path, Token};

use crate::analyze::Analysis;
use crate::synth::decode_routine_ident;

/// Name of the decoding capability
pub const DECODE_CAPABILITY: &str = "Deserialize";

/// Derives that implement the decoding capability on their own
pub const IMPLYING_CAPABILITIES: &[&str] = &["Deserialize_repr"];

/// Derive whose presence keeps `#[serde(...)]` helper attributes valid
const SERDE_HELPER_OWNER: &str = "Serialize";

fn is_decoding_capability(ident: &Ident) -> bool {
    ident == DECODE_CAPABILITY || IMPLYING_CAPABILITIES.iter().any(|c| ident == c)
}

fn last_ident(path: &Path) -> Option<&Ident> {
    path.segments.last().map(|segment| &segment.ident)
}

/// Whether the derive list already provides the decoding capability
pub fn declares_decoding(conformances: &[Ident]) -> bool {
    conformances.iter().any(is_decoding_capability)
}

/// Synthesize `impl Deserialize` for the enum unless it already declares one.
pub fn synthesize_conformance(analysis: &Analysis<'_>) -> Option<ItemImpl> {
    if declares_decoding(analysis.conformances()) {
        return None;
    }
    Some(forwarding_impl(analysis.ident()))
}

/// The impl standing in for a derived `Deserialize`, if the enum has one.
///
/// Pairs with [`strip_decoding_derives`], which removes the derive it replaces.
pub fn synthesize_derive_replacement(analysis: &Analysis<'_>) -> Option<ItemImpl> {
    if !declares_decoding(analysis.conformances()) {
        return None;
    }
    Some(forwarding_impl(analysis.ident()))
}

fn forwarding_impl(name: &Ident) -> ItemImpl {
    let routine = decode_routine_ident();
    parse_quote! {
        impl<'de> ::safe_decode::__private::serde::Deserialize<'de> for #name {
            fn deserialize<D>(deserializer: D) -> ::core::result::Result<Self, D::Error>
            where
                D: ::safe_decode::__private::serde::Deserializer<'de>,
            {
                Self::#routine(deserializer)
            }
        }
    }
}

/// Remove `Deserialize` and `Deserialize_repr` from the enum's derive lists.
///
/// `#[serde(...)]` attributes are dropped as well once no `Serialize` derive
/// is left to register them.
pub fn strip_decoding_derives(item_enum: &mut ItemEnum) {
    let mut keeps_serde_helper = false;
    item_enum.attrs.retain_mut(|attr| {
        if !attr.path().is_ident("derive") {
            return true;
        }
        let Ok(paths) = attr.parse_args_with(Punctuated::<Path, Token![,]>::parse_terminated)
        else {
            return true;
        };
        let kept: Punctuated<Path, Token![,]> = paths
            .into_iter()
            .filter(|path| !last_ident(path).map_or(false, is_decoding_capability))
            .collect();
        keeps_serde_helper |= kept
            .iter()
            .any(|path| last_ident(path).map_or(false, |ident| ident == SERDE_HELPER_OWNER));
        if kept.is_empty() {
            return false;
        }
        attr.meta = parse_quote!(derive(#kept));
        true
    });

    if !keeps_serde_helper {
        item_enum.attrs.retain(|attr| !attr.path().is_ident("serde"));
        for variant in item_enum.variants.iter_mut() {
            variant.attrs.retain(|attr| !attr.path().is_ident("serde"));
        }
    }
}
