//! The `safe_decode` expansion pipeline
//!
//! `expand` runs analysis, raw kind resolution, argument checking, variant
//! validation and synthesis in that order. The first failure stops the
//! pipeline with a single diagnostic and no generated declarations.
//! `render` lowers the result into the tokens handed back to rustc.

use proc_macro2::TokenStream;
use quote::quote;
use syn::{Attribute, ImplItemFn, Item, ItemEnum, ItemImpl, Variant};

use crate::analyze::analyze;
use crate::args::{resolve, SafeDecodeArgs};
use crate::conformance::{
    strip_decoding_derives, synthesize_conformance, synthesize_derive_replacement,
};
use crate::diagnostic::{Diagnostic, DiagnosticKind};
use crate::raw::RawScalarKind;
use crate::synth::{synthesize, synthesize_raw_lookup};

/// A declaration attached to the annotated enum
#[derive(Debug, Clone)]
pub enum Member {
    /// The fallback variant
    Variant(Variant),
    /// The decode routine
    Routine(ImplItemFn),
}

/// Everything one expansion produces
#[derive(Debug, Clone, Default)]
pub struct Expansion {
    /// New members in order: fallback variant (unless already declared), decode routine
    pub members: Vec<Member>,
    /// The `RawRepresentable` impl backing the decode routine
    pub raw_lookup: Option<ItemImpl>,
    /// The `Deserialize` conformance, when the enum doesn't derive one
    pub extension: Option<ItemImpl>,
    /// The forwarding `Deserialize` impl that replaces a derived one
    pub derive_replacement: Option<ItemImpl>,
    /// The resolved raw scalar kind
    pub raw_kind: Option<RawScalarKind>,
    /// Errors; when non-empty, nothing else is populated
    pub diagnostics: Vec<Diagnostic>,
}

impl Expansion {
    fn failed(diagnostic: Diagnostic) -> Self {
        Self {
            diagnostics: vec![diagnostic],
            ..Self::default()
        }
    }

    /// Whether the expansion produced declarations
    pub fn is_success(&self) -> bool {
        self.diagnostics.is_empty()
    }

    /// The synthesized fallback variant, if one was inserted
    pub fn fallback_variant(&self) -> Option<&Variant> {
        self.members.iter().find_map(|member| match member {
            Member::Variant(variant) => Some(variant),
            Member::Routine(_) => None,
        })
    }

    /// The synthesized decode routines
    pub fn routines(&self) -> impl Iterator<Item = &ImplItemFn> {
        self.members.iter().filter_map(|member| match member {
            Member::Routine(routine) => Some(routine),
            Member::Variant(_) => None,
        })
    }
}

/// Expand `#[safe_decode(args)]` on `item`.
pub fn expand(item: &Item, args: &SafeDecodeArgs) -> Expansion {
    try_expand(item, args).unwrap_or_else(Expansion::failed)
}

fn try_expand(item: &Item, args: &SafeDecodeArgs) -> Result<Expansion, Diagnostic> {
    let analysis = analyze(item)?;
    let raw_kind = analysis
        .raw_kind()
        .ok_or_else(|| Diagnostic::report(DiagnosticKind::InvalidRawValue, item))?;
    let config = resolve(raw_kind, args, item)?;
    analysis.validate_variants(raw_kind, &config.safe_case, &config.fallback_literal)?;

    let synthesized = synthesize(&analysis, &config);
    let mut members = Vec::with_capacity(2);
    if let Some(variant) = synthesized.fallback_variant {
        members.push(Member::Variant(variant));
    }
    members.push(Member::Routine(synthesized.decode_routine));

    Ok(Expansion {
        members,
        raw_lookup: Some(synthesize_raw_lookup(&analysis, &config)),
        extension: synthesize_conformance(&analysis),
        derive_replacement: synthesize_derive_replacement(&analysis),
        raw_kind: Some(raw_kind),
        diagnostics: Vec::new(),
    })
}

/// Lower an expansion into the final tokens.
///
/// A failed expansion keeps the item and appends the errors, only taking text
/// raw values out of an enum so rustc reports nothing beyond the diagnostic.
/// Otherwise the fallback variant is appended to the enum and text raw values
/// move out of the discriminants, which rustc only accepts as integers.
pub fn render(item: &Item, expansion: &Expansion) -> TokenStream {
    let item_enum = match item {
        Item::Enum(item_enum) if expansion.is_success() => item_enum,
        _ => return render_failure(item, expansion),
    };

    let mut item_enum = item_enum.clone();
    if let Some(variant) = expansion.fallback_variant() {
        item_enum.variants.push(variant.clone());
    }
    if expansion.raw_kind == Some(RawScalarKind::Text) {
        strip_text_raw_values(&mut item_enum);
    }
    if expansion.derive_replacement.is_some() {
        strip_decoding_derives(&mut item_enum);
    }

    let name = &item_enum.ident;
    let routines = expansion.routines();
    let raw_lookup = &expansion.raw_lookup;
    let extension = &expansion.extension;
    let derive_replacement = &expansion.derive_replacement;

    quote! {
        #item_enum

        impl #name {
            #(#routines)*
        }

        #raw_lookup
        #extension
        #derive_replacement
    }
}

fn render_failure(item: &Item, expansion: &Expansion) -> TokenStream {
    let errors = expansion.diagnostics.iter().map(Diagnostic::to_compile_error);
    let declares_text = analyze(item)
        .ok()
        .and_then(|analysis| analysis.raw_kind())
        == Some(RawScalarKind::Text);

    let mut item = item.clone();
    if let Item::Enum(item_enum) = &mut item {
        if declares_text {
            strip_text_raw_values(item_enum);
        }
    }

    quote! {
        #item
        #(#errors)*
    }
}

fn strip_text_raw_values(item_enum: &mut ItemEnum) {
    item_enum.attrs.retain(|attr| !is_repr(attr));
    for variant in item_enum.variants.iter_mut() {
        variant.discriminant = None;
    }
}

fn is_repr(attr: &Attribute) -> bool {
    attr.path().is_ident("repr")
}
