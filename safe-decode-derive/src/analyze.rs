//! Declaration analysis
//!
//! Reads the shape of the annotated item: whether it is an enum, which
//! raw-value type it declares through `#[repr(...)]`, which traits it derives
//! and which variants it already has. Nothing here mutates the item.

use std::collections::HashSet;

use syn::{
    punctuated::Punctuated, Attribute, Expr, ExprLit, Fields, Ident, Item, ItemEnum, Lit, Meta,
    Path, Token, Variant,
};

use crate::diagnostic::{Diagnostic, DiagnosticKind};
use crate::raw::{RawScalarKind, RawValue};

/// Read-only view of one existing variant
#[derive(Debug, Clone)]
pub struct VariantDescriptor<'a> {
    /// The variant as declared
    pub variant: &'a Variant,
    /// Explicit raw value (`Name = <expr>`), if any
    pub literal: Option<&'a Expr>,
}

impl<'a> VariantDescriptor<'a> {
    fn new(variant: &'a Variant) -> Self {
        Self {
            variant,
            literal: variant.discriminant.as_ref().map(|(_, expr)| expr),
        }
    }

    /// Variant name
    pub fn ident(&self) -> &'a Ident {
        &self.variant.ident
    }

    /// Whether the variant carries no fields
    pub fn is_unit(&self) -> bool {
        matches!(self.variant.fields, Fields::Unit)
    }

    /// The explicit literal as a string, when it is a string literal
    pub fn text_literal(&self) -> Option<String> {
        match self.literal? {
            Expr::Lit(ExprLit {
                lit: Lit::Str(lit), ..
            }) => Some(lit.value()),
            _ => None,
        }
    }

    /// Effective text raw value: the explicit string literal, or the variant name
    pub fn text_value(&self) -> String {
        self.text_literal()
            .unwrap_or_else(|| syn::ext::IdentExt::unraw(self.ident()).to_string())
    }
}

/// Snapshot of everything the pipeline needs from the declaration
#[derive(Debug)]
pub struct Analysis<'a> {
    item: &'a ItemEnum,
    raw_base: Option<Ident>,
    conformances: Vec<Ident>,
    variants: Vec<VariantDescriptor<'a>>,
}

/// Analyze an annotated item.
///
/// Fails with [`DiagnosticKind::NotAnEnum`] for every item kind but `enum`.
pub fn analyze(item: &Item) -> Result<Analysis<'_>, Diagnostic> {
    match item {
        Item::Enum(item) => Ok(Analysis::of(item)),
        other => Err(Diagnostic::report(DiagnosticKind::NotAnEnum, other)),
    }
}

impl<'a> Analysis<'a> {
    fn of(item: &'a ItemEnum) -> Self {
        Self {
            item,
            raw_base: raw_base(&item.attrs),
            conformances: conformances(&item.attrs),
            variants: item.variants.iter().map(VariantDescriptor::new).collect(),
        }
    }

    /// The enum's name
    pub fn ident(&self) -> &'a Ident {
        &self.item.ident
    }

    /// First identifier of the first `#[repr(...)]`, the raw-value candidate
    pub fn raw_base(&self) -> Option<&Ident> {
        self.raw_base.as_ref()
    }

    /// The raw scalar kind, if the candidate is a supported type name
    pub fn raw_kind(&self) -> Option<RawScalarKind> {
        self.raw_base()
            .and_then(|ident| RawScalarKind::from_type_name(&ident.to_string()))
    }

    /// Derived traits in declaration order, reduced to their last path segment
    pub fn conformances(&self) -> &[Ident] {
        &self.conformances
    }

    /// Existing variants in declaration order
    pub fn variants(&self) -> &[VariantDescriptor<'a>] {
        &self.variants
    }

    /// Whether a variant with exactly this name already exists
    pub fn has_variant(&self, ident: &Ident) -> bool {
        self.variants.iter().any(|v| v.ident() == ident)
    }

    /// Check that every variant can carry a raw value of `kind`, and that text
    /// raw values stay unique once the fallback is added.
    ///
    /// The fallback only counts when it will actually be inserted, i.e. when no
    /// variant already has its name.
    pub fn validate_variants(
        &self,
        kind: RawScalarKind,
        fallback: &Ident,
        fallback_literal: &RawValue,
    ) -> Result<(), Diagnostic> {
        for descriptor in &self.variants {
            let literal_ok = match (kind, descriptor.literal) {
                (_, None) => true,
                (RawScalarKind::Text, Some(_)) => descriptor.text_literal().is_some(),
                (RawScalarKind::Integer, Some(expr)) => !matches!(
                    expr,
                    Expr::Lit(ExprLit {
                        lit: Lit::Str(_),
                        ..
                    })
                ),
            };
            if !descriptor.is_unit() || !literal_ok {
                return Err(Diagnostic::report(
                    DiagnosticKind::InvalidVariantRawValue,
                    descriptor.variant,
                ));
            }
        }

        if kind == RawScalarKind::Text {
            let mut seen = HashSet::new();
            for descriptor in &self.variants {
                if !seen.insert(descriptor.text_value()) {
                    return Err(Diagnostic::report(
                        DiagnosticKind::DuplicateRawValue,
                        descriptor.variant,
                    ));
                }
            }
            if let RawValue::Text(literal) = fallback_literal {
                if !self.has_variant(fallback) && seen.contains(literal) {
                    return Err(Diagnostic::report(
                        DiagnosticKind::DuplicateRawValue,
                        self.item,
                    ));
                }
            }
        }

        Ok(())
    }
}

fn raw_base(attrs: &[Attribute]) -> Option<Ident> {
    let repr = attrs.iter().find(|attr| attr.path().is_ident("repr"))?;
    let metas = repr
        .parse_args_with(Punctuated::<Meta, Token![,]>::parse_terminated)
        .ok()?;
    metas.first()?.path().get_ident().cloned()
}

fn conformances(attrs: &[Attribute]) -> Vec<Ident> {
    attrs
        .iter()
        .filter(|attr| attr.path().is_ident("derive"))
        .filter_map(|attr| {
            attr.parse_args_with(Punctuated::<Path, Token![,]>::parse_terminated)
                .ok()
        })
        .flatten()
        .filter_map(|path| path.segments.last().map(|segment| segment.ident.clone()))
        .collect()
}
