// SPDX-FileCopyrightText: 2026 RAprogramm <andrey.rozanov.vl@gmail.com>
// SPDX-License-Identifier: MIT

//! Repository trait parsing.
//!
//! A `#[repository(entity = "...")]` trait declares query methods. Each
//! method is classified here; the generator later produces its body:
//!
//! - `#[query("...")]` — CPQL, run through the translator
//! - `#[query(native = "...")]` — raw SQL, bypasses the translator
//! - built-in names (`save`, `find_all`, `list`, `count`, `find_by_id`,
//!   `delete_by_id`) — standard CRUD
//! - `find_by_*` / `count_by_*` / `exists_by_*` / `delete_by_*` — derived
//!   from the method name
//! - methods with a default body — left alone
//!
//! Anything else is a structural error reported at the method.

use darling::FromMeta;
use syn::{Attribute, Ident, ItemTrait, LitStr, Signature, TraitItem, TraitItemFn, Type};

/// Whether a trait carries `#[repository(...)]`.
pub fn is_repository(item: &ItemTrait) -> bool {
    item.attrs.iter().any(|a| a.path().is_ident("repository"))
}

/// Built-in CRUD method names every repository receives.
pub const BUILT_IN_METHODS: [&str; 6] =
    ["save", "find_all", "list", "count", "find_by_id", "delete_by_id"];

/// Prefixes that mark a method as a derived query.
pub const DERIVED_PREFIXES: [&str; 4] = ["find_by_", "count_by_", "exists_by_", "delete_by_"];

/// Raw attribute shape for darling.
#[derive(Debug, FromMeta)]
struct RepositoryAttrs {
    /// Entity name this repository serves.
    entity: String
}

/// How a method body is produced.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MethodKind {
    /// CPQL string from `#[query("...")]`.
    Query {
        /// The raw CPQL text.
        cpql: String
    },

    /// Raw SQL from `#[query(native = "...")]`, emitted verbatim.
    Native {
        /// The raw SQL text.
        sql: String
    },

    /// Standard CRUD method overridden by the user's own declaration.
    BuiltIn,

    /// Query derived from the method name.
    Derived,

    /// Method with a default body; not generated.
    Provided
}

/// One parsed trait method.
#[derive(Debug)]
pub struct MethodDef {
    /// Method signature as declared.
    pub sig: Signature,

    /// Attributes preserved on the declaration (docs etc.), with `#[query]`
    /// removed.
    pub attrs: Vec<Attribute>,

    /// Body strategy.
    pub kind: MethodKind
}

impl MethodDef {
    fn from_item(item: &TraitItemFn) -> darling::Result<Self> {
        let sig = item.sig.clone();
        let name = sig.ident.to_string();

        let query_attr = item.attrs.iter().find(|a| a.path().is_ident("query"));
        let attrs: Vec<Attribute> = item
            .attrs
            .iter()
            .filter(|a| !a.path().is_ident("query"))
            .cloned()
            .collect();

        let kind = if let Some(attr) = query_attr {
            parse_query_attr(attr)?
        } else if item.default.is_some() {
            MethodKind::Provided
        } else if BUILT_IN_METHODS.contains(&name.as_str()) {
            MethodKind::BuiltIn
        } else if DERIVED_PREFIXES.iter().any(|p| name.starts_with(p)) {
            MethodKind::Derived
        } else {
            return Err(darling::Error::custom(format!(
                "cannot generate `{name}`: add #[query(...)] or use a \
                 find_by_/count_by_/exists_by_/delete_by_ name"
            ))
            .with_span(&sig.ident));
        };

        if !matches!(kind, MethodKind::Provided) {
            if sig.asyncness.is_none() {
                return Err(
                    darling::Error::custom("repository methods must be async")
                        .with_span(&sig.ident)
                );
            }
            if !matches!(sig.inputs.first(), Some(syn::FnArg::Receiver(_))) {
                return Err(
                    darling::Error::custom("repository methods must take &self")
                        .with_span(&sig.ident)
                );
            }
            if !returns_result(&sig) {
                return Err(
                    darling::Error::custom("repository methods must return Result<_, _>")
                        .with_span(&sig.ident)
                );
            }
        }

        Ok(Self {
            sig,
            attrs,
            kind
        })
    }

    /// Method name as a string.
    pub fn name_str(&self) -> String {
        self.sig.ident.to_string()
    }

    /// Typed arguments after the receiver, as `(ident, type)` pairs.
    pub fn args(&self) -> Vec<(Ident, Type)> {
        self.sig
            .inputs
            .iter()
            .filter_map(|input| match input {
                syn::FnArg::Typed(pat) => match pat.pat.as_ref() {
                    syn::Pat::Ident(ident) => Some((ident.ident.clone(), (*pat.ty).clone())),
                    _ => None
                },
                syn::FnArg::Receiver(_) => None
            })
            .collect()
    }
}

fn returns_result(sig: &Signature) -> bool {
    let syn::ReturnType::Type(_, ty) = &sig.output else {
        return false;
    };
    let Type::Path(path) = ty.as_ref() else {
        return false;
    };
    path.path
        .segments
        .last()
        .is_some_and(|segment| segment.ident == "Result")
}

fn parse_query_attr(attr: &Attribute) -> darling::Result<MethodKind> {
    // Positional form: #[query("SELECT ...")]
    if let Ok(lit) = attr.parse_args::<LitStr>() {
        return Ok(MethodKind::Query {
            cpql: lit.value()
        });
    }

    // Named form: #[query(native = "SELECT ...")]
    let mut native = None;
    attr.parse_nested_meta(|meta| {
        if meta.path.is_ident("native") {
            let value: LitStr = meta.value()?.parse()?;
            native = Some(value.value());
            Ok(())
        } else {
            Err(meta.error("expected #[query(\"...\")] or #[query(native = \"...\")]"))
        }
    })
    .map_err(darling::Error::from)?;

    match native {
        Some(sql) => Ok(MethodKind::Native {
            sql
        }),
        None => Err(
            darling::Error::custom("#[query] requires a query string").with_span(attr)
        )
    }
}

/// Complete parsed repository definition.
#[derive(Debug)]
pub struct RepositoryDef {
    /// Trait identifier (e.g. `UserRepository`).
    pub ident: Ident,

    /// Entity name from `#[repository(entity = "...")]`.
    pub entity_name: String,

    /// Parsed methods, in declaration order.
    pub methods: Vec<MethodDef>,

    /// The original item, re-emitted (with macro attributes stripped) by the
    /// generator.
    pub item: ItemTrait
}

impl RepositoryDef {
    /// Parse a repository definition from an `ItemTrait`.
    pub fn from_item(item: &ItemTrait) -> darling::Result<Self> {
        let attr = item
            .attrs
            .iter()
            .find(|a| a.path().is_ident("repository"))
            .expect("checked by is_repository");
        let attrs = RepositoryAttrs::from_meta(&attr.meta)?;

        let mut errors = darling::Error::accumulator();

        let mut methods = Vec::new();
        for trait_item in &item.items {
            match trait_item {
                TraitItem::Fn(method) => {
                    if let Some(method) = errors.handle(MethodDef::from_item(method)) {
                        methods.push(method);
                    }
                }
                other => {
                    errors.push(
                        darling::Error::custom("repository traits may only contain methods")
                            .with_span(other)
                    );
                }
            }
        }

        errors.finish_with(Self {
            ident: item.ident.clone(),
            entity_name: attrs.entity,
            methods,
            item: item.clone()
        })
    }

    /// Whether the user already declared a method with this name.
    pub fn declares(&self, name: &str) -> bool {
        self.methods.iter().any(|m| m.name_str() == name)
    }
}
