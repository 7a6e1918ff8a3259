// SPDX-FileCopyrightText: 2026 RAprogramm <andrey.rozanov.vl@gmail.com>
// SPDX-License-Identifier: MIT

//! Structural validation.
//!
//! Runs after parsing and before generation. All findings are accumulated
//! into one error report so a single expansion surfaces every problem.
//! These checks guard the *structure* of the schema; the translator itself
//! never fails — unresolvable names inside a query degrade to naming
//! conventions instead.

use std::collections::HashSet;

use cpql_core::translate::{collect_named_params, convert_named_params, translate};

use super::generate::derived;
use super::metadata::metadata_map_for;
use super::parse::{MethodDef, MethodKind, SchemaDef};

/// Validate a parsed schema, accumulating every finding.
pub fn validate(schema: &SchemaDef) -> darling::Result<()> {
    let mut errors = darling::Error::accumulator();

    let mut seen_entities: HashSet<String> = HashSet::new();
    for entity in &schema.entities {
        let key = entity.name_str().to_lowercase();
        if !seen_entities.insert(key) {
            errors.push(
                darling::Error::custom(format!(
                    "duplicate entity `{}` in this schema module",
                    entity.ident
                ))
                .with_span(&entity.ident)
            );
        }

        let id_fields = entity.fields.iter().filter(|f| f.is_id).count();
        if id_fields == 0 {
            errors.push(
                darling::Error::custom(format!(
                    "entity `{}` requires exactly one #[id] field",
                    entity.ident
                ))
                .with_span(&entity.ident)
            );
        } else if id_fields > 1 {
            errors.push(
                darling::Error::custom(format!(
                    "entity `{}` declares more than one #[id] field",
                    entity.ident
                ))
                .with_span(&entity.ident)
            );
        }
    }

    let mut seen_repositories: HashSet<String> = HashSet::new();
    for repo in &schema.repositories {
        let key = repo.entity_name.to_lowercase();
        if !seen_repositories.insert(key) {
            errors.push(
                darling::Error::custom(format!(
                    "duplicate repository for entity `{}`",
                    repo.entity_name
                ))
                .with_span(&repo.ident)
            );
        }

        let Some(entity) = schema.entity(&repo.entity_name) else {
            errors.push(
                darling::Error::custom(format!(
                    "unknown entity `{}`: declare it in the same #[schema] module",
                    repo.entity_name
                ))
                .with_span(&repo.ident)
            );
            continue;
        };

        for method in &repo.methods {
            validate_method(schema, entity, method, &mut errors);
        }
    }

    errors.finish()
}

fn validate_method(
    schema: &SchemaDef,
    entity: &super::parse::EntityDef,
    method: &MethodDef,
    errors: &mut darling::error::Accumulator
) {
    let args = method.args();
    let name = method.name_str();

    match &method.kind {
        MethodKind::Query {
            cpql
        } => {
            let map = metadata_map_for(entity, schema);
            let sql = translate(cpql, &map);
            let arg_names: HashSet<String> =
                args.iter().map(|(ident, _)| ident.to_string()).collect();
            for param in collect_named_params(&sql) {
                if !arg_names.contains(&param) {
                    errors.push(
                        darling::Error::custom(format!(
                            "query parameter `:{param}` has no matching `{param}` argument"
                        ))
                        .with_span(&method.sig.ident)
                    );
                }
            }
        }
        MethodKind::Native {
            sql
        } => {
            let arg_names: HashSet<String> =
                args.iter().map(|(ident, _)| ident.to_string()).collect();
            for param in collect_named_params(&convert_named_params(sql)) {
                if !arg_names.contains(&param) {
                    errors.push(
                        darling::Error::custom(format!(
                            "query parameter `:{param}` has no matching `{param}` argument"
                        ))
                        .with_span(&method.sig.ident)
                    );
                }
            }
        }
        MethodKind::Derived => {
            let Some(query) = derived::parse_derived(&name) else {
                return;
            };
            let expected = derived::parameter_count(&query);
            if args.len() != expected {
                errors.push(
                    darling::Error::custom(format!(
                        "`{name}` needs {expected} parameter(s) but declares {}",
                        args.len()
                    ))
                    .with_span(&method.sig.ident)
                );
            }
        }
        MethodKind::BuiltIn => {
            validate_built_in(entity, method, &args, errors);
        }
        MethodKind::Provided => {}
    }
}

fn validate_built_in(
    entity: &super::parse::EntityDef,
    method: &MethodDef,
    args: &[(syn::Ident, syn::Type)],
    errors: &mut darling::error::Accumulator
) {
    let name = method.name_str();
    match name.as_str() {
        "find_by_id" | "delete_by_id" => {
            let Some(id_field) = entity.id_field() else {
                return; // already reported on the entity
            };
            match args {
                [(_, ty)] if *ty == id_field.ty => {}
                [(_, ty)] => {
                    errors.push(
                        darling::Error::custom(format!(
                            "`{name}` takes `{}` but the `{}` primary key is `{}`",
                            quote::quote!(#ty),
                            entity.ident,
                            {
                                let id_ty = &id_field.ty;
                                quote::quote!(#id_ty)
                            }
                        ))
                        .with_span(&method.sig.ident)
                    );
                }
                _ => {
                    errors.push(
                        darling::Error::custom(format!(
                            "`{name}` takes exactly one argument, the primary key"
                        ))
                        .with_span(&method.sig.ident)
                    );
                }
            }
        }
        "save" => {
            if args.len() != 1 {
                errors.push(
                    darling::Error::custom("`save` takes exactly one argument, the entity")
                        .with_span(&method.sig.ident)
                );
            }
        }
        "find_all" | "count" => {
            if !args.is_empty() {
                errors.push(
                    darling::Error::custom(format!("`{name}` takes no arguments"))
                        .with_span(&method.sig.ident)
                );
            }
        }
        "list" => {
            if args.len() != 2 {
                errors.push(
                    darling::Error::custom("`list` takes a limit and an offset")
                        .with_span(&method.sig.ident)
                );
            }
        }
        _ => {}
    }
}
