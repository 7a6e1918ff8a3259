// SPDX-FileCopyrightText: 2026 RAprogramm <andrey.rozanov.vl@gmail.com>
// SPDX-License-Identifier: MIT

//! Method body emission.
//!
//! Every generated body follows the same shape: an SQL string literal
//! computed at expansion time, a `.bind()` chain in placeholder order, and a
//! fetch call chosen from the declared return type:
//!
//! | declared `Ok` type | fetch |
//! |--------------------|-------|
//! | `Vec<Entity>` | `query_as` + `fetch_all` |
//! | `Option<Entity>` | `query_as` + `fetch_optional` |
//! | `Entity` | `query_as` + `fetch_one` |
//! | `Vec<scalar>` / `Option<scalar>` / scalar | `query_scalar` |
//! | `u64` | `execute` + `rows_affected` |
//! | `()` | `execute` |
//!
//! Named placeholders bind to the same-named method argument (validated
//! earlier); native queries without named placeholders bind every argument
//! in declaration order.

use cpql_core::translate::{convert_named_params, to_positional, translate};
use proc_macro2::TokenStream;
use quote::quote;
use syn::Type;

use super::super::parse::MethodDef;
use super::derived::{DerivedOp, derived_sql, parse_derived};
use super::repository::Context;

/// Fetch strategy derived from the declared return type.
enum Fetch {
    AllRows(Type),
    AllScalars(Type),
    OptionalRow(Type),
    OptionalScalar(Type),
    OneRow(Type),
    OneScalar(Type),
    Affected,
    Unit
}

/// Body for a `#[query("...")]` method: CPQL through the translator.
pub fn query_method(method: &MethodDef, cpql: &str, ctx: &Context<'_>) -> TokenStream {
    let (sql, params) = to_positional(&translate(cpql, &ctx.metadata));
    let binds = named_binds(method, &params);
    emit(method, &sql, binds, ctx)
}

/// Body for a `#[query(native = "...")]` method: SQL emitted verbatim apart
/// from parameter-syntax conversion.
pub fn native_method(method: &MethodDef, sql: &str, ctx: &Context<'_>) -> TokenStream {
    let (sql, params) = to_positional(&convert_named_params(sql));
    let binds = if params.is_empty() {
        // Positional native SQL ($1, $2, ...): bind declared arguments in
        // order.
        method
            .args()
            .into_iter()
            .map(|(ident, _)| quote! { .bind(#ident) })
            .collect()
    } else {
        named_binds(method, &params)
    };
    emit(method, &sql, binds, ctx)
}

/// Body for a derived `find_by_*` / `count_by_*` / `exists_by_*` /
/// `delete_by_*` method.
pub fn derived_method(method: &MethodDef, ctx: &Context<'_>) -> TokenStream {
    let name = method.name_str();
    let query = parse_derived(&name).expect("checked during classification");

    let args = method.args();
    let param_names: Vec<String> = args.iter().map(|(ident, _)| ident.to_string()).collect();
    let params: Vec<&str> = param_names.iter().map(String::as_str).collect();

    let sql = derived_sql(
        &query,
        &ctx.select_columns,
        &ctx.table,
        &params,
        &ctx.entity_meta
    );
    let (sql, placeholders) = to_positional(&sql);
    let binds = named_binds(method, &placeholders);

    match query.op {
        DerivedOp::Exists => emit_exists(method, &sql, binds),
        _ => emit(method, &sql, binds, ctx)
    }
}

/// `.bind()` chain for named placeholders, in first-appearance order.
fn named_binds(method: &MethodDef, params: &[String]) -> Vec<TokenStream> {
    let args = method.args();
    params
        .iter()
        .filter_map(|param| {
            args.iter()
                .find(|(ident, _)| ident == param)
                .map(|(ident, _)| quote! { .bind(#ident) })
        })
        .collect()
}

fn emit(
    method: &MethodDef,
    sql: &str,
    binds: Vec<TokenStream>,
    ctx: &Context<'_>
) -> TokenStream {
    let attrs = &method.attrs;
    let sig = &method.sig;
    let body = fetch_body(sql, &binds, classify(method, ctx));

    quote! {
        #(#attrs)*
        #sig {
            #body
        }
    }
}

/// `exists_by_*` runs a COUNT and compares against zero.
fn emit_exists(method: &MethodDef, sql: &str, binds: Vec<TokenStream>) -> TokenStream {
    let attrs = &method.attrs;
    let sig = &method.sig;

    quote! {
        #(#attrs)*
        #sig {
            let count: i64 = sqlx::query_scalar(#sql)
                #(#binds)*
                .fetch_one(self)
                .await?;
            Ok(count > 0)
        }
    }
}

fn fetch_body(sql: &str, binds: &[TokenStream], fetch: Fetch) -> TokenStream {
    match fetch {
        Fetch::AllRows(ty) => quote! {
            let rows = sqlx::query_as::<_, #ty>(#sql)
                #(#binds)*
                .fetch_all(self)
                .await?;
            Ok(rows)
        },
        Fetch::AllScalars(ty) => quote! {
            let values: Vec<#ty> = sqlx::query_scalar(#sql)
                #(#binds)*
                .fetch_all(self)
                .await?;
            Ok(values)
        },
        Fetch::OptionalRow(ty) => quote! {
            let row = sqlx::query_as::<_, #ty>(#sql)
                #(#binds)*
                .fetch_optional(self)
                .await?;
            Ok(row)
        },
        Fetch::OptionalScalar(ty) => quote! {
            let value: Option<#ty> = sqlx::query_scalar(#sql)
                #(#binds)*
                .fetch_optional(self)
                .await?;
            Ok(value)
        },
        Fetch::OneRow(ty) => quote! {
            let row = sqlx::query_as::<_, #ty>(#sql)
                #(#binds)*
                .fetch_one(self)
                .await?;
            Ok(row)
        },
        Fetch::OneScalar(ty) => quote! {
            let value: #ty = sqlx::query_scalar(#sql)
                #(#binds)*
                .fetch_one(self)
                .await?;
            Ok(value)
        },
        Fetch::Affected => quote! {
            let result = sqlx::query(#sql)
                #(#binds)*
                .execute(self)
                .await?;
            Ok(result.rows_affected())
        },
        Fetch::Unit => quote! {
            sqlx::query(#sql)
                #(#binds)*
                .execute(self)
                .await?;
            Ok(())
        }
    }
}

fn classify(method: &MethodDef, ctx: &Context<'_>) -> Fetch {
    let Some(ok) = result_ok_type(&method.sig) else {
        return Fetch::Unit;
    };

    if is_unit(&ok) {
        return Fetch::Unit;
    }
    if is_ident(&ok, "u64") {
        return Fetch::Affected;
    }
    if let Some(inner) = unwrap_generic(&ok, "Vec") {
        return if is_entity(&inner, ctx) {
            Fetch::AllRows(inner)
        } else {
            Fetch::AllScalars(inner)
        };
    }
    if let Some(inner) = unwrap_generic(&ok, "Option") {
        return if is_entity(&inner, ctx) {
            Fetch::OptionalRow(inner)
        } else {
            Fetch::OptionalScalar(inner)
        };
    }
    if is_entity(&ok, ctx) {
        Fetch::OneRow(ok)
    } else {
        Fetch::OneScalar(ok)
    }
}

/// The `T` in a declared `Result<T, E>` return type.
fn result_ok_type(sig: &syn::Signature) -> Option<Type> {
    let syn::ReturnType::Type(_, ty) = &sig.output else {
        return None;
    };
    let Type::Path(path) = ty.as_ref() else {
        return None;
    };
    let segment = path.path.segments.last()?;
    if segment.ident != "Result" {
        return None;
    }
    let syn::PathArguments::AngleBracketed(args) = &segment.arguments else {
        return None;
    };
    args.args.iter().find_map(|arg| match arg {
        syn::GenericArgument::Type(ty) => Some(ty.clone()),
        _ => None
    })
}

fn unwrap_generic(ty: &Type, wrapper: &str) -> Option<Type> {
    let Type::Path(path) = ty else {
        return None;
    };
    let segment = path.path.segments.last()?;
    if segment.ident != wrapper {
        return None;
    }
    let syn::PathArguments::AngleBracketed(args) = &segment.arguments else {
        return None;
    };
    args.args.iter().find_map(|arg| match arg {
        syn::GenericArgument::Type(ty) => Some(ty.clone()),
        _ => None
    })
}

fn is_unit(ty: &Type) -> bool {
    matches!(ty, Type::Tuple(tuple) if tuple.elems.is_empty())
}

fn is_ident(ty: &Type, name: &str) -> bool {
    matches!(ty, Type::Path(path) if path.path.segments.last().is_some_and(|s| s.ident == name))
}

fn is_entity(ty: &Type, ctx: &Context<'_>) -> bool {
    let Type::Path(path) = ty else {
        return false;
    };
    let Some(segment) = path.path.segments.last() else {
        return false;
    };
    let name = segment.ident.to_string();
    ctx.schema.entity(&name).is_some()
}

#[cfg(test)]
mod tests {
    use super::*;
    use super::super::super::parse::{MethodKind, SchemaDef};
    use syn::parse_quote;

    fn schema() -> SchemaDef {
        let module: syn::ItemMod = parse_quote! {
            mod store {
                #[entity(table = "orders")]
                #[relation(name = "customer", kind = "many_to_one", target = "Customer", join_column = "customer_id")]
                pub struct Order {
                    #[id]
                    pub id: i64,
                    pub customer_id: i64,
                    pub total: i64,
                }

                #[entity(table = "customers")]
                pub struct Customer {
                    #[id]
                    pub id: i64,
                    pub name: String,
                }

                #[repository(entity = "Order")]
                pub trait OrderRepository {
                    #[query("SELECT o FROM Order o JOIN Customer c ON o.customer_id = c.id WHERE c.name = :name")]
                    async fn for_customer(&self, name: &str) -> Result<Vec<Order>, sqlx::Error>;

                    #[query("SELECT COUNT(o) FROM Order o")]
                    async fn total_orders(&self) -> Result<i64, sqlx::Error>;

                    #[query("DELETE FROM Order o WHERE o.total = :total")]
                    async fn purge_total(&self, total: i64) -> Result<u64, sqlx::Error>;

                    #[query(native = "SELECT * FROM orders WHERE total > $1")]
                    async fn raw_above(&self, total: i64) -> Result<Vec<Order>, sqlx::Error>;

                    async fn exists_by_customer_id(&self, customer_id: i64) -> Result<bool, sqlx::Error>;
                }
            }
        };
        SchemaDef::from_module(&module).unwrap()
    }

    fn generated(index: usize) -> String {
        let schema = schema();
        let repo = &schema.repositories[0];
        let ctx = Context::new(repo, &schema);
        let method = &repo.methods[index];
        match &method.kind {
            MethodKind::Query {
                cpql
            } => query_method(method, cpql, &ctx).to_string(),
            MethodKind::Native {
                sql
            } => native_method(method, sql, &ctx).to_string(),
            MethodKind::Derived => derived_method(method, &ctx).to_string(),
            other => panic!("unexpected kind {other:?}")
        }
    }

    #[test]
    fn join_query_translates_and_binds() {
        let tokens = generated(0);
        assert!(tokens.contains(
            "FROM orders o JOIN customers c ON customer_id = id WHERE name = $1"
        ));
        assert!(tokens.contains("query_as :: < _ , Order >"));
        assert!(tokens.contains(". bind (name)"));
        assert!(tokens.contains("fetch_all"));
    }

    #[test]
    fn count_query_uses_scalar() {
        let tokens = generated(1);
        assert!(tokens.contains("SELECT COUNT(*) FROM orders"));
        assert!(tokens.contains("query_scalar"));
        assert!(tokens.contains("fetch_one"));
    }

    #[test]
    fn delete_query_reports_rows_affected() {
        let tokens = generated(2);
        assert!(tokens.contains("DELETE FROM orders WHERE total = $1"));
        assert!(tokens.contains("execute"));
        assert!(tokens.contains("rows_affected"));
    }

    #[test]
    fn native_query_binds_positionally() {
        let tokens = generated(3);
        assert!(tokens.contains("SELECT * FROM orders WHERE total > $1"));
        assert!(tokens.contains(". bind (total)"));
    }

    #[test]
    fn exists_compares_count() {
        let tokens = generated(4);
        assert!(tokens.contains("SELECT COUNT(*) FROM orders WHERE customer_id = $1"));
        assert!(tokens.contains("count > 0"));
    }
}
