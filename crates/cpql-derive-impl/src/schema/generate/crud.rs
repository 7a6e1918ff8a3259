// SPDX-FileCopyrightText: 2026 RAprogramm <andrey.rozanov.vl@gmail.com>
// SPDX-License-Identifier: MIT

//! Built-in CRUD methods.
//!
//! Every repository receives `save`, `find_by_id`, `find_all`, `list`,
//! `delete_by_id` and `count` unless the user declares the name. `list`
//! pages with the standard `OFFSET .. ROWS FETCH FIRST .. ROWS ONLY` form. SQL is
//! fixed at expansion time; RETURNING and SELECT lists label each column
//! with its field name so rows map straight onto the entity struct.

use proc_macro2::TokenStream;
use quote::quote;
use syn::{Ident, TraitItemFn};

use super::super::parse::{MethodDef, RepositoryDef};
use super::repository::Context;

/// Signatures for built-ins the user did not declare, in a fixed order.
pub fn builtin_signatures(repo: &RepositoryDef, ctx: &Context<'_>) -> Vec<TraitItemFn> {
    let entity = ctx.entity_name;
    let id_ty = &ctx
        .entity
        .id_field()
        .expect("validated: entity has an #[id] field")
        .ty;

    let mut signatures: Vec<(&str, TraitItemFn)> = vec![
        (
            "save",
            syn::parse_quote! {
                /// Insert the entity and return the stored row.
                async fn save(&self, entity: &#entity) -> Result<#entity, sqlx::Error>;
            }
        ),
        (
            "find_by_id",
            syn::parse_quote! {
                /// Find one entity by primary key.
                async fn find_by_id(&self, id: #id_ty) -> Result<Option<#entity>, sqlx::Error>;
            }
        ),
        (
            "find_all",
            syn::parse_quote! {
                /// Fetch every row, ordered by primary key.
                async fn find_all(&self) -> Result<Vec<#entity>, sqlx::Error>;
            }
        ),
        (
            "list",
            syn::parse_quote! {
                /// Fetch one page of rows, ordered by primary key.
                async fn list(&self, limit: i64, offset: i64) -> Result<Vec<#entity>, sqlx::Error>;
            }
        ),
        (
            "delete_by_id",
            syn::parse_quote! {
                /// Delete by primary key. Returns whether a row was removed.
                async fn delete_by_id(&self, id: #id_ty) -> Result<bool, sqlx::Error>;
            }
        ),
        (
            "count",
            syn::parse_quote! {
                /// Count all rows.
                async fn count(&self) -> Result<i64, sqlx::Error>;
            }
        ),
    ];

    signatures.retain(|(name, _)| !repo.declares(name));
    signatures.into_iter().map(|(_, sig)| sig).collect()
}

/// Implementations for built-ins the user did not declare.
pub fn builtin_impls(repo: &RepositoryDef, ctx: &Context<'_>) -> Vec<TokenStream> {
    let mut out = Vec::new();
    for signature in builtin_signatures(repo, ctx) {
        let name = signature.sig.ident.to_string();
        let sig = &signature.sig;
        let args = arg_idents(&signature);
        let body = builtin_body(&name, &args, ctx);
        out.push(quote! {
            #sig {
                #body
            }
        });
    }
    out
}

/// Implementation for a built-in the user re-declared.
pub fn builtin_override(method: &MethodDef, ctx: &Context<'_>) -> TokenStream {
    let attrs = &method.attrs;
    let sig = &method.sig;
    let name = method.name_str();
    let args: Vec<Ident> = method.args().into_iter().map(|(ident, _)| ident).collect();
    let body = builtin_body(&name, &args, ctx);

    quote! {
        #(#attrs)*
        #sig {
            #body
        }
    }
}

fn arg_idents(signature: &TraitItemFn) -> Vec<Ident> {
    signature
        .sig
        .inputs
        .iter()
        .filter_map(|input| match input {
            syn::FnArg::Typed(pat) => match pat.pat.as_ref() {
                syn::Pat::Ident(ident) => Some(ident.ident.clone()),
                _ => None
            },
            syn::FnArg::Receiver(_) => None
        })
        .collect()
}

fn builtin_body(name: &str, args: &[Ident], ctx: &Context<'_>) -> TokenStream {
    match name {
        "save" => save_body(&args[0], ctx),
        "find_by_id" => find_by_id_body(&args[0], ctx),
        "find_all" => find_all_body(ctx),
        "list" => list_body(&args[0], &args[1], ctx),
        "delete_by_id" => delete_by_id_body(&args[0], ctx),
        "count" => count_body(ctx),
        other => unreachable!("unknown built-in `{other}`")
    }
}

fn save_body(entity_arg: &Ident, ctx: &Context<'_>) -> TokenStream {
    let entity = ctx.entity_name;
    let fields: Vec<&Ident> = ctx.entity.fields.iter().map(|f| &f.ident).collect();
    let columns = ctx
        .entity
        .fields
        .iter()
        .map(|f| f.column_name())
        .collect::<Vec<_>>()
        .join(", ");
    let placeholders = (1..=fields.len())
        .map(|i| format!("${i}"))
        .collect::<Vec<_>>()
        .join(", ");
    let sql = format!(
        "INSERT INTO {} ({columns}) VALUES ({placeholders}) RETURNING {}",
        ctx.table, ctx.select_columns
    );

    quote! {
        let row = sqlx::query_as::<_, #entity>(#sql)
            #( .bind(&#entity_arg.#fields) )*
            .fetch_one(self)
            .await?;
        Ok(row)
    }
}

fn find_by_id_body(id_arg: &Ident, ctx: &Context<'_>) -> TokenStream {
    let entity = ctx.entity_name;
    let sql = format!(
        "SELECT {} FROM {} WHERE {} = $1",
        ctx.select_columns, ctx.table, ctx.id_column
    );

    quote! {
        let row = sqlx::query_as::<_, #entity>(#sql)
            .bind(#id_arg)
            .fetch_optional(self)
            .await?;
        Ok(row)
    }
}

fn find_all_body(ctx: &Context<'_>) -> TokenStream {
    let entity = ctx.entity_name;
    let sql = format!(
        "SELECT {} FROM {} ORDER BY {}",
        ctx.select_columns, ctx.table, ctx.id_column
    );

    quote! {
        let rows = sqlx::query_as::<_, #entity>(#sql)
            .fetch_all(self)
            .await?;
        Ok(rows)
    }
}

fn list_body(limit_arg: &Ident, offset_arg: &Ident, ctx: &Context<'_>) -> TokenStream {
    let entity = ctx.entity_name;
    let sql = format!(
        "SELECT {} FROM {} ORDER BY {} OFFSET $2 ROWS FETCH FIRST $1 ROWS ONLY",
        ctx.select_columns, ctx.table, ctx.id_column
    );

    quote! {
        let rows = sqlx::query_as::<_, #entity>(#sql)
            .bind(#limit_arg)
            .bind(#offset_arg)
            .fetch_all(self)
            .await?;
        Ok(rows)
    }
}

fn delete_by_id_body(id_arg: &Ident, ctx: &Context<'_>) -> TokenStream {
    let sql = format!("DELETE FROM {} WHERE {} = $1", ctx.table, ctx.id_column);

    quote! {
        let result = sqlx::query(#sql)
            .bind(#id_arg)
            .execute(self)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}

fn count_body(ctx: &Context<'_>) -> TokenStream {
    let sql = format!("SELECT COUNT(*) FROM {}", ctx.table);

    quote! {
        let count: i64 = sqlx::query_scalar(#sql)
            .fetch_one(self)
            .await?;
        Ok(count)
    }
}
