//! Procedural macros for little-lisp builtin functions
//!
//! Provides the `#[builtin]` attribute macro for defining Lisp builtins
//! with rustdoc-style documentation that is automatically converted to a
//! `BuiltinSpec` and a `_spec()` constructor function.

use proc_macro::TokenStream;
use quote::quote;
use syn::{
    parse::{Parse, ParseStream},
    parse_macro_input,
    punctuated::Punctuated,
    Attribute, Expr, ExprLit, ItemFn, Lit, Meta, Token,
};

/// `name = "+", min_arity = 0, max_arity = 0, variadic = true`
struct BuiltinArgs {
    name: String,
    min_arity: usize,
    max_arity: Option<usize>,
    variadic: bool,
}

impl Parse for BuiltinArgs {
    fn parse(input: ParseStream) -> syn::Result<Self> {
        let metas = Punctuated::<Meta, Token![,]>::parse_terminated(input)?;
        let mut name = None;
        let mut min_arity = 0usize;
        let mut max_arity = None;
        let mut variadic = false;

        for meta in metas {
            let Meta::NameValue(nv) = meta else { continue };
            let ident = nv
                .path
                .get_ident()
                .map(|i| i.to_string())
                .unwrap_or_default();
            let Expr::Lit(ExprLit { lit, .. }) = nv.value else {
                continue;
            };
            match (ident.as_str(), lit) {
                ("name", Lit::Str(s)) => name = Some(s.value()),
                ("min_arity", Lit::Int(n)) => min_arity = n.base10_parse().unwrap_or(0),
                ("max_arity", Lit::Int(n)) => max_arity = Some(n.base10_parse().unwrap_or(0)),
                ("variadic", Lit::Bool(b)) => variadic = b.value,
                _ => {}
            }
        }

        Ok(BuiltinArgs {
            name: name.unwrap_or_default(),
            min_arity,
            max_arity,
            variadic,
        })
    }
}

/// Extract rustdoc comments (`///` lines) from a function's attributes,
/// joined by newlines, in source order.
fn extract_doc_comments(attrs: &[Attribute]) -> String {
    attrs
        .iter()
        .filter_map(|attr| {
            if !attr.path().is_ident("doc") {
                return None;
            }
            if let Meta::NameValue(nv) = &attr.meta {
                if let Expr::Lit(ExprLit {
                    lit: Lit::Str(s), ..
                }) = &nv.value
                {
                    return Some(s.value().trim().to_string());
                }
            }
            None
        })
        .collect::<Vec<_>>()
        .join("\n")
}

/// Split doc text into a summary (everything before the first `# Examples`
/// heading) and a list of `lisp`-fenced example lines.
fn split_doc(raw: &str) -> (String, Vec<String>) {
    let mut summary_lines = Vec::new();
    let mut examples = Vec::new();
    let mut in_examples = false;
    let mut in_fence = false;

    for line in raw.lines() {
        let trimmed = line.trim();
        if trimmed.eq_ignore_ascii_case("# examples") {
            in_examples = true;
            continue;
        }
        if in_examples {
            if trimmed.starts_with("```") {
                in_fence = !in_fence;
                continue;
            }
            if in_fence && !trimmed.is_empty() {
                examples.push(trimmed.to_string());
            }
        } else {
            summary_lines.push(line);
        }
    }

    (summary_lines.join("\n").trim().to_string(), examples)
}

/// Attribute macro for defining Lisp builtin functions.
///
/// Wraps a handler `fn(&[Value], &Rc<Environment>) -> Result<Value, EvalError>`
/// with a sibling `<fn>_spec()` function returning a `BuiltinSpec` populated
/// from the attribute arguments and the function's rustdoc comment.
#[proc_macro_attribute]
pub fn builtin(attr: TokenStream, item: TokenStream) -> TokenStream {
    let func = parse_macro_input!(item as ItemFn);
    let args = parse_macro_input!(attr as BuiltinArgs);

    let fn_name = func.sig.ident.clone();
    let spec_fn_name = quote::format_ident!("{}_spec", fn_name);

    let raw_doc = extract_doc_comments(&func.attrs);
    let (summary, examples) = split_doc(&raw_doc);

    let lisp_name = if args.name.is_empty() {
        fn_name.to_string()
    } else {
        args.name
    };
    let min_arity = args.min_arity;
    let max_arity = match args.max_arity {
        Some(n) => quote! { Some(#n) },
        None => quote! { None },
    };
    let variadic = args.variadic;

    let expanded = quote! {
        #func

        #[allow(dead_code)]
        pub fn #spec_fn_name() -> crate::value::BuiltinSpec {
            crate::value::BuiltinSpec {
                name: #lisp_name,
                min_arity: #min_arity,
                max_arity: #max_arity,
                variadic: #variadic,
                doc: #summary,
                examples: &[#(#examples),*],
                handler: #fn_name,
            }
        }
    };

    TokenStream::from(expanded)
}
