//! Derive macros for the composable todo store
//!
//! # Available Macros
//!
//! - `#[derive(Action)]` - Generates helpers for action enums
//!
//! # Example
//!
//! ```ignore
//! use composable_todo_macros::Action;
//!
//! #[derive(Action, Clone, Debug)]
//! enum TodoAction {
//!     #[mutation]
//!     CreateTodo { desc: String },
//!
//!     SelectTodo { id: String },
//! }
//!
//! // Generated methods:
//! assert!(TodoAction::CreateTodo { desc: "test".into() }.is_mutation());
//! assert_eq!(TodoAction::SelectTodo { id: "1".into() }.action_type(), "SELECT_TODO");
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

use proc_macro::TokenStream;
use quote::quote;
use syn::{parse_macro_input, Attribute, Data, DeriveInput, Fields, Variant};

/// Derive macro for Action enums
///
/// Generates helper methods for action enums:
/// - `is_mutation()` - Returns true if this variant is marked `#[mutation]`
/// - `action_type()` - Returns the variant's type tag in `SCREAMING_SNAKE_CASE`
///   (`CreateTodo` becomes `"CREATE_TODO"`)
/// - `ACTION_TYPES` - All type tags, in declaration order
///
/// # Attributes
///
/// - `#[mutation]` - Mark a variant as one that mutates tracked data
///
/// # Panics
///
/// This macro will produce a compile error (not a runtime panic) if:
/// - Applied to a non-enum type
/// - `#[mutation]` carries arguments
#[proc_macro_derive(Action, attributes(mutation))]
pub fn derive_action(input: TokenStream) -> TokenStream {
    let input = parse_macro_input!(input as DeriveInput);
    let name = &input.ident;

    let Data::Enum(data_enum) = &input.data else {
        return syn::Error::new_spanned(input, "#[derive(Action)] can only be used on enums")
            .to_compile_error()
            .into();
    };

    let mut mutation_arms = Vec::new();
    let mut type_arms = Vec::new();
    let mut type_names = Vec::new();

    for variant in &data_enum.variants {
        if let Some(attr) = find_attribute(&variant.attrs, "mutation") {
            if attr.meta.require_path_only().is_err() {
                return syn::Error::new_spanned(attr, "#[mutation] takes no arguments")
                    .to_compile_error()
                    .into();
            }
            let pattern = variant_pattern(variant);
            mutation_arms.push(quote! { #pattern => true, });
        }

        let type_name = screaming_snake_case(&variant.ident.to_string());
        let pattern = variant_pattern(variant);
        type_arms.push(quote! { #pattern => #type_name, });
        type_names.push(type_name);
    }

    let (impl_generics, ty_generics, where_clause) = input.generics.split_for_impl();

    let expanded = quote! {
        impl #impl_generics #name #ty_generics #where_clause {
            /// Type tags of every variant, in declaration order
            pub const ACTION_TYPES: &'static [&'static str] = &[#(#type_names),*];

            /// Returns true if this action mutates tracked data
            #[must_use]
            #[allow(unreachable_patterns)]
            pub const fn is_mutation(&self) -> bool {
                match self {
                    #(#mutation_arms)*
                    _ => false,
                }
            }

            /// Returns the type tag of this action
            #[must_use]
            pub const fn action_type(&self) -> &'static str {
                match self {
                    #(#type_arms)*
                }
            }
        }
    };

    TokenStream::from(expanded)
}

/// Match pattern ignoring the variant's fields
fn variant_pattern(variant: &Variant) -> proc_macro2::TokenStream {
    let ident = &variant.ident;
    match &variant.fields {
        Fields::Named(_) => quote! { Self::#ident { .. } },
        Fields::Unnamed(_) => quote! { Self::#ident(..) },
        Fields::Unit => quote! { Self::#ident },
    }
}

/// Helper function to find a specific attribute in an attribute list
fn find_attribute<'a>(attrs: &'a [Attribute], name: &str) -> Option<&'a Attribute> {
    attrs.iter().find(|attr| attr.path().is_ident(name))
}

/// `CreateTodo` -> `CREATE_TODO`, `HTTPRequest2Sent` -> `HTTP_REQUEST2_SENT`
fn screaming_snake_case(ident: &str) -> String {
    let chars: Vec<char> = ident.chars().collect();
    let mut out = String::with_capacity(ident.len() + 4);

    for (i, &c) in chars.iter().enumerate() {
        if c.is_uppercase() && i > 0 {
            let prev = chars[i - 1];
            let next_is_lower = chars.get(i + 1).is_some_and(|n| n.is_lowercase());
            if prev.is_lowercase() || prev.is_ascii_digit() || (prev.is_uppercase() && next_is_lower) {
                out.push('_');
            }
        }
        out.extend(c.to_uppercase());
    }

    out
}
