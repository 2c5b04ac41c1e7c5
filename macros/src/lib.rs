//! Derive macros for storefront action enums
//!
//! # Available Macros
//!
//! - `#[derive(Action)]` - Implements `storefront_core::action::Action` and
//!   generates command/event classification helpers
//!
//! # Example
//!
//! ```ignore
//! use storefront_macros::Action;
//!
//! #[derive(Action, Clone, Debug)]
//! enum CartAction {
//!     #[command]
//!     #[action_type("[Cart] Load Cart")]
//!     LoadCart { user_id: String, cart_id: String },
//!
//!     #[event]
//!     #[action_type("[Cart] Load Cart Success")]
//!     LoadCartSuccess { cart: Cart },
//! }
//!
//! // Generated methods:
//! assert_eq!(action.action_type(), "[Cart] Load Cart");
//! assert!(action.is_command());
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

use proc_macro::TokenStream;
use quote::quote;
use syn::{parse_macro_input, Attribute, Data, DeriveInput, Fields, LitStr, Variant};

/// Derive macro for action enums
///
/// Generates:
/// - `impl storefront_core::action::Action` whose `action_type()` returns the
///   string given in `#[action_type("...")]`, or the variant name when absent
/// - `is_command()` - true for variants marked `#[command]`
/// - `is_event()` - true for variants marked `#[event]`
///
/// # Attributes
///
/// - `#[action_type("[Feature] Verb")]` - Stable type string of the variant
/// - `#[command]` - The variant starts work (usually through a connector)
/// - `#[event]` - The variant reports an outcome
///
/// # Errors
///
/// Produces a compile error if:
/// - Applied to a non-enum type
/// - A variant has both `#[command]` and `#[event]`
/// - `#[action_type]` is not given a single string literal
#[proc_macro_derive(Action, attributes(action_type, command, event))]
pub fn derive_action(input: TokenStream) -> TokenStream {
    let input = parse_macro_input!(input as DeriveInput);
    let name = &input.ident;
    let (impl_generics, ty_generics, where_clause) = input.generics.split_for_impl();

    let Data::Enum(data_enum) = &input.data else {
        return syn::Error::new_spanned(&input, "#[derive(Action)] can only be used on enums")
            .to_compile_error()
            .into();
    };

    let mut action_type_arms = Vec::new();
    let mut is_command_arms = Vec::new();
    let mut is_event_arms = Vec::new();

    for variant in &data_enum.variants {
        let is_command = has_attribute(&variant.attrs, "command");
        let is_event = has_attribute(&variant.attrs, "event");

        if is_command && is_event {
            return syn::Error::new_spanned(variant, "Variant cannot be both #[command] and #[event]")
                .to_compile_error()
                .into();
        }

        let type_string = match action_type_of(variant) {
            Ok(type_string) => type_string,
            Err(error) => return error.to_compile_error().into(),
        };

        let pattern = variant_pattern(variant);
        action_type_arms.push(quote! { #pattern => #type_string, });
        if is_command {
            is_command_arms.push(quote! { #pattern => true, });
        }
        if is_event {
            is_event_arms.push(quote! { #pattern => true, });
        }
    }

    let expanded = quote! {
        impl #impl_generics ::storefront_core::action::Action for #name #ty_generics #where_clause {
            fn action_type(&self) -> &'static str {
                match self {
                    #(#action_type_arms)*
                }
            }
        }

        impl #impl_generics #name #ty_generics #where_clause {
            /// Returns true if this action is a command
            #[must_use]
            #[allow(clippy::match_like_matches_macro, unreachable_patterns)]
            pub const fn is_command(&self) -> bool {
                match self {
                    #(#is_command_arms)*
                    _ => false,
                }
            }

            /// Returns true if this action is an event
            #[must_use]
            #[allow(clippy::match_like_matches_macro, unreachable_patterns)]
            pub const fn is_event(&self) -> bool {
                match self {
                    #(#is_event_arms)*
                    _ => false,
                }
            }
        }
    };

    TokenStream::from(expanded)
}

/// Match pattern for a variant, ignoring its fields
fn variant_pattern(variant: &Variant) -> proc_macro2::TokenStream {
    let ident = &variant.ident;
    match &variant.fields {
        Fields::Named(_) => quote! { Self::#ident { .. } },
        Fields::Unnamed(_) => quote! { Self::#ident(..) },
        Fields::Unit => quote! { Self::#ident },
    }
}

/// The `#[action_type("...")]` string of a variant, defaulting to its name
fn action_type_of(variant: &Variant) -> syn::Result<LitStr> {
    match variant.attrs.iter().find(|attr| attr.path().is_ident("action_type")) {
        Some(attr) => attr.parse_args::<LitStr>(),
        None => Ok(LitStr::new(&variant.ident.to_string(), variant.ident.span())),
    }
}

/// Helper function to check if an attribute list contains a specific attribute
fn has_attribute(attrs: &[Attribute], name: &str) -> bool {
    attrs.iter().any(|attr| attr.path().is_ident(name))
}
