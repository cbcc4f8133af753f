extern crate proc_macro;

use proc_macro::TokenStream;
use quote::quote;
use syn::{parse_macro_input, DeriveInput};

/// Adds `to_json`, `from_json` and `from_value` helpers to a serde type.
///
/// The deriving crate must depend on `serde_json`.
#[proc_macro_derive(Json)]
pub fn json_macro(input: TokenStream) -> TokenStream {
    let input = parse_macro_input!(input as DeriveInput);

    let name = input.ident;
    let (impl_generics, ty_generics, where_clause) = input.generics.split_for_impl();

    let expanded = quote! {
        impl #impl_generics #name #ty_generics #where_clause {
            pub fn to_json(&self) -> serde_json::Result<String>
            where
                Self: ::serde::Serialize,
            {
                serde_json::to_string(self)
            }

            pub fn from_json(text: &str) -> serde_json::Result<Self>
            where
                Self: Sized,
                for<'de> Self: ::serde::Deserialize<'de>,
            {
                serde_json::from_str(text)
            }

            pub fn from_value(value: serde_json::Value) -> serde_json::Result<Self>
            where
                Self: Sized,
                for<'de> Self: ::serde::Deserialize<'de>,
            {
                serde_json::from_value(value)
            }
        }
    };

    TokenStream::from(expanded)
}
