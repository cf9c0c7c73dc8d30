use proc_macro::TokenStream;
use quote::{format_ident, quote};
use syn::parse::{Parse, ParseStream};
use syn::{parse_macro_input, Data, DeriveInput, Generics, Ident, Path};

use crate::crate_path;

/// A marker trait of the runtime crate, as `module::Trait`.
pub struct Marker {
    pub module: &'static str,
    pub name: &'static str,
}

/// Implements a trait whose items all have defaults.
pub fn derive(input: TokenStream, marker: Marker) -> TokenStream {
    let input = parse_macro_input!(input as DeriveMarker);

    match input.expand(&marker) {
        Ok(tokens) => tokens.into(),
        Err(error) => error.to_compile_error().into(),
    }
}

struct DeriveMarker {
    ident: Ident,
    generics: Generics,
    is_union: bool,
    crate_path: Path,
}

impl DeriveMarker {
    fn expand(self, marker: &Marker) -> syn::Result<proc_macro2::TokenStream> {
        let Self { ident, generics, is_union, crate_path } = self;

        if is_union {
            return Err(syn::Error::new(
                ident.span(),
                format!("`{}` cannot be derived for unions", marker.name),
            ));
        }

        let module = format_ident!("{}", marker.module);
        let name = format_ident!("{}", marker.name);
        let (impl_generics, type_generics, where_clause) =
            generics.split_for_impl();

        Ok(quote! {
            #[automatically_derived]
            impl #impl_generics ::#crate_path::#module::#name for #ident #type_generics
            #where_clause
            {
            }
        })
    }
}

impl Parse for DeriveMarker {
    fn parse(input: ParseStream) -> syn::Result<Self> {
        let DeriveInput { ident, generics, data, .. } = input.parse()?;
        let is_union = matches!(data, Data::Union(_));
        let crate_path = crate_path()?;

        Ok(Self { ident, generics, is_union, crate_path })
    }
}
