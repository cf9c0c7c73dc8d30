use proc_macro::TokenStream;
use syn::Path;

use crate::marker::Marker;

mod marker;

/// Implements `signet::component::Component`.
#[proc_macro_derive(Component)]
pub fn derive_component(input: TokenStream) -> TokenStream {
    marker::derive(input, Marker { module: "component", name: "Component" })
}

/// Implements `signet::system::System` with an empty update, for systems that
/// are only used for their membership.
#[proc_macro_derive(System)]
pub fn derive_system(input: TokenStream) -> TokenStream {
    marker::derive(input, Marker { module: "system", name: "System" })
}

/// The path to the runtime crate, overridable for re-exports.
fn crate_path() -> syn::Result<Path> {
    syn::parse_str(option_env!("SIGNET_PATH").unwrap_or("signet"))
}
