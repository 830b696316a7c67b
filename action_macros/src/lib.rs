use convert_case::{Case, Casing};
use proc_macro::TokenStream;
use quote::{format_ident, quote};
use syn::{parse_macro_input, DeriveInput, LitStr};

/// Registers a UI action under the given `type` name.
///
/// ```ignore
/// #[derive(Debug, Deserialize)]
/// #[ui_action("findOptimal")]
/// pub struct FindOptimal {}
/// ```
///
/// Expands to an inherent `KIND` constant and a constructor that inserts the action into the
/// action registry before `main` runs.
#[proc_macro_attribute]
pub fn ui_action(attr: TokenStream, item: TokenStream) -> TokenStream {
    let kind = parse_macro_input!(attr as LitStr);
    let input = parse_macro_input!(item as DeriveInput);
    let name = &input.ident;

    let fn_name = format_ident!("register_{}", name.to_string().to_case(Case::Snake));

    let expanded = quote! {
        #input

        impl #name {
            pub const KIND: &'static str = #kind;
        }

        #[ctor::ctor]
        fn #fn_name() {
            register_action::<#name>(#name::KIND);
        }
    };

    expanded.into()
}
