mod choice;

use proc_macro::TokenStream;

/**
Derive `routeargs::Choice` for a fieldless enum. Each variant becomes an
option named after the variant in kebab-case, so `RemoteAddress` is spelled
`remote-address`. Use `#[choice(rename = "...")]` on a variant to spell it
differently.
*/
#[proc_macro_derive(Choice, attributes(choice))]
pub fn derive_choice(item: TokenStream) -> TokenStream {
    match choice::derive_choice_result(item.into()) {
        Ok(tokens) => tokens.into(),
        Err(err) => err.to_compile_error().into(),
    }
}
