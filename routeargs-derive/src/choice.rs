use darling::{FromAttributes, util::SpannedValue};
use heck::ToKebabCase as _;
use itertools::Itertools as _;
use proc_macro2::TokenStream as TokenStream2;
use quote::quote;
use syn::{Data, DeriveInput, Fields, Ident, Token, Variant, punctuated::Punctuated, spanned::Spanned as _};

#[derive(FromAttributes)]
#[darling(attributes(choice))]
struct VariantAttr {
    rename: Option<SpannedValue<String>>,
}

struct ParsedVariant<'a> {
    ident: &'a Ident,

    /// The option string that selects this variant
    option: SpannedValue<String>,
}

fn parse_variants<'a>(
    variants: &'a Punctuated<Variant, Token![,]>,
) -> syn::Result<Vec<ParsedVariant<'a>>> {
    let parsed: Vec<ParsedVariant<'a>> = variants
        .iter()
        .map(|variant| {
            if !matches!(variant.fields, Fields::Unit) {
                return Err(syn::Error::new(
                    variant.fields.span(),
                    "`Choice` variants can't have fields",
                ));
            }

            let attr = VariantAttr::from_attributes(&variant.attrs)?;
            let option = attr.rename.unwrap_or_else(|| {
                SpannedValue::new(variant.ident.to_string().to_kebab_case(), variant.ident.span())
            });

            Ok(ParsedVariant {
                ident: &variant.ident,
                option,
            })
        })
        .try_collect()?;

    if let Some(duplicate) = parsed
        .iter()
        .duplicates_by(|variant| variant.option.as_str())
        .next()
    {
        return Err(syn::Error::new(
            duplicate.option.span(),
            format!("duplicate choice {:?}", duplicate.option.as_str()),
        ));
    }

    Ok(parsed)
}

pub fn derive_choice_result(item: TokenStream2) -> syn::Result<TokenStream2> {
    let input: DeriveInput = syn::parse2(item)?;

    let variants = match input.data {
        Data::Enum(ref data) => parse_variants(&data.variants)?,
        Data::Struct(_) | Data::Union(_) => {
            return Err(syn::Error::new(
                input.span(),
                "`Choice` can only be derived on enums",
            ));
        }
    };

    let ident = &input.ident;
    let (impl_generics, type_generics, where_clause) = input.generics.split_for_impl();

    let options: Vec<&str> = variants
        .iter()
        .map(|variant| variant.option.as_str())
        .collect();
    let idents = variants.iter().map(|variant| variant.ident);
    let idents_again = idents.clone();

    Ok(quote! {
        impl #impl_generics ::routeargs::Choice for #ident #type_generics #where_clause {
            const OPTIONS: &'static [&'static str] = &[ #(#options,)* ];

            fn from_option(option: &str) -> ::core::option::Option<Self> {
                match option {
                    #(#options => ::core::option::Option::Some(Self::#idents),)*
                    _ => ::core::option::Option::None,
                }
            }

            fn option(&self) -> &'static str {
                match *self {
                    #(Self::#idents_again => #options,)*
                }
            }
        }
    })
}
