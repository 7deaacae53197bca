mod decode_field;
mod rename_all;

use decode_field::decode_field;
use proc_macro::TokenStream;
use quote::quote;
use rename_all::rename_all;
use syn::{Fields, ItemStruct, parse_macro_input};

/// Implements `NamedArgumentFinder` for a struct, exposing each field as a
/// named argument.
///
/// Field attributes: `#[stencil(name = "..")]` renames the parameter,
/// `#[stencil(skip)]` hides the field, `#[stencil(nested)]` resolves
/// `field.inner` names through the field, which must be a finder itself. On the
/// struct, `#[stencil(rename_all = "camelCase")]` renames every field not
/// explicitly named. A leading `_` is stripped from field names.
#[proc_macro_derive(NamedArguments, attributes(stencil))]
pub fn derive_named_arguments(input: TokenStream) -> TokenStream {
    let item: ItemStruct = parse_macro_input!(input as ItemStruct);
    let Fields::Named(..) = item.fields else {
        panic!(
            "NamedArguments can only be derived on structs with named fields, `{}` is not one",
            item.ident
        );
    };
    let name = &item.ident;
    let (impl_generics, ty_generics, where_clause) = item.generics.split_for_impl();
    let rename = rename_all(&item);
    let fields: Vec<_> = item
        .fields
        .iter()
        .map(|f| decode_field(f, rename))
        .filter(|f| !f.skip)
        .collect();
    let (nested, values): (Vec<_>, Vec<_>) = fields.iter().partition(|f| f.nested);
    let value_names = values.iter().map(|f| &f.name);
    let value_idents = values.iter().map(|f| &f.ident);
    let nested_prefixes = nested.iter().map(|f| format!("{}.", f.name));
    let nested_idents = nested.iter().map(|f| &f.ident);
    let names = values.iter().map(|f| {
        let name = &f.name;
        quote!(result.push(#name.to_owned());)
    });
    let nested_names = nested.iter().map(|f| {
        let ident = &f.ident;
        let name = &f.name;
        quote! {
            result.extend(
                ::stencil::NamedArgumentFinder::names(&self.#ident)
                    .into_iter()
                    .map(|v| format!("{}.{}", #name, v)),
            );
        }
    });
    let describe = name.to_string();
    quote! {
        impl #impl_generics ::stencil::NamedArgumentFinder for #name #ty_generics #where_clause {
            fn find(
                &self,
                name: &str,
                context: &::stencil::StatementContext<'_>,
            ) -> ::std::option::Option<::stencil::Argument> {
                match name {
                    #(#value_names => {
                        return ::std::option::Option::Some(::stencil::Argument::Value(
                            ::stencil::AsValue::as_value(::std::clone::Clone::clone(&self.#value_idents)),
                        ));
                    })*
                    _ => {}
                }
                #(if let ::std::option::Option::Some(rest) = name.strip_prefix(#nested_prefixes) {
                    return ::stencil::NamedArgumentFinder::find(&self.#nested_idents, rest, context);
                })*
                let _ = context;
                ::std::option::Option::None
            }
            fn names(&self) -> ::std::vec::Vec<::std::string::String> {
                #[allow(unused_mut)]
                let mut result = ::std::vec::Vec::new();
                #(#names)*
                #(#nested_names)*
                result
            }
            fn describe(&self) -> ::std::string::String {
                #describe.to_owned()
            }
        }
    }
    .into()
}
