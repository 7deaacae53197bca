use crate::rename_all::Rename;
use quote::ToTokens;
use syn::{Field, Ident, LitStr, parse::ParseBuffer};

pub(crate) struct FieldMetadata {
    pub(crate) ident: Ident,
    /// Parameter name the field answers to.
    pub(crate) name: String,
    pub(crate) skip: bool,
    /// Delegate `name.*` lookups to the field, itself a finder.
    pub(crate) nested: bool,
}

pub(crate) fn decode_field(field: &Field, rename: Option<Rename>) -> FieldMetadata {
    let ident = field
        .ident
        .clone()
        .expect("NamedArguments can only be derived on structs with named fields");
    let mut name = ident.to_string();
    if name.starts_with('_') {
        name.remove(0);
    }
    if let Some(rename) = rename {
        name = rename(&name);
    }
    let mut metadata = FieldMetadata {
        ident,
        name,
        skip: false,
        nested: false,
    };
    for attr in &field.attrs {
        let meta = &attr.meta;
        if !meta.path().is_ident("stencil") {
            continue;
        }
        let Ok(list) = meta.require_list() else {
            panic!("Error while parsing `stencil`, use it like: `#[stencil(attribute = value, ...)]`");
        };
        let _ = list.parse_nested_meta(|arg| {
            if arg.path.is_ident("name") {
                let Ok(v) = arg.value().and_then(ParseBuffer::parse::<LitStr>) else {
                    panic!("Error while parsing `name`, use it like: `#[stencil(name = \"user_id\")]`");
                };
                metadata.name = v.value();
            } else if arg.path.is_ident("skip") {
                let Err(..) = arg.value() else {
                    // value() is Err for Meta::Path
                    panic!("Error while parsing `skip`, use it like: `#[stencil(skip)]`");
                };
                metadata.skip = true;
            } else if arg.path.is_ident("nested") {
                let Err(..) = arg.value() else {
                    panic!("Error while parsing `nested`, use it like: `#[stencil(nested)]`");
                };
                metadata.nested = true;
            } else {
                panic!(
                    "Unknown attribute `{}` inside stencil macro",
                    arg.path.to_token_stream()
                );
            }
            Ok(())
        });
    }
    if metadata.name.is_empty() {
        panic!("Field `{}` maps to an empty parameter name", metadata.ident);
    }
    metadata
}
