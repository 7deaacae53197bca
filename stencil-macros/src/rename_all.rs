use convert_case::{Case, Casing};
use syn::{ItemStruct, LitStr, parse::ParseBuffer};

pub(crate) type Rename = fn(&str) -> String;

/// Case applied to field names, from `#[stencil(rename_all = "..")]` on the struct.
pub(crate) fn rename_all(item: &ItemStruct) -> Option<Rename> {
    let mut result = None;
    for attr in &item.attrs {
        let meta = &attr.meta;
        if !meta.path().is_ident("stencil") {
            continue;
        }
        let Ok(list) = meta.require_list() else {
            panic!(
                "Error while parsing `stencil`, use it like: `#[stencil(rename_all = \"camelCase\")]`",
            );
        };
        let _ = list.parse_nested_meta(|arg| {
            if arg.path.is_ident("rename_all") {
                let Ok(v) = arg.value().and_then(ParseBuffer::parse::<LitStr>) else {
                    panic!(
                        "Error while parsing `rename_all`, use it like: `#[stencil(rename_all = \"camelCase\")]`"
                    );
                };
                result = Some(rename_from_name(&v.value()));
            } else {
                panic!(
                    "Unknown attribute `{}` on a struct deriving NamedArguments",
                    arg.path.get_ident().map(ToString::to_string).unwrap_or_default()
                );
            }
            Ok(())
        });
    }
    result
}

fn rename_from_name(name: &str) -> Rename {
    match name {
        "lowercase" => |v: &str| v.to_case(Case::Flat),
        "UPPERCASE" => |v: &str| v.to_case(Case::UpperFlat),
        "camelCase" => |v: &str| v.to_case(Case::Camel),
        "PascalCase" => |v: &str| v.to_case(Case::Pascal),
        "snake_case" => |v: &str| v.to_case(Case::Snake),
        "SCREAMING_SNAKE_CASE" => |v: &str| v.to_case(Case::UpperSnake),
        "kebab-case" => |v: &str| v.to_case(Case::Kebab),
        _ => panic!(
            "Unsupported `rename_all = \"{}\"`, expected one of: lowercase, UPPERCASE, camelCase, PascalCase, snake_case, SCREAMING_SNAKE_CASE, kebab-case",
            name
        ),
    }
}
