use proc_macro::TokenStream;
use quote::quote;
use syn::spanned::Spanned;
use syn::{Attribute, Data, DeriveInput, Fields, Ident, LitStr};

/// Everything the `record` attributes say about one struct.
struct RecordAttrs {
    collection: Option<String>,
    kind: Option<String>,
    key: Ident,
}

pub fn derive_record(input: TokenStream) -> TokenStream {
    let input = syn::parse_macro_input!(input as DeriveInput);

    let attrs = match parse_record_attrs(&input) {
        Ok(attrs) => attrs,
        Err(err) => return err.to_compile_error().into(),
    };

    let name = &input.ident;
    let snake = snake_case(&name.to_string());
    let collection = attrs.collection.unwrap_or_else(|| format!("{}s", snake));
    let kind = attrs.kind.unwrap_or(snake);
    let key = attrs.key;

    let expanded = quote! {
        impl catalog_rust::Record for #name {
            const COLLECTION: &'static str = #collection;
            const KIND: &'static str = #kind;

            fn key(&self) -> ::std::string::String {
                ::std::string::ToString::to_string(&self.#key)
            }
        }
    };

    TokenStream::from(expanded)
}

/// One pass over the struct-level and field-level `#[record(...)]` attributes.
///
/// The key is the field tagged `#[record(key)]`, or else a field named `id`.
fn parse_record_attrs(input: &DeriveInput) -> syn::Result<RecordAttrs> {
    let mut collection = None;
    let mut kind = None;

    for attr in record_attrs(&input.attrs) {
        attr.parse_nested_meta(|meta| {
            if meta.path.is_ident("collection") {
                collection = Some(meta.value()?.parse::<LitStr>()?.value());
                Ok(())
            } else if meta.path.is_ident("kind") {
                kind = Some(meta.value()?.parse::<LitStr>()?.value());
                Ok(())
            } else {
                Err(meta.error("expected `collection` or `kind`"))
            }
        })?;
    }

    let fields = match &input.data {
        Data::Struct(data) => match &data.fields {
            Fields::Named(named) => &named.named,
            other => {
                return Err(syn::Error::new(
                    other.span(),
                    "Record derive needs a struct with named fields",
                ))
            }
        },
        _ => {
            return Err(syn::Error::new(
                input.ident.span(),
                "Record derive only supports structs",
            ))
        }
    };

    let mut tagged = None;
    for field in fields {
        for attr in record_attrs(&field.attrs) {
            attr.parse_nested_meta(|meta| {
                if meta.path.is_ident("key") {
                    if tagged.is_some() {
                        return Err(meta.error("only one field may be `#[record(key)]`"));
                    }
                    tagged = field.ident.clone();
                    Ok(())
                } else {
                    Err(meta.error("expected `key`"))
                }
            })?;
        }
    }

    let key = tagged
        .or_else(|| {
            fields
                .iter()
                .filter_map(|field| field.ident.clone())
                .find(|ident| ident == "id")
        })
        .ok_or_else(|| {
            syn::Error::new(
                input.ident.span(),
                "Record derive needs a `#[record(key)]` field or a field named `id`",
            )
        })?;

    Ok(RecordAttrs {
        collection,
        kind,
        key,
    })
}

fn record_attrs(attrs: &[Attribute]) -> impl Iterator<Item = &Attribute> {
    attrs.iter().filter(|attr| attr.path().is_ident("record"))
}

/// `MovieRating` becomes `movie_rating`; runs of capitals stay together.
fn snake_case(name: &str) -> String {
    let chars: Vec<char> = name.chars().collect();
    let mut out = String::with_capacity(name.len() + 4);

    for (i, &c) in chars.iter().enumerate() {
        if c.is_uppercase() && i > 0 {
            let prev_lower = chars[i - 1].is_lowercase() || chars[i - 1].is_ascii_digit();
            let next_lower = chars.get(i + 1).map_or(false, |n| n.is_lowercase());
            if prev_lower || (chars[i - 1].is_uppercase() && next_lower) {
                out.push('_');
            }
        }
        out.extend(c.to_lowercase());
    }
    out
}
