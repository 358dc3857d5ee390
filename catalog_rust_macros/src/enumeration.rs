use proc_macro::TokenStream;
use quote::quote;
use syn::{Data, DeriveInput, Fields, LitStr, Variant};

pub fn derive_enumeration(input: TokenStream) -> TokenStream {
    let input = syn::parse_macro_input!(input as DeriveInput);
    let name = &input.ident;

    let variants = match &input.data {
        Data::Enum(data_enum) => &data_enum.variants,
        _ => panic!("Enumeration derive only supports enums"),
    };

    let mut idents = Vec::new();
    let mut names = Vec::new();
    let mut labels = Vec::new();
    let mut codes = Vec::new();

    for (index, variant) in variants.iter().enumerate() {
        if !matches!(variant.fields, Fields::Unit) {
            panic!("Enumeration derive: variant `{}` must not carry fields", variant.ident);
        }

        let ident = variant.ident.clone();
        let name = ident.to_string();
        labels.push(extract_label(variant).unwrap_or_else(|| name.clone()));
        names.push(name);
        codes.push(index as u32 + 1);
        idents.push(ident);
    }

    let expanded = quote! {
        impl catalog_rust::Enumeration for #name {
            const VARIANTS: &'static [Self] = &[#(#name::#idents),*];

            fn code(&self) -> u32 {
                match self {
                    #(#name::#idents => #codes,)*
                }
            }

            fn name(&self) -> &'static str {
                match self {
                    #(#name::#idents => #names,)*
                }
            }

            fn label(&self) -> &'static str {
                match self {
                    #(#name::#idents => #labels,)*
                }
            }
        }
    };

    TokenStream::from(expanded)
}

fn extract_label(variant: &Variant) -> Option<String> {
    let mut label = None;
    for attr in &variant.attrs {
        if !attr.path().is_ident("enumeration") {
            continue;
        }

        let _ = attr.parse_nested_meta(|meta| {
            if meta.path.is_ident("label") {
                let value: LitStr = meta.value()?.parse()?;
                label = Some(value.value());
            }
            Ok(())
        });
    }
    label
}
