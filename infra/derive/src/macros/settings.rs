use crate::macros::error::single_generic;
use proc_macro2::TokenStream;
use quote::{ToTokens, quote};
use syn::{Data, DeriveInput, Fields, Ident, LitStr, Path, Type};

/// Parsed `#[setting(..)]` options of one field.
#[derive(Default)]
struct FieldOptions {
    default: Option<LitStr>,
    rename: Option<LitStr>,
    secret: bool,
}

struct SettingField<'a> {
    ident: &'a Ident,
    ty: &'a Type,
    /// `T` of an `Option<T>` field.
    optional: Option<&'a Type>,
    options: FieldOptions,
}

impl SettingField<'_> {
    fn key(&self) -> String {
        self.options.rename.as_ref().map_or_else(|| self.ident.to_string(), LitStr::value)
    }
}

pub fn expand(input: DeriveInput) -> TokenStream {
    match expand_inner(&input) {
        Ok(tokens) => tokens,
        Err(err) => err.to_compile_error(),
    }
}

fn expand_inner(input: &DeriveInput) -> syn::Result<TokenStream> {
    let Data::Struct(data) = &input.data else {
        return Err(syn::Error::new_spanned(&input.ident, "Settings can only be derived for structs"));
    };
    let Fields::Named(named) = &data.fields else {
        return Err(syn::Error::new_spanned(
            &input.ident,
            "Settings requires a struct with named fields",
        ));
    };

    let kernel = kernel_path(input)?;
    let fields = named
        .named
        .iter()
        .map(|field| {
            let Some(ident) = field.ident.as_ref() else {
                return Err(syn::Error::new_spanned(field, "unnamed field"));
            };
            Ok(SettingField {
                ident,
                ty: &field.ty,
                optional: single_generic(&field.ty, "Option"),
                options: field_options(&field.attrs)?,
            })
        })
        .collect::<syn::Result<Vec<_>>>()?;

    let specs = fields.iter().map(|f| field_spec(&kernel, f));
    let readers = fields.iter().enumerate().map(|(index, f)| field_reader(&kernel, index, f));
    let writers = fields.iter().enumerate().map(|(index, f)| {
        let ident = f.ident;
        quote! { map.insert(fields[#index].name.to_owned(), #kernel::config::to_value(&self.#ident)?); }
    });

    let name = &input.ident;
    let (impl_generics, ty_generics, where_clause) = input.generics.split_for_impl();

    Ok(quote! {
        #[automatically_derived]
        impl #impl_generics #kernel::config::ConfigSchema for #name #ty_generics #where_clause {
            fn fields() -> &'static [#kernel::domain::settings::FieldSpec] {
                const FIELDS: &[#kernel::domain::settings::FieldSpec] = &[#(#specs),*];
                FIELDS
            }

            #[allow(unused_variables)]
            fn from_source(
                source: &dyn #kernel::config::Source,
            ) -> ::core::result::Result<Self, #kernel::config::ConfigError> {
                let fields = <Self as #kernel::config::ConfigSchema>::fields();
                ::core::result::Result::Ok(Self {
                    #(#readers),*
                })
            }

            #[allow(unused_variables, unused_mut)]
            fn to_map(
                &self,
            ) -> ::core::result::Result<#kernel::config::ConfigMap, #kernel::config::ConfigError> {
                let fields = <Self as #kernel::config::ConfigSchema>::fields();
                let mut map = #kernel::config::ConfigMap::new();
                #(#writers)*
                ::core::result::Result::Ok(map)
            }
        }
    })
}

fn field_spec(kernel: &Path, field: &SettingField<'_>) -> TokenStream {
    let key = field.key();
    let type_name = field.ty.to_token_stream().to_string().replace(' ', "");
    let default = field
        .options
        .default
        .as_ref()
        .map_or_else(|| quote! { ::core::option::Option::None }, |lit| quote! { ::core::option::Option::Some(#lit) });

    let flags = quote! { #kernel::domain::settings::FieldFlags };
    let mut bits = quote! { #flags::empty() };
    if field.optional.is_some() {
        bits = quote! { #bits.union(#flags::OPTIONAL) };
    } else if field.options.default.is_none() {
        bits = quote! { #bits.union(#flags::REQUIRED) };
    }
    if field.options.secret {
        bits = quote! { #bits.union(#flags::SECRET) };
    }

    quote! {
        #kernel::domain::settings::FieldSpec {
            name: #key,
            type_name: #type_name,
            default: #default,
            flags: #bits,
        }
    }
}

fn field_reader(kernel: &Path, index: usize, field: &SettingField<'_>) -> TokenStream {
    let ident = field.ident;
    match field.optional {
        Some(inner) => quote! {
            #ident: #kernel::config::read_optional::<#inner>(source, &fields[#index])?
        },
        None => {
            let ty = field.ty;
            quote! { #ident: #kernel::config::read::<#ty>(source, &fields[#index])? }
        },
    }
}

fn field_options(attrs: &[syn::Attribute]) -> syn::Result<FieldOptions> {
    let mut options = FieldOptions::default();

    for attr in attrs.iter().filter(|a| a.path().is_ident("setting")) {
        attr.parse_nested_meta(|meta| {
            if meta.path.is_ident("default") {
                set_once(&mut options.default, meta.value()?.parse()?, &meta.path)
            } else if meta.path.is_ident("rename") {
                let lit: LitStr = meta.value()?.parse()?;
                if lit.value().trim().is_empty() {
                    return Err(syn::Error::new_spanned(lit, "rename must not be empty"));
                }
                set_once(&mut options.rename, lit, &meta.path)
            } else if meta.path.is_ident("secret") {
                options.secret = true;
                Ok(())
            } else {
                Err(meta.error("unknown setting option; expected `default`, `rename` or `secret`"))
            }
        })?;
    }

    Ok(options)
}

fn kernel_path(input: &DeriveInput) -> syn::Result<Path> {
    let mut path = None;
    for attr in input.attrs.iter().filter(|a| a.path().is_ident("setting")) {
        attr.parse_nested_meta(|meta| {
            if meta.path.is_ident("crate") {
                let lit: LitStr = meta.value()?.parse()?;
                set_once(&mut path, lit.parse::<Path>()?, &meta.path)
            } else {
                Err(meta.error("unknown container option; expected `crate`"))
            }
        })?;
    }
    Ok(path.unwrap_or_else(|| syn::parse_quote!(::appwire_kernel)))
}

fn set_once<T>(slot: &mut Option<T>, value: T, path: &Path) -> syn::Result<()> {
    if slot.is_some() {
        return Err(syn::Error::new_spanned(path, "duplicate setting option"));
    }
    *slot = Some(value);
    Ok(())
}
