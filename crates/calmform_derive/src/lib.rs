use proc_macro::TokenStream;
use proc_macro2::{Ident, Span, TokenStream as TokenStream2};
use proc_macro_crate::{FoundCrate, crate_name};
use quote::{format_ident, quote};
use syn::{Data, DeriveInput, Fields, parse_macro_input};

/// Derives `FormModel` for a struct with named fields: one leaf field per struct
/// field, plus a `<Model>Fields` accessor with one typed getter per field.
#[proc_macro_derive(FormModel)]
pub fn derive_form_model(input: TokenStream) -> TokenStream {
    let input = parse_macro_input!(input as DeriveInput);

    if !input.generics.params.is_empty() {
        return syn::Error::new_spanned(
            input.ident,
            "FormModel derive currently supports only non-generic structs",
        )
        .to_compile_error()
        .into();
    }

    let model_ident = input.ident;
    let fields_struct_ident = format_ident!("{model_ident}Fields");

    let named_fields = match input.data {
        Data::Struct(data) => match data.fields {
            Fields::Named(fields) => fields.named,
            _ => {
                return syn::Error::new(
                    Span::call_site(),
                    "FormModel derive requires a struct with named fields",
                )
                .to_compile_error()
                .into();
            }
        },
        _ => {
            return syn::Error::new(
                Span::call_site(),
                "FormModel derive is only supported on structs",
            )
            .to_compile_error()
            .into();
        }
    };

    let calmform = calmform_path();
    let mut field_names = Vec::new();
    let mut builder_calls = Vec::new();
    let mut accessors = Vec::new();

    for field in named_fields {
        let Some(field_ident) = field.ident else {
            continue;
        };
        let field_ty = field.ty;
        let field_name = field_ident.to_string();

        builder_calls.push(quote! {
            .field(
                #field_name,
                #calmform::form::Field::<#field_ty>::new(
                    self.#field_ident,
                    #calmform::form::FieldOptions::default(),
                ),
            )
        });

        accessors.push(quote! {
            pub fn #field_ident(&self) -> ::core::option::Option<#calmform::form::Field<#field_ty>> {
                self.group.leaf::<#field_ty>(#field_name)
            }
        });

        field_names.push(field_name);
    }

    quote! {
        #[derive(Clone, Debug)]
        pub struct #fields_struct_ident {
            group: #calmform::form::FieldGroup,
        }

        impl #fields_struct_ident {
            pub fn as_group(&self) -> &#calmform::form::FieldGroup {
                &self.group
            }

            #(#accessors)*
        }

        impl #calmform::form::FormModel for #model_ident {
            type Fields = #fields_struct_ident;

            fn field_names() -> &'static [&'static str] {
                &[#(#field_names),*]
            }

            fn into_group(self, options: #calmform::form::GroupOptions) -> #calmform::form::FieldGroup {
                #calmform::form::FieldGroup::builder()
                    #(#builder_calls)*
                    .options(options)
                    .build()
            }

            fn fields(group: &#calmform::form::FieldGroup) -> Self::Fields {
                #fields_struct_ident {
                    group: ::core::clone::Clone::clone(group),
                }
            }
        }
    }
    .into()
}

fn calmform_path() -> TokenStream2 {
    match crate_name("calmform") {
        Ok(FoundCrate::Name(name)) => {
            let ident = Ident::new(&name, Span::call_site());
            quote!(::#ident)
        }
        Ok(FoundCrate::Itself) => quote!(crate),
        Err(_) => quote!(::calmform),
    }
}
