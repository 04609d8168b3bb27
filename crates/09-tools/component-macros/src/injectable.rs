//! `#[derive(Injectable)]` 实现

use crate::utils::{attributes_named, component_name, field_member, is_fieldless};
use proc_macro::TokenStream;
use proc_macro2::TokenStream as TokenStream2;
use quote::quote;
use syn::{Data, DeriveInput, Expr, Field, Fields, LitStr, Result};

/// 结构体上的 `#[component(...)]` 参数
#[derive(Default)]
struct ComponentArgs {
    /// 自定义组件名称
    name: Option<String>,
    /// 作用域标记表达式
    scopes: Vec<TokenStream2>,
}

fn parse_component_args(input: &DeriveInput) -> Result<ComponentArgs> {
    let mut args = ComponentArgs::default();

    for attr in attributes_named(&input.attrs, "component") {
        attr.parse_nested_meta(|meta| {
            if meta.path.is_ident("singleton") {
                args.scopes.push(quote!(::di_abstractions::Singleton));
                Ok(())
            } else if meta.path.is_ident("scope") {
                let scope: Expr = meta.value()?.parse()?;
                args.scopes.push(quote!(#scope));
                Ok(())
            } else if meta.path.is_ident("name") {
                let name: LitStr = meta.value()?.parse()?;
                args.name = Some(name.value());
                Ok(())
            } else {
                Err(meta.error("不支持的 component 参数，可用: singleton, scope = ..., name = \"...\""))
            }
        })?;
    }

    Ok(args)
}

/// 字段上的限定符：`#[named("x")]` 与 `#[qualifier(expr)]`
fn field_annotations(field: &Field) -> Result<Vec<TokenStream2>> {
    let mut annotations = Vec::new();

    for attr in attributes_named(&field.attrs, "named") {
        let name: LitStr = attr.parse_args()?;
        annotations.push(quote!(::di_abstractions::Named::new(#name)));
    }
    for attr in attributes_named(&field.attrs, "qualifier") {
        let qualifier: Expr = attr.parse_args()?;
        annotations.push(quote!(#qualifier));
    }

    Ok(annotations)
}

fn constructor(fields: &Fields) -> Result<TokenStream2> {
    if is_fieldless(fields) {
        let value = match fields {
            Fields::Named(_) => quote!(Self {}),
            Fields::Unnamed(_) => quote!(Self()),
            Fields::Unit => quote!(Self),
        };
        return Ok(quote! {
            ::di_abstractions::Constructor::new(|_| ::std::result::Result::Ok(#value))
        });
    }

    let mut inits = Vec::new();
    let mut params = Vec::new();
    for (index, field) in fields.iter().enumerate() {
        let member = field_member(index, field);
        let ty = &field.ty;
        let annotations = field_annotations(field)?;
        inits.push(quote!(#member: arguments.take::<#ty>()?));
        params.push(quote! {
            .with_param(::di_abstractions::Parameter::of::<#ty>() #(.with_annotation(#annotations))*)
        });
    }

    Ok(quote! {
        ::di_abstractions::Constructor::new(|arguments| {
            ::std::result::Result::Ok(Self { #(#inits),* })
        })
        #(#params)*
        .injected()
    })
}

/// 生成 `Injectable` 实现
pub fn expand(input: &DeriveInput) -> Result<TokenStream2> {
    let Data::Struct(data) = &input.data else {
        return Err(syn::Error::new_spanned(
            &input.ident,
            "Injectable 只能用于结构体",
        ));
    };

    let args = parse_component_args(input)?;
    let ident = &input.ident;
    let name = component_name(ident, args.name);
    let scopes = &args.scopes;
    let constructor = constructor(&data.fields)?;
    let (impl_generics, ty_generics, where_clause) = input.generics.split_for_impl();

    Ok(quote! {
        impl #impl_generics ::di_abstractions::Injectable for #ident #ty_generics #where_clause {
            fn component_class() -> ::di_abstractions::ComponentClass<Self> {
                ::di_abstractions::ComponentClass::new(#name)
                    #(.annotated(#scopes))*
                    .constructor(#constructor)
            }
        }
    })
}

/// 实现 #[derive(Injectable)] 宏
pub fn derive_injectable_impl(input: DeriveInput) -> TokenStream {
    match expand(&input) {
        Ok(expanded) => TokenStream::from(expanded),
        Err(e) => e.to_compile_error().into(),
    }
}
