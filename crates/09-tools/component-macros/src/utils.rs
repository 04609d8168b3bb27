//! 宏工具函数

use syn::{Attribute, Field, Fields, Ident, Index, Member};

/// 属性是否为指定名称
pub fn is_attribute(attr: &Attribute, attr_name: &str) -> bool {
    attr.path().is_ident(attr_name)
}

/// 筛选指定名称的属性
pub fn attributes_named<'a>(
    attrs: &'a [Attribute],
    attr_name: &'a str,
) -> impl Iterator<Item = &'a Attribute> + 'a {
    attrs.iter().filter(move |attr| is_attribute(attr, attr_name))
}

/// 字段在结构体字面量中的成员名：具名字段用字段名，元组字段用下标
pub fn field_member(index: usize, field: &Field) -> Member {
    match &field.ident {
        Some(ident) => Member::Named(ident.clone()),
        None => Member::Unnamed(Index::from(index)),
    }
}

/// 组件名称：未显式指定时使用结构体名
pub fn component_name(ident: &Ident, custom: Option<String>) -> String {
    custom.unwrap_or_else(|| ident.to_string())
}

/// 结构体是否没有任何字段
pub fn is_fieldless(fields: &Fields) -> bool {
    fields.iter().next().is_none()
}
