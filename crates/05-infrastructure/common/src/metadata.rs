//! 元数据定义
//!
//! 提供类型的标识信息

use std::any::TypeId;
use std::fmt;
use std::hash::{Hash, Hasher};

/// 类型信息
///
/// 相等性只取决于 [`TypeId`]，名称仅用于诊断输出。
#[derive(Debug, Clone, Copy)]
pub struct TypeInfo {
    /// 类型ID
    id: TypeId,
    /// 完整类型名称
    name: &'static str,
}

impl TypeInfo {
    /// 从类型获取类型信息（支持 `dyn Trait` 等非定长类型）
    pub fn of<T: ?Sized + 'static>() -> Self {
        Self {
            id: TypeId::of::<T>(),
            name: std::any::type_name::<T>(),
        }
    }

    /// 类型ID
    pub fn id(&self) -> TypeId {
        self.id
    }

    /// 完整类型名称
    pub fn name(&self) -> &'static str {
        self.name
    }

    /// 获取简短的类型名称
    ///
    /// 去掉每一段路径的模块前缀，保留 `dyn`、泛型参数、元组与引用的写法，
    /// 例如 `dyn app::Clock` 得到 `dyn Clock`。
    pub fn short_name(&self) -> String {
        let mut short = String::with_capacity(self.name.len());
        let mut start = 0;
        for (index, c) in self.name.char_indices() {
            if is_delimiter(c) {
                short.push_str(last_segment(&self.name[start..index]));
                short.push(c);
                start = index + c.len_utf8();
            }
        }
        short.push_str(last_segment(&self.name[start..]));
        short
    }

    /// 最外层路径的末段（含泛型参数）
    ///
    /// 不是简单路径的类型（`dyn`、元组、引用、切片）返回完整名称。
    pub fn ident(&self) -> &'static str {
        let base = self.name.split('<').next().unwrap_or(self.name);
        if !base.chars().all(|c| c.is_alphanumeric() || c == '_' || c == ':') {
            return self.name;
        }
        match base.rfind("::") {
            Some(index) => &self.name[index + 2..],
            None => self.name,
        }
    }
}

fn is_delimiter(c: char) -> bool {
    matches!(c, '<' | '>' | ',' | '(' | ')' | '[' | ']' | ';' | '&' | '*' | ' ')
}

fn last_segment(path: &str) -> &str {
    path.rsplit("::").next().unwrap_or(path)
}

impl PartialEq for TypeInfo {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl Eq for TypeInfo {}

impl Hash for TypeInfo {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.id.hash(state);
    }
}

impl fmt::Display for TypeInfo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name)
    }
}
