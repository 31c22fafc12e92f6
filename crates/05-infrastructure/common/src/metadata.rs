//! 类型标识定义
//!
//! 提供限定类名与类型引用，作为声明元数据与生成代码之间共享的类型标识

use crate::errors::{NameError, NameResult};
use serde::{Deserialize, Serialize};
use std::fmt;

/// 限定类名
///
/// 由包名与一个或多个简单名称组成，多个简单名称表示嵌套类，
/// 例如 `com.app.Outer.Inner` 的包名为 `com.app`，简单名称为 `["Outer", "Inner"]`。
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct ClassName {
    package: String,
    simple_names: Vec<String>,
}

impl ClassName {
    /// 创建新的类名
    pub fn new(
        package: impl Into<String>,
        simple_name: impl Into<String>,
        nested: &[&str],
    ) -> NameResult<Self> {
        let package = package.into();
        if !package.is_empty() {
            for part in package.split('.') {
                if !is_valid_identifier(part) {
                    return Err(NameError::invalid_identifier(part));
                }
            }
        }

        let mut simple_names = vec![simple_name.into()];
        simple_names.extend(nested.iter().map(|name| (*name).to_string()));

        for name in &simple_names {
            if !is_valid_identifier(name) {
                return Err(NameError::invalid_identifier(name.as_str()));
            }
        }

        Ok(Self {
            package,
            simple_names,
        })
    }

    /// 从限定名称推断类名
    ///
    /// 以小写字母开头的片段视为包名，从第一个大写字母开头的片段起视为简单名称。
    pub fn best_guess(name: &str) -> NameResult<Self> {
        let name = name.trim();
        if name.is_empty() {
            return Err(NameError::Empty);
        }

        let parts: Vec<&str> = name.split('.').collect();
        let split = parts
            .iter()
            .position(|part| part.chars().next().is_some_and(char::is_uppercase))
            .ok_or_else(|| NameError::NotAClassName {
                name: name.to_string(),
            })?;

        let package = parts[..split].join(".");
        let nested: Vec<&str> = parts[split + 1..].to_vec();
        Self::new(package, parts[split], &nested)
    }

    /// 由已知合法的片段直接构造，供内置默认名称使用
    pub(crate) fn known(package: &str, simple_names: &[&str]) -> Self {
        Self {
            package: package.to_string(),
            simple_names: simple_names.iter().map(|name| (*name).to_string()).collect(),
        }
    }

    /// `java.lang.Object`
    pub fn object() -> Self {
        Self::known("java.lang", &["Object"])
    }

    /// `java.lang.String`
    pub fn string() -> Self {
        Self::known("java.lang", &["String"])
    }

    /// `java.lang.Class`
    pub fn java_lang_class() -> Self {
        Self::known("java.lang", &["Class"])
    }

    /// `java.util.Map`
    pub fn java_util_map() -> Self {
        Self::known("java.util", &["Map"])
    }

    /// 包名，默认包为空字符串
    pub fn package_name(&self) -> &str {
        &self.package
    }

    /// 最内层的简单名称
    pub fn simple_name(&self) -> &str {
        self.simple_names
            .last()
            .map(String::as_str)
            .unwrap_or_default()
    }

    /// 从顶层类开始的全部简单名称
    pub fn simple_names(&self) -> &[String] {
        &self.simple_names
    }

    /// 外层类，顶层类返回 `None`
    pub fn enclosing_class_name(&self) -> Option<Self> {
        if self.simple_names.len() < 2 {
            return None;
        }
        Some(Self {
            package: self.package.clone(),
            simple_names: self.simple_names[..self.simple_names.len() - 1].to_vec(),
        })
    }

    /// 所在的顶层类
    pub fn top_level_class_name(&self) -> Self {
        Self {
            package: self.package.clone(),
            simple_names: self.simple_names[..1].to_vec(),
        }
    }

    /// 同一外层作用域中的兄弟类
    pub fn peer_class(&self, name: impl Into<String>) -> Self {
        let mut simple_names = self.simple_names.clone();
        if let Some(last) = simple_names.last_mut() {
            *last = name.into();
        }
        Self {
            package: self.package.clone(),
            simple_names,
        }
    }

    /// 嵌套在当前类中的类
    pub fn nested_class(&self, name: impl Into<String>) -> Self {
        let mut simple_names = self.simple_names.clone();
        simple_names.push(name.into());
        Self {
            package: self.package.clone(),
            simple_names,
        }
    }

    /// 是否为顶层类
    pub fn is_top_level(&self) -> bool {
        self.simple_names.len() == 1
    }

    /// 规范名称，例如 `com.app.Outer.Inner`
    pub fn canonical_name(&self) -> String {
        self.to_string()
    }
}

impl fmt::Display for ClassName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if !self.package.is_empty() {
            write!(f, "{}.", self.package)?;
        }
        write!(f, "{}", self.simple_names.join("."))
    }
}

impl TryFrom<String> for ClassName {
    type Error = NameError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::best_guess(&value)
    }
}

impl TryFrom<&str> for ClassName {
    type Error = NameError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        Self::best_guess(value)
    }
}

impl From<ClassName> for String {
    fn from(value: ClassName) -> Self {
        value.to_string()
    }
}

/// 类型引用
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TypeRef {
    /// 声明类型
    Class(ClassName),
    /// 参数化类型，例如 `Class<? extends View>`
    Parameterized {
        raw: ClassName,
        arguments: Vec<TypeRef>,
    },
    /// 通配符，`upper_bound` 为空表示无界通配符
    Wildcard {
        #[serde(default)]
        upper_bound: Option<Box<TypeRef>>,
    },
}

impl TypeRef {
    /// 声明类型引用
    pub fn class(name: ClassName) -> Self {
        Self::Class(name)
    }

    /// 参数化类型引用
    pub fn parameterized(raw: ClassName, arguments: Vec<TypeRef>) -> Self {
        Self::Parameterized { raw, arguments }
    }

    /// 上界通配符 `? extends bound`
    pub fn subtype_of(bound: TypeRef) -> Self {
        Self::Wildcard {
            upper_bound: Some(Box::new(bound)),
        }
    }

    /// 无界通配符 `?`
    pub fn wildcard() -> Self {
        Self::Wildcard { upper_bound: None }
    }

    /// `java.lang.Object`
    pub fn object() -> Self {
        Self::Class(ClassName::object())
    }

    /// 按限定名称推断声明类型引用
    pub fn best_guess(name: &str) -> NameResult<Self> {
        ClassName::best_guess(name).map(Self::Class)
    }

    /// 原始类，通配符没有原始类
    pub fn raw_class(&self) -> Option<&ClassName> {
        match self {
            Self::Class(name) => Some(name),
            Self::Parameterized { raw, .. } => Some(raw),
            Self::Wildcard { .. } => None,
        }
    }

    /// 类型实参
    pub fn type_arguments(&self) -> &[TypeRef] {
        match self {
            Self::Parameterized { arguments, .. } => arguments,
            _ => &[],
        }
    }

    /// 上界：通配符返回其上界（无界时为 `Object`），其余类型返回自身
    pub fn upper_bound(&self) -> TypeRef {
        match self {
            Self::Wildcard {
                upper_bound: Some(bound),
            } => bound.as_ref().clone(),
            Self::Wildcard { upper_bound: None } => Self::object(),
            other => other.clone(),
        }
    }
}

impl From<ClassName> for TypeRef {
    fn from(value: ClassName) -> Self {
        Self::Class(value)
    }
}

impl fmt::Display for TypeRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Class(name) => write!(f, "{name}"),
            Self::Parameterized { raw, arguments } => {
                let arguments = arguments
                    .iter()
                    .map(ToString::to_string)
                    .collect::<Vec<_>>()
                    .join(", ");
                write!(f, "{raw}<{arguments}>")
            }
            Self::Wildcard { upper_bound: None } => write!(f, "?"),
            Self::Wildcard {
                upper_bound: Some(bound),
            } => write!(f, "? extends {bound}"),
        }
    }
}

/// 验证标识符是否有效
pub fn is_valid_identifier(s: &str) -> bool {
    let mut chars = s.chars();
    let Some(first_char) = chars.next() else {
        return false;
    };

    // 第一个字符必须是字母、下划线或 `$`
    if !first_char.is_alphabetic() && first_char != '_' && first_char != '$' {
        return false;
    }

    chars.all(|ch| ch.is_alphanumeric() || ch == '_' || ch == '$')
}
