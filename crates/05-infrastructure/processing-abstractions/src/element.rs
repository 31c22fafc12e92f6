//! 声明元素模型
//!
//! 宿主编译器提供的声明、注解与类型信息在这里以只读的值类型表示

use contributor_common::{ClassName, TypeRef};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use std::hash::{Hash, Hasher};
use std::mem;

/// 注解参数值
///
/// 处理流程不读取的参数同样需要能够加载，无法识别的值保留为 [`AnnotationValue::Other`]。
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum AnnotationValue {
    Bool(bool),
    Int(i64),
    String(String),
    Type(TypeRef),
    TypeList(Vec<TypeRef>),
    /// 其他元素类型的数组，例如字符串数组
    List(Vec<AnnotationValue>),
    /// 枚举常量，例如 `RetentionPolicy.RUNTIME`
    Enum {
        #[serde(rename = "enum")]
        constant: String,
    },
    /// 浮点数等其他字面量
    Other(serde_json::Value),
}

impl Hash for AnnotationValue {
    fn hash<H: Hasher>(&self, state: &mut H) {
        mem::discriminant(self).hash(state);
        match self {
            Self::Bool(value) => value.hash(state),
            Self::Int(value) => value.hash(state),
            Self::String(value) => value.hash(state),
            Self::Type(value) => value.hash(state),
            Self::TypeList(values) => values.hash(state),
            Self::List(values) => values.hash(state),
            Self::Enum { constant } => constant.hash(state),
            Self::Other(value) => value.to_string().hash(state),
        }
    }
}

/// 附加在声明上的注解
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Annotation {
    /// 注解类型
    #[serde(rename = "type")]
    pub annotation_type: ClassName,
    /// 注解参数
    #[serde(default)]
    pub values: BTreeMap<String, AnnotationValue>,
}

impl Annotation {
    /// 创建不带参数的注解
    pub fn marker(annotation_type: ClassName) -> Self {
        Self {
            annotation_type,
            values: BTreeMap::new(),
        }
    }

    /// 添加参数
    pub fn with_value(mut self, name: impl Into<String>, value: AnnotationValue) -> Self {
        self.values.insert(name.into(), value);
        self
    }

    /// 是否为指定类型的注解
    pub fn is(&self, annotation_type: &ClassName) -> bool {
        self.annotation_type == *annotation_type
    }
}

/// 类型声明的种类
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TypeKind {
    #[default]
    Class,
    Interface,
    Annotation,
}

/// 方法声明
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MethodElement {
    /// 方法名
    pub name: String,
    /// 返回类型
    pub return_type: TypeRef,
    /// 方法上的注解
    #[serde(default)]
    pub annotations: Vec<Annotation>,
}

impl MethodElement {
    /// 创建新的方法声明
    pub fn new(name: impl Into<String>, return_type: TypeRef) -> Self {
        Self {
            name: name.into(),
            return_type,
            annotations: Vec::new(),
        }
    }

    /// 添加注解
    pub fn with_annotation(mut self, annotation: Annotation) -> Self {
        self.annotations.push(annotation);
        self
    }
}

/// 类型声明
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TypeElement {
    /// 限定类名
    pub name: ClassName,
    /// 声明种类
    #[serde(default)]
    pub kind: TypeKind,
    /// 类型上的注解
    #[serde(default)]
    pub annotations: Vec<Annotation>,
    /// 直接父类型与实现的接口
    #[serde(default)]
    pub supertypes: Vec<TypeRef>,
    /// 声明的方法
    #[serde(default)]
    pub methods: Vec<MethodElement>,
}

impl TypeElement {
    /// 创建指定种类的类型声明
    pub fn new(name: ClassName, kind: TypeKind) -> Self {
        Self {
            name,
            kind,
            annotations: Vec::new(),
            supertypes: Vec::new(),
            methods: Vec::new(),
        }
    }

    /// 类声明
    pub fn class(name: ClassName) -> Self {
        Self::new(name, TypeKind::Class)
    }

    /// 接口声明
    pub fn interface(name: ClassName) -> Self {
        Self::new(name, TypeKind::Interface)
    }

    /// 注解类型声明
    pub fn annotation_type(name: ClassName) -> Self {
        Self::new(name, TypeKind::Annotation)
    }

    /// 添加注解
    pub fn with_annotation(mut self, annotation: Annotation) -> Self {
        self.annotations.push(annotation);
        self
    }

    /// 添加父类型
    pub fn with_supertype(mut self, supertype: TypeRef) -> Self {
        self.supertypes.push(supertype);
        self
    }

    /// 添加方法
    pub fn with_method(mut self, method: MethodElement) -> Self {
        self.methods.push(method);
        self
    }

    /// 按名称查找方法
    pub fn method(&self, name: &str) -> Option<&MethodElement> {
        self.methods.iter().find(|method| method.name == name)
    }
}

/// 对声明元素的引用
///
/// 处理流程只持有引用，具体信息通过 [`crate::DeclarationIntrospector`] 查询。
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum ElementRef {
    /// 类型声明
    Type(ClassName),
    /// 类型中声明的方法
    Method { owner: ClassName, name: String },
}

impl ElementRef {
    /// 方法引用
    pub fn method(owner: ClassName, name: impl Into<String>) -> Self {
        Self::Method {
            owner,
            name: name.into(),
        }
    }

    /// 是否为方法
    pub fn is_method(&self) -> bool {
        matches!(self, Self::Method { .. })
    }
}

impl fmt::Display for ElementRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Type(name) => write!(f, "{name}"),
            Self::Method { owner, name } => write!(f, "{owner}.{name}()"),
        }
    }
}
