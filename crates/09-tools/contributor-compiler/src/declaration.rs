//! 生成代码的声明模型
//!
//! 生成器先构造类型声明树，再由 [`crate::render`] 渲染为 Java 源码。

use contributor_abstractions::{Annotation, AnnotationValue};
use contributor_common::{ClassName, TypeRef};
use std::collections::BTreeSet;
use std::path::PathBuf;

/// 修饰符，按 Java 惯用顺序排列
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Modifier {
    Public,
    Protected,
    Private,
    Abstract,
    Static,
    Final,
}

impl Modifier {
    /// 关键字
    pub fn keyword(self) -> &'static str {
        match self {
            Self::Public => "public",
            Self::Protected => "protected",
            Self::Private => "private",
            Self::Abstract => "abstract",
            Self::Static => "static",
            Self::Final => "final",
        }
    }
}

/// 注解成员值
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum AnnotationMember {
    /// 类字面量，渲染为 `X.class`
    Class(TypeRef),
    /// 字符串字面量
    String(String),
    /// 原样输出的字面量
    Literal(String),
    /// 数组
    Array(Vec<AnnotationMember>),
}

impl From<&AnnotationValue> for AnnotationMember {
    fn from(value: &AnnotationValue) -> Self {
        match value {
            AnnotationValue::Bool(value) => Self::Literal(value.to_string()),
            AnnotationValue::Int(value) => Self::Literal(value.to_string()),
            AnnotationValue::String(value) => Self::String(value.clone()),
            AnnotationValue::Type(value) => Self::Class(value.clone()),
            AnnotationValue::TypeList(values) => {
                Self::Array(values.iter().cloned().map(Self::Class).collect())
            }
            AnnotationValue::List(values) => Self::Array(values.iter().map(Self::from).collect()),
            AnnotationValue::Enum { constant } => Self::Literal(constant.clone()),
            AnnotationValue::Other(value) => Self::Literal(value.to_string()),
        }
    }
}

/// 注解声明
///
/// 同名成员多次添加时合并为数组。
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct AnnotationSpec {
    pub annotation_type: ClassName,
    pub members: Vec<(String, Vec<AnnotationMember>)>,
}

impl AnnotationSpec {
    /// 创建不带成员的注解
    pub fn new(annotation_type: ClassName) -> Self {
        Self {
            annotation_type,
            members: Vec::new(),
        }
    }

    /// 复制声明上已有的注解
    pub fn from_annotation(annotation: &Annotation) -> Self {
        let members = annotation
            .values
            .iter()
            .map(|(name, value)| (name.clone(), vec![AnnotationMember::from(value)]))
            .collect();

        Self {
            annotation_type: annotation.annotation_type.clone(),
            members,
        }
    }

    /// 添加成员值
    pub fn add_member(mut self, name: &str, value: AnnotationMember) -> Self {
        match self.members.iter_mut().find(|(member, _)| member == name) {
            Some((_, values)) => values.push(value),
            None => self.members.push((name.to_string(), vec![value])),
        }
        self
    }

    /// 按名称读取成员值
    pub fn member(&self, name: &str) -> Option<&[AnnotationMember]> {
        self.members
            .iter()
            .find(|(member, _)| member == name)
            .map(|(_, values)| values.as_slice())
    }
}

/// 方法参数
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ParameterSpec {
    pub parameter_type: TypeRef,
    pub name: String,
}

/// 方法声明
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct MethodSpec {
    /// 方法名，构造函数为空
    pub name: String,
    pub is_constructor: bool,
    pub modifiers: BTreeSet<Modifier>,
    pub annotations: Vec<AnnotationSpec>,
    pub parameters: Vec<ParameterSpec>,
    /// 返回类型，`None` 表示 `void`
    pub returns: Option<TypeRef>,
}

impl MethodSpec {
    /// 普通方法
    pub fn method(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            is_constructor: false,
            modifiers: BTreeSet::new(),
            annotations: Vec::new(),
            parameters: Vec::new(),
            returns: None,
        }
    }

    /// 构造函数
    pub fn constructor() -> Self {
        Self {
            is_constructor: true,
            ..Self::method("")
        }
    }

    pub fn add_modifier(mut self, modifier: Modifier) -> Self {
        self.modifiers.insert(modifier);
        self
    }

    pub fn add_annotation(mut self, annotation: AnnotationSpec) -> Self {
        self.annotations.push(annotation);
        self
    }

    pub fn add_parameter(mut self, parameter_type: TypeRef, name: impl Into<String>) -> Self {
        self.parameters.push(ParameterSpec {
            parameter_type,
            name: name.into(),
        });
        self
    }

    pub fn returns(mut self, return_type: TypeRef) -> Self {
        self.returns = Some(return_type);
        self
    }

    /// 是否为抽象方法
    pub fn is_abstract(&self) -> bool {
        self.modifiers.contains(&Modifier::Abstract)
    }

    /// 查找方法上的注解
    pub fn annotation(&self, annotation_type: &ClassName) -> Option<&AnnotationSpec> {
        self.annotations
            .iter()
            .find(|annotation| annotation.annotation_type == *annotation_type)
    }
}

/// 类型声明种类
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DeclarationKind {
    Class,
    Interface,
}

/// 类型声明
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct TypeSpec {
    pub kind: DeclarationKind,
    /// 简单名称
    pub name: String,
    pub modifiers: BTreeSet<Modifier>,
    pub annotations: Vec<AnnotationSpec>,
    pub superclass: Option<TypeRef>,
    pub superinterfaces: Vec<TypeRef>,
    pub methods: Vec<MethodSpec>,
    /// 嵌套类型
    pub types: Vec<TypeSpec>,
}

impl TypeSpec {
    fn new(kind: DeclarationKind, name: impl Into<String>) -> Self {
        Self {
            kind,
            name: name.into(),
            modifiers: BTreeSet::new(),
            annotations: Vec::new(),
            superclass: None,
            superinterfaces: Vec::new(),
            methods: Vec::new(),
            types: Vec::new(),
        }
    }

    /// 类声明
    pub fn class(name: impl Into<String>) -> Self {
        Self::new(DeclarationKind::Class, name)
    }

    /// 接口声明
    pub fn interface(name: impl Into<String>) -> Self {
        Self::new(DeclarationKind::Interface, name)
    }

    pub fn add_modifier(mut self, modifier: Modifier) -> Self {
        self.modifiers.insert(modifier);
        self
    }

    pub fn add_annotation(mut self, annotation: AnnotationSpec) -> Self {
        self.annotations.push(annotation);
        self
    }

    pub fn superclass(mut self, superclass: TypeRef) -> Self {
        self.superclass = Some(superclass);
        self
    }

    pub fn add_superinterface(mut self, superinterface: TypeRef) -> Self {
        self.superinterfaces.push(superinterface);
        self
    }

    pub fn add_method(mut self, method: MethodSpec) -> Self {
        self.methods.push(method);
        self
    }

    pub fn add_type(mut self, nested: TypeSpec) -> Self {
        self.types.push(nested);
        self
    }

    /// 按名称查找方法
    pub fn method(&self, name: &str) -> Option<&MethodSpec> {
        self.methods.iter().find(|method| method.name == name)
    }

    /// 按简单名称查找嵌套类型
    pub fn nested_type(&self, name: &str) -> Option<&TypeSpec> {
        self.types.iter().find(|nested| nested.name == name)
    }

    /// 查找类型上的注解
    pub fn annotation(&self, annotation_type: &ClassName) -> Option<&AnnotationSpec> {
        self.annotations
            .iter()
            .find(|annotation| annotation.annotation_type == *annotation_type)
    }
}

/// 一个生成的源文件
///
/// 每个文件只包含一个顶层类型。
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceFile {
    name: ClassName,
    type_spec: TypeSpec,
    file_comment: Option<String>,
}

impl SourceFile {
    /// 创建源文件，`name` 为顶层类型的限定类名
    pub fn new(name: ClassName, type_spec: TypeSpec) -> Self {
        Self {
            name,
            type_spec,
            file_comment: None,
        }
    }

    /// 设置文件头部注释
    pub fn with_file_comment(mut self, comment: Option<String>) -> Self {
        self.file_comment = comment;
        self
    }

    /// 顶层类型的限定类名
    pub fn class_name(&self) -> &ClassName {
        &self.name
    }

    pub fn package_name(&self) -> &str {
        self.name.package_name()
    }

    pub fn type_spec(&self) -> &TypeSpec {
        &self.type_spec
    }

    pub fn file_comment(&self) -> Option<&str> {
        self.file_comment.as_deref()
    }

    /// 相对输出目录的路径，例如 `com/app/FeatureModule_BindWidget.java`
    pub fn relative_path(&self) -> PathBuf {
        let mut path = PathBuf::new();
        if !self.package_name().is_empty() {
            for part in self.package_name().split('.') {
                path.push(part);
            }
        }
        path.push(format!("{}.java", self.type_spec.name));
        path
    }
}
