//! 声明内省接口
//!
//! 处理流程读取宿主声明信息的唯一边界

use crate::element::{Annotation, AnnotationValue, ElementRef, MethodElement, TypeElement};
use contributor_common::{ClassName, TypeRef};

/// 声明内省 trait
///
/// 由宿主编译器实现，提供带标记的声明、注解参数以及类型可赋值性查询。
pub trait DeclarationIntrospector {
    /// 按宿主的枚举顺序返回带有指定标记的元素
    fn elements_annotated_with(&self, marker: &ClassName) -> Vec<ElementRef>;

    /// 查找类型声明
    fn type_element(&self, name: &ClassName) -> Option<&TypeElement>;

    /// 元素上的全部注解，未知元素返回空
    fn annotations_of(&self, element: &ElementRef) -> &[Annotation];

    /// 子类型是否可以赋值给父类型
    fn is_assignable(&self, subtype: &TypeRef, supertype: &TypeRef) -> bool;

    /// 查找方法声明
    fn method_element(&self, owner: &ClassName, name: &str) -> Option<&MethodElement> {
        self.type_element(owner)?.method(name)
    }

    /// 元素的直接外层类型声明
    fn enclosing_container(&self, element: &ElementRef) -> Option<&TypeElement> {
        match element {
            ElementRef::Method { owner, .. } => self.type_element(owner),
            ElementRef::Type(name) => self.type_element(&name.enclosing_class_name()?),
        }
    }

    /// 查找元素上指定类型的注解
    fn annotation(&self, element: &ElementRef, marker: &ClassName) -> Option<&Annotation> {
        self.annotations_of(element)
            .iter()
            .find(|annotation| annotation.is(marker))
    }

    /// 元素上是否带有指定标记
    fn is_annotation_present(&self, element: &ElementRef, marker: &ClassName) -> bool {
        self.annotation(element, marker).is_some()
    }

    /// 元素上注解类型本身带有指定元标记的注解，例如作用域注解
    fn annotated_annotations(&self, element: &ElementRef, meta_marker: &ClassName) -> Vec<&Annotation> {
        self.annotations_of(element)
            .iter()
            .filter(|annotation| {
                self.is_annotation_present(
                    &ElementRef::Type(annotation.annotation_type.clone()),
                    meta_marker,
                )
            })
            .collect()
    }
}

/// 标记参数读取 trait
///
/// 以类型化的访问器读取注解参数，参数缺失或类型不符时返回空。
pub trait MetadataSource {
    /// 原始参数值
    fn value(&self, name: &str) -> Option<&AnnotationValue>;

    /// 字符串参数
    fn string_value(&self, name: &str) -> Option<&str> {
        match self.value(name)? {
            AnnotationValue::String(value) => Some(value),
            _ => None,
        }
    }

    /// 单个类型参数
    fn type_value(&self, name: &str) -> Option<&TypeRef> {
        match self.value(name)? {
            AnnotationValue::Type(value) => Some(value),
            _ => None,
        }
    }

    /// 类型列表参数，单个类型视为只有一个元素的列表
    fn type_list_value(&self, name: &str) -> Vec<&TypeRef> {
        match self.value(name) {
            Some(AnnotationValue::TypeList(values)) => values.iter().collect(),
            Some(AnnotationValue::Type(value)) => vec![value],
            _ => Vec::new(),
        }
    }
}

impl MetadataSource for Annotation {
    fn value(&self, name: &str) -> Option<&AnnotationValue> {
        self.values.get(name)
    }
}
