//! 内存声明索引
//!
//! 基于值类型的 [`DeclarationIntrospector`] 实现。宿主可以把解析好的声明导出为 JSON，
//! 由索引加载后交给处理器。

use crate::element::{Annotation, ElementRef, TypeElement};
use crate::introspector::DeclarationIntrospector;
use contributor_common::{ClassName, IndexError, IndexResult, TypeRef};
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use std::collections::{HashSet, VecDeque};
use std::path::Path;
use tracing::debug;

/// 声明索引文件格式
#[derive(Debug, Default, Serialize, Deserialize)]
struct IndexFile {
    #[serde(default)]
    types: Vec<TypeElement>,
}

/// 内存声明索引
///
/// 类型按加入顺序枚举。
#[derive(Debug, Clone, Default)]
pub struct DeclarationIndex {
    types: IndexMap<ClassName, TypeElement>,
}

impl DeclarationIndex {
    /// 创建空索引
    pub fn new() -> Self {
        Self::default()
    }

    /// 加入类型声明，同名类型已存在时返回错误
    pub fn add(&mut self, element: TypeElement) -> IndexResult<()> {
        if self.types.contains_key(&element.name) {
            return Err(IndexError::DuplicateType {
                name: element.name.to_string(),
            });
        }
        self.types.insert(element.name.clone(), element);
        Ok(())
    }

    /// 加入或替换类型声明
    pub fn with_type(mut self, element: TypeElement) -> Self {
        self.types.insert(element.name.clone(), element);
        self
    }

    /// 从 JSON 文本加载
    pub fn from_json(content: &str) -> IndexResult<Self> {
        let file: IndexFile = serde_json::from_str(content)?;
        let mut index = Self::new();
        for element in file.types {
            index.add(element)?;
        }
        debug!("声明索引加载完成，共 {} 个类型", index.len());
        Ok(index)
    }

    /// 从 JSON 文件加载
    pub fn from_path<P: AsRef<Path>>(path: P) -> IndexResult<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|source| IndexError::FileReadError {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_json(&content)
    }

    /// 导出为 JSON 文本
    pub fn to_json(&self) -> IndexResult<String> {
        let file = IndexFile {
            types: self.types.values().cloned().collect(),
        };
        Ok(serde_json::to_string_pretty(&file)?)
    }

    /// 全部类型声明
    pub fn types(&self) -> impl Iterator<Item = &TypeElement> {
        self.types.values()
    }

    /// 类型数量
    pub fn len(&self) -> usize {
        self.types.len()
    }

    /// 是否为空
    pub fn is_empty(&self) -> bool {
        self.types.is_empty()
    }
}

impl DeclarationIntrospector for DeclarationIndex {
    fn elements_annotated_with(&self, marker: &ClassName) -> Vec<ElementRef> {
        let mut elements = Vec::new();

        for element in self.types.values() {
            if element.annotations.iter().any(|a| a.is(marker)) {
                elements.push(ElementRef::Type(element.name.clone()));
            }

            for method in &element.methods {
                if method.annotations.iter().any(|a| a.is(marker)) {
                    elements.push(ElementRef::method(element.name.clone(), method.name.as_str()));
                }
            }
        }

        elements
    }

    fn type_element(&self, name: &ClassName) -> Option<&TypeElement> {
        self.types.get(name)
    }

    fn annotations_of(&self, element: &ElementRef) -> &[Annotation] {
        let annotations = match element {
            ElementRef::Type(name) => self.type_element(name).map(|t| t.annotations.as_slice()),
            ElementRef::Method { owner, name } => self
                .method_element(owner, name)
                .map(|m| m.annotations.as_slice()),
        };
        annotations.unwrap_or(&[])
    }

    fn is_assignable(&self, subtype: &TypeRef, supertype: &TypeRef) -> bool {
        let Some(target) = supertype.upper_bound().raw_class().cloned() else {
            return false;
        };
        if target == ClassName::object() {
            return true;
        }

        let Some(start) = subtype.upper_bound().raw_class().cloned() else {
            return false;
        };

        // 沿父类型做广度优先搜索
        let mut visited = HashSet::new();
        let mut queue = VecDeque::from([start]);

        while let Some(current) = queue.pop_front() {
            if current == target {
                return true;
            }
            if !visited.insert(current.clone()) {
                continue;
            }
            if let Some(element) = self.types.get(&current) {
                queue.extend(
                    element
                        .supertypes
                        .iter()
                        .filter_map(|supertype| supertype.raw_class().cloned()),
                );
            }
        }

        false
    }
}
