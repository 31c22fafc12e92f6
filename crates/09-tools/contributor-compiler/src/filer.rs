//! 生成文件写出

use crate::declaration::SourceFile;
use contributor_common::{ClassName, EmitError, EmitResult};
use indexmap::IndexMap;
use std::collections::HashSet;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::debug;

/// 生成文件写出 trait
///
/// 同一个类型在一次处理过程中只能写出一次。
pub trait Filer {
    /// 写出源文件
    fn write(&mut self, file: &SourceFile) -> EmitResult<()>;
}

/// 写入输出目录的文件写出器
#[derive(Debug)]
pub struct DirectoryFiler {
    root: PathBuf,
    written: HashSet<ClassName>,
}

impl DirectoryFiler {
    /// 创建写出器，目录不存在时在首次写出时创建
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self {
            root: root.into(),
            written: HashSet::new(),
        }
    }

    /// 输出目录
    pub fn root(&self) -> &Path {
        &self.root
    }
}

impl Filer for DirectoryFiler {
    fn write(&mut self, file: &SourceFile) -> EmitResult<()> {
        if self.written.contains(file.class_name()) {
            return Err(EmitError::AlreadyExists {
                name: file.class_name().to_string(),
            });
        }

        let path = self.root.join(file.relative_path());
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).map_err(|source| EmitError::Io {
                path: parent.to_path_buf(),
                source,
            })?;
        }
        fs::write(&path, file.to_source()).map_err(|source| EmitError::Io {
            path: path.clone(),
            source,
        })?;

        self.written.insert(file.class_name().clone());
        debug!("写出生成文件: {}", path.display());
        Ok(())
    }
}

/// 保存在内存中的文件写出器
#[derive(Debug, Default)]
pub struct MemoryFiler {
    files: IndexMap<ClassName, String>,
}

impl MemoryFiler {
    pub fn new() -> Self {
        Self::default()
    }

    /// 按类名读取已写出的源码
    pub fn get(&self, name: &ClassName) -> Option<&str> {
        self.files.get(name).map(String::as_str)
    }

    /// 按写出顺序列出的类名
    pub fn names(&self) -> impl Iterator<Item = &ClassName> {
        self.files.keys()
    }

    pub fn contains(&self, name: &ClassName) -> bool {
        self.files.contains_key(name)
    }

    pub fn len(&self) -> usize {
        self.files.len()
    }

    pub fn is_empty(&self) -> bool {
        self.files.is_empty()
    }
}

impl Filer for MemoryFiler {
    fn write(&mut self, file: &SourceFile) -> EmitResult<()> {
        if self.files.contains_key(file.class_name()) {
            return Err(EmitError::AlreadyExists {
                name: file.class_name().to_string(),
            });
        }
        self.files
            .insert(file.class_name().clone(), file.to_source());
        Ok(())
    }
}
