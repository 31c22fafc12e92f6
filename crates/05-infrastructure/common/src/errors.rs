//! 错误类型定义

use std::path::PathBuf;
use thiserror::Error;

/// 类名解析错误类型
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum NameError {
    #[error("类名为空")]
    Empty,

    #[error("无法从 {name} 推断类名: 缺少以大写字母开头的简单名称")]
    NotAClassName { name: String },

    #[error("无效的标识符: {identifier}")]
    InvalidIdentifier { identifier: String },
}

impl NameError {
    /// 创建无效标识符错误
    pub fn invalid_identifier(identifier: impl Into<String>) -> Self {
        Self::InvalidIdentifier {
            identifier: identifier.into(),
        }
    }
}

/// 配置错误类型
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("配置文件不存在: {path}")]
    FileNotFound { path: PathBuf },

    #[error("配置解析失败: {source}")]
    ParseError {
        #[from]
        source: config::ConfigError,
    },

    #[error("配置验证失败: {message}")]
    ValidationError { message: String },
}

/// 生成文件写出错误类型
#[derive(Error, Debug)]
pub enum EmitError {
    #[error("生成文件写入失败: {path}, 原因: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("生成文件在本次构建中已被写出: {name}")]
    AlreadyExists { name: String },
}

/// 声明索引加载错误类型
#[derive(Error, Debug)]
pub enum IndexError {
    #[error("声明索引读取失败: {path}, 原因: {source}")]
    FileReadError {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("声明索引解析失败: {source}")]
    ParseError {
        #[from]
        source: serde_json::Error,
    },

    #[error("声明索引中类型重复: {name}")]
    DuplicateType { name: String },
}

/// 顶层错误类型
#[derive(Error, Debug)]
pub enum ContributorError {
    #[error("类名错误: {source}")]
    Name {
        #[from]
        source: NameError,
    },

    #[error("配置错误: {source}")]
    Config {
        #[from]
        source: ConfigError,
    },

    #[error("生成文件错误: {source}")]
    Emit {
        #[from]
        source: EmitError,
    },

    #[error("声明索引错误: {source}")]
    Index {
        #[from]
        source: IndexError,
    },
}

/// 结果类型别名
pub type NameResult<T> = Result<T, NameError>;
pub type ConfigResult<T> = Result<T, ConfigError>;
pub type EmitResult<T> = Result<T, EmitError>;
pub type IndexResult<T> = Result<T, IndexError>;
pub type ContributorResult<T> = Result<T, ContributorError>;
