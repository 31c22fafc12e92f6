//! # Contributor Common
//!
//! 这个 crate 提供了注入器贡献生成器各层共享的基础类型。
//!
//! ## 核心内容
//!
//! - [`ClassName`] / [`TypeRef`] - 类型标识
//! - [`NamingConventions`] - 生成代码的命名约定
//! - [`ProcessorConfig`] - 处理器配置
//! - [`ContributorError`] - 错误类型
//!
//! ## 设计原则
//!
//! - 生成名称是输入声明标识的纯函数
//! - 单项失败不会中断整轮处理

pub mod configuration;
pub mod conventions;
pub mod errors;
pub mod metadata;

pub use configuration::*;
pub use conventions::*;
pub use errors::*;
pub use metadata::*;
