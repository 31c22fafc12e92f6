//! # Processing Abstractions
//!
//! 注解处理抽象层，定义处理器与宿主编译器之间的接口。
//!
//! ## 核心接口
//!
//! - [`DeclarationIntrospector`] - 声明内省接口
//! - [`MetadataSource`] - 标记参数读取接口
//! - [`Messager`] - 诊断信息报告接口
//! - [`DeclarationIndex`] - 内存声明索引

pub mod element;
pub mod index;
pub mod introspector;
pub mod messager;

pub use element::*;
pub use index::*;
pub use introspector::*;
pub use messager::*;
