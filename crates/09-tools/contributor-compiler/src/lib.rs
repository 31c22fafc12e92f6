//! # Contributor Compiler
//!
//! 编译期注入器贡献生成器。根据声明上的标记生成多重绑定模块与子组件，
//! 替代手写的注入器绑定样板代码。
//!
//! ## 处理流程
//!
//! 1. [`InjectorKeyCollector`] 从注册表标记中收集注入键
//! 2. [`ContributionResolver`] 按可赋值性为每个贡献匹配注入键，构建 [`ContributionDescriptor`]
//! 3. [`ContributeInjectorGenerator`] 为每个贡献生成模块
//! 4. [`ContributionsModuleGenerator`] 为本轮生成汇总模块
//! 5. [`Filer`] 写出生成文件，写出失败只记录日志
//!
//! [`ContributorProcessor`] 按上述顺序驱动一轮处理。
//!
//! ## 使用示例
//!
//! ```rust,ignore
//! use contributor_abstractions::{CollectingMessager, DeclarationIndex};
//! use contributor_common::ProcessorConfig;
//! use contributor_compiler::{ContributorProcessor, DirectoryFiler};
//!
//! let index = DeclarationIndex::from_path("declarations.json")?;
//! let mut processor = ContributorProcessor::new(ProcessorConfig::default());
//! let mut filer = DirectoryFiler::new("build/generated");
//! let mut messager = CollectingMessager::new();
//!
//! let outcome = processor.process_round(&index, &mut filer, &mut messager);
//! ```

pub mod aggregate;
pub mod declaration;
pub mod descriptor;
pub mod filer;
pub mod generator;
pub mod injection_module;
pub mod processor;
pub mod registry;
mod render;
pub mod resolver;

pub use aggregate::ContributionsModuleGenerator;
pub use declaration::{
    AnnotationMember, AnnotationSpec, DeclarationKind, MethodSpec, Modifier, ParameterSpec,
    SourceFile, TypeSpec,
};
pub use descriptor::{
    ContributionDescriptor, ContributionDescriptorBuilder, ContributionElement,
    ContributionsModuleDescriptor,
};
pub use filer::{DirectoryFiler, Filer, MemoryFiler};
pub use generator::ContributeInjectorGenerator;
pub use injection_module::InjectionModuleGenerator;
pub use processor::{ContributorProcessor, RoundOutcome};
pub use registry::{InjectorKey, InjectorKeyCollector, InjectorKeyRegistry, MalformedKey};
pub use resolver::ContributionResolver;
