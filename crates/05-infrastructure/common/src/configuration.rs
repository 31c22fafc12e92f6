//! 处理器配置定义
//!
//! 配置按以下顺序叠加：内置默认值、可选的配置文件、`CONTRIBUTOR_` 前缀的环境变量。

use crate::errors::{ConfigError, ConfigResult};
use crate::metadata::{ClassName, TypeRef};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::debug;

/// 环境变量前缀
pub const ENV_PREFIX: &str = "CONTRIBUTOR";

/// 处理器识别的标记注解名称
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct MarkerNames {
    /// 注入键注册表标记
    pub injector_key_registry: ClassName,
    /// 注入器贡献标记
    pub contribute_injector: ClassName,
    /// 模块标记
    pub module: ClassName,
    /// 映射键元标记
    pub map_key: ClassName,
    /// 作用域元标记
    pub scope: ClassName,
}

impl Default for MarkerNames {
    fn default() -> Self {
        Self {
            injector_key_registry: ClassName::known(
                "com.ivianuu.contributor",
                &["InjectorKeyRegistry"],
            ),
            contribute_injector: ClassName::known(
                "com.ivianuu.contributor",
                &["ContributeInjector"],
            ),
            module: ClassName::known("dagger", &["Module"]),
            map_key: ClassName::known("dagger", &["MapKey"]),
            scope: ClassName::known("javax.inject", &["Scope"]),
        }
    }
}

/// 生成代码引用的注入框架类型
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FrameworkNames {
    pub module: ClassName,
    pub subcomponent: ClassName,
    pub subcomponent_builder: ClassName,
    pub binds: ClassName,
    pub into_map: ClassName,
    pub multibinds: ClassName,
    /// 类型映射键注解
    pub class_key: ClassName,
    /// 字符串映射键注解
    pub string_key: ClassName,
    pub injector: ClassName,
    pub injector_factory: ClassName,
    pub injector_builder: ClassName,
}

impl Default for FrameworkNames {
    fn default() -> Self {
        Self {
            module: ClassName::known("dagger", &["Module"]),
            subcomponent: ClassName::known("dagger", &["Subcomponent"]),
            subcomponent_builder: ClassName::known("dagger", &["Subcomponent", "Builder"]),
            binds: ClassName::known("dagger", &["Binds"]),
            into_map: ClassName::known("dagger.multibindings", &["IntoMap"]),
            multibinds: ClassName::known("dagger.multibindings", &["Multibinds"]),
            class_key: ClassName::known("dagger.multibindings", &["ClassKey"]),
            string_key: ClassName::known("dagger.android", &["AndroidInjectionKey"]),
            injector: ClassName::known("dagger.android", &["AndroidInjector"]),
            injector_factory: ClassName::known("dagger.android", &["AndroidInjector", "Factory"]),
            injector_builder: ClassName::known("dagger.android", &["AndroidInjector", "Builder"]),
        }
    }
}

/// 多重绑定映射键的生成方式
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum KeyStyle {
    /// 映射键的值类型为字符串类型时使用字符串键，否则使用类型键
    #[default]
    Auto,
    /// 总是使用字符串键
    String,
    /// 总是使用类型键
    Class,
}

/// 注入键注册表在多轮处理之间的行为
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RegistryMode {
    /// 每轮重新构建
    #[default]
    Rebuild,
    /// 保留之前轮次收集的注入键并追加新键
    Merge,
}

/// 处理器配置
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ProcessorConfig {
    /// 标记注解名称
    pub markers: MarkerNames,
    /// 注入框架类型
    pub framework: FrameworkNames,
    /// 映射键生成方式
    pub key_style: KeyStyle,
    /// 视为字符串的类型名称
    pub string_key_types: Vec<String>,
    /// 注册表模式
    pub registry_mode: RegistryMode,
    /// 生成文件输出目录
    pub output_dir: Option<PathBuf>,
    /// 需要额外生成的注入模块（声明空的多重绑定映射）
    pub injection_module: Option<ClassName>,
    /// 生成文件的头部注释
    pub file_comment: Option<String>,
}

impl Default for ProcessorConfig {
    fn default() -> Self {
        Self {
            markers: MarkerNames::default(),
            framework: FrameworkNames::default(),
            key_style: KeyStyle::default(),
            string_key_types: vec![
                "java.lang.String".to_string(),
                "kotlin.String".to_string(),
                "String".to_string(),
            ],
            registry_mode: RegistryMode::default(),
            output_dir: None,
            injection_module: None,
            file_comment: Some("Generated by contributor. Do not edit.".to_string()),
        }
    }
}

impl ProcessorConfig {
    /// 加载配置
    ///
    /// `path` 指定的配置文件必须存在，格式由扩展名决定（toml、json、yaml）。
    pub fn load(path: Option<&Path>) -> ConfigResult<Self> {
        let mut builder = config::Config::builder();

        if let Some(path) = path {
            if !path.exists() {
                return Err(ConfigError::FileNotFound {
                    path: path.to_path_buf(),
                });
            }
            debug!("加载配置文件: {}", path.display());
            builder = builder.add_source(config::File::from(path));
        }

        let settings = builder
            .add_source(
                config::Environment::with_prefix(ENV_PREFIX)
                    .prefix_separator("_")
                    .separator("__"),
            )
            .build()?;

        let config: Self = settings.try_deserialize()?;
        config.validate()?;
        Ok(config)
    }

    /// 从 TOML 文本加载配置
    pub fn from_toml_str(content: &str) -> ConfigResult<Self> {
        let settings = config::Config::builder()
            .add_source(config::File::from_str(content, config::FileFormat::Toml))
            .build()?;

        let config: Self = settings.try_deserialize()?;
        config.validate()?;
        Ok(config)
    }

    /// 验证配置
    pub fn validate(&self) -> ConfigResult<()> {
        let markers = &self.markers;
        if markers.injector_key_registry == markers.contribute_injector {
            return Err(ConfigError::ValidationError {
                message: format!(
                    "注入键注册表标记与贡献标记不能相同: {}",
                    markers.contribute_injector
                ),
            });
        }

        if self.key_style == KeyStyle::Auto && self.string_key_types.is_empty() {
            return Err(ConfigError::ValidationError {
                message: "auto 键模式需要至少一个字符串类型".to_string(),
            });
        }

        Ok(())
    }

    /// 判断映射键值类型为该类型的注入键是否使用字符串键
    pub fn use_string_keys(&self, map_key_value_type: &TypeRef) -> bool {
        match self.key_style {
            KeyStyle::String => true,
            KeyStyle::Class => false,
            KeyStyle::Auto => map_key_value_type.raw_class().is_some_and(|class| {
                let name = class.canonical_name();
                self.string_key_types.iter().any(|ty| *ty == name)
            }),
        }
    }
}
