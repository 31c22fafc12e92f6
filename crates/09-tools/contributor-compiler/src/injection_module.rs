//! 注入模块生成
//!
//! 注入模块声明两个空的多重绑定映射，分别对应类型键与字符串键，
//! 保证没有任何贡献时注入框架也能解析这两个映射。

use crate::declaration::{AnnotationSpec, MethodSpec, Modifier, SourceFile, TypeSpec};
use contributor_common::{ClassName, ProcessorConfig, TypeRef};

/// 类型键映射的方法名
pub const CLASS_KEYS_METHOD: &str = "allInjectorFactories";

/// 字符串键映射的方法名
pub const STRING_KEYS_METHOD: &str = "allInjectorFactoriesWithStringKeys";

/// 注入模块生成器
#[derive(Debug)]
pub struct InjectionModuleGenerator<'a> {
    name: &'a ClassName,
    config: &'a ProcessorConfig,
}

impl<'a> InjectionModuleGenerator<'a> {
    pub fn new(name: &'a ClassName, config: &'a ProcessorConfig) -> Self {
        Self { name, config }
    }

    pub fn generate(&self) -> SourceFile {
        let class_key = TypeRef::parameterized(ClassName::java_lang_class(), vec![TypeRef::wildcard()]);
        let string_key = TypeRef::class(ClassName::string());

        let type_spec = TypeSpec::class(self.name.simple_name())
            .add_modifier(Modifier::Public)
            .add_modifier(Modifier::Abstract)
            .add_annotation(AnnotationSpec::new(self.config.framework.module.clone()))
            .add_method(self.multibinds(CLASS_KEYS_METHOD, class_key))
            .add_method(self.multibinds(STRING_KEYS_METHOD, string_key));

        SourceFile::new(self.name.clone(), type_spec)
            .with_file_comment(self.config.file_comment.clone())
    }

    fn multibinds(&self, name: &str, key: TypeRef) -> MethodSpec {
        let factory = TypeRef::parameterized(
            self.config.framework.injector_factory.clone(),
            vec![TypeRef::wildcard()],
        );

        MethodSpec::method(name)
            .add_modifier(Modifier::Abstract)
            .add_annotation(AnnotationSpec::new(self.config.framework.multibinds.clone()))
            .returns(TypeRef::parameterized(ClassName::java_util_map(), vec![key, factory]))
    }
}
