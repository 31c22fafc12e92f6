//! 单个贡献的模块生成
//!
//! 生成的模块包含私有构造函数、加入多重绑定映射的抽象绑定方法，
//! 以及以目标类型参数化的嵌套子组件。

use crate::declaration::{AnnotationMember, AnnotationSpec, MethodSpec, Modifier, SourceFile, TypeSpec};
use crate::descriptor::ContributionDescriptor;
use contributor_common::{FrameworkNames, ProcessorConfig, TypeRef};

/// 绑定方法名
pub const BIND_METHOD_NAME: &str = "bindInjectorFactory";

/// 贡献模块生成器
#[derive(Debug)]
pub struct ContributeInjectorGenerator<'a> {
    descriptor: &'a ContributionDescriptor,
    config: &'a ProcessorConfig,
}

impl<'a> ContributeInjectorGenerator<'a> {
    pub fn new(descriptor: &'a ContributionDescriptor, config: &'a ProcessorConfig) -> Self {
        Self { descriptor, config }
    }

    /// 生成模块源文件
    pub fn generate(&self) -> SourceFile {
        let descriptor = self.descriptor;
        let module_name = descriptor.module_name();

        let type_spec = TypeSpec::class(module_name.simple_name())
            .add_modifier(Modifier::Public)
            .add_modifier(Modifier::Abstract)
            .add_annotation(
                AnnotationSpec::new(self.framework().module.clone()).add_member(
                    "subcomponents",
                    AnnotationMember::Class(TypeRef::class(descriptor.subcomponent_name().clone())),
                ),
            )
            .add_method(MethodSpec::constructor().add_modifier(Modifier::Private))
            .add_method(self.bind_injector_method())
            .add_type(self.subcomponent());

        SourceFile::new(module_name.clone(), type_spec)
            .with_file_comment(self.config.file_comment.clone())
    }

    fn framework(&self) -> &FrameworkNames {
        &self.config.framework
    }

    fn target(&self) -> TypeRef {
        TypeRef::class(self.descriptor.target().clone())
    }

    fn bind_injector_method(&self) -> MethodSpec {
        let framework = self.framework();

        let key = if self.descriptor.use_string_keys() {
            AnnotationSpec::new(framework.string_key.clone()).add_member(
                "value",
                AnnotationMember::String(self.descriptor.target().canonical_name()),
            )
        } else {
            AnnotationSpec::new(framework.class_key.clone())
                .add_member("value", AnnotationMember::Class(self.target()))
        };

        MethodSpec::method(BIND_METHOD_NAME)
            .add_modifier(Modifier::Abstract)
            .add_annotation(AnnotationSpec::new(framework.binds.clone()))
            .add_annotation(AnnotationSpec::new(framework.into_map.clone()))
            .add_annotation(key)
            .add_parameter(
                TypeRef::class(self.descriptor.subcomponent_builder_name().clone()),
                "builder",
            )
            .returns(TypeRef::parameterized(
                framework.injector_factory.clone(),
                vec![TypeRef::subtype_of(TypeRef::object())],
            ))
    }

    fn subcomponent(&self) -> TypeSpec {
        let framework = self.framework();

        let annotation = self
            .descriptor
            .modules()
            .fold(AnnotationSpec::new(framework.subcomponent.clone()), |annotation, module| {
                annotation.add_member("modules", AnnotationMember::Class(TypeRef::class(module.clone())))
            });

        let subcomponent = TypeSpec::interface(self.descriptor.subcomponent_name().simple_name())
            .add_modifier(Modifier::Public)
            .add_superinterface(TypeRef::parameterized(
                framework.injector.clone(),
                vec![self.target()],
            ))
            .add_annotation(annotation)
            .add_type(self.subcomponent_builder());

        self.descriptor.scopes().fold(subcomponent, |subcomponent, scope| {
            subcomponent.add_annotation(AnnotationSpec::from_annotation(scope))
        })
    }

    fn subcomponent_builder(&self) -> TypeSpec {
        let framework = self.framework();

        TypeSpec::class(self.descriptor.subcomponent_builder_name().simple_name())
            .add_modifier(Modifier::Public)
            .add_modifier(Modifier::Abstract)
            .add_modifier(Modifier::Static)
            .add_annotation(AnnotationSpec::new(framework.subcomponent_builder.clone()))
            .superclass(TypeRef::parameterized(
                framework.injector_builder.clone(),
                vec![self.target()],
            ))
    }
}
