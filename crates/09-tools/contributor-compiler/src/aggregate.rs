//! 汇总模块生成

use crate::declaration::{AnnotationMember, AnnotationSpec, MethodSpec, Modifier, SourceFile, TypeSpec};
use crate::descriptor::ContributionsModuleDescriptor;
use contributor_common::{ProcessorConfig, TypeRef};

/// 汇总模块生成器
///
/// 汇总模块通过 `includes` 引用本轮生成的全部贡献模块。
#[derive(Debug)]
pub struct ContributionsModuleGenerator<'a> {
    descriptor: &'a ContributionsModuleDescriptor,
    config: &'a ProcessorConfig,
}

impl<'a> ContributionsModuleGenerator<'a> {
    pub fn new(descriptor: &'a ContributionsModuleDescriptor, config: &'a ProcessorConfig) -> Self {
        Self { descriptor, config }
    }

    pub fn generate(&self) -> SourceFile {
        let module = self.descriptor.module_names().into_iter().fold(
            AnnotationSpec::new(self.config.framework.module.clone()),
            |annotation, name| annotation.add_member("includes", AnnotationMember::Class(TypeRef::class(name))),
        );

        let type_spec = TypeSpec::class(self.descriptor.name.simple_name())
            .add_modifier(Modifier::Public)
            .add_modifier(Modifier::Abstract)
            .add_annotation(module)
            .add_method(MethodSpec::constructor().add_modifier(Modifier::Private));

        SourceFile::new(self.descriptor.name.clone(), type_spec)
            .with_file_comment(self.config.file_comment.clone())
    }
}
