//! 贡献解析
//!
//! 第二阶段：把每个带贡献标记的方法与注册表中的注入键匹配，构建贡献描述符。

use crate::descriptor::{ContributionDescriptor, ContributionElement};
use crate::registry::InjectorKeyRegistry;
use contributor_abstractions::{DeclarationIntrospector, ElementRef, Messager, MetadataSource};
use contributor_common::{ProcessorConfig, TypeRef};
use tracing::debug;

/// 贡献标记中声明附加模块的参数名
pub const MODULES_ARGUMENT: &str = "modules";

/// 贡献解析器
///
/// 持有本轮已经收集完成的注册表，解析期间注册表只读。
#[derive(Debug)]
pub struct ContributionResolver<'a> {
    registry: &'a InjectorKeyRegistry,
    config: &'a ProcessorConfig,
}

impl<'a> ContributionResolver<'a> {
    pub fn new(registry: &'a InjectorKeyRegistry, config: &'a ProcessorConfig) -> Self {
        Self { registry, config }
    }

    /// 解析单个贡献声明
    ///
    /// 失败时报告错误并返回 `None`，该贡献不参与本轮生成。
    pub fn resolve(
        &self,
        introspector: &dyn DeclarationIntrospector,
        messager: &mut dyn Messager,
        element: &ElementRef,
    ) -> Option<ContributionDescriptor> {
        let ElementRef::Method { owner, name } = element else {
            debug!("跳过非方法的贡献声明: {}", element);
            return None;
        };

        let Some(method) = introspector.method_element(owner, name) else {
            messager.error(&format!("unknown contribution declaration {element}"), Some(element));
            return None;
        };
        let produced = &method.return_type;

        // 按注册表插入顺序取第一个可赋值的键
        let Some(key) = self
            .registry
            .first_match(|key| introspector.is_assignable(produced, &key.base_type()))
        else {
            messager.error(&format!("no matching binding key found for {element}"), Some(element));
            return None;
        };

        let container = introspector.enclosing_container(element);
        let in_module = container.is_some_and(|container| {
            introspector.is_annotation_present(
                &ElementRef::Type(container.name.clone()),
                &self.config.markers.module,
            )
        });
        if !in_module {
            messager.error(
                "contribution marker must be in a module-marked container",
                Some(element),
            );
            return None;
        }

        let Some(target) = produced.raw_class().cloned() else {
            messager.error(
                &format!("contribution {element} must return a declared type, found {produced}"),
                Some(element),
            );
            return None;
        };

        let mut builder = ContributionDescriptor::builder(
            ContributionElement::new(owner.clone(), name.as_str(), target),
            Some(key.base_injectable_type.clone()),
            Some(key.map_key_value_type.clone()),
        );
        builder.use_string_keys(key.use_string_keys);

        for scope in introspector.annotated_annotations(element, &self.config.markers.scope) {
            builder.add_scope(scope.clone());
        }

        if let Some(annotation) =
            introspector.annotation(element, &self.config.markers.contribute_injector)
        {
            for module in annotation
                .type_list_value(MODULES_ARGUMENT)
                .into_iter()
                .filter_map(TypeRef::raw_class)
            {
                builder.add_module(module.clone());
            }
        }

        let descriptor = builder.build();
        debug!(
            "贡献 {} 匹配注入键 {}，生成模块 {}",
            element,
            key.base_injectable_type,
            descriptor.module_name()
        );
        Some(descriptor)
    }
}
