//! 贡献描述符
//!
//! 描述符是一次贡献解析的最终结果，构建后不再修改。

use contributor_abstractions::{Annotation, ElementRef};
use contributor_common::{ClassName, NamingConventions, TypeRef};
use indexmap::IndexSet;

/// 带贡献标记的方法声明
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ContributionElement {
    /// 声明方法的外层模块
    pub container: ClassName,
    /// 方法名
    pub method_name: String,
    /// 方法返回的目标类型
    pub produced_type: ClassName,
}

impl ContributionElement {
    pub fn new(container: ClassName, method_name: impl Into<String>, produced_type: ClassName) -> Self {
        Self {
            container,
            method_name: method_name.into(),
            produced_type,
        }
    }

    /// 对应的声明元素引用
    pub fn element_ref(&self) -> ElementRef {
        ElementRef::method(self.container.clone(), self.method_name.as_str())
    }
}

/// 贡献描述符
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContributionDescriptor {
    element: ContributionElement,
    module_name: ClassName,
    modules: IndexSet<ClassName>,
    scopes: IndexSet<Annotation>,
    subcomponent_name: ClassName,
    subcomponent_builder_name: ClassName,
    base_injectable_type: Option<ClassName>,
    map_key_value_type: Option<TypeRef>,
    use_string_keys: bool,
}

impl ContributionDescriptor {
    /// 创建构建器，并推导全部生成名称
    pub fn builder(
        element: ContributionElement,
        base_injectable_type: Option<ClassName>,
        map_key_value_type: Option<TypeRef>,
    ) -> ContributionDescriptorBuilder {
        let module_name =
            NamingConventions::generated_module_name(&element.container, &element.method_name);
        let subcomponent_name =
            NamingConventions::subcomponent_name(&module_name, &element.produced_type);
        let subcomponent_builder_name =
            NamingConventions::subcomponent_builder_name(&subcomponent_name);

        ContributionDescriptorBuilder {
            element,
            module_name,
            subcomponent_name,
            subcomponent_builder_name,
            base_injectable_type,
            map_key_value_type,
            use_string_keys: false,
            modules: IndexSet::new(),
            scopes: IndexSet::new(),
        }
    }

    /// 来源声明
    pub fn element(&self) -> &ContributionElement {
        &self.element
    }

    /// 目标类型
    pub fn target(&self) -> &ClassName {
        &self.element.produced_type
    }

    /// 生成模块名称
    pub fn module_name(&self) -> &ClassName {
        &self.module_name
    }

    /// 子组件声明的附加模块
    pub fn modules(&self) -> impl Iterator<Item = &ClassName> {
        self.modules.iter()
    }

    /// 附加到子组件上的作用域注解
    pub fn scopes(&self) -> impl Iterator<Item = &Annotation> {
        self.scopes.iter()
    }

    pub fn subcomponent_name(&self) -> &ClassName {
        &self.subcomponent_name
    }

    pub fn subcomponent_builder_name(&self) -> &ClassName {
        &self.subcomponent_builder_name
    }

    pub fn base_injectable_type(&self) -> Option<&ClassName> {
        self.base_injectable_type.as_ref()
    }

    pub fn map_key_value_type(&self) -> Option<&TypeRef> {
        self.map_key_value_type.as_ref()
    }

    /// 绑定方法是否使用字符串映射键
    pub fn use_string_keys(&self) -> bool {
        self.use_string_keys
    }
}

/// 贡献描述符构建器
#[derive(Debug)]
pub struct ContributionDescriptorBuilder {
    element: ContributionElement,
    module_name: ClassName,
    subcomponent_name: ClassName,
    subcomponent_builder_name: ClassName,
    base_injectable_type: Option<ClassName>,
    map_key_value_type: Option<TypeRef>,
    use_string_keys: bool,
    modules: IndexSet<ClassName>,
    scopes: IndexSet<Annotation>,
}

impl ContributionDescriptorBuilder {
    pub fn add_module(&mut self, module: ClassName) -> &mut Self {
        self.modules.insert(module);
        self
    }

    pub fn add_scope(&mut self, scope: Annotation) -> &mut Self {
        self.scopes.insert(scope);
        self
    }

    pub fn use_string_keys(&mut self, use_string_keys: bool) -> &mut Self {
        self.use_string_keys = use_string_keys;
        self
    }

    pub fn build(self) -> ContributionDescriptor {
        ContributionDescriptor {
            element: self.element,
            module_name: self.module_name,
            modules: self.modules,
            scopes: self.scopes,
            subcomponent_name: self.subcomponent_name,
            subcomponent_builder_name: self.subcomponent_builder_name,
            base_injectable_type: self.base_injectable_type,
            map_key_value_type: self.map_key_value_type,
            use_string_keys: self.use_string_keys,
        }
    }
}

/// 一轮处理的汇总模块描述
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContributionsModuleDescriptor {
    pub name: ClassName,
    pub contributions: Vec<ContributionDescriptor>,
}

impl ContributionsModuleDescriptor {
    /// 以第一个贡献的外层模块命名，没有贡献时返回 `None`
    pub fn from_contributions(contributions: &[ContributionDescriptor]) -> Option<Self> {
        let first = contributions.first()?;
        Some(Self {
            name: NamingConventions::contributions_module_name(&first.element().container),
            contributions: contributions.to_vec(),
        })
    }

    /// 被汇总的生成模块名称，按名称排序并去重
    pub fn module_names(&self) -> Vec<ClassName> {
        let mut names: Vec<_> = self
            .contributions
            .iter()
            .map(|contribution| contribution.module_name().clone())
            .collect();
        names.sort();
        names.dedup();
        names
    }
}
