//! 命名约定规范
//!
//! 生成代码的名称只由输入声明的标识推导，相同输入在任意轮次都得到相同的名称。

use crate::metadata::ClassName;

/// 生成模块中子组件名称的后缀
pub const SUBCOMPONENT_SUFFIX: &str = "Subcomponent";

/// 子组件构建器的简单名称
pub const BUILDER_NAME: &str = "Builder";

/// 汇总模块名称的后缀
pub const CONTRIBUTIONS_SUFFIX: &str = "_Contributions";

/// 命名约定规范
#[derive(Debug)]
pub struct NamingConventions;

impl NamingConventions {
    /// 生成模块名称
    ///
    /// 与容器的顶层类同包，名称为容器全部简单名称以 `_` 连接，
    /// 再接 `_` 与首字母大写的方法名，例如 `FeatureModule_BindWidget`。
    pub fn generated_module_name(container: &ClassName, method_name: &str) -> ClassName {
        container.top_level_class_name().peer_class(format!(
            "{}_{}",
            container.simple_names().join("_"),
            lower_camel_to_upper_camel(method_name)
        ))
    }

    /// 生成模块中嵌套的子组件名称，例如 `FeatureModule_BindWidget.WidgetSubcomponent`
    pub fn subcomponent_name(module_name: &ClassName, target: &ClassName) -> ClassName {
        module_name.nested_class(format!("{}{}", target.simple_name(), SUBCOMPONENT_SUFFIX))
    }

    /// 子组件中嵌套的构建器名称
    pub fn subcomponent_builder_name(subcomponent_name: &ClassName) -> ClassName {
        subcomponent_name.nested_class(BUILDER_NAME)
    }

    /// 汇总模块名称
    ///
    /// 顶层容器得到 `<容器限定名>_Contributions`；嵌套容器的简单名称以 `_` 连接，
    /// 汇总模块始终是可以单独写出的顶层类。
    pub fn contributions_module_name(container: &ClassName) -> ClassName {
        container.top_level_class_name().peer_class(format!(
            "{}{}",
            container.simple_names().join("_"),
            CONTRIBUTIONS_SUFFIX
        ))
    }
}

/// 将小驼峰命名转换为大驼峰命名
///
/// 只把首个 ASCII 字母转为大写，其余字符保持不变，
/// 例如 `bindURLHandler` 转换为 `BindURLHandler`。
pub fn lower_camel_to_upper_camel(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        Some(first_char) => {
            let mut result = String::with_capacity(s.len());
            result.push(first_char.to_ascii_uppercase());
            result.push_str(chars.as_str());
            result
        }
        None => String::new(),
    }
}
