//! 注入键注册表
//!
//! 第一阶段：从带注册表标记的声明中收集注入键，供第二阶段的贡献解析使用。

use contributor_abstractions::{DeclarationIntrospector, ElementRef, Messager, MetadataSource};
use contributor_common::{ClassName, ProcessorConfig, TypeRef};
use indexmap::IndexSet;
use thiserror::Error;
use tracing::debug;

/// 注册表标记中声明键类型列表的参数名
pub const KEYS_ARGUMENT: &str = "keys";

/// 注入键
///
/// 一个多重绑定槽位：映射键的值类型与基础可注入类型的组合。
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct InjectorKey {
    pub map_key_value_type: TypeRef,
    pub base_injectable_type: ClassName,
    /// 绑定方法是否使用字符串映射键
    pub use_string_keys: bool,
}

impl InjectorKey {
    pub fn new(
        map_key_value_type: TypeRef,
        base_injectable_type: ClassName,
        use_string_keys: bool,
    ) -> Self {
        Self {
            map_key_value_type,
            base_injectable_type,
            use_string_keys,
        }
    }

    /// 基础可注入类型的类型引用
    pub fn base_type(&self) -> TypeRef {
        TypeRef::class(self.base_injectable_type.clone())
    }
}

/// 注入键注册表
///
/// 按插入顺序保存注入键，只追加不删除，重复的键只保留一份。
#[derive(Debug, Clone, Default)]
pub struct InjectorKeyRegistry {
    keys: IndexSet<InjectorKey>,
}

impl InjectorKeyRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// 追加注入键，键已存在时返回 `false`
    pub fn insert(&mut self, key: InjectorKey) -> bool {
        self.keys.insert(key)
    }

    /// 按插入顺序遍历
    pub fn keys(&self) -> impl Iterator<Item = &InjectorKey> {
        self.keys.iter()
    }

    /// 按插入顺序返回第一个满足条件的键
    pub fn first_match<F>(&self, mut predicate: F) -> Option<&InjectorKey>
    where
        F: FnMut(&InjectorKey) -> bool,
    {
        self.keys.iter().find(|key| predicate(key))
    }

    pub fn contains(&self, key: &InjectorKey) -> bool {
        self.keys.contains(key)
    }

    pub fn len(&self) -> usize {
        self.keys.len()
    }

    pub fn is_empty(&self) -> bool {
        self.keys.is_empty()
    }
}

impl Extend<InjectorKey> for InjectorKeyRegistry {
    fn extend<T: IntoIterator<Item = InjectorKey>>(&mut self, iter: T) {
        self.keys.extend(iter);
    }
}

impl FromIterator<InjectorKey> for InjectorKeyRegistry {
    fn from_iter<T: IntoIterator<Item = InjectorKey>>(iter: T) -> Self {
        Self {
            keys: iter.into_iter().collect(),
        }
    }
}

/// 无法作为注入键使用的键类型
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum MalformedKey {
    #[error("invalid injector key type {key}")]
    NotAClass { key: TypeRef },

    #[error("map key annotation must be present for {key}")]
    MissingMapKey { key: ClassName },

    #[error("map key {key} must declare exactly one value method, found {found}")]
    AccessorCount { key: ClassName, found: usize },

    #[error("map key {key} value type must have at most one type argument, found {found}")]
    TypeArguments { key: ClassName, found: usize },
}

/// 注入键收集器
#[derive(Debug)]
pub struct InjectorKeyCollector<'a> {
    config: &'a ProcessorConfig,
}

impl<'a> InjectorKeyCollector<'a> {
    pub fn new(config: &'a ProcessorConfig) -> Self {
        Self { config }
    }

    /// 收集本轮全部带注册表标记的声明中的注入键
    pub fn collect(
        &self,
        introspector: &dyn DeclarationIntrospector,
        messager: &mut dyn Messager,
    ) -> InjectorKeyRegistry {
        let mut registry = InjectorKeyRegistry::new();
        self.collect_into(introspector, messager, &mut registry);
        registry
    }

    /// 把收集到的注入键追加到已有注册表，返回新增的键数量
    pub fn collect_into(
        &self,
        introspector: &dyn DeclarationIntrospector,
        messager: &mut dyn Messager,
        registry: &mut InjectorKeyRegistry,
    ) -> usize {
        let elements =
            introspector.elements_annotated_with(&self.config.markers.injector_key_registry);
        let before = registry.len();
        registry.extend(self.collect_keys(introspector, messager, &elements));
        registry.len() - before
    }

    /// 从给定的注册表声明中收集注入键
    ///
    /// 不合格的键报告错误后跳过，不影响其余的键。
    pub fn collect_keys(
        &self,
        introspector: &dyn DeclarationIntrospector,
        messager: &mut dyn Messager,
        elements: &[ElementRef],
    ) -> Vec<InjectorKey> {
        let mut keys = Vec::new();

        for element in elements {
            let Some(annotation) =
                introspector.annotation(element, &self.config.markers.injector_key_registry)
            else {
                continue;
            };

            let declared = annotation.type_list_value(KEYS_ARGUMENT);
            if declared.is_empty() {
                debug!("注册表声明 {} 没有声明键类型", element);
            }

            for key_type in declared {
                match self.injector_key(introspector, key_type) {
                    Ok(key) => {
                        debug!(
                            "收集注入键: {} -> {} (字符串键: {})",
                            key.base_injectable_type, key.map_key_value_type, key.use_string_keys
                        );
                        keys.push(key);
                    }
                    Err(malformed) => messager.error(&malformed.to_string(), Some(element)),
                }
            }
        }

        keys
    }

    fn injector_key(
        &self,
        introspector: &dyn DeclarationIntrospector,
        key_type: &TypeRef,
    ) -> Result<InjectorKey, MalformedKey> {
        let key = key_type
            .raw_class()
            .cloned()
            .ok_or_else(|| MalformedKey::NotAClass {
                key: key_type.clone(),
            })?;

        if !introspector.is_annotation_present(&ElementRef::Type(key.clone()), &self.config.markers.map_key)
        {
            return Err(MalformedKey::MissingMapKey { key });
        }

        let map_key_value_type = map_key_value(introspector, &key)?;
        let use_string_keys = self.config.use_string_keys(&map_key_value_type);

        Ok(InjectorKey::new(map_key_value_type, key, use_string_keys))
    }
}

/// 映射键唯一访问方法的返回类型，展开一层类型参数
///
/// `Class<? extends View>` 得到 `View`，`String` 保持不变。
fn map_key_value(
    introspector: &dyn DeclarationIntrospector,
    key: &ClassName,
) -> Result<TypeRef, MalformedKey> {
    let accessors = introspector
        .type_element(key)
        .map(|element| element.methods.as_slice())
        .unwrap_or_default();

    let [accessor] = accessors else {
        return Err(MalformedKey::AccessorCount {
            key: key.clone(),
            found: accessors.len(),
        });
    };

    match accessor.return_type.type_arguments() {
        [] => Ok(accessor.return_type.clone()),
        [argument] => Ok(argument.upper_bound()),
        arguments => Err(MalformedKey::TypeArguments {
            key: key.clone(),
            found: arguments.len(),
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use contributor_abstractions::{
        Annotation, AnnotationValue, CollectingMessager, DeclarationIndex, MethodElement,
        TypeElement,
    };

    fn class(name: &str) -> ClassName {
        ClassName::best_guess(name).unwrap()
    }

    fn ty(name: &str) -> TypeRef {
        TypeRef::best_guess(name).unwrap()
    }

    fn map_key_type(name: &str, value: TypeRef) -> TypeElement {
        TypeElement::annotation_type(class(name))
            .with_annotation(Annotation::marker(class("dagger.MapKey")))
            .with_method(MethodElement::new("value", value))
    }

    fn registry_holder(keys: &[&str]) -> TypeElement {
        TypeElement::class(class("com.app.Keys")).with_annotation(
            Annotation::marker(class("com.ivianuu.contributor.InjectorKeyRegistry")).with_value(
                KEYS_ARGUMENT,
                AnnotationValue::TypeList(keys.iter().map(|key| ty(key)).collect()),
            ),
        )
    }

    fn class_of_subtype(bound: &str) -> TypeRef {
        TypeRef::parameterized(
            ClassName::java_lang_class(),
            vec![TypeRef::subtype_of(ty(bound))],
        )
    }

    #[test]
    fn test_collects_string_and_class_keys() {
        let index = DeclarationIndex::new()
            .with_type(map_key_type("com.app.Injectable", ty("java.lang.String")))
            .with_type(map_key_type("com.app.ViewKey", class_of_subtype("android.view.View")))
            .with_type(registry_holder(&["com.app.Injectable", "com.app.ViewKey"]));
        let config = ProcessorConfig::default();
        let mut messager = CollectingMessager::new();

        let registry = InjectorKeyCollector::new(&config).collect(&index, &mut messager);

        let keys: Vec<_> = registry.keys().cloned().collect();
        assert_eq!(
            keys,
            vec![
                InjectorKey::new(ty("java.lang.String"), class("com.app.Injectable"), true),
                InjectorKey::new(ty("android.view.View"), class("com.app.ViewKey"), false),
            ]
        );
        assert!(!messager.has_errors());
    }

    #[test]
    fn test_missing_map_key_marker_is_reported_and_skipped() {
        let index = DeclarationIndex::new()
            .with_type(TypeElement::annotation_type(class("com.app.PlainKey")))
            .with_type(map_key_type("com.app.Injectable", ty("java.lang.String")))
            .with_type(registry_holder(&["com.app.PlainKey", "com.app.Injectable"]));
        let config = ProcessorConfig::default();
        let mut messager = CollectingMessager::new();

        let registry = InjectorKeyCollector::new(&config).collect(&index, &mut messager);

        assert_eq!(registry.len(), 1);
        assert_eq!(messager.error_count(), 1);
        assert_eq!(
            messager.diagnostics()[0].message,
            "map key annotation must be present for com.app.PlainKey"
        );
    }

    #[test]
    fn test_malformed_accessors_are_reported() {
        let two_arguments = TypeRef::parameterized(
            ClassName::java_util_map(),
            vec![ty("java.lang.String"), ty("java.lang.String")],
        );
        let index = DeclarationIndex::new()
            .with_type(map_key_type("com.app.PairKey", two_arguments))
            .with_type(
                TypeElement::annotation_type(class("com.app.EmptyKey"))
                    .with_annotation(Annotation::marker(class("dagger.MapKey"))),
            )
            .with_type(registry_holder(&["com.app.PairKey", "com.app.EmptyKey"]));
        let config = ProcessorConfig::default();
        let mut messager = CollectingMessager::new();

        let registry = InjectorKeyCollector::new(&config).collect(&index, &mut messager);

        assert!(registry.is_empty());
        let messages: Vec<_> = messager.errors().map(|d| d.message.as_str()).collect();
        assert_eq!(
            messages,
            vec![
                "map key com.app.PairKey value type must have at most one type argument, found 2",
                "map key com.app.EmptyKey must declare exactly one value method, found 0",
            ]
        );
    }

    #[test]
    fn test_unbounded_wildcard_resolves_to_object() {
        let index = DeclarationIndex::new()
            .with_type(map_key_type(
                "com.app.AnyKey",
                TypeRef::parameterized(ClassName::java_lang_class(), vec![TypeRef::wildcard()]),
            ))
            .with_type(registry_holder(&["com.app.AnyKey"]));
        let config = ProcessorConfig::default();
        let mut messager = CollectingMessager::new();

        let registry = InjectorKeyCollector::new(&config).collect(&index, &mut messager);

        let key = registry.keys().next().unwrap();
        assert_eq!(key.map_key_value_type, TypeRef::object());
        assert!(!key.use_string_keys);
    }

    #[test]
    fn test_registry_is_insertion_ordered_and_deduplicated() {
        let first = InjectorKey::new(ty("java.lang.String"), class("com.app.B"), true);
        let second = InjectorKey::new(ty("java.lang.String"), class("com.app.A"), true);

        let mut registry = InjectorKeyRegistry::new();
        assert!(registry.insert(first.clone()));
        assert!(registry.insert(second.clone()));
        assert!(!registry.insert(first.clone()));

        assert_eq!(registry.len(), 2);
        assert_eq!(registry.keys().next(), Some(&first));
        assert!(registry.contains(&second));
        assert_eq!(
            registry.first_match(|key| key.base_injectable_type.simple_name() == "A"),
            Some(&second)
        );
    }

    #[test]
    fn test_collect_into_reports_new_keys_only() {
        let index = DeclarationIndex::new()
            .with_type(map_key_type("com.app.Injectable", ty("java.lang.String")))
            .with_type(registry_holder(&["com.app.Injectable"]));
        let config = ProcessorConfig::default();
        let collector = InjectorKeyCollector::new(&config);
        let mut messager = CollectingMessager::new();
        let mut registry = InjectorKeyRegistry::new();

        assert_eq!(collector.collect_into(&index, &mut messager, &mut registry), 1);
        assert_eq!(collector.collect_into(&index, &mut messager, &mut registry), 0);
        assert_eq!(registry.len(), 1);
    }
}
