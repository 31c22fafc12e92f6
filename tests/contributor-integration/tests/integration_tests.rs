//! 贡献生成流程的集成测试
use contributor_abstractions::{
    Annotation, AnnotationValue, CollectingMessager, DeclarationIndex, ElementRef, MethodElement,
    TypeElement,
};
use contributor_common::{
    ClassName, EmitError, EmitResult, KeyStyle, ProcessorConfig, RegistryMode, TypeRef,
};
use contributor_compiler::{
    ContributionResolver, ContributorProcessor, DirectoryFiler, Filer, InjectorKeyCollector,
    MemoryFiler, SourceFile,
};

fn class(name: &str) -> ClassName {
    ClassName::best_guess(name).unwrap()
}

fn ty(name: &str) -> TypeRef {
    TypeRef::best_guess(name).unwrap()
}

fn map_key(name: &str) -> TypeElement {
    TypeElement::annotation_type(class(name))
        .with_annotation(Annotation::marker(class("dagger.MapKey")))
        .with_method(MethodElement::new("value", ty("java.lang.String")))
}

fn key_registry(keys: &[&str]) -> TypeElement {
    TypeElement::class(class("com.app.InjectorKeys")).with_annotation(
        Annotation::marker(class("com.ivianuu.contributor.InjectorKeyRegistry")).with_value(
            "keys",
            AnnotationValue::TypeList(keys.iter().map(|key| ty(key)).collect()),
        ),
    )
}

fn contribution(name: &str, produced: &str) -> MethodElement {
    MethodElement::new(name, ty(produced))
        .with_annotation(Annotation::marker(class("com.ivianuu.contributor.ContributeInjector")))
}

fn feature_module(methods: Vec<MethodElement>) -> TypeElement {
    methods.into_iter().fold(
        TypeElement::class(class("com.app.FeatureModule"))
            .with_annotation(Annotation::marker(class("dagger.Module"))),
        TypeElement::with_method,
    )
}

/// 注入键 `com.app.Injectable`，`Widget` 可以赋值给它，`Gadget` 不可以
fn base_index() -> DeclarationIndex {
    DeclarationIndex::new()
        .with_type(map_key("com.app.Injectable"))
        .with_type(key_registry(&["com.app.Injectable"]))
        .with_type(TypeElement::class(class("com.app.Widget")).with_supertype(ty("com.app.Injectable")))
        .with_type(TypeElement::class(class("com.app.Gadget")))
        .with_type(
            TypeElement::annotation_type(class("com.app.ActivityScope"))
                .with_annotation(Annotation::marker(class("javax.inject.Scope"))),
        )
}

fn widget_contribution() -> MethodElement {
    MethodElement::new("bindWidget", ty("com.app.Widget"))
        .with_annotation(
            Annotation::marker(class("com.ivianuu.contributor.ContributeInjector")).with_value(
                "modules",
                AnnotationValue::TypeList(vec![ty("com.app.MyModule1"), ty("com.app.MyModule2")]),
            ),
        )
        .with_annotation(Annotation::marker(class("com.app.ActivityScope")))
}

fn quiet_config() -> ProcessorConfig {
    ProcessorConfig {
        file_comment: None,
        ..ProcessorConfig::default()
    }
}

fn run_round(index: &DeclarationIndex, config: ProcessorConfig) -> (MemoryFiler, CollectingMessager) {
    let mut processor = ContributorProcessor::new(config);
    let mut filer = MemoryFiler::new();
    let mut messager = CollectingMessager::new();
    processor.process_round(index, &mut filer, &mut messager);
    (filer, messager)
}

#[test]
fn test_feature_module_example() {
    let index = base_index().with_type(feature_module(vec![widget_contribution()]));
    let mut processor = ContributorProcessor::new(quiet_config());
    let mut filer = MemoryFiler::new();
    let mut messager = CollectingMessager::new();

    let outcome = processor.process_round(&index, &mut filer, &mut messager);

    assert!(!messager.has_errors());
    assert!(outcome.claimed.is_empty());
    assert_eq!(outcome.keys, 1);
    assert_eq!(
        outcome.generated,
        vec![
            class("com.app.FeatureModule_BindWidget"),
            class("com.app.FeatureModule_Contributions"),
        ]
    );
}

#[test]
fn test_generated_module_source() {
    let index = base_index().with_type(feature_module(vec![widget_contribution()]));

    let (filer, messager) = run_round(&index, quiet_config());

    assert!(!messager.has_errors());
    let source = filer.get(&class("com.app.FeatureModule_BindWidget")).unwrap();
    assert!(source.starts_with("package com.app;\n"));
    assert!(source.contains(
        "@dagger.Module(subcomponents = com.app.FeatureModule_BindWidget.WidgetSubcomponent.class)"
    ));
    assert!(source.contains("@dagger.android.AndroidInjectionKey(\"com.app.Widget\")"));
    assert!(source.contains(
        "@dagger.Subcomponent(modules = {com.app.MyModule1.class, com.app.MyModule2.class})"
    ));
    assert!(source.contains("@com.app.ActivityScope\n  public interface WidgetSubcomponent"));
    assert!(source.contains(
        "public abstract static class Builder extends dagger.android.AndroidInjector.Builder<com.app.Widget>"
    ));

    let aggregate = filer.get(&class("com.app.FeatureModule_Contributions")).unwrap();
    assert!(aggregate.contains("@dagger.Module(includes = com.app.FeatureModule_BindWidget.class)"));
}

#[test]
fn test_class_key_style() {
    let index = base_index().with_type(feature_module(vec![contribution("bindWidget", "com.app.Widget")]));
    let config = ProcessorConfig {
        key_style: KeyStyle::Class,
        ..quiet_config()
    };

    let (filer, _) = run_round(&index, config);

    let source = filer.get(&class("com.app.FeatureModule_BindWidget")).unwrap();
    assert!(source.contains("@dagger.multibindings.ClassKey(com.app.Widget.class)"));
    assert!(!source.contains("AndroidInjectionKey"));
}

#[test]
fn test_generation_is_deterministic() {
    let index = base_index().with_type(feature_module(vec![
        contribution("bindWidget", "com.app.Widget"),
        contribution("bindOtherWidget", "com.app.Widget"),
    ]));

    let (first, _) = run_round(&index, ProcessorConfig::default());
    let (second, _) = run_round(&index, ProcessorConfig::default());

    let first_names: Vec<_> = first.names().cloned().collect();
    let second_names: Vec<_> = second.names().cloned().collect();
    assert_eq!(first_names, second_names);
    for name in &first_names {
        assert_eq!(first.get(name), second.get(name));
    }
}

#[test]
fn test_first_registered_key_wins() {
    let index = DeclarationIndex::new()
        .with_type(map_key("com.app.Injectable"))
        .with_type(map_key("com.app.Component"))
        .with_type(
            TypeElement::class(class("com.app.Widget"))
                .with_supertype(ty("com.app.Injectable"))
                .with_supertype(ty("com.app.Component")),
        )
        .with_type(feature_module(vec![contribution("bindWidget", "com.app.Widget")]));
    let config = ProcessorConfig::default();
    let element = ElementRef::method(class("com.app.FeatureModule"), "bindWidget");

    for (keys, expected) in [
        (["com.app.Component", "com.app.Injectable"], "com.app.Component"),
        (["com.app.Injectable", "com.app.Component"], "com.app.Injectable"),
    ] {
        let index = index.clone().with_type(key_registry(&keys));
        let mut messager = CollectingMessager::new();
        let registry = InjectorKeyCollector::new(&config).collect(&index, &mut messager);

        let descriptor = ContributionResolver::new(&registry, &config)
            .resolve(&index, &mut messager, &element)
            .unwrap();

        assert_eq!(descriptor.base_injectable_type(), Some(&class(expected)));
        assert_eq!(
            descriptor.map_key_value_type(),
            Some(&TypeRef::class(ClassName::string()))
        );
    }
}

#[test]
fn test_unmatched_contribution_is_isolated() {
    let index = base_index().with_type(feature_module(vec![
        contribution("bindGadget", "com.app.Gadget"),
        contribution("bindWidget", "com.app.Widget"),
    ]));
    let mut processor = ContributorProcessor::new(ProcessorConfig::default());
    let mut filer = MemoryFiler::new();
    let mut messager = CollectingMessager::new();

    let outcome = processor.process_round(&index, &mut filer, &mut messager);

    assert_eq!(outcome.dropped, 1);
    assert_eq!(messager.error_count(), 1);
    assert_eq!(
        messager.diagnostics()[0].message,
        "no matching binding key found for com.app.FeatureModule.bindGadget()"
    );
    assert!(filer.contains(&class("com.app.FeatureModule_BindWidget")));
    assert!(!filer.contains(&class("com.app.FeatureModule_BindGadget")));
    assert!(filer.contains(&class("com.app.FeatureModule_Contributions")));
    assert_eq!(filer.len(), 2);
}

#[test]
fn test_contribution_outside_module_is_rejected() {
    let container = TypeElement::class(class("com.app.FeatureModule"))
        .with_method(contribution("bindWidget", "com.app.Widget"));
    let index = base_index().with_type(container);

    let (filer, messager) = run_round(&index, ProcessorConfig::default());

    assert!(filer.is_empty());
    assert_eq!(messager.error_count(), 1);
    assert_eq!(
        messager.diagnostics()[0].message,
        "contribution marker must be in a module-marked container"
    );
}

#[test]
fn test_aggregate_only_when_contributions_resolve() {
    let (filer, messager) = run_round(&base_index(), ProcessorConfig::default());
    assert!(filer.is_empty());
    assert!(!messager.has_errors());

    let index = base_index().with_type(feature_module(vec![
        contribution("bindWidget", "com.app.Widget"),
        contribution("bindSecondWidget", "com.app.Widget"),
    ]));
    let (filer, _) = run_round(&index, ProcessorConfig::default());

    let aggregates: Vec<_> = filer
        .names()
        .filter(|name| name.simple_name().ends_with("_Contributions"))
        .collect();
    assert_eq!(aggregates, vec![&class("com.app.FeatureModule_Contributions")]);
    assert_eq!(filer.len(), 3);
}

#[test]
fn test_missing_map_key_marker() {
    let index = base_index()
        .with_type(TypeElement::annotation_type(class("com.app.PlainKey")))
        .with_type(TypeElement::class(class("com.app.MoreKeys")).with_annotation(
            Annotation::marker(class("com.ivianuu.contributor.InjectorKeyRegistry")).with_value(
                "keys",
                AnnotationValue::Type(ty("com.app.PlainKey")),
            ),
        ))
        .with_type(feature_module(vec![contribution("bindWidget", "com.app.Widget")]));

    let (filer, messager) = run_round(&index, ProcessorConfig::default());

    let messages: Vec<_> = messager.errors().map(|d| d.message.clone()).collect();
    assert_eq!(
        messages,
        vec!["map key annotation must be present for com.app.PlainKey".to_string()]
    );
    assert!(filer.contains(&class("com.app.FeatureModule_BindWidget")));
}

/// 对指定类型写出失败的写出器
struct FailingFiler {
    inner: MemoryFiler,
    failing: ClassName,
}

impl Filer for FailingFiler {
    fn write(&mut self, file: &SourceFile) -> EmitResult<()> {
        if *file.class_name() == self.failing {
            return Err(EmitError::Io {
                path: file.relative_path(),
                source: std::io::Error::new(std::io::ErrorKind::PermissionDenied, "read-only"),
            });
        }
        self.inner.write(file)
    }
}

#[test]
fn test_emission_failure_is_absorbed() {
    let index = base_index().with_type(feature_module(vec![
        contribution("bindWidget", "com.app.Widget"),
        contribution("bindOtherWidget", "com.app.Widget"),
    ]));
    let mut processor = ContributorProcessor::new(ProcessorConfig::default());
    let mut filer = FailingFiler {
        inner: MemoryFiler::new(),
        failing: class("com.app.FeatureModule_BindWidget"),
    };
    let mut messager = CollectingMessager::new();

    let outcome = processor.process_round(&index, &mut filer, &mut messager);

    assert_eq!(outcome.failed, vec![class("com.app.FeatureModule_BindWidget")]);
    assert!(filer.inner.contains(&class("com.app.FeatureModule_BindOtherWidget")));
    assert!(filer.inner.contains(&class("com.app.FeatureModule_Contributions")));
    assert!(messager.diagnostics().is_empty());
}

#[test]
fn test_registry_rebuild_and_merge_modes() {
    let keys_round = base_index();
    let contributions_round = DeclarationIndex::new()
        .with_type(TypeElement::class(class("com.app.Widget")).with_supertype(ty("com.app.Injectable")))
        .with_type(feature_module(vec![contribution("bindWidget", "com.app.Widget")]));

    let mut rebuild = ContributorProcessor::new(ProcessorConfig::default());
    let mut filer = MemoryFiler::new();
    let mut messager = CollectingMessager::new();
    rebuild.process_round(&keys_round, &mut filer, &mut messager);
    let outcome = rebuild.process_round(&contributions_round, &mut filer, &mut messager);
    assert_eq!(outcome.keys, 0);
    assert_eq!(outcome.dropped, 1);
    assert!(messager.has_errors());

    let mut merge = ContributorProcessor::new(ProcessorConfig {
        registry_mode: RegistryMode::Merge,
        ..ProcessorConfig::default()
    });
    let mut filer = MemoryFiler::new();
    let mut messager = CollectingMessager::new();
    merge.process_round(&keys_round, &mut filer, &mut messager);
    let outcome = merge.process_round(&contributions_round, &mut filer, &mut messager);
    assert_eq!(outcome.round, 2);
    assert_eq!(outcome.keys, 1);
    assert_eq!(outcome.dropped, 0);
    assert!(!messager.has_errors());
    assert!(filer.contains(&class("com.app.FeatureModule_BindWidget")));
}

#[test]
fn test_round_from_json_index_to_directory() -> anyhow::Result<()> {
    let json = r#"{
        "types": [
            {
                "name": "com.app.Injectable",
                "kind": "annotation",
                "annotations": [{"type": "dagger.MapKey"}],
                "methods": [{"name": "value", "return_type": {"class": "java.lang.String"}}]
            },
            {
                "name": "com.app.InjectorKeys",
                "annotations": [{
                    "type": "com.ivianuu.contributor.InjectorKeyRegistry",
                    "values": {"keys": [{"class": "com.app.Injectable"}]}
                }]
            },
            {
                "name": "com.app.Widget",
                "supertypes": [{"class": "com.app.Injectable"}]
            },
            {
                "name": "com.app.FeatureModule",
                "annotations": [{"type": "dagger.Module"}],
                "methods": [{
                    "name": "bindWidget",
                    "return_type": {"class": "com.app.Widget"},
                    "annotations": [{"type": "com.ivianuu.contributor.ContributeInjector"}]
                }]
            }
        ]
    }"#;
    let index = DeclarationIndex::from_json(json)?;
    let dir = tempfile::tempdir()?;
    let mut processor = ContributorProcessor::new(ProcessorConfig::default());
    let mut filer = DirectoryFiler::new(dir.path());
    let mut messager = CollectingMessager::new();

    let outcome = processor.process_round(&index, &mut filer, &mut messager);

    assert_eq!(outcome.generated.len(), 2);
    let module = std::fs::read_to_string(dir.path().join("com/app/FeatureModule_BindWidget.java"))?;
    assert!(module.starts_with("// Generated by contributor. Do not edit.\npackage com.app;"));
    assert!(dir.path().join("com/app/FeatureModule_Contributions.java").exists());
    Ok(())
}

#[test]
fn test_unread_annotation_values_do_not_block_the_round() -> anyhow::Result<()> {
    let json = r#"{
        "types": [
            {
                "name": "com.app.Injectable",
                "kind": "annotation",
                "annotations": [{"type": "dagger.MapKey"}],
                "methods": [{"name": "value", "return_type": {"class": "java.lang.String"}}]
            },
            {
                "name": "com.app.InjectorKeys",
                "annotations": [{
                    "type": "com.ivianuu.contributor.InjectorKeyRegistry",
                    "values": {"keys": [{"class": "com.app.Injectable"}]}
                }]
            },
            {
                "name": "com.app.Widget",
                "supertypes": [{"class": "com.app.Injectable"}]
            },
            {
                "name": "com.app.TimedScope",
                "kind": "annotation",
                "annotations": [{"type": "javax.inject.Scope"}]
            },
            {
                "name": "com.app.FeatureModule",
                "annotations": [
                    {"type": "dagger.Module"},
                    {"type": "java.lang.SuppressWarnings", "values": {"value": ["unchecked"]}}
                ],
                "methods": [{
                    "name": "bindWidget",
                    "return_type": {"class": "com.app.Widget"},
                    "annotations": [
                        {"type": "com.ivianuu.contributor.ContributeInjector"},
                        {"type": "com.app.TimedScope", "values": {"seconds": 1.5, "tags": ["a", "b"]}}
                    ]
                }]
            }
        ]
    }"#;
    let index = DeclarationIndex::from_json(json)?;

    let (filer, messager) = run_round(&index, quiet_config());

    assert!(!messager.has_errors());
    let source = filer
        .get(&class("com.app.FeatureModule_BindWidget"))
        .ok_or_else(|| anyhow::anyhow!("missing generated module"))?;
    assert!(source.contains("@com.app.TimedScope(seconds = 1.5, tags = {\"a\", \"b\"})"));
    assert!(filer.contains(&class("com.app.FeatureModule_Contributions")));
    Ok(())
}
