//! 轮次处理器
//!
//! 每一轮依次执行：收集注入键、解析贡献、生成并写出模块、生成汇总模块。
//! 注册表必须在解析任何贡献之前收集完成。

use crate::aggregate::ContributionsModuleGenerator;
use crate::declaration::SourceFile;
use crate::descriptor::ContributionsModuleDescriptor;
use crate::filer::Filer;
use crate::generator::ContributeInjectorGenerator;
use crate::injection_module::InjectionModuleGenerator;
use crate::registry::{InjectorKeyCollector, InjectorKeyRegistry};
use crate::resolver::ContributionResolver;
use contributor_abstractions::{DeclarationIntrospector, ElementRef, Messager};
use contributor_common::{ClassName, ProcessorConfig, RegistryMode};
use tracing::{debug, info, warn};

/// 一轮处理的结果
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RoundOutcome {
    /// 轮次，从 1 开始
    pub round: usize,
    /// 解析贡献时注册表中的注入键数量
    pub keys: usize,
    /// 成功写出的文件
    pub generated: Vec<ClassName>,
    /// 写出失败的文件
    pub failed: Vec<ClassName>,
    /// 解析失败被丢弃的贡献数量
    pub dropped: usize,
    /// 需要延后到下一轮的声明，始终为空
    pub claimed: Vec<ElementRef>,
}

/// 贡献处理器
///
/// 在多轮之间保存配置与注册表；注册表是否跨轮保留由 [`RegistryMode`] 决定。
#[derive(Debug)]
pub struct ContributorProcessor {
    config: ProcessorConfig,
    registry: InjectorKeyRegistry,
    rounds: usize,
    injection_module_written: bool,
}

impl ContributorProcessor {
    pub fn new(config: ProcessorConfig) -> Self {
        Self {
            config,
            registry: InjectorKeyRegistry::new(),
            rounds: 0,
            injection_module_written: false,
        }
    }

    pub fn config(&self) -> &ProcessorConfig {
        &self.config
    }

    /// 最近一轮使用的注册表
    pub fn registry(&self) -> &InjectorKeyRegistry {
        &self.registry
    }

    /// 执行一轮处理
    ///
    /// 单个键或贡献的失败只报告诊断信息，文件写出失败只记录日志，都不会中断本轮。
    pub fn process_round(
        &mut self,
        introspector: &dyn DeclarationIntrospector,
        filer: &mut dyn Filer,
        messager: &mut dyn Messager,
    ) -> RoundOutcome {
        self.rounds += 1;
        info!("开始第 {} 轮处理", self.rounds);

        let collector = InjectorKeyCollector::new(&self.config);
        match self.config.registry_mode {
            RegistryMode::Rebuild => self.registry = collector.collect(introspector, messager),
            RegistryMode::Merge => {
                let added = collector.collect_into(introspector, messager, &mut self.registry);
                debug!("合并注入键 {} 个", added);
            }
        }

        let mut outcome = RoundOutcome {
            round: self.rounds,
            keys: self.registry.len(),
            ..RoundOutcome::default()
        };

        let resolver = ContributionResolver::new(&self.registry, &self.config);
        let mut descriptors = Vec::new();
        for element in introspector.elements_annotated_with(&self.config.markers.contribute_injector) {
            if !element.is_method() {
                debug!("贡献标记不在方法上，忽略: {}", element);
                continue;
            }
            match resolver.resolve(introspector, messager, &element) {
                Some(descriptor) => descriptors.push(descriptor),
                None => outcome.dropped += 1,
            }
        }

        for descriptor in &descriptors {
            let file = ContributeInjectorGenerator::new(descriptor, &self.config).generate();
            write_file(filer, &file, &mut outcome);
        }

        if let Some(aggregate) = ContributionsModuleDescriptor::from_contributions(&descriptors) {
            let file = ContributionsModuleGenerator::new(&aggregate, &self.config).generate();
            write_file(filer, &file, &mut outcome);
        }

        if !self.injection_module_written {
            if let Some(name) = &self.config.injection_module {
                let file = InjectionModuleGenerator::new(name, &self.config).generate();
                write_file(filer, &file, &mut outcome);
                self.injection_module_written = true;
            }
        }

        info!(
            "第 {} 轮处理完成: 注入键 {} 个, 生成文件 {} 个, 丢弃贡献 {} 个",
            outcome.round,
            outcome.keys,
            outcome.generated.len(),
            outcome.dropped
        );
        outcome
    }
}

fn write_file(filer: &mut dyn Filer, file: &SourceFile, outcome: &mut RoundOutcome) {
    match filer.write(file) {
        Ok(()) => {
            debug!("生成 {}", file.class_name());
            outcome.generated.push(file.class_name().clone());
        }
        Err(error) => {
            warn!("生成文件写出失败，已忽略: {}", error);
            outcome.failed.push(file.class_name().clone());
        }
    }
}
