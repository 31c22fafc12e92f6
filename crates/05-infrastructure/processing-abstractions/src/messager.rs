//! 诊断信息报告

use crate::element::ElementRef;
use std::fmt;
use tracing::{error, info, warn};

/// 诊断级别
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum DiagnosticKind {
    Note,
    Warning,
    Error,
}

impl fmt::Display for DiagnosticKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Self::Note => "note",
            Self::Warning => "warning",
            Self::Error => "error",
        };
        f.write_str(label)
    }
}

/// 单条诊断信息
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Diagnostic {
    /// 级别
    pub kind: DiagnosticKind,
    /// 消息
    pub message: String,
    /// 关联的元素
    pub element: Option<ElementRef>,
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.element {
            Some(element) => write!(f, "{}: {} ({})", self.kind, self.message, element),
            None => write!(f, "{}: {}", self.kind, self.message),
        }
    }
}

/// 诊断信息报告 trait
///
/// 处理流程中的单项失败都以诊断信息的形式报告给宿主，是否中断构建由宿主决定。
pub trait Messager {
    /// 报告诊断信息
    fn print_message(&mut self, kind: DiagnosticKind, message: &str, element: Option<&ElementRef>);

    /// 报告错误
    fn error(&mut self, message: &str, element: Option<&ElementRef>) {
        self.print_message(DiagnosticKind::Error, message, element);
    }

    /// 报告警告
    fn warning(&mut self, message: &str, element: Option<&ElementRef>) {
        self.print_message(DiagnosticKind::Warning, message, element);
    }
}

/// 收集诊断信息的报告器
///
/// 每条诊断同时写入日志。
#[derive(Debug, Default)]
pub struct CollectingMessager {
    diagnostics: Vec<Diagnostic>,
}

impl CollectingMessager {
    /// 创建新的报告器
    pub fn new() -> Self {
        Self::default()
    }

    /// 全部诊断信息
    pub fn diagnostics(&self) -> &[Diagnostic] {
        &self.diagnostics
    }

    /// 错误级别的诊断信息
    pub fn errors(&self) -> impl Iterator<Item = &Diagnostic> {
        self.diagnostics
            .iter()
            .filter(|diagnostic| diagnostic.kind == DiagnosticKind::Error)
    }

    /// 错误数量
    pub fn error_count(&self) -> usize {
        self.errors().count()
    }

    /// 是否报告过错误
    pub fn has_errors(&self) -> bool {
        self.errors().next().is_some()
    }

    /// 取出已收集的诊断信息
    pub fn take(&mut self) -> Vec<Diagnostic> {
        std::mem::take(&mut self.diagnostics)
    }
}

impl Messager for CollectingMessager {
    fn print_message(&mut self, kind: DiagnosticKind, message: &str, element: Option<&ElementRef>) {
        let diagnostic = Diagnostic {
            kind,
            message: message.to_string(),
            element: element.cloned(),
        };

        match kind {
            DiagnosticKind::Error => error!("{}", diagnostic),
            DiagnosticKind::Warning => warn!("{}", diagnostic),
            DiagnosticKind::Note => info!("{}", diagnostic),
        }

        self.diagnostics.push(diagnostic);
    }
}
