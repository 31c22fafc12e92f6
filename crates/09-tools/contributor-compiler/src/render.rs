//! Java 源码渲染
//!
//! 类型引用一律输出限定名称，生成文件不需要 import。

use crate::declaration::{
    AnnotationMember, AnnotationSpec, DeclarationKind, MethodSpec, Modifier, SourceFile, TypeSpec,
};
use contributor_common::TypeRef;
use std::collections::BTreeSet;

const INDENT_WITH: &str = "  ";

#[derive(Debug, Default)]
struct EmittedLine {
    parts: Vec<String>,
    indent: usize,
}

impl EmittedLine {
    fn new(indent: usize) -> Self {
        Self {
            parts: Vec::new(),
            indent,
        }
    }
}

/// 按行缓冲的源码写入器
#[derive(Debug, Default)]
struct SourceWriter {
    lines: Vec<EmittedLine>,
    current: EmittedLine,
    indent: usize,
}

impl SourceWriter {
    fn print(&mut self, part: &str) {
        if !part.is_empty() {
            self.current.parts.push(part.to_string());
        }
    }

    fn println(&mut self, part: &str) {
        self.print(part);
        let finished = std::mem::replace(&mut self.current, EmittedLine::new(self.indent));
        self.lines.push(finished);
    }

    fn blank_line(&mut self) {
        self.println("");
    }

    fn inc_indent(&mut self) {
        self.indent += 1;
        if self.current.parts.is_empty() {
            self.current.indent = self.indent;
        }
    }

    fn dec_indent(&mut self) {
        self.indent = self.indent.saturating_sub(1);
        if self.current.parts.is_empty() {
            self.current.indent = self.indent;
        }
    }

    fn to_source(&self) -> String {
        let mut source = String::new();
        for line in &self.lines {
            if !line.parts.is_empty() {
                source.push_str(&INDENT_WITH.repeat(line.indent));
                source.push_str(&line.parts.concat());
            }
            source.push('\n');
        }
        source
    }
}

impl SourceFile {
    /// 渲染为 Java 源码
    pub fn to_source(&self) -> String {
        let mut writer = SourceWriter::default();

        if let Some(comment) = self.file_comment() {
            for line in comment.lines() {
                writer.println(&format!("// {line}"));
            }
        }
        if !self.package_name().is_empty() {
            writer.println(&format!("package {};", self.package_name()));
            writer.blank_line();
        }

        emit_type(&mut writer, self.type_spec());
        writer.to_source()
    }
}

fn emit_type(writer: &mut SourceWriter, spec: &TypeSpec) {
    for annotation in &spec.annotations {
        writer.println(&annotation_source(annotation));
    }

    writer.print(&modifiers_prefix(&spec.modifiers));
    writer.print(match spec.kind {
        DeclarationKind::Class => "class ",
        DeclarationKind::Interface => "interface ",
    });
    writer.print(&spec.name);

    if let Some(superclass) = &spec.superclass {
        writer.print(&format!(" extends {superclass}"));
    }
    if !spec.superinterfaces.is_empty() {
        let keyword = match spec.kind {
            DeclarationKind::Class => "implements",
            DeclarationKind::Interface => "extends",
        };
        writer.print(&format!(" {keyword} {}", join(&spec.superinterfaces)));
    }
    writer.println(" {");

    writer.inc_indent();
    let mut first = true;
    for method in &spec.methods {
        if !first {
            writer.blank_line();
        }
        first = false;
        emit_method(writer, method, spec);
    }
    for nested in &spec.types {
        if !first {
            writer.blank_line();
        }
        first = false;
        emit_type(writer, nested);
    }
    writer.dec_indent();
    writer.println("}");
}

fn emit_method(writer: &mut SourceWriter, method: &MethodSpec, owner: &TypeSpec) {
    for annotation in &method.annotations {
        writer.println(&annotation_source(annotation));
    }

    writer.print(&modifiers_prefix(&method.modifiers));
    if method.is_constructor {
        writer.print(&owner.name);
    } else {
        match &method.returns {
            Some(return_type) => writer.print(&return_type.to_string()),
            None => writer.print("void"),
        }
        writer.print(" ");
        writer.print(&method.name);
    }

    let parameters = method
        .parameters
        .iter()
        .map(|parameter| format!("{} {}", parameter.parameter_type, parameter.name))
        .collect::<Vec<_>>()
        .join(", ");
    writer.print(&format!("({parameters})"));

    if method.is_abstract() {
        writer.println(";");
    } else {
        writer.println(" {");
        writer.println("}");
    }
}

fn modifiers_prefix(modifiers: &BTreeSet<Modifier>) -> String {
    modifiers
        .iter()
        .map(|modifier| format!("{} ", modifier.keyword()))
        .collect()
}

fn join(types: &[TypeRef]) -> String {
    types
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(", ")
}

fn annotation_source(annotation: &AnnotationSpec) -> String {
    let name = &annotation.annotation_type;
    match annotation.members.as_slice() {
        [] => format!("@{name}"),
        [(member, values)] if member == "value" => format!("@{name}({})", member_values(values)),
        members => {
            let members = members
                .iter()
                .map(|(member, values)| format!("{member} = {}", member_values(values)))
                .collect::<Vec<_>>()
                .join(", ");
            format!("@{name}({members})")
        }
    }
}

fn member_values(values: &[AnnotationMember]) -> String {
    match values {
        [single] => member_source(single),
        values => array_source(values),
    }
}

fn array_source(values: &[AnnotationMember]) -> String {
    let items = values.iter().map(member_source).collect::<Vec<_>>().join(", ");
    format!("{{{items}}}")
}

fn member_source(member: &AnnotationMember) -> String {
    match member {
        AnnotationMember::Class(ty) => match ty.raw_class() {
            Some(raw) => format!("{raw}.class"),
            None => format!("{}.class", ty.upper_bound()),
        },
        AnnotationMember::String(value) => string_literal(value),
        AnnotationMember::Literal(value) => value.clone(),
        AnnotationMember::Array(values) => array_source(values),
    }
}

fn string_literal(value: &str) -> String {
    let mut literal = String::with_capacity(value.len() + 2);
    literal.push('"');
    for ch in value.chars() {
        match ch {
            '"' => literal.push_str("\\\""),
            '\\' => literal.push_str("\\\\"),
            '\n' => literal.push_str("\\n"),
            '\r' => literal.push_str("\\r"),
            '\t' => literal.push_str("\\t"),
            ch => literal.push(ch),
        }
    }
    literal.push('"');
    literal
}
