//! Emitter - 诊断输出器
//!
//! 负责将诊断信息格式化输出。带源码时使用 ariadne 渲染源码片段。

use crate::diagnostic::Diagnostic;
use crate::level::DiagnosticLevel;
use ariadne::{Config, Label, Report, ReportKind, Source};
use colored::*;

/// 诊断输出器
pub struct Emitter {
    /// 是否使用颜色
    use_colors: bool,
}

impl Default for Emitter {
    fn default() -> Self {
        Self::new()
    }
}

impl Emitter {
    /// 创建新的输出器
    pub fn new() -> Self {
        Self { use_colors: true }
    }

    /// 创建无颜色的输出器
    pub fn without_colors() -> Self {
        Self { use_colors: false }
    }

    /// 输出单个诊断
    pub fn emit(&self, diagnostic: &Diagnostic) {
        if self.use_colors {
            self.emit_colored(diagnostic);
        } else {
            print!("{}", self.render_plain(diagnostic));
        }
    }

    /// 输出所有诊断
    pub fn emit_all(&self, diagnostics: &[Diagnostic]) {
        for diagnostic in diagnostics {
            self.emit(diagnostic);
            println!(); // 诊断之间空行
        }
    }

    /// 带源码片段输出诊断
    pub fn emit_with_source(&self, diagnostic: &Diagnostic, source: &str) {
        eprint!("{}", self.render_with_source(diagnostic, source));
    }

    /// 使用 ariadne 把诊断渲染为带源码片段的文本
    ///
    /// 没有位置信息的诊断退化为纯文本格式。
    pub fn render_with_source(&self, diagnostic: &Diagnostic, source: &str) -> String {
        let Some(position) = diagnostic.position else {
            return self.render_plain(diagnostic);
        };

        let offset = position.offset_in(source);
        let start = offset.min(source.len().saturating_sub(1));
        let label_span = start..(start + 1).min(source.len());

        let kind = match diagnostic.level {
            DiagnosticLevel::Error => ReportKind::Error,
            DiagnosticLevel::Warning => ReportKind::Warning,
        };

        let mut report = Report::build(kind, (), start)
            .with_config(Config::default().with_color(self.use_colors))
            .with_message(match diagnostic.location() {
                Some(location) => format!("{} ({})", diagnostic.message, location),
                None => diagnostic.message.clone(),
            })
            .with_label(Label::new(label_span).with_message(&diagnostic.message));

        for note in &diagnostic.notes {
            report = report.with_note(note);
        }
        if let Some(suggestion) = diagnostic.suggestions.first() {
            report = report.with_help(&suggestion.message);
        }

        let mut buffer = Vec::new();
        if report
            .finish()
            .write(Source::from(source), &mut buffer)
            .is_err()
        {
            return self.render_plain(diagnostic);
        }
        String::from_utf8_lossy(&buffer).into_owned()
    }

    /// 输出带颜色的诊断
    fn emit_colored(&self, diagnostic: &Diagnostic) {
        // 级别和消息
        println!(
            "{}: {}",
            diagnostic.level.colored_name(),
            diagnostic.message.bold()
        );

        // 位置信息（如果有）
        if let Some(location) = diagnostic.location() {
            println!("  {} {}", "-->".blue().bold(), location);
        }

        // 注释
        for note in &diagnostic.notes {
            println!(
                "  {} {}",
                "=".blue().bold(),
                format!("note: {}", note).bright_black()
            );
        }

        // 建议
        for suggestion in &diagnostic.suggestions {
            println!(
                "  {} {}",
                "=".green().bold(),
                format!("help: {}", suggestion.message).green()
            );
            if let Some(replacement) = &suggestion.replacement {
                println!("        try: {}", replacement.green().italic());
            }
        }
    }

    /// 渲染纯文本诊断
    fn render_plain(&self, diagnostic: &Diagnostic) -> String {
        let mut out = format!("{}: {}\n", diagnostic.level, diagnostic.message);

        if let Some(location) = diagnostic.location() {
            out.push_str(&format!("  --> {}\n", location));
        }
        for note in &diagnostic.notes {
            out.push_str(&format!("  = note: {}\n", note));
        }
        for suggestion in &diagnostic.suggestions {
            out.push_str(&format!("  = help: {}\n", suggestion.message));
            if let Some(replacement) = &suggestion.replacement {
                out.push_str(&format!("        try: {}\n", replacement));
            }
        }
        out
    }
}
