//! KPL Diagnostics
//!
//! 统一的诊断系统，为 KPL 编译器提供清晰的错误报告。
//!
//! # 核心类型
//!
//! - [`Diagnostic`] - 诊断信息主体
//! - [`DiagnosticLevel`] - 诊断级别（Error/Warning）
//! - [`DiagnosticSink`] - 诊断收集器
//! - [`Emitter`] - 诊断输出器
//! - [`Position`] - 源码位置信息 (行, 列)
//!
//! # 示例
//!
//! ```rust
//! use kpl_diagnostics::{Diagnostic, DiagnosticSink, Emitter, Position};
//!
//! let mut sink = DiagnosticSink::new();
//!
//! sink.add(
//!     Diagnostic::error("type inconsistency")
//!         .at(Position::new(3, 10))
//!         .with_note("expected integer, found char")
//! );
//!
//! if sink.has_errors() {
//!     let emitter = Emitter::without_colors();
//!     emitter.emit_all(sink.diagnostics());
//! }
//! ```

pub mod diagnostic;
pub mod emitter;
pub mod level;
pub mod position;
pub mod sink;

// 重新导出核心类型
pub use diagnostic::{Diagnostic, Suggestion};
pub use emitter::Emitter;
pub use level::DiagnosticLevel;
pub use position::Position;
pub use sink::DiagnosticSink;
