//! 文件编译入口测试

use kpl_diagnostics::{DiagnosticSink, Emitter};
use kpl_driver::{compile_file, CompileError};
use std::fs;
use std::path::PathBuf;
use tempfile::TempDir;

/// 在临时目录写入源文件，返回其路径
fn write_source(dir: &TempDir, name: &str, text: &str) -> PathBuf {
    let path = dir.path().join(name);
    fs::write(&path, text).expect("write source");
    path
}

#[test]
fn test_compile_file_success() {
    let dir = TempDir::new().expect("temp dir");
    let path = write_source(
        &dir,
        "ok.kpl",
        "program ok;\n\
         var n : integer;\n\
         begin\n\
         n := READI;\n\
         call WRITEI(n * 2);\n\
         call WRITELN\n\
         end.\n",
    );

    let output = compile_file(path.to_str().unwrap()).unwrap();
    assert!(output.warnings.is_empty());
    assert_eq!(
        output.table.dump(),
        "Program ok\n    Var n : integer\n"
    );
}

#[test]
fn test_compile_file_warning_carries_file() {
    let dir = TempDir::new().expect("temp dir");
    let path = write_source(&dir, "trailing.kpl", "program t; begin end.\nextra");
    let path = path.to_str().unwrap();

    let output = compile_file(path).unwrap();
    assert_eq!(output.warnings.len(), 1);
    assert_eq!(
        output.warnings[0].location(),
        Some(format!("{}:2:1", path))
    );
}

#[test]
fn test_compile_file_missing() {
    let dir = TempDir::new().expect("temp dir");
    let path = dir.path().join("none.kpl");
    match compile_file(path.to_str().unwrap()) {
        Err(CompileError::Io(_)) => {}
        other => panic!("Expected Io error, got {:?}", other.map(|_| ())),
    }
}

#[test]
fn test_error_renders_with_source() {
    let dir = TempDir::new().expect("temp dir");
    let text = "program bad;\nbegin\n  x := 1\nend.\n";
    let path = write_source(&dir, "bad.kpl", text);
    let path = path.to_str().unwrap();

    let err = compile_file(path).unwrap_err();
    let mut sink = DiagnosticSink::new();
    err.collect_to_sink(&mut sink, Some(path));
    assert!(sink.has_errors());

    let rendered = Emitter::without_colors().render_with_source(&sink.diagnostics()[0], text);
    assert!(rendered.contains("undeclared identifier 'x'"));
    assert!(rendered.contains("x := 1"));
}

#[test]
fn test_source_files_removed_after_test() {
    let dir = TempDir::new().expect("temp dir");
    let root = dir.path().to_path_buf();
    let path = write_source(&dir, "p.kpl", "program p; begin end.");
    assert!(compile_file(path.to_str().unwrap()).is_ok());

    drop(dir);
    assert!(!root.exists());
}
