//! 整个程序的分析测试

use kpl_diagnostics::Position;
use kpl_sema::{analyze, SemanticError};
use kpl_syntax::{LexError, TokenKind};

/// 按行拼接源码，便于在断言中写出准确的行列
fn source(lines: &[&str]) -> String {
    lines.join("\n")
}

fn analyze_err(lines: &[&str]) -> SemanticError {
    match analyze(&source(lines)) {
        Ok(_) => panic!("expected an error for:\n{}", source(lines)),
        Err(err) => err,
    }
}

fn assert_ok(lines: &[&str]) {
    if let Err(err) = analyze(&source(lines)) {
        panic!("unexpected error {:?} for:\n{}", err, source(lines));
    }
}

#[test]
fn test_well_formed_program() {
    assert_ok(&[
        "program demo;",
        "const max = 10;",
        "      neg = -max;",
        "      letter = 'k';",
        "type vector = array[10] of integer;",
        "     grid = array[3] of vector;",
        "var v : vector;",
        "    g : grid;",
        "    i : integer;",
        "    ch : char;",
        "function fact(n : integer) : integer;",
        "begin",
        "  if n <= 1 then fact := 1",
        "  else fact := n * fact(n - 1)",
        "end;",
        "procedure swap(var a : integer; var b : integer);",
        "var t : integer;",
        "begin",
        "  t := a;",
        "  a, b := b, t",
        "end;",
        "begin",
        "  ch := READC;",
        "  i := READI;",
        "  for i := 1 to max do",
        "    v[i] := fact(i);",
        "  g[1][2] := v[3] + neg;",
        "  call swap(v[1], i);",
        "  while i > 0 do",
        "  begin",
        "    call WRITEI(i);",
        "    i := i - 1",
        "  end;",
        "  i := sum v[1], g[0][0], max;",
        "  call WRITEC(letter);",
        "  call WRITELN",
        "end.",
    ]);
}

#[test]
fn test_keywords_ignore_case() {
    assert_ok(&["PROGRAM p; VAR x : INTEGER; Begin x := 1 End."]);
}

#[test]
fn test_identifiers_are_case_sensitive() {
    let err = analyze_err(&["program p; var X : integer; begin x := 1 end."]);
    assert!(matches!(err, SemanticError::UndeclaredIdent { ref name, .. } if name == "x"));
}

#[test]
fn test_inner_variable_shadows_outer_constant() {
    assert_ok(&[
        "program p;",
        "const x = 1;",
        "function f : integer;",
        "var x : char;",
        "begin",
        "  x := 'a';",
        "  f := 1",
        "end;",
        "begin",
        "end.",
    ]);

    // 内层的 x 是 char 变量，赋整数说明名称确实解析到了内层
    let err = analyze_err(&[
        "program p;",
        "const x = 1;",
        "procedure q;",
        "var x : char;",
        "begin",
        "  x := 2",
        "end;",
        "begin",
        "end.",
    ]);
    assert_eq!(
        err,
        SemanticError::TypeInconsistency {
            expected: "char".into(),
            found: "integer".into(),
            pos: Position::new(6, 8),
        }
    );
}

#[test]
fn test_duplicate_in_same_scope() {
    let err = analyze_err(&["program p;", "var a : integer;", "    a : char;", "begin end."]);
    assert_eq!(
        err,
        SemanticError::DuplicateIdent {
            name: "a".into(),
            pos: Position::new(3, 5),
        }
    );
}

#[test]
fn test_parameter_name_clashes_with_local() {
    let err = analyze_err(&[
        "program p;",
        "procedure q(n : integer);",
        "var n : char;",
        "begin end;",
        "begin end.",
    ]);
    assert!(matches!(err, SemanticError::DuplicateIdent { .. }));
}

#[test]
fn test_assignment_arity() {
    let too_few = analyze_err(&[
        "program p;",
        "var x : integer; y : integer;",
        "begin",
        "  x, y := 1",
        "end.",
    ]);
    assert!(matches!(too_few, SemanticError::TooFewExpressions { .. }));

    let too_many = analyze_err(&[
        "program p;",
        "var x : integer;",
        "begin",
        "  x := 1, 2",
        "end.",
    ]);
    assert!(matches!(too_many, SemanticError::TooManyExpressions { .. }));
}

#[test]
fn test_reference_argument_must_be_identifier() {
    let program = |call: &'static str| {
        vec![
            "program p;",
            "var x : integer;",
            "procedure q(var i : integer);",
            "begin",
            "end;",
            "begin",
            call,
            "end.",
        ]
    };

    let err = analyze_err(&program("  call q(1 + 2)"));
    assert!(matches!(
        err,
        SemanticError::TypeInconsistency { pos, .. } if pos == Position::new(7, 9)
    ));

    assert_ok(&program("  call q(x)"));
}

#[test]
fn test_reference_argument_rejects_constant() {
    let err = analyze_err(&[
        "program p;",
        "const k = 3;",
        "procedure q(var i : integer);",
        "begin end;",
        "begin",
        "  call q(k)",
        "end.",
    ]);
    assert!(matches!(err, SemanticError::ConstantAssign { ref name, .. } if name == "k"));
}

#[test]
fn test_for_bound_must_match_variable_type() {
    let err = analyze_err(&[
        "program p;",
        "var c : char;",
        "begin",
        "  for c := 1 to 10 do",
        "end.",
    ]);
    assert_eq!(
        err,
        SemanticError::TypeInconsistency {
            expected: "char".into(),
            found: "integer".into(),
            pos: Position::new(4, 12),
        }
    );
}

#[test]
fn test_for_variable_cannot_be_parameter() {
    let err = analyze_err(&[
        "program p;",
        "procedure q(n : integer);",
        "begin",
        "  for n := 1 to 2 do",
        "end;",
        "begin end.",
    ]);
    assert_eq!(
        err,
        SemanticError::InvalidVariable {
            pos: Position::new(4, 7)
        }
    );
}

#[test]
fn test_undeclared_identifier_position() {
    let err = analyze_err(&[
        "program p;",
        "var x : integer;",
        "begin",
        "  x := y",
        "end.",
    ]);
    assert_eq!(
        err,
        SemanticError::UndeclaredIdent {
            name: "y".into(),
            pos: Position::new(4, 8),
        }
    );
}

#[test]
fn test_array_indexing() {
    let program = |stmt: &'static str| {
        vec![
            "program p;",
            "var a : array[5] of integer;",
            "    n : integer;",
            "begin",
            stmt,
            "end.",
        ]
    };

    assert_ok(&program("  n := a[2]"));

    // 第二个 `[` 作用在整数上
    let err = analyze_err(&program("  n := a[2][0]"));
    assert_eq!(
        err,
        SemanticError::TypeInconsistency {
            expected: "an array".into(),
            found: "integer".into(),
            pos: Position::new(5, 12),
        }
    );

    // 下标必须是整数
    let err = analyze_err(&program("  n := a['x']"));
    assert!(matches!(err, SemanticError::TypeInconsistency { .. }));
}

#[test]
fn test_whole_array_is_not_a_value() {
    let err = analyze_err(&[
        "program p;",
        "var a : array[5] of integer;",
        "    b : array[5] of integer;",
        "begin",
        "  a := b",
        "end.",
    ]);
    assert!(matches!(err, SemanticError::TypeInconsistency { .. }));
}

#[test]
fn test_constant_assignment() {
    let err = analyze_err(&["program p;", "const k = 1;", "begin", "  k := 2", "end."]);
    assert_eq!(
        err,
        SemanticError::ConstantAssign {
            name: "k".into(),
            pos: Position::new(4, 3),
        }
    );
}

#[test]
fn test_function_name_assignable_only_inside_body() {
    let err = analyze_err(&[
        "program p;",
        "function f : integer;",
        "begin",
        "  f := 1",
        "end;",
        "begin",
        "  f := 2",
        "end.",
    ]);
    assert_eq!(
        err,
        SemanticError::InvalidLValue {
            pos: Position::new(7, 3)
        }
    );
}

#[test]
fn test_builtin_argument_counts() {
    assert_ok(&["program p; begin call WRITELN; call WRITELN() end."]);

    let err = analyze_err(&["program p; begin call WRITEI(1, 2) end."]);
    assert!(matches!(
        err,
        SemanticError::ParameterArgumentMismatch { ref name, .. } if name == "WRITEI"
    ));

    let err = analyze_err(&["program p; begin call WRITEI end."]);
    assert!(matches!(err, SemanticError::ParameterArgumentMismatch { .. }));

    let err = analyze_err(&["program p; begin call WRITEC(65) end."]);
    assert!(matches!(err, SemanticError::TypeInconsistency { .. }));
}

#[test]
fn test_call_requires_procedure() {
    let err = analyze_err(&["program p; begin call READI end."]);
    assert!(matches!(err, SemanticError::InvalidProcedure { .. }));

    let err = analyze_err(&["program p; begin call nothing end."]);
    assert!(matches!(err, SemanticError::UndeclaredProcedure { .. }));
}

#[test]
fn test_invalid_arguments_follow() {
    let err = analyze_err(&["program p; var i : integer; begin i := READI 1 end."]);
    assert!(matches!(err, SemanticError::InvalidArguments { .. }));
}

#[test]
fn test_constant_expressions() {
    let analysis = analyze(&source(&[
        "program p;",
        "const a = -5;",
        "      b = -a;",
        "      c = +b;",
        "begin end.",
    ]))
    .unwrap();
    assert_eq!(
        analysis.table.dump(),
        "Program p\n    Const a = -5\n    Const b = 5\n    Const c = 5\n"
    );

    let err = analyze_err(&["program p;", "const c = 'a';", "      d = -c;", "begin end."]);
    assert_eq!(
        err,
        SemanticError::UndeclaredIntConstant {
            name: "c".into(),
            pos: Position::new(3, 12),
        }
    );

    let err = analyze_err(&["program p; const d = e; begin end."]);
    assert!(matches!(err, SemanticError::UndeclaredConstant { .. }));
}

#[test]
fn test_type_errors_in_declarations() {
    let err = analyze_err(&["program p; type t = u; begin end."]);
    assert!(matches!(err, SemanticError::UndeclaredType { .. }));

    let err = analyze_err(&["program p; var x : 5; begin end."]);
    assert!(matches!(err, SemanticError::InvalidType { .. }));

    let err = analyze_err(&[
        "program p;",
        "function f : array[2] of integer;",
        "begin end;",
        "begin end.",
    ]);
    assert_eq!(
        err,
        SemanticError::InvalidBasicType {
            pos: Position::new(2, 14)
        }
    );

    let err = analyze_err(&["program p; procedure q(1); begin end; begin end."]);
    assert!(matches!(err, SemanticError::InvalidParameter { .. }));
}

#[test]
fn test_arithmetic_requires_integers() {
    let program = |stmt: &'static str| {
        vec!["program p;", "var ch : char;", "begin", stmt, "end."]
    };

    assert_ok(&program("  ch := ch"));
    assert!(matches!(
        analyze_err(&program("  ch := ch + ch")),
        SemanticError::TypeInconsistency { .. }
    ));
    assert!(matches!(
        analyze_err(&program("  ch := -ch")),
        SemanticError::TypeInconsistency { .. }
    ));
    assert!(matches!(
        analyze_err(&program("  ch := 2 * ch")),
        SemanticError::TypeInconsistency { .. }
    ));
}

#[test]
fn test_sum_expression() {
    let program = |stmt: &'static str| {
        vec!["program p;", "var n : integer;", "begin", stmt, "end."]
    };

    assert_ok(&program("  n := sum 1, 2, n;"));
    assert!(matches!(
        analyze_err(&program("  n := sum 1, 'a';")),
        SemanticError::TypeInconsistency { .. }
    ));
}

#[test]
fn test_conditions() {
    let program = |stmt: &'static str| {
        vec!["program p;", "var i : integer;", "begin", stmt, "end."]
    };

    assert_ok(&program("  if i <> 0 then i := 1 else i := 2"));
    assert!(matches!(
        analyze_err(&program("  if i = 'a' then i := 1")),
        SemanticError::TypeInconsistency { .. }
    ));
    assert_eq!(
        analyze_err(&program("  while i do i := 1")),
        SemanticError::InvalidComparator {
            pos: Position::new(4, 11)
        }
    );
}

#[test]
fn test_invalid_statement_and_factor() {
    let err = analyze_err(&["program p; begin 5 end."]);
    assert_eq!(
        err,
        SemanticError::InvalidStatement {
            pos: Position::new(1, 18)
        }
    );

    let err = analyze_err(&["program p; var i : integer; begin i := WRITELN end."]);
    assert!(matches!(err, SemanticError::InvalidFactor { .. }));
}

#[test]
fn test_term_follow_set() {
    // 乘法链之后只能是 + - 或表达式的 FOLLOW 集
    let err = analyze_err(&["program p;", "var i : integer;", "begin", "  i := 1 2", "end."]);
    assert_eq!(
        err,
        SemanticError::InvalidTerm {
            pos: Position::new(4, 10)
        }
    );

    let err = analyze_err(&["program p;", "var i : integer;", "begin", "  i := 2 * 3 i", "end."]);
    assert_eq!(
        err,
        SemanticError::InvalidTerm {
            pos: Position::new(4, 14)
        }
    );
}

#[test]
fn test_scalar_lvalue_takes_no_index() {
    let err = analyze_err(&["program p;", "var i : integer;", "begin", "  i[1] := 0", "end."]);
    assert_eq!(
        err,
        SemanticError::MissingToken {
            expected: TokenKind::Assign,
            found: TokenKind::LSel,
            pos: Position::new(4, 4),
        }
    );
}

#[test]
fn test_missing_token() {
    let err = analyze_err(&["program p begin end."]);
    assert_eq!(
        err,
        SemanticError::MissingToken {
            expected: TokenKind::Semicolon,
            found: TokenKind::Begin,
            pos: Position::new(1, 11),
        }
    );
}

#[test]
fn test_lexical_error_aborts() {
    let err = analyze_err(&["program p; begin # end."]);
    assert!(matches!(
        err,
        SemanticError::Lexical(LexError::InvalidSymbol { symbol: '#', .. })
    ));
}

#[test]
fn test_trailing_input_is_reported() {
    let analysis = analyze("program p; begin end. x").unwrap();
    assert_eq!(analysis.trailing, Some(Position::new(1, 23)));
}

#[test]
fn test_symbol_dump_after_analysis() {
    let analysis = analyze(&source(&[
        "program demo;",
        "const max = 10;",
        "var a : array[3] of char;",
        "function f(var n : integer) : integer;",
        "begin",
        "  f := n",
        "end;",
        "begin",
        "end.",
    ]))
    .unwrap();

    assert_eq!(
        analysis.table.dump(),
        "Program demo\n\
         \x20   Const max = 10\n\
         \x20   Var a : array[3] of char\n\
         \x20   Function f : integer\n\
         \x20       Param VAR n : integer\n"
    );
}
