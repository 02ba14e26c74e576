//! Integration tests for the whole front end.
//!
//! These tests run source text through tokenization and parsing, via the
//! public entry points a command line or REPL collaborator would use.

use pcl::{
    ast::ast::Stmt,
    config::{limits::DEFAULT_MAX_DEPTH, FrontendLimits},
    errors::errors::{DiagnosticKind, Severity},
    lexer::{lexer::tokenize, tokens::TokenKind},
    parse_source,
    parser::parser::parse,
    run_frontend,
};

#[test]
fn test_program_with_every_statement_kind() {
    let source = "\
let width = 10;
let height = (width - 2) * 3;
width = width / 2;
-height + !width;
";
    let (program, diagnostics) = parse_source(source, &FrontendLimits::unlimited());

    assert!(diagnostics.is_empty(), "{:?}", diagnostics);
    assert_eq!(
        program.to_string(),
        "let width = 10;\n\
         let height = (* (- width 2) 3);\n\
         width = (/ width 2);\n\
         (+ (- height) (! width));\n"
    );
}

#[test]
fn test_lexical_and_syntax_diagnostics_are_combined() {
    let source = "let a = 1 @ 2;\nlet b = ;\nlet c = 3;";
    let (program, diagnostics) = parse_source(source, &FrontendLimits::unlimited());

    // `@` is skipped by the lexer, which leaves `let a = 1 2;`
    assert_eq!(diagnostics.len(), 3);
    assert_eq!(
        diagnostics[0].kind(),
        &DiagnosticKind::UnexpectedCharacter { character: '@' }
    );
    assert_eq!(diagnostics[0].line(), 1);
    assert_eq!(diagnostics[0].column(), 11);
    assert_eq!(
        diagnostics[1].kind(),
        &DiagnosticKind::UnexpectedToken {
            expected: TokenKind::Semicolon,
            found: TokenKind::Number
        }
    );
    assert_eq!(diagnostics[2].line(), 2);

    assert_eq!(program.len(), 1);
    assert!(matches!(&program.statements[0], Stmt::Declaration(decl) if decl.name == "c"));
}

#[test]
fn test_source_ceiling_stops_before_lexing() {
    let (program, diagnostics) = parse_source("let x = 1;", &FrontendLimits::new(4, 100));

    assert!(program.is_empty());
    assert_eq!(diagnostics.len(), 1);
    assert_eq!(diagnostics[0].severity(), Severity::Fatal);
}

#[test]
fn test_token_ceiling_stops_before_parsing() {
    let (program, diagnostics) = parse_source("1 + 2 + 3;", &FrontendLimits::new(1024, 4));

    assert!(program.is_empty());
    assert_eq!(
        diagnostics.last().map(|d| d.kind().clone()),
        Some(DiagnosticKind::TooManyTokens { count: 7, limit: 4 })
    );
}

#[test]
fn test_tokens_are_reusable_after_parsing() {
    let lexed = tokenize("a = 1;");
    let (first, _) = parse(&lexed.tokens);
    let (second, _) = parse(&lexed.tokens);

    assert_eq!(first, second);
    assert_eq!(lexed.reconstruct(), "a = 1;");
}

#[test]
fn test_independent_runs_on_threads() {
    let handles: Vec<_> = (0..4)
        .map(|i| {
            std::thread::spawn(move || {
                let source = format!("let v{} = {} * 2;", i, i);
                parse_source(&source, &FrontendLimits::unlimited())
            })
        })
        .collect();

    for (i, handle) in handles.into_iter().enumerate() {
        let (program, diagnostics) = handle.join().unwrap();
        assert!(diagnostics.is_empty());
        assert_eq!(program.to_string(), format!("let v{} = (* {} 2);\n", i, i));
    }
}

#[test]
fn test_rendered_diagnostic_for_missing_semicolon() {
    let source = "let a = 1\n";
    let (_, diagnostics) = parse_source(source, &FrontendLimits::unlimited());

    assert_eq!(diagnostics.len(), 1);
    let rendered = diagnostics[0].render(source, "main.pcl");
    assert!(rendered.starts_with("error: expected `;`, found end of input\n"));
    assert!(rendered.contains("main.pcl:2:1"));
}

#[test]
fn test_deep_nesting_is_a_diagnostic() {
    for source in [
        format!("{}1;", "-".repeat(99_990)),
        format!("{}1;", "(".repeat(99_990)),
    ] {
        let (program, diagnostics) = parse_source(&source, &FrontendLimits::unlimited());

        assert!(program.is_empty());
        assert_eq!(diagnostics.len(), 1);
        assert_eq!(
            diagnostics[0].kind(),
            &DiagnosticKind::NestingTooDeep {
                limit: DEFAULT_MAX_DEPTH
            }
        );
    }
}

#[test]
fn test_configured_depth_is_applied() {
    let limits = FrontendLimits::unlimited().with_max_depth(2);

    let (program, diagnostics) = parse_source("-1; --1;", &limits);

    assert_eq!(program.to_string(), "(- 1);\n");
    assert_eq!(
        diagnostics.iter().map(|d| d.kind().clone()).collect::<Vec<_>>(),
        vec![DiagnosticKind::NestingTooDeep { limit: 2 }]
    );
}

#[test]
fn test_run_frontend_keeps_tokens() {
    let output = run_frontend("a = 1;", &FrontendLimits::unlimited());

    assert_eq!(output.tokens.len(), 5);
    assert_eq!(output.tokens[4].kind, TokenKind::EndOfInput);
    assert_eq!(output.program.len(), 1);

    let output = run_frontend("1 + 2 + 3;", &FrontendLimits::new(1024, 4));
    assert!(output.tokens.is_empty());
    assert!(output.program.is_empty());
    assert!(output.diagnostics.last().is_some_and(|d| d.is_fatal()));
}
