//! Arithmetic executed on the VM

mod common;

use common::*;
use pretty_assertions::assert_eq;
use vcc_backend::CodegenConfig;
use vcc_common::Severity;
use vcc_frontend::{Expr, Stmt};

const LONG_SAMPLES: [u32; 8] = [0, 1, 0xFFFF, 0x1_0000, 0x1234_5678, 0x7FFF_FFFF, 0x8000_0000, 0xFFFF_FFFF];

#[test]
fn int_add_sub_wrap_at_16_bits() {
    let symbols = table(vec![int("a"), int("b")]);
    for &(a, b) in &[(0u16, 0u16), (1, 2), (0xFFFF, 1), (0x8000, 0x8000), (3, 5), (0, 0xFFFF)] {
        let init = [("a", a as u32), ("b", b as u32)];
        let sum = eval(&symbols, Expr::add(Expr::ident("a", 1), Expr::ident("b", 1), 1), &init);
        assert_eq!(sum, vec![a.wrapping_add(b)]);
        let difference = eval(&symbols, Expr::sub(Expr::ident("a", 1), Expr::ident("b", 1), 1), &init);
        assert_eq!(difference, vec![a.wrapping_sub(b)]);
    }
}

#[test]
fn long_add_sub_wrap_at_32_bits() {
    let symbols = table(vec![long("a"), long("b")]);
    for &a in &LONG_SAMPLES {
        for &b in &LONG_SAMPLES {
            let init = [("a", a), ("b", b)];
            let sum = eval(&symbols, Expr::add(Expr::ident("a", 1), Expr::ident("b", 1), 1), &init);
            assert_eq!(sum, long_words(a.wrapping_add(b)), "{:#x} + {:#x}", a, b);
            let difference =
                eval(&symbols, Expr::sub(Expr::ident("a", 1), Expr::ident("b", 1), 1), &init);
            assert_eq!(difference, long_words(a.wrapping_sub(b)), "{:#x} - {:#x}", a, b);
        }
    }
}

#[test]
fn mixed_operands_behave_as_long() {
    let symbols = table(vec![int("i"), long("l")]);
    for &i in &[0u32, 1, 0xFFFF] {
        for &l in &LONG_SAMPLES {
            let init = [("i", i), ("l", l)];
            let sum = eval(&symbols, Expr::add(Expr::ident("i", 1), Expr::ident("l", 1), 1), &init);
            assert_eq!(sum, long_words(i.wrapping_add(l)));
            let sum = eval(&symbols, Expr::add(Expr::ident("l", 1), Expr::ident("i", 1), 1), &init);
            assert_eq!(sum, long_words(l.wrapping_add(i)));
            let difference =
                eval(&symbols, Expr::sub(Expr::ident("i", 1), Expr::ident("l", 1), 1), &init);
            assert_eq!(difference, long_words(i.wrapping_sub(l)));
            let difference =
                eval(&symbols, Expr::sub(Expr::ident("l", 1), Expr::ident("i", 1), 1), &init);
            assert_eq!(difference, long_words(l.wrapping_sub(i)));
        }
    }
}

#[test]
fn long_literals_combine_with_variables() {
    let symbols = table(vec![long("l")]);
    let expr = Expr::add(Expr::ident("l", 1), Expr::long(0x0001_0000, 1), 1);
    assert_eq!(eval(&symbols, expr, &[("l", 0xFFFF)]), long_words(0x0001_FFFF));
}

#[test]
fn mul_is_modulo_16_bits() {
    let symbols = table(vec![int("a"), int("b")]);
    for &(a, b) in &[(0u16, 5u16), (5, 0), (7, 6), (1, 300), (300, 1), (0x4000, 4), (0xFFFF, 2), (255, 257)] {
        let init = [("a", a as u32), ("b", b as u32)];
        let product = eval(&symbols, Expr::mul(Expr::ident("a", 1), Expr::ident("b", 1), 1), &init);
        assert_eq!(product, vec![a.wrapping_mul(b)], "{} * {}", a, b);
    }
}

#[test]
fn div_truncates() {
    let symbols = table(vec![int("a"), int("b")]);
    for &(a, b) in &[(0u16, 5u16), (7, 2), (6, 3), (5, 7), (0xFFFF, 0x100), (1000, 1), (9, 9)] {
        let init = [("a", a as u32), ("b", b as u32)];
        let quotient = eval(&symbols, Expr::div(Expr::ident("a", 1), Expr::ident("b", 1), 1), &init);
        assert_eq!(quotient, vec![a / b], "{} / {}", a, b);
    }
}

#[test]
fn runtime_division_by_zero_yields_zero() {
    let symbols = table(vec![int("a"), int("b")]);
    let init = [("a", 17), ("b", 0)];
    let quotient = eval(&symbols, Expr::div(Expr::ident("a", 1), Expr::ident("b", 1), 1), &init);
    assert_eq!(quotient, vec![0]);
}

#[test]
fn unguarded_division_by_zero_never_terminates() {
    let symbols = table(vec![int("a"), int("b")]);
    let config = CodegenConfig {
        guard_division_by_zero: false,
        ..CodegenConfig::default()
    };
    let output = compile_with(
        &symbols,
        vec![Stmt::ret(Expr::div(Expr::ident("a", 1), Expr::ident("b", 1), 1))],
        &config,
    );
    let mut vm = vvm::Vm::from_source(&output.assembly(), &symbols, &vvm::VmConfig::default()).unwrap();
    vm.write_var("a", 3).unwrap();
    assert_eq!(vm.run(5_000), Err(vvm::VmError::StepLimit(5_000)));
}

#[test]
fn literal_division_by_zero_is_an_error() {
    let symbols = table(vec![int("a")]);
    let output = compile(
        &symbols,
        vec![Stmt::assign("a", Expr::div(Expr::ident("a", 3), Expr::int(0, 3), 3), 3)],
    );
    assert!(output.result.is_ok());
    assert_eq!(output.reporter.error_count(), 1);
    assert_eq!(output.reporter.diagnostics()[0].location.line, 3);
}

#[test]
fn truncated_zero_divisor_is_an_error() {
    let symbols = table(vec![int("a")]);
    let divisor = Expr::Number { value: 0x1_0000, kind: vcc_common::ValueKind::Int16, line: 4 };
    let output = compile(
        &symbols,
        vec![Stmt::assign("a", Expr::div(Expr::ident("a", 4), divisor, 4), 4)],
    );
    assert!(output.result.is_ok());
    assert_eq!(output.reporter.warning_count(), 1);
    assert_eq!(output.reporter.error_count(), 1);
    let error = output
        .reporter
        .diagnostics()
        .iter()
        .find(|d| d.severity == Severity::Error)
        .unwrap();
    assert_eq!(error.message, "Division by zero");
    assert!(!output.assembly().contains("jc "));
}

#[test]
fn mul_rejects_long_right_operand() {
    let symbols = table(vec![int("a"), long("l")]);
    let output = compile(
        &symbols,
        vec![Stmt::assign("a", Expr::mul(Expr::ident("a", 8), Expr::ident("l", 8), 8), 8)],
    );
    assert!(output.result.is_ok());
    assert_eq!(output.reporter.error_count(), 1);
    let diagnostic = &output.reporter.diagnostics()[0];
    assert_eq!(diagnostic.severity, Severity::Error);
    assert_eq!(diagnostic.message, "Multiplication only supported with INTs");
    assert!(!output.assembly().contains("pop (_a)"));
}

#[test]
fn oversized_int_literal_is_truncated_with_warning() {
    let symbols = table(vec![int("a")]);
    let literal = Expr::Number { value: 0x0003_0007, kind: vcc_common::ValueKind::Int16, line: 2 };
    let output = compile(&symbols, vec![Stmt::ret(literal)]);
    assert_eq!(output.reporter.warning_count(), 1);
    let vm = run_output(&symbols, &output, &[]);
    assert_eq!(vm.stack(), vec![7]);
}
