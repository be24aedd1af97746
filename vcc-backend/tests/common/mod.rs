//! Shared helpers: generate a program, assemble it and run it on the VM

#![allow(dead_code)]

use vcc_backend::{generate_program, CodegenConfig, CodegenOutput};
use vcc_common::{SymbolAttrs, SymbolKind, SymbolTable};
use vcc_frontend::{Expr, Program, Stmt};
use vvm::{Vm, VmConfig, VmState};

pub fn int(name: &str) -> (String, SymbolAttrs) {
    (name.to_string(), SymbolAttrs::scalar(SymbolKind::Scalar16))
}

pub fn long(name: &str) -> (String, SymbolAttrs) {
    (name.to_string(), SymbolAttrs::scalar(SymbolKind::Scalar32))
}

pub fn int_array(name: &str, count: u16) -> (String, SymbolAttrs) {
    (name.to_string(), SymbolAttrs::array(SymbolKind::Array16, count))
}

pub fn long_array(name: &str, count: u16) -> (String, SymbolAttrs) {
    (name.to_string(), SymbolAttrs::array(SymbolKind::Array32, count))
}

pub fn table(entries: Vec<(String, SymbolAttrs)>) -> SymbolTable {
    let mut symbols = SymbolTable::new();
    for (name, attrs) in entries {
        symbols.declare(&name, attrs);
    }
    symbols
}

pub fn compile(symbols: &SymbolTable, body: Vec<Stmt>) -> CodegenOutput {
    compile_with(symbols, body, &CodegenConfig::default())
}

pub fn compile_with(symbols: &SymbolTable, body: Vec<Stmt>, config: &CodegenConfig) -> CodegenOutput {
    let program = Program::new(symbols.clone(), Stmt::sequence(body));
    generate_program(&program, config, "test.voc")
}

/// Compile, load with initial variable values, and run to completion
pub fn execute(symbols: &SymbolTable, body: Vec<Stmt>, init: &[(&str, u32)]) -> (Vm, CodegenOutput) {
    let output = compile(symbols, body);
    assert!(output.result.is_ok(), "fatal error: {:?}", output.result);
    let vm = run_output(symbols, &output, init);
    (vm, output)
}

pub fn run_output(symbols: &SymbolTable, output: &CodegenOutput, init: &[(&str, u32)]) -> Vm {
    let mut vm = Vm::from_source(&output.assembly(), symbols, &VmConfig::default())
        .unwrap_or_else(|e| panic!("{}\n{}", e, output.assembly()));
    for (name, value) in init {
        vm.write_var(name, *value).unwrap();
    }
    vm.run(VmConfig::default().max_steps)
        .unwrap_or_else(|e| panic!("{}\n{}", e, output.assembly()));
    vm
}

/// Evaluate `expr` with `return` and give back the whole final stack
pub fn eval(symbols: &SymbolTable, expr: Expr, init: &[(&str, u32)]) -> Vec<u16> {
    let (vm, output) = execute(symbols, vec![Stmt::ret(expr)], init);
    assert!(!output.reporter.has_errors(), "{:?}", output.reporter.diagnostics());
    assert_eq!(vm.state, VmState::Halted);
    vm.stack()
}

/// Stack words of a LONG result, top first
pub fn long_words(value: u32) -> Vec<u16> {
    vec![value as u16, (value >> 16) as u16]
}
