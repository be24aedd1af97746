//! Vocal Compiler - Backend
//!
//! Walks a typed Vocal AST and produces VuPP stack-machine assembly.
//!
//! Generation is a single pass. Each expression pushes its value on the
//! machine's evaluation stack and reports what it pushed; statements consume
//! those values. Type problems in the source are reported as diagnostics and
//! generation continues. An identifier missing from the symbol table is fatal
//! and stops generation where it was found.

pub mod config;
pub mod context;
pub mod expressions;
pub mod promote;
pub mod statements;

pub use config::CodegenConfig;
pub use context::CodegenContext;

use log::{debug, info};
use vcc_codegen::{emit_instructions, AsmInst, InstructionSink, LabelAllocator};
use vcc_common::{CompilerError, ErrorReporter};
use vcc_frontend::Program;

/// Everything a generation run produced, including after a fatal error
#[derive(Debug)]
pub struct CodegenOutput {
    pub instructions: Vec<AsmInst>,
    pub reporter: ErrorReporter,
    pub result: Result<(), CompilerError>,
}

impl CodegenOutput {
    /// Render the generated instructions as assembly text
    pub fn assembly(&self) -> String {
        emit_instructions(&self.instructions)
    }

    /// True when generation ran to completion without reporting errors
    pub fn is_success(&self) -> bool {
        self.result.is_ok() && !self.reporter.has_errors()
    }
}

/// Generate assembly for a whole program with a fresh label allocator
pub fn generate_program(program: &Program, config: &CodegenConfig, filename: &str) -> CodegenOutput {
    let mut labels = config.label_allocator();
    generate_program_with_labels(program, config, &mut labels, filename)
}

/// Generate assembly for a program, drawing labels from `labels`
///
/// Programs generated through the same allocator never declare the same
/// label twice, so their listings can be concatenated.
pub fn generate_program_with_labels(
    program: &Program,
    config: &CodegenConfig,
    labels: &mut LabelAllocator,
    filename: &str,
) -> CodegenOutput {
    let mut sink = InstructionSink::new();
    let mut reporter = ErrorReporter::new();

    let result = check_label_collisions(program, config).and_then(|()| match &program.body {
        Some(body) => {
            let mut ctx = CodegenContext::new(
                &program.symbols,
                labels,
                &mut sink,
                &mut reporter,
                config,
                filename,
            );
            ctx.generate_statement(body)
        }
        None => {
            debug!("{}: empty program", filename);
            Ok(())
        }
    });

    info!(
        "{}: generated {} instructions ({})",
        filename,
        sink.len(),
        reporter.summary()
    );

    CodegenOutput {
        instructions: sink.into_instructions(),
        reporter,
        result,
    }
}

/// Fail when a variable's memory operand would read as a generated label
fn check_label_collisions(program: &Program, config: &CodegenConfig) -> Result<(), CompilerError> {
    for (name, _) in program.symbols.iter() {
        let decorated = format!("{}{}", config.symbol_prefix, name);
        if config.is_label_name(&decorated) {
            return Err(CompilerError::InvalidProgram {
                message: format!(
                    "variable '{}' is written as {}, which has the form of a generated label",
                    name, decorated
                ),
            });
        }
    }
    Ok(())
}

#[cfg(test)]
pub(crate) mod test_support {
    use crate::{CodegenConfig, CodegenContext};
    use vcc_codegen::{emit_instructions, InstructionSink, LabelAllocator};
    use vcc_common::{CompilerError, ErrorReporter, SymbolAttrs, SymbolKind, SymbolTable, ValueKind};
    use vcc_frontend::{Expr, Stmt};

    pub struct ExprOutput {
        pub kind: ValueKind,
        pub asm: String,
        pub reporter: ErrorReporter,
    }

    pub struct StmtOutput {
        pub asm: String,
        pub reporter: ErrorReporter,
        pub result: Result<(), CompilerError>,
    }

    /// `i` INT, `l` LONG, `ia` INT[8], `la` LONG[8]
    pub fn symbols() -> SymbolTable {
        SymbolTable::new()
            .with_symbol("i", SymbolAttrs::scalar(SymbolKind::Scalar16))
            .with_symbol("l", SymbolAttrs::scalar(SymbolKind::Scalar32))
            .with_symbol("ia", SymbolAttrs::array(SymbolKind::Array16, 8))
            .with_symbol("la", SymbolAttrs::array(SymbolKind::Array32, 8))
    }

    /// Expected assembly text; lines ending in ':' are labels
    pub fn lines(expected: &[&str]) -> String {
        expected
            .iter()
            .map(|line| {
                if line.ends_with(':') {
                    format!("{}\n", line)
                } else {
                    format!("    {}\n", line)
                }
            })
            .collect()
    }

    fn with_context<T>(
        symbols: &SymbolTable,
        config: &CodegenConfig,
        f: impl FnOnce(&mut CodegenContext) -> T,
    ) -> (T, String, ErrorReporter) {
        let mut labels = LabelAllocator::new();
        let mut sink = InstructionSink::new();
        let mut reporter = ErrorReporter::new();
        let value = {
            let mut ctx = CodegenContext::new(
                symbols,
                &mut labels,
                &mut sink,
                &mut reporter,
                config,
                "test.voc",
            );
            f(&mut ctx)
        };
        (value, emit_instructions(sink.instructions()), reporter)
    }

    pub fn generate_expr_result(symbols: &SymbolTable, expr: &Expr) -> Result<ValueKind, CompilerError> {
        with_context(symbols, &CodegenConfig::default(), |ctx| ctx.generate_expression(expr)).0
    }

    pub fn generate_expr(symbols: &SymbolTable, expr: &Expr) -> ExprOutput {
        let (kind, asm, reporter) =
            with_context(symbols, &CodegenConfig::default(), |ctx| ctx.generate_expression(expr));
        ExprOutput {
            kind: kind.unwrap(),
            asm,
            reporter,
        }
    }

    pub fn generate_stmt_with(symbols: &SymbolTable, config: &CodegenConfig, stmt: &Stmt) -> StmtOutput {
        let (result, asm, reporter) = with_context(symbols, config, |ctx| ctx.generate_statement(stmt));
        StmtOutput { asm, reporter, result }
    }

    pub fn generate_stmt(symbols: &SymbolTable, stmt: &Stmt) -> StmtOutput {
        generate_stmt_with(symbols, &CodegenConfig::default(), stmt)
    }
}
