//! Code generation context
//!
//! Everything a generator needs while walking the tree lives here: the
//! read-only symbol table, the shared label allocator, the output sink and the
//! diagnostic reporter. The caller owns all of them, so diagnostics and the
//! partial instruction stream survive a fatal error.

use crate::config::CodegenConfig;
use vcc_codegen::{AsmInst, InstructionSink, Label, LabelAllocator, Operand, Reg};
use vcc_common::{
    CompilerError, Diagnostic, ErrorReporter, SourceLocation, SymbolAttrs, SymbolTable,
    ValueKind,
};

pub struct CodegenContext<'a> {
    pub symbols: &'a SymbolTable,
    pub labels: &'a mut LabelAllocator,
    pub sink: &'a mut InstructionSink,
    pub reporter: &'a mut ErrorReporter,
    pub config: &'a CodegenConfig,
    pub filename: &'a str,
}

impl<'a> CodegenContext<'a> {
    pub fn new(
        symbols: &'a SymbolTable,
        labels: &'a mut LabelAllocator,
        sink: &'a mut InstructionSink,
        reporter: &'a mut ErrorReporter,
        config: &'a CodegenConfig,
        filename: &'a str,
    ) -> Self {
        Self {
            symbols,
            labels,
            sink,
            reporter,
            config,
            filename,
        }
    }

    pub fn emit(&mut self, inst: AsmInst) {
        self.sink.push(inst);
    }

    pub fn emit_all<I: IntoIterator<Item = AsmInst>>(&mut self, insts: I) {
        self.sink.extend(insts);
    }

    pub fn new_label(&mut self) -> Label {
        self.labels.next_label()
    }

    pub fn place_label(&mut self, label: &Label) {
        self.sink.label(label);
    }

    pub fn location(&self, line: u32) -> SourceLocation {
        SourceLocation::new(self.filename, line)
    }

    pub fn error(&mut self, line: u32, message: String) -> &mut Diagnostic {
        let location = self.location(line);
        self.reporter.error(message, location)
    }

    pub fn warning(&mut self, line: u32, message: String) -> &mut Diagnostic {
        let location = self.location(line);
        self.reporter.warning(message, location)
    }

    /// Look up `name`; an undeclared identifier ends code generation
    pub fn lookup(&self, name: &str, line: u32) -> Result<SymbolAttrs, CompilerError> {
        self.symbols
            .lookup(name)
            .copied()
            .ok_or_else(|| CompilerError::unknown_symbol(name, self.location(line)))
    }

    fn decorate(&self, name: &str) -> String {
        format!("{}{}", self.config.symbol_prefix, name)
    }

    /// The variable's address as an immediate: `_x`
    pub fn address_of(&self, name: &str) -> Operand {
        Operand::Address(self.decorate(name))
    }

    /// The memory word at the variable's address: `(_x)`
    pub fn memory_at(&self, name: &str) -> Operand {
        Operand::Memory(self.decorate(name))
    }

    /// Drop a value of `kind` from the top of the stack
    pub fn discard(&mut self, kind: ValueKind) {
        for _ in 0..kind.size_in_words() {
            self.emit(AsmInst::Pop(Reg::R0.into()));
        }
    }
}
