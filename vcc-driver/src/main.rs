//! Vocal Compiler Driver
//!
//! Turns a parsed Vocal program (the JSON the parser writes) into VuPP
//! assembly, and can run the result on the VuPP simulator.

use anyhow::{bail, Context, Result};
use clap::{Args, Parser, Subcommand};
use log::info;
use std::fs;
use std::path::{Path, PathBuf};
use vcc_backend::{generate_program, CodegenConfig, CodegenOutput};
use vcc_frontend::Program;
use vvm::{Vm, VmConfig};

#[derive(Parser)]
#[command(name = "vcc")]
#[command(about = "Vocal Compiler for the VuPP stack machine")]
#[command(version = "0.1.0")]
struct Cli {
    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Generate assembly for a parsed program
    Compile {
        /// Parsed program (JSON)
        input: PathBuf,

        /// Output assembly file (stdout if omitted)
        #[arg(short, long)]
        output: Option<PathBuf>,

        #[command(flatten)]
        codegen: CodegenArgs,
    },

    /// Generate assembly and execute it on the simulator
    Run {
        /// Parsed program (JSON)
        input: PathBuf,

        /// Maximum number of instructions to execute
        #[arg(long)]
        max_steps: Option<u64>,

        #[command(flatten)]
        codegen: CodegenArgs,
    },
}

#[derive(Args)]
struct CodegenArgs {
    /// Code generation settings (JSON)
    #[arg(long)]
    config: Option<PathBuf>,

    /// Prefix for generated labels
    #[arg(long)]
    label_prefix: Option<String>,

    /// Prefix for variable names in memory operands
    #[arg(long)]
    symbol_prefix: Option<String>,

    /// Omit the run-time zero-divisor check
    #[arg(long)]
    no_div_guard: bool,
}

impl CodegenArgs {
    fn resolve(&self) -> Result<CodegenConfig> {
        let mut config = match &self.config {
            Some(path) => CodegenConfig::load(path)
                .with_context(|| format!("Failed to load config {}", path.display()))?,
            None => CodegenConfig::default(),
        };
        if let Some(prefix) = &self.label_prefix {
            config.label_prefix = prefix.clone();
        }
        if let Some(prefix) = &self.symbol_prefix {
            config.symbol_prefix = prefix.clone();
        }
        if self.no_div_guard {
            config.guard_division_by_zero = false;
        }
        config.validate().context("Invalid code generation options")?;
        Ok(config)
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    if cli.verbose {
        env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("debug")).init();
    } else {
        env_logger::init();
    }

    match cli.command {
        Commands::Compile { input, output, codegen } => {
            let config = codegen.resolve()?;
            let (_, result) = compile_file(&input, &config)?;
            match output {
                Some(path) => {
                    fs::write(&path, result.assembly())
                        .with_context(|| format!("Failed to write {}", path.display()))?;
                    info!("assembly written to {}", path.display());
                }
                None => print!("{}", result.assembly()),
            }
        }
        Commands::Run { input, max_steps, codegen } => {
            let config = codegen.resolve()?;
            let (program, result) = compile_file(&input, &config)?;

            let vm_config = VmConfig {
                symbol_prefix: config.symbol_prefix.clone(),
                max_steps: max_steps.unwrap_or(VmConfig::default().max_steps),
                ..VmConfig::default()
            };
            let mut vm = Vm::from_source(&result.assembly(), &program.symbols, &vm_config)?;
            vm.run(vm_config.max_steps)?;

            println!("State: {:?} after {} steps", vm.state, vm.steps());
            println!("Registers: {}", vm.register_summary());
    println!("Stack (top first): {:?}", vm.stack());
            for (name, attrs) in program.symbols.iter() {
                if attrs.kind.is_array() {
                    let values = (0..attrs.element_count)
                        .map(|index| vm.read_element(name, index))
                        .collect::<Result<Vec<_>, _>>()?;
                    println!("{} {} = {:?}", attrs.kind, name, values);
                } else {
                    println!("{} {} = {}", attrs.kind, name, vm.read_var(name)?);
                }
            }
        }
    }

    Ok(())
}

/// Load and compile a program file, printing diagnostics
///
/// Fails when generation stopped on a fatal error or reported any error.
fn compile_file(input: &Path, config: &CodegenConfig) -> Result<(Program, CodegenOutput)> {
    let program = Program::load(input)
        .with_context(|| format!("Failed to load program {}", input.display()))?;
    let filename = input.display().to_string();

    let output = generate_program(&program, config, &filename);
    output.reporter.print_diagnostics();

    if let Err(e) = &output.result {
        bail!("{}", e);
    }
    if output.reporter.has_errors() {
        bail!("compilation failed: {}", output.reporter.summary());
    }
    if output.reporter.warning_count() > 0 {
        eprintln!("{}", output.reporter.summary());
    }
    Ok((program, output))
}
