use anyhow::{Context, Result};
use clap::Parser;
use log::info;
use std::path::PathBuf;
use vcc_common::SymbolTable;
use vvm::{Vm, VmConfig};

#[derive(Parser, Debug)]
#[command(
    name = "vvm",
    about = "VuPP Virtual Machine - run VuPP assembly programs",
    version
)]
struct Cli {
    /// Assembly file to execute
    program: PathBuf,

    /// Symbol table (JSON) describing the program's variables
    #[arg(short = 's', long)]
    symbols: Option<PathBuf>,

    /// Simulator configuration file (JSON)
    #[arg(short = 'c', long)]
    config: Option<PathBuf>,

    /// Maximum number of instructions to execute
    #[arg(short = 'n', long)]
    max_steps: Option<u64>,

    /// Enable verbose logging
    #[arg(short = 'v', long)]
    verbose: bool,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    if cli.verbose {
        env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("debug")).init();
    } else {
        env_logger::init();
    }

    let mut config = match &cli.config {
        Some(path) => VmConfig::load(path)
            .with_context(|| format!("Failed to load config {}", path.display()))?,
        None => VmConfig::default(),
    };
    if let Some(max_steps) = cli.max_steps {
        config.max_steps = max_steps;
    }

    let symbols: SymbolTable = match &cli.symbols {
        Some(path) => {
            let contents = std::fs::read_to_string(path)
                .with_context(|| format!("Failed to read symbol table {}", path.display()))?;
            serde_json::from_str(&contents)
                .with_context(|| format!("Failed to parse symbol table {}", path.display()))?
        }
        None => SymbolTable::new(),
    };

    let source = std::fs::read_to_string(&cli.program)
        .with_context(|| format!("Failed to read {}", cli.program.display()))?;

    let mut vm = Vm::from_source(&source, &symbols, &config)?;
    info!("running {}", cli.program.display());
    vm.run(config.max_steps)?;

    println!("State: {:?} after {} steps", vm.state, vm.steps());
    println!("Registers: {}", vm.register_summary());
    println!("Stack (top first): {:?}", vm.stack());
    for (name, attrs) in symbols.iter() {
        if attrs.kind.is_array() {
            let values = (0..attrs.element_count)
                .map(|index| vm.read_element(name, index))
                .collect::<Result<Vec<_>, _>>()?;
            println!("{} {} = {:?}", attrs.kind, name, values);
        } else {
            println!("{} {} = {}", attrs.kind, name, vm.read_var(name)?);
        }
    }

    Ok(())
}
