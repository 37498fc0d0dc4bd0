//! Command-line host for script modules.
//!
//! Mirrors the demonstration host loop: pick a script file, load it, list
//! the resolved callables, and invoke one (or all) on demand. Script output
//! goes to stdout; diagnostics go through `tracing`.

use std::{
    path::{Path, PathBuf},
    process::ExitCode,
    sync::Arc,
};

use clap::{Parser, Subcommand};
use scriptmod::{HostApi, ModuleLoader, ScriptConfig, ScriptModule};
use tracing::info;
use tracing_subscriber::fmt;

/// Host implementation that prints script output to stdout.
struct StdoutHost;

impl HostApi for StdoutHost {
    fn std_clog(&self, message: &str) {
        println!("clog: {message}");
    }

    fn pass_value(&self, value: serde_json::Value) {
        match serde_json::to_string_pretty(&value) {
            Ok(json) => println!("value: {json}"),
            Err(_) => println!("value: {value}"),
        }
    }
}

#[derive(Parser)]
#[command(name = "scriptmod")]
#[command(about = "Load script modules and invoke their callables", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Load a module and list its callables
    List {
        /// Path to the script module
        script: PathBuf,
    },
    /// Load a module and invoke one callable
    Call {
        /// Path to the script module
        script: PathBuf,
        /// Name of the callable to invoke
        name: String,
    },
    /// Load a module and invoke every callable in order
    Run {
        /// Path to the script module
        script: PathBuf,
    },
}

fn main() -> ExitCode {
    fmt::init();
    let cli = Cli::parse();

    let result = match cli.command {
        Commands::List { script } => with_module(&script, |module| {
            println!("{}", module.name());
            for name in module.callables() {
                println!("  {name}");
            }
            Ok(())
        }),
        Commands::Call { script, name } => with_module(&script, |module| module.invoke(&name)),
        Commands::Run { script } => with_module(&script, |module| {
            let names: Vec<String> = module.callables().map(str::to_string).collect();
            for name in &names {
                info!(callable = %name, "invoking");
                module.invoke(name)?;
            }
            Ok(())
        }),
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(message) => {
            eprintln!("{message}");
            ExitCode::FAILURE
        }
    }
}

fn with_module<F>(script: &Path, f: F) -> Result<(), String>
where
    F: FnOnce(&mut ScriptModule) -> scriptmod::Result<()>,
{
    let source = std::fs::read_to_string(script)
        .map_err(|err| format!("cannot read {}: {err}", script.display()))?;
    let loader = ModuleLoader::new(Arc::new(StdoutHost), ScriptConfig::default());
    let mut module = loader.load(&source).map_err(render)?;
    f(&mut module).map_err(render)
}

fn render(err: scriptmod::Error) -> String {
    let info = err.info();
    serde_json::to_string(&info).unwrap_or(info.message)
}
