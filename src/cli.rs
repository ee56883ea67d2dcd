//! Minimal CLI: hierarchy table → generated visitor source files
use std::path::PathBuf;

use anyhow::Context;
use clap::Parser;
use clap::error::ErrorKind;

// ————————————————————————————————————————————————————————————————————————————
// TYPES
// ————————————————————————————————————————————————————————————————————————————

/// expand AST hierarchy descriptions into Rust sum-type/visitor source files
#[derive(Parser, Debug)]
#[command(name = "generate_ast")]
pub struct CommandLineInterface {
    /// directory the generated files are written into
    output_dir: PathBuf,

    /// JSON hierarchy table (the built-in Lox table if omitted)
    #[arg(long)]
    config: Option<PathBuf>,

    /// print the resolved table and exit without writing files
    #[arg(long)]
    no_op: bool,
}

// ————————————————————————————————————————————————————————————————————————————
// IMPLEMENTATION
// ————————————————————————————————————————————————————————————————————————————

impl CommandLineInterface {
    /// Argument-count contract: anything other than the single output
    /// directory (plus known flags) is a usage error with exit code 64.
    pub fn load() -> Self {
        match Self::try_parse() {
            Ok(cli) => cli,
            Err(error)
                if matches!(
                    error.kind(),
                    ErrorKind::DisplayHelp | ErrorKind::DisplayVersion
                ) =>
            {
                error.exit()
            }
            Err(_) => {
                eprintln!("Usage: generate_ast <output directory>");
                std::process::exit(64);
            }
        }
    }

    pub fn run(&self) -> anyhow::Result<()> {
        // 1) load the raw table
        let raw = match self.config.as_ref() {
            Some(path) => crate::config::load_file(path)?,
            None => crate::config::builtin(),
        };

        // 2) resolve every hierarchy up front, so a malformed line anywhere
        //    means no file is written at all
        let table = crate::parse::resolve(&raw)?;

        // debug path
        if self.no_op {
            eprintln!("{table:#?}");
            return Ok(());
        }

        // 3) emit in table order
        std::fs::create_dir_all(&self.output_dir).with_context(|| {
            format!(
                "failed to create output directory `{}`",
                self.output_dir.display()
            )
        })?;
        let mut sink = crate::sink::DirectorySink::new(self.output_dir.clone());
        crate::codegen::emit_all(&table, &mut sink)?;
        Ok(())
    }
}

// ------------------------------- Tests ------------------------------------ //
