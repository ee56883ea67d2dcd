pub mod cli;
pub mod codegen;
pub mod config;
pub mod model;
pub mod parse;
pub mod sink;

use colored::Colorize;

fn main() {
    let command_line_interface = cli::CommandLineInterface::load();
    if let Err(error) = command_line_interface.run() {
        eprintln!("{} {error:#}", "error:".red().bold());
        std::process::exit(1);
    }
}
