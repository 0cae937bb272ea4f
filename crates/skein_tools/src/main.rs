//! Command-line front end: parse files against grammar descriptions, or
//! poke at the regex engine directly.

mod cli;

use std::io::Read;
use std::process::ExitCode;

use clap::Parser;
use skein::{Grammar, Regex};

use cli::{Cli, Commands};

fn main() -> ExitCode {
    match run(Cli::parse()) {
        Ok(code) => code,
        Err(err) => {
            eprintln!("error: {err}");
            ExitCode::FAILURE
        }
    }
}

fn run(cli: Cli) -> Result<ExitCode, Box<dyn std::error::Error>> {
    match cli.command {
        Commands::Parse { grammar, input } => {
            let grammar = Grammar::from_path(&grammar)?;
            let text = match input {
                Some(path) => std::fs::read_to_string(path)?,
                None => {
                    let mut buffer = String::new();
                    std::io::stdin().read_to_string(&mut buffer)?;
                    buffer
                }
            };
            match grammar.parse(&text) {
                Some(ast) => {
                    print!("{}", ast.pretty());
                    Ok(ExitCode::SUCCESS)
                }
                None => {
                    eprintln!("input does not match the grammar");
                    Ok(ExitCode::FAILURE)
                }
            }
        }

        Commands::Match {
            pattern,
            text,
            offset,
        } => {
            let regex = Regex::new(&pattern)?;
            println!("{}", regex.matches(&text, offset));
            Ok(ExitCode::SUCCESS)
        }

        Commands::Find { pattern, text } => {
            let regex = Regex::new(&pattern)?;
            match regex.find(&text) {
                Some(offset) => println!("{offset}"),
                None => println!("-1"),
            }
            Ok(ExitCode::SUCCESS)
        }
    }
}
