use std::fs;
use std::io;

use anyhow::{Context, Result, bail};
use lume::interpreter::{self, env::Environment};
use lume::{parser, repl};

fn main() -> Result<()> {
    let mut args = std::env::args().skip(1);
    let script = args.next();
    if args.next().is_some() {
        bail!("Only one script file is supported");
    }

    let Some(path) = script else {
        repl::run(io::stdin().lock(), io::stdout())?;
        return Ok(());
    };

    let source = fs::read_to_string(&path).with_context(|| format!("Reading {path}"))?;
    let (program, errors) = parser::parse(&source);
    if !errors.is_empty() {
        for error in &errors {
            eprintln!("{error}");
        }
        bail!("{} parse error(s) in {path}", errors.len());
    }

    let env = Environment::new();
    match interpreter::eval_program(&program, &env) {
        Some(value) if value.is_error() => bail!("{}", value.inspect()),
        Some(value) => println!("{}", value.inspect()),
        None => {}
    }
    Ok(())
}
