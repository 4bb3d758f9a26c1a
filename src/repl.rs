//! Line-oriented read-eval-print driver.
//!
//! Each line runs through the full pipeline against one persistent
//! environment, so bindings survive across lines. Parser errors suppress
//! evaluation for that line.

use std::io::{self, BufRead, Write};

use crate::interpreter::{self, env::Environment};
use crate::parser;
use crate::parser::error::ParseError;

const PROMPT: &str = ">> ";

pub fn run(mut input: impl BufRead, mut output: impl Write) -> io::Result<()> {
    let env = Environment::new();
    let mut line = String::new();
    loop {
        write!(output, "{PROMPT}")?;
        output.flush()?;

        line.clear();
        if input.read_line(&mut line)? == 0 {
            return Ok(());
        }

        let (program, errors) = parser::parse(&line);
        if !errors.is_empty() {
            print_parse_errors(&mut output, &errors)?;
            continue;
        }

        if let Some(value) = interpreter::eval_program(&program, &env) {
            writeln!(output, "{}", value.inspect())?;
        }
    }
}

fn print_parse_errors(output: &mut impl Write, errors: &[ParseError]) -> io::Result<()> {
    writeln!(output, "parser errors:")?;
    for error in errors {
        writeln!(output, "\t{error}")?;
    }
    Ok(())
}
