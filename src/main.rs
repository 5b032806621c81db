// Hawk front end: scan and recognize a source program, printing the rule
// trace on stdout. Errors map to a single stderr line and a non-zero exit.

use std::fs;
use std::io;
use std::process;

use clap::{Arg, Command};

use hawk::parser::parser::{ParseError, Parser};
use hawk::scanner::scanner::Scanner;

/// Program parsed when no path is given on the command line.
const SAMPLE_PROGRAM: &str = "\
program
x, y: double;
e: int;
begin
input x;
y := 1;
if (x > 0) then
e := 0;
while (x > 0)
loop
y := y * x;
x := x - 1;
end loop;
else
e := 1;
end if;
output e, x, y;
end;
";

fn main() {
    let matches = Command::new("hawk")
        .version(env!("CARGO_PKG_VERSION"))
        .about("Scanner and predictive parser for the Hawk teaching language")
        .arg(
            Arg::new("path")
                .help("Hawk source file to check (omitted: a built-in sample program is parsed)")
                .index(1),
        )
        .get_matches();

    let source = match matches.get_one::<String>("path") {
        Some(path) => match fs::read_to_string(path) {
            Ok(source) => source,
            Err(e) => {
                eprintln!("IO Error: {}", e);
                process::exit(1);
            }
        },
        None => SAMPLE_PROGRAM.to_string(),
    };

    if let Err(e) = run(&source) {
        eprintln!("{}", e);
        process::exit(1);
    }
}

/// Scan and parse one source text, streaming the rule trace to stdout.
fn run(source: &str) -> Result<(), ParseError> {
    let scanner = Scanner::new(source);
    let stdout = io::stdout();
    let mut parser = Parser::new(scanner, stdout.lock())?;
    parser.parse_program()
}
