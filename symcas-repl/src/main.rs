mod command;

use rustyline::{error::ReadlineError, DefaultEditor};
use simplelog::{ColorChoice, Config, LevelFilter, TermLogger, TerminalMode};
use std::{fs, io::{self, IsTerminal, Read}, process::ExitCode};

/// The environment variable that sets the log level.
const LOG_VAR: &str = "SYMCAS_LOG";

/// Installs a terminal logger at the level given by [`LOG_VAR`], defaulting to `warn`.
fn init_logger() {
    let level = match std::env::var(LOG_VAR) {
        Ok(value) => value.parse::<LevelFilter>().unwrap_or_else(|_| {
            eprintln!("{}: unknown log level `{}`, using `warn`", LOG_VAR, value);
            LevelFilter::Warn
        }),
        Err(_) => LevelFilter::Warn,
    };

    if let Err(err) = TermLogger::init(level, Config::default(), TerminalMode::Stderr, ColorChoice::Auto) {
        eprintln!("could not install logger: {}", err);
    }
}

/// Runs one line and prints the result, or reports the error against the line. Returns true if
/// the line succeeded.
fn execute_line(input: &str) -> bool {
    match command::run_line(input) {
        Ok(output) => {
            println!("{}", output);
            true
        },
        Err(err) => {
            if let Err(io_err) = err.report_to_stderr(input) {
                eprintln!("{}: {}", err, io_err);
            }
            false
        },
    }
}

/// Runs every non-empty line of a script. Lines starting with `#` are comments.
fn execute_script(source: &str) -> ExitCode {
    let mut ok = true;
    for line in source.lines() {
        let line = line.trim();
        if line.is_empty() || line.starts_with('#') {
            continue;
        }
        ok &= execute_line(line);
    }

    if ok {
        ExitCode::SUCCESS
    } else {
        ExitCode::FAILURE
    }
}

fn process_line(rl: &mut DefaultEditor) -> Result<(), ReadlineError> {
    let input = rl.readline("> ")?;
    if input.trim().is_empty() {
        return Ok(());
    }

    rl.add_history_entry(&input)?;
    execute_line(input.trim());
    Ok(())
}

fn main() -> ExitCode {
    init_logger();

    let mut args = std::env::args();
    args.next();

    if let Some(filename) = args.next() {
        // run script file
        match fs::read_to_string(&filename) {
            Ok(source) => execute_script(&source),
            Err(err) => {
                eprintln!("could not read `{}`: {}", filename, err);
                ExitCode::FAILURE
            },
        }
    } else if !io::stdin().is_terminal() {
        // read script from stdin
        let mut source = String::new();
        if let Err(err) = io::stdin().read_to_string(&mut source) {
            eprintln!("could not read stdin: {}", err);
            return ExitCode::FAILURE;
        }
        execute_script(&source)
    } else {
        // interactive mode
        let mut rl = match DefaultEditor::new() {
            Ok(rl) => rl,
            Err(err) => {
                eprintln!("could not start line editor: {}", err);
                return ExitCode::FAILURE;
            },
        };

        loop {
            if let Err(err) = process_line(&mut rl) {
                match err {
                    ReadlineError::Eof | ReadlineError::Interrupted => (),
                    _ => eprintln!("{}", err),
                }
                break;
            }
        }
        ExitCode::SUCCESS
    }
}
