mod error;
use error::*;
use std::fs::{read, read_to_string};
use std::io::ErrorKind;

use colored::Colorize;
use crumb::{assemble_with_log, fileio, Assembler, Machine};

fn main() -> CLIResult {
    let mut args = std::env::args();
    args.next(); // Ignore program name
    match args.next() {
        Some(arg) => {
            if &arg == "asm" {
                let instructions_path = args.next().ok_or(CLIError::InsufficientArguments)?;
                let binary_path = args.next().ok_or(CLIError::InsufficientArguments)?;
                let log_path = args.next().ok_or(CLIError::InsufficientArguments)?;

                let source = match read_to_string(&instructions_path) {
                    Ok(s) => s,
                    Err(e) => match e.kind() {
                        ErrorKind::NotFound => return Err(CLIError::NotFound),
                        _ => return Err(CLIError::ExternalError("io::Error".into(), e.to_string())),
                    },
                };

                let mut assembler = Assembler::new(&source);
                assembler.parse();
                for issue in &assembler.issues {
                    eprintln!(
                        "{} line {}: {}",
                        "skipped".yellow(),
                        issue.line,
                        issue.error
                    );
                }

                let mut log = match fileio::OperationLog::create(&log_path) {
                    Ok(log) => log,
                    Err(e) => return Err(CLIError::ExternalError("FileIOError".into(), e.to_string())),
                };
                let bytecode = match assemble_with_log(&assembler.instructions, &mut log) {
                    Ok(bytecode) => bytecode,
                    Err(e) => return Err(CLIError::ExternalError("FileIOError".into(), e.to_string())),
                };
                match fileio::save_binary(&binary_path, &bytecode) {
                    Ok(()) => Ok(()),
                    Err(e) => Err(CLIError::ExternalError("FileIOError".into(), e.to_string())),
                }
            } else if &arg == "run" {
                let binary_path = args.next().ok_or(CLIError::InsufficientArguments)?;
                let result_path = args.next().ok_or(CLIError::InsufficientArguments)?;
                let first = parse_index(args.next())?;
                let last = parse_index(args.next())?;

                let bytecode = match read(&binary_path) {
                    Ok(b) => b,
                    Err(e) => match e.kind() {
                        ErrorKind::NotFound => return Err(CLIError::NotFound),
                        _ => return Err(CLIError::ExternalError("io::Error".into(), e.to_string())),
                    },
                };

                let mut machine = Machine::new();
                machine.exec(&bytecode);
                let snapshot = match machine.snapshot(first, last) {
                    Ok(snapshot) => snapshot,
                    Err(e) => return Err(CLIError::ExternalError("MachineError".into(), e.to_string())),
                };
                match fileio::save_result(&result_path, &snapshot) {
                    Ok(()) => Ok(()),
                    Err(e) => Err(CLIError::ExternalError("FileIOError".into(), e.to_string())),
                }
            } else {
                Err(CLIError::UnknownArgument(arg))
            }
        }

        None => {
            eprintln!(
                "{} asm <instructions.txt> <out.bin> <log.csv> | run <program.bin> <result.csv> <first> <last>",
                "usage:".red()
            );
            Err(CLIError::InsufficientArguments)
        }
    }
}

fn parse_index(arg: Option<String>) -> CLIResult<usize> {
    let arg = arg.ok_or(CLIError::InsufficientArguments)?;
    arg.parse().map_err(|_| CLIError::BadIndex(arg))
}
