use std::fs::File;
use std::io::Write;
use std::path::Path;

use crate::{error::fileio::*, Instruction};

pub const LOG_HEADER: &str = "Operation,B (Address),C (Constant/Address)";
pub const RESULT_HEADER: &str = "Address,Value";

/// Append-only side channel written during assembly: one record per
/// encoded instruction. Purely for auditing; execution never reads it.
pub struct OperationLog<W: Write> {
    sink: W,
}

impl OperationLog<File> {
    /// Start a fresh log file, writing the header line.
    pub fn create<P: AsRef<Path>>(path: P) -> FileIOResult<Self> {
        OperationLog::new(File::create(path)?)
    }
}

impl<W: Write> OperationLog<W> {
    pub fn new(mut sink: W) -> FileIOResult<Self> {
        writeln!(sink, "{}", LOG_HEADER)?;
        Ok(Self { sink })
    }

    /// The opcode and the first two operands, whatever the arity.
    pub fn record(&mut self, instruction: &Instruction) -> FileIOResult {
        let (b, c) = instruction.log_operands();
        writeln!(
            self.sink,
            "Operation={},B={},C={}",
            u8::from(instruction.opcode()),
            b,
            c
        )?;
        Ok(())
    }
}

/// Raw byte stream, exactly as assembled. No header, no magic, no count.
pub fn save_binary<P: AsRef<Path>>(path: P, bytecode: &[u8]) -> FileIOResult {
    let mut file = File::create(path)?;
    file.write_all(bytecode)?;
    Ok(())
}

pub fn write_result<W: Write>(sink: &mut W, snapshot: &[(usize, i64)]) -> FileIOResult {
    writeln!(sink, "{}", RESULT_HEADER)?;
    for (address, value) in snapshot {
        writeln!(sink, "{},{}", address, value)?;
    }
    Ok(())
}

/// Result CSV for a requested memory range.
pub fn save_result<P: AsRef<Path>>(path: P, snapshot: &[(usize, i64)]) -> FileIOResult {
    write_result(&mut File::create(path)?, snapshot)
}
