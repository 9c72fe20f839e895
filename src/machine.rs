/*
    # Executor

    Bytecode is executed by decoding the instruction at the byte cursor,
    applying it to memory, and advancing the cursor by the instruction's
    fixed length. A byte whose low nibble is not a known opcode advances
    the cursor by one and decoding is retried (resynchronization). The
    cursor always moves forward, so a run terminates in at most
    `bytecode.len()` iterations.

    Nothing here can fail: any out-of-range address skips that one write
    while the cursor still advances normally. Each instruction's fate is
    recorded as an [Outcome] so callers can see which path was taken.
*/

use crate::{error::machine::*, Instruction};

pub const MEMORY_SIZE: usize = 1024;

/// The reference interpreter seeds this cell before executing anything;
/// [Machine::new] reproduces it for byte-for-byte compatible snapshots.
pub const SEED_ADDR: usize = 5;
pub const SEED_VALUE: i64 = 970;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    Applied,
    SkippedOutOfRange,
    SkippedUnknownOpcode,
}

pub struct Machine {
    pub memory: Vec<i64>,
    pub cursor: usize,
    pub outcomes: Vec<Outcome>,
}

impl Default for Machine {
    fn default() -> Self {
        Self::new()
    }
}

impl Machine {
    /// A reference-compatible machine: 1024 zeroed cells plus the seed.
    pub fn new() -> Self {
        let mut machine = Self::zeroed(MEMORY_SIZE);
        machine.memory[SEED_ADDR] = SEED_VALUE;
        machine
    }

    /// A machine without the reference's seeded cell, for callers that
    /// want genuinely zero-initialized memory.
    pub fn zeroed(memory_size: usize) -> Self {
        Self {
            memory: vec![0; memory_size],
            cursor: 0,
            outcomes: vec![],
        }
    }

    /// Run the byte stream to exhaustion.
    pub fn exec(&mut self, bytecode: &[u8]) {
        while self.cursor < bytecode.len() {
            match Instruction::decode(&bytecode[self.cursor..]) {
                Some(instruction) => {
                    let outcome = self.apply(&instruction);
                    self.outcomes.push(outcome);
                    self.cursor += instruction.opcode().encoded_len();
                }
                None => {
                    self.outcomes.push(Outcome::SkippedUnknownOpcode);
                    self.cursor += 1;
                }
            }
        }
    }

    fn apply(&mut self, instruction: &Instruction) -> Outcome {
        match *instruction {
            Instruction::Load { addr, value } => match self.cell(addr) {
                Some(addr) => {
                    self.memory[addr] = value;
                    Outcome::Applied
                }
                None => Outcome::SkippedOutOfRange,
            },
            Instruction::Write { addr, source } => {
                match (self.cell(addr), self.cell(source)) {
                    (Some(addr), Some(source)) => {
                        self.memory[addr] = self.memory[source];
                        Outcome::Applied
                    }
                    _ => Outcome::SkippedOutOfRange,
                }
            }
            Instruction::Read { addr, delta, base } => self.indirect(addr, delta, base, |v| v),
            Instruction::Abs { delta, addr, base } => self.indirect(addr, delta, base, i64::abs),
        }
    }

    /// One level of indirection shared by read and abs:
    /// `memory[addr] = f(memory[memory[base] + delta])`.
    fn indirect(&mut self, addr: i64, delta: i64, base: i64, f: fn(i64) -> i64) -> Outcome {
        let (addr, base) = match (self.cell(addr), self.cell(base)) {
            (Some(addr), Some(base)) => (addr, base),
            _ => return Outcome::SkippedOutOfRange,
        };
        match self.cell(self.memory[base] + delta) {
            Some(effective) => {
                self.memory[addr] = f(self.memory[effective]);
                Outcome::Applied
            }
            None => Outcome::SkippedOutOfRange,
        }
    }

    fn cell(&self, addr: i64) -> Option<usize> {
        if addr >= 0 && (addr as usize) < self.memory.len() {
            Some(addr as usize)
        } else {
            None
        }
    }

    /// The inclusive `[first, last]` range of memory, each address paired
    /// with its value. The one fallible surface of the executor.
    pub fn snapshot(&self, first: usize, last: usize) -> MachineResult<Vec<(usize, i64)>> {
        if first > last || last >= self.memory.len() {
            return Err(MachineError::BadRange {
                first,
                last,
                memory_size: self.memory.len(),
            });
        }
        Ok((first..=last).map(|addr| (addr, self.memory[addr])).collect())
    }
}
