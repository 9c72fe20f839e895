/*
    A minimal bit-packed bytecode machine.

    Programs flow one way:

        text  --Assembler-->  [Instruction]  --assemble-->  bytes  --Machine-->  memory

    The assembler and the machine never call each other; they meet only at
    the binary format described in [instruction].
*/

mod assembler;
pub mod error;
pub mod fileio;
mod instruction;
mod machine;
mod scanner;

pub use assembler::{assemble, assemble_with_log, Assembler, Issue};
pub use instruction::{Instruction, Opcode};
pub use machine::{Machine, Outcome, MEMORY_SIZE, SEED_ADDR, SEED_VALUE};
pub use scanner::TokenKind;

/// Parse and encode a whole program in one step, returning the byte
/// stream together with any per-line issues.
pub fn assemble_source(source: &str) -> (Vec<u8>, Vec<Issue>) {
    let mut assembler = Assembler::new(source);
    assembler.parse();
    (assemble(&assembler.instructions), assembler.issues)
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn text_to_memory() {
        let (bytecode, issues) = assemble_source("load 0 -25\nabs 0 0 1023\n");
        assert_eq!(issues, vec![]);
        let mut machine = Machine::new();
        machine.exec(&bytecode);
        assert_eq!(machine.memory[0], 25);
        assert_eq!(machine.outcomes, vec![Outcome::Applied; 2]);
    }
}
