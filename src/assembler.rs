use std::io::Write;
use std::str::FromStr;

use logos::{Lexer, Logos};

use crate::{
    error::{assembler::*, fileio::FileIOResult},
    fileio::OperationLog,
    Instruction, Opcode, TokenKind,
};

/// A line that could not be turned into an instruction. The assembler is
/// skip-and-continue: issues are collected, never silently dropped, and
/// the rest of the program still assembles.
#[derive(Debug, Clone, PartialEq)]
pub struct Issue {
    pub line: usize,
    pub error: AssembleError,
}

pub struct Assembler<'src> {
    pub lexer: Lexer<'src, TokenKind>,
    pub instructions: Vec<Instruction>,
    pub issues: Vec<Issue>,
}

impl<'src> Assembler<'src> {
    pub fn new(source: &'src str) -> Self {
        Self {
            lexer: TokenKind::lexer(source),
            instructions: vec![],
            issues: vec![],
        }
    }

    /// Parse every line of the source into `instructions`, recording one
    /// [Issue] per unparseable line. Blank lines are skipped.
    pub fn parse(&mut self) {
        let mut line_no = 1;
        let mut line: Vec<TokenKind> = vec![];
        loop {
            match self.lexer.next() {
                Some(TokenKind::Newline) => {
                    self.flush_line(&mut line, line_no);
                    line_no += 1;
                }
                Some(token) => line.push(token),
                None => {
                    self.flush_line(&mut line, line_no);
                    break;
                }
            }
        }
    }

    fn flush_line(&mut self, line: &mut Vec<TokenKind>, line_no: usize) {
        if let Some((first, rest)) = line.split_first() {
            match Self::instruction(first, rest) {
                Ok(instruction) => self.instructions.push(instruction),
                Err(error) => self.issues.push(Issue { line: line_no, error }),
            }
        }
        line.clear();
    }

    fn instruction(first: &TokenKind, rest: &[TokenKind]) -> AssembleResult<Instruction> {
        let name = match first {
            TokenKind::Ident(name) => name,
            token => return Err(AssembleError::ExpectedMnemonic(token.clone())),
        };
        let opcode = Opcode::from_str(&name.to_lowercase())
            .map_err(|_| AssembleError::UnsupportedOperation(name.clone()))?;

        let mut operands = Vec::with_capacity(rest.len());
        for token in rest {
            match token {
                TokenKind::Int(value) => operands.push(*value),
                token => return Err(AssembleError::StrayToken(token.clone())),
            }
        }
        if operands.len() != opcode.arity() {
            return Err(AssembleError::WrongOperandCount {
                operation: opcode,
                expected: opcode.arity(),
                received: operands.len(),
            });
        }

        Ok(match opcode {
            Opcode::Load => Instruction::Load {
                addr: operands[0],
                value: operands[1],
            },
            Opcode::Read => Instruction::Read {
                addr: operands[0],
                delta: operands[1],
                base: operands[2],
            },
            Opcode::Write => Instruction::Write {
                addr: operands[0],
                source: operands[1],
            },
            Opcode::Abs => Instruction::Abs {
                delta: operands[0],
                addr: operands[1],
                base: operands[2],
            },
        })
    }
}

/// Concatenate each instruction's encoding, in input order. No header,
/// no count, no delimiters.
pub fn assemble(instructions: &[Instruction]) -> Vec<u8> {
    instructions.iter().flat_map(Instruction::encode).collect()
}

/// [assemble], mirroring one record per instruction to the operation log.
pub fn assemble_with_log<W: Write>(
    instructions: &[Instruction],
    log: &mut OperationLog<W>,
) -> FileIOResult<Vec<u8>> {
    let mut bytecode = vec![];
    for instruction in instructions {
        bytecode.extend(instruction.encode());
        log.record(instruction)?;
    }
    Ok(bytecode)
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn parse_program() {
        let mut assembler = Assembler::new("load 229 979\nread 92 4 106\n");
        assembler.parse();
        assert_eq!(assembler.issues, vec![]);
        assert_eq!(
            assembler.instructions,
            vec![
                Instruction::Load { addr: 229, value: 979 },
                Instruction::Read { addr: 92, delta: 4, base: 106 },
            ]
        );
    }

    #[test]
    fn assemble_is_concatenation() {
        let mut assembler = Assembler::new("write 970 629\nabs 226 178 487");
        assembler.parse();
        let bytecode = assemble(&assembler.instructions);
        assert_eq!(
            bytecode,
            vec![
                0xA6, 0x3C, 0x00, 0x00, 0x75, 0x02, 0x00, 0x00, // write
                0x2A, 0x4E, 0x16, 0x00, 0x00, 0xCE, 0x03, 0x00, 0x00, // abs
            ]
        );
    }

    #[test]
    fn comments_blanks_and_case() {
        let mut assembler = Assembler::new("# vector seed\n\nLOAD 0 -25\n");
        assembler.parse();
        assert_eq!(assembler.issues, vec![]);
        assert_eq!(
            assembler.instructions,
            vec![Instruction::Load { addr: 0, value: -25 }]
        );
    }

    #[test]
    fn unknown_operation_skips_line_only() {
        let mut assembler = Assembler::new("jump 1 2\nload 3 4\n");
        assembler.parse();
        assert_eq!(
            assembler.issues,
            vec![Issue {
                line: 1,
                error: AssembleError::UnsupportedOperation("jump".into()),
            }]
        );
        // The bad line emits no bytes; the rest of the program survives.
        assert_eq!(
            assemble(&assembler.instructions),
            Instruction::Load { addr: 3, value: 4 }.encode()
        );
    }

    #[test]
    fn wrong_operand_count() {
        let mut assembler = Assembler::new("abs 1\n");
        assembler.parse();
        assert_eq!(
            assembler.issues,
            vec![Issue {
                line: 1,
                error: AssembleError::WrongOperandCount {
                    operation: Opcode::Abs,
                    expected: 3,
                    received: 1,
                },
            }]
        );
    }

    #[test]
    fn stray_token() {
        let mut assembler = Assembler::new("load five 970\n");
        assembler.parse();
        assert_eq!(
            assembler.issues,
            vec![Issue {
                line: 1,
                error: AssembleError::StrayToken(TokenKind::Ident("five".into())),
            }]
        );
    }
}
