/*
    Instruction layouts (little-endian, opcode in the low nibble of byte 0):

    load   5   7 bytes  [addr:4..29]  [value:32..51, signed]
    read   2   9 bytes  [addr:4..29]  [delta:32..41] [base:41..66]
    write  6   8 bytes  [addr:4..29]  [source:32..64]
    abs   10   9 bytes  [delta:4..13] [addr:13..36]  [base:41..66]

    Instructions are concatenated with no padding or delimiters; the only
    way to find a boundary is to decode forward from offset 0.
*/

use num_enum::{IntoPrimitive, TryFromPrimitive};
use strum_macros::{Display, EnumString};

#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumString, TryFromPrimitive, IntoPrimitive,
)]
#[strum(serialize_all = "lowercase")]
#[repr(u8)]
pub enum Opcode {
    Read = 2,
    Load = 5,
    Write = 6,
    Abs = 10,
}

impl Opcode {
    /// Encoded size in bytes. Fixed per opcode; the executor advances the
    /// cursor by exactly this much after decoding.
    pub fn encoded_len(&self) -> usize {
        match self {
            Opcode::Load => 7,
            Opcode::Read => 9,
            Opcode::Write => 8,
            Opcode::Abs => 9,
        }
    }

    /// Operand count of the symbolic form.
    pub fn arity(&self) -> usize {
        match self {
            Opcode::Load | Opcode::Write => 2,
            Opcode::Read | Opcode::Abs => 3,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Instruction {
    /// memory[addr] = value
    Load { addr: i64, value: i64 },
    /// memory[addr] = memory[memory[base] + delta]
    Read { addr: i64, delta: i64, base: i64 },
    /// memory[addr] = memory[source]
    Write { addr: i64, source: i64 },
    /// memory[addr] = |memory[memory[base] + delta]|
    Abs { delta: i64, addr: i64, base: i64 },
}

impl Instruction {
    pub fn opcode(&self) -> Opcode {
        match self {
            Instruction::Load { .. } => Opcode::Load,
            Instruction::Read { .. } => Opcode::Read,
            Instruction::Write { .. } => Opcode::Write,
            Instruction::Abs { .. } => Opcode::Abs,
        }
    }

    /// The first two operands in symbolic order, whatever the arity.
    /// This is what the operation log records.
    pub fn log_operands(&self) -> (i64, i64) {
        match *self {
            Instruction::Load { addr, value } => (addr, value),
            Instruction::Read { addr, delta, .. } => (addr, delta),
            Instruction::Write { addr, source } => (addr, source),
            Instruction::Abs { delta, addr, .. } => (delta, addr),
        }
    }

    pub fn encode(&self) -> Vec<u8> {
        let opcode = self.opcode();
        match *self {
            Instruction::Load { addr, value } => pack(opcode, &[(addr, 4), (value, 32)]),
            Instruction::Read { addr, delta, base } => {
                pack(opcode, &[(addr, 4), (delta, 32), (base, 41)])
            }
            Instruction::Write { addr, source } => pack(opcode, &[(addr, 4), (source, 32)]),
            Instruction::Abs { delta, addr, base } => {
                pack(opcode, &[(delta, 4), (addr, 13), (base, 41)])
            }
        }
    }

    /// Decode one instruction from the head of `window`. `None` means the
    /// low nibble of the first byte is not a known opcode. A window shorter
    /// than the instruction's nominal length decodes with the missing high
    /// bytes read as zero.
    pub fn decode(window: &[u8]) -> Option<Instruction> {
        let opcode = Opcode::try_from(window.first()? & 0x0F).ok()?;
        let raw = read_le(window, opcode.encoded_len());
        Some(match opcode {
            Opcode::Load => Instruction::Load {
                addr: field(raw, 4, 25),
                value: signed_field(raw, 32, 19),
            },
            Opcode::Read => Instruction::Read {
                addr: field(raw, 4, 25),
                delta: field(raw, 32, 9),
                base: field(raw, 41, 25),
            },
            Opcode::Write => Instruction::Write {
                addr: field(raw, 4, 25),
                source: field(raw, 32, 32),
            },
            Opcode::Abs => Instruction::Abs {
                delta: field(raw, 4, 9),
                addr: field(raw, 13, 23),
                base: field(raw, 41, 25),
            },
        })
    }
}

/// Seed the accumulator with the opcode nibble, OR each operand in at its
/// field offset, keep the low `encoded_len` bytes. Operands are not masked
/// to their field widths: an oversized operand bleeds into neighboring
/// fields, exactly as the reference encoder behaves.
fn pack(opcode: Opcode, fields: &[(i64, u32)]) -> Vec<u8> {
    let mut bits = u8::from(opcode) as i128;
    for &(value, offset) in fields {
        bits |= (value as i128) << offset;
    }
    bits.to_le_bytes()[..opcode.encoded_len()].to_vec()
}

fn read_le(window: &[u8], len: usize) -> u128 {
    let mut buf = [0u8; 16];
    let take = window.len().min(len);
    buf[..take].copy_from_slice(&window[..take]);
    u128::from_le_bytes(buf)
}

fn field(raw: u128, offset: u32, width: u32) -> i64 {
    ((raw >> offset) & ((1u128 << width) - 1)) as i64
}

/// Like [field], but two's-complement: the field's top bit is the sign.
/// Only load's constant uses this; it is the one field that carries a
/// value rather than an address.
fn signed_field(raw: u128, offset: u32, width: u32) -> i64 {
    let sign = 1i64 << (width - 1);
    (field(raw, offset, width) ^ sign) - sign
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn encode_load() {
        let bytes = Instruction::Load { addr: 229, value: 979 }.encode();
        assert_eq!(bytes, vec![0x55, 0x0E, 0x00, 0x00, 0xD3, 0x03, 0x00]);
    }

    #[test]
    fn encode_read() {
        let bytes = Instruction::Read { addr: 92, delta: 4, base: 106 }.encode();
        assert_eq!(bytes, vec![0xC2, 0x05, 0x00, 0x00, 0x04, 0xD4, 0x00, 0x00, 0x00]);
    }

    #[test]
    fn encode_write() {
        let bytes = Instruction::Write { addr: 970, source: 629 }.encode();
        assert_eq!(bytes, vec![0xA6, 0x3C, 0x00, 0x00, 0x75, 0x02, 0x00, 0x00]);
    }

    #[test]
    fn encode_abs() {
        let bytes = Instruction::Abs { delta: 226, addr: 178, base: 487 }.encode();
        assert_eq!(bytes, vec![0x2A, 0x4E, 0x16, 0x00, 0x00, 0xCE, 0x03, 0x00, 0x00]);
    }

    #[test]
    fn load_bit_layout() {
        let bytes = Instruction::Load { addr: 5, value: 970 }.encode();
        assert_eq!(bytes.len(), 7);
        let raw = read_le(&bytes, 7);
        assert_eq!(raw & 0x0F, 5);
        assert_eq!((raw >> 4) & 0x1FF_FFFF, 5);
        assert_eq!((raw >> 32) & 0x7_FFFF, 970);
    }

    #[test]
    fn round_trip() {
        let instructions = [
            Instruction::Load { addr: 229, value: 979 },
            Instruction::Load { addr: 1, value: -20 },
            Instruction::Read { addr: 92, delta: 4, base: 106 },
            Instruction::Write { addr: 970, source: 629 },
            Instruction::Abs { delta: 226, addr: 178, base: 487 },
        ];
        for instruction in instructions {
            assert_eq!(Instruction::decode(&instruction.encode()), Some(instruction));
        }
    }

    #[test]
    fn decode_unknown_nibble() {
        assert_eq!(Instruction::decode(&[0x07]), None);
        assert_eq!(Instruction::decode(&[]), None);
    }

    #[test]
    fn decode_short_window() {
        // A truncated tail decodes with the missing bytes as zero.
        let mut bytes = Instruction::Load { addr: 3, value: 979 }.encode();
        bytes.truncate(4);
        assert_eq!(
            Instruction::decode(&bytes),
            Some(Instruction::Load { addr: 3, value: 0 })
        );
    }

    #[test]
    fn mnemonics() {
        use std::str::FromStr;
        assert_eq!(Opcode::from_str("load"), Ok(Opcode::Load));
        assert_eq!(Opcode::from_str("abs"), Ok(Opcode::Abs));
        assert!(Opcode::from_str("jump").is_err());
        assert_eq!(Opcode::Write.to_string(), "write");
    }
}
