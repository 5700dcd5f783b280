/*!
  This module is responsible for the encoding and decoding of binary atoms.

  Encoding cannot fail for a table-defined operation: any argument text fits after
  truncation, and the result is always exactly 64 bytes. Decoding is a total function
  over byte strings: it never panics, whatever the input, and reports problems as
  ordinary data in the result instead of raising them.

  Note that the decoder never validates the header fingerprint against `ATOM_HEADER` —
  a record with a damaged header but an intact payload still decodes as valid. That
  matches the original format tooling, which treats the header as informational. Checking
  it would be a format change, not a bug fix, so the behavior is preserved and flagged
  here instead.
*/
use std::str::FromStr;

use thiserror::Error;

use super::checksum::craid_checksum;
use super::opcode::{Operation, OPCODES};
use super::{ARGUMENT_SIZE, CHECKSUM_SIZE, HEADER_SIZE, PAYLOAD_SIZE, PHI};

/// Total size in bytes of an encoded atom.
pub const ATOM_SIZE: usize = HEADER_SIZE + PAYLOAD_SIZE + CHECKSUM_SIZE;

/// The header fingerprint: the low 64 bits of ⌊φ × 10^16⌋, which is 16180339887498950,
/// or `0x00397BEEF356E6C6`. Identical in every atom in every program — it fingerprints
/// the format, it does not carry per-record data.
pub const ATOM_HEADER: u64 = (PHI * 1.0e16) as u64;

/// One encoded instruction: a fixed 64-byte record. Immutable once constructed; the
/// encoder is the only way to make one.
#[derive(Clone, Debug, Eq, PartialEq, Hash)]
pub struct Atom {
  bytes: [u8; ATOM_SIZE]
}

impl Atom {

  /// Encodes a validated (operation, argument) pair. Infallible: the operation is
  /// table-defined by construction, and any argument text fits after truncation.
  pub fn new(operation: Operation, args: &str) -> Atom {
    let mut bytes = [0u8; ATOM_SIZE];
    bytes[..HEADER_SIZE].copy_from_slice(&ATOM_HEADER.to_be_bytes());
    bytes[HEADER_SIZE] = operation.code();
    let argument = fixed_width_field(args.as_bytes(), ARGUMENT_SIZE);
    bytes[HEADER_SIZE + 1..HEADER_SIZE + PAYLOAD_SIZE].copy_from_slice(&argument);
    let checksum = craid_checksum(&bytes[HEADER_SIZE..HEADER_SIZE + PAYLOAD_SIZE]);
    bytes[ATOM_SIZE - CHECKSUM_SIZE..].copy_from_slice(&checksum.to_be_bytes());
    Atom{ bytes }
  }

  /// The wire bytes of the atom.
  pub fn as_bytes(&self) -> &[u8; ATOM_SIZE] {
    &self.bytes
  }
}

impl AsRef<[u8]> for Atom {
  fn as_ref(&self) -> &[u8] {
    &self.bytes
  }
}

/// Truncates `bytes` to at most `width` bytes and right-pads with zero bytes to exactly
/// `width`. Truncation is bytewise, not character-boundary aware: a multi-byte UTF-8
/// character straddling the cut is split.
fn fixed_width_field(bytes: &[u8], width: usize) -> Vec<u8> {
  let mut field = bytes[..bytes.len().min(width)].to_vec();
  field.resize(width, 0);
  // A wrong width here is a defect in the codec itself, not a caller error.
  assert_eq!(field.len(), width, "field is {} bytes instead of {}", field.len(), width);
  field
}

/// The one way encoding can fail: an opcode name with no table entry. No partial atom is
/// produced. A batch caller reports the line and continues.
#[derive(Error, Clone, Debug, Eq, PartialEq)]
pub enum EncodeError {
  #[error("unknown opcode: {0}")]
  UnknownOpcode(String)
}

/// Encodes one instruction from its source form: an opcode name and raw argument text.
pub fn encode_atom(opcode_name: &str, args: &str) -> Result<Atom, EncodeError> {
  match Operation::from_str(opcode_name) {
    Ok(operation) => Ok(Atom::new(operation, args)),
    Err(_)        => Err(EncodeError::UnknownOpcode(opcode_name.to_string()))
  }
}

/// A decode problem, carried as data in the result rather than raised.
#[derive(Error, Clone, Copy, Debug, Eq, PartialEq)]
pub enum DecodeFault {
  #[error("wrong size: {actual} bytes instead of 64")]
  SizeMismatch{ actual: usize },
  #[error("checksum mismatch: stored 0x{stored:04X}, computed 0x{computed:04X}")]
  ChecksumMismatch{ stored: u16, computed: u16 }
}

/// The decoded form of an atom. `valid` is `false` exactly when `fault` is set. On a
/// checksum mismatch the opcode name and argument are still reported best-effort, so a
/// caller can inspect the suspect data.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct DecodedAtom {
  pub name  : String,
  pub args  : String,
  pub valid : bool,
  pub fault : Option<DecodeFault>
}

/// Decodes a record back into (opcode name, argument text, validity). Total: any byte
/// string gives a well-formed result, never a panic.
pub fn decode_atom(record: &[u8]) -> DecodedAtom {
  if record.len() != ATOM_SIZE {
    return DecodedAtom{
      name  : "INVALID".to_string(),
      args  : String::new(),
      valid : false,
      fault : Some(DecodeFault::SizeMismatch{ actual: record.len() })
    };
  }

  // Bytes 0–7 are the header fingerprint, deliberately unchecked. See the module docs.
  let payload  = &record[HEADER_SIZE..HEADER_SIZE + PAYLOAD_SIZE];
  let stored   = u16::from_be_bytes([record[ATOM_SIZE - 2], record[ATOM_SIZE - 1]]);
  let computed = craid_checksum(payload);

  // The argument is the payload minus the opcode byte, with the zero padding stripped.
  let argument = &payload[1..];
  let end = argument.iter().rposition(|&byte| byte != 0).map_or(0, |index| index + 1);

  let fault = match stored == computed {
    true  => None,
    false => Some(DecodeFault::ChecksumMismatch{ stored, computed })
  };

  DecodedAtom{
    name  : OPCODES.code_to_name(payload[0]),
    args  : String::from_utf8_lossy(&argument[..end]).into_owned(),
    valid : fault.is_none(),
    fault
  }
}
