
use bimap::BiMap;
use num_enum::{IntoPrimitive, TryFromPrimitive};
use strum::IntoEnumIterator;
use strum_macros::{Display as StrumDisplay, EnumIter, EnumString, IntoStaticStr};

/**
  Opcodes of the FC-496 instruction set.

  Rust stores enum variants as bytes. The wire byte of each opcode is given explicitly as
  the variant's discriminant, so the enum is the single definition of the instruction
  set: `strum` derives the name direction, `num_enum` the byte direction, and the opcode
  table below is built from it. The order the opcodes are listed is the order they are
  presented to callers enumerating the table, so it is significant.
*/
#[derive(
StrumDisplay, IntoStaticStr, EnumString, EnumIter, TryFromPrimitive, IntoPrimitive,
Clone,        Copy,          Eq, PartialEq,  Debug,            Hash
)]
#[repr(u8)]
pub enum Operation {
  #[strum(serialize = "INIT_SEED")]
  InitSeed   = 0xA1,  // init_seed( program_name )
  #[strum(serialize = "PHI_ALLOC")]
  PhiAlloc   = 0xB2,  // phi_alloc( buffer_spec )
  #[strum(serialize = "PI_CYCLE")]
  PiCycle    = 0xC3,  // pi_cycle( timer_label )
  #[strum(serialize = "LES_ANALYZE")]
  LesAnalyze = 0xD4,  // les_analyze( subject )
  #[strum(serialize = "GKF_EVOLVE")]
  GkfEvolve  = 0xE5,  // gkf_evolve( rate_spec )
  #[strum(serialize = "CRAID_CHECK")]
  CraidCheck = 0xF6,  // craid_check( subject )
  #[strum(serialize = "STORE_UHFS")]
  StoreUhfs  = 0xFF,  // store_uhfs( path )
}

impl Operation{
  /// The wire byte of the opcode.
  pub fn code(&self) -> u8 {
    Into::<u8>::into(*self)
  }

  /// The source-text name of the opcode.
  pub fn name(&self) -> &'static str {
    Into::<&'static str>::into(*self)
  }
}

/**
  The opcode table is the bidirectional mapping between operation names and their wire
  bytes. It is really just a convenience wrapper around a `BiMap`, built once from
  `Operation` at startup and never mutated afterwards, so any number of concurrent
  readers can share it without coordination.

  The reverse direction is total over the whole byte domain: a byte with no table entry
  maps to the placeholder form `UNKNOWN_0x%02X` rather than failing.
*/
pub struct OpcodeTable{
  table: BiMap<&'static str, u8>
}

impl OpcodeTable{

  fn new() -> OpcodeTable {
    let mut table = BiMap::new();
    for operation in Operation::iter(){
      table.insert(operation.name(), operation.code());
    }
    OpcodeTable{ table }
  }

  /// Maps an opcode name to its wire byte. Names not in the table give `None`; whether
  /// that is an error is the caller's decision.
  pub fn name_to_code(&self, name: &str) -> Option<u8>{
    self.table.get_by_left(name).copied()
  }

  /// Maps a wire byte to its opcode name, falling back to `UNKNOWN_0x%02X` for bytes
  /// with no table entry. Never fails.
  pub fn code_to_name(&self, code: u8) -> String{
    match self.table.get_by_right(&code) {
      Some(name) => (*name).to_string(),
      None       => format!("UNKNOWN_0x{:02X}", code)
    }
  }

  /// The (name, byte) pairs in definition order. The `BiMap` cannot provide a stable
  /// order, so iteration goes through the enum instead.
  pub fn iter(&self) -> impl Iterator<Item=(&'static str, u8)>{
    Operation::iter().map(|operation| (operation.name(), operation.code()))
  }
}

lazy_static! {
  /// The process-wide opcode table, read-only for the process lifetime.
  pub static ref OPCODES: OpcodeTable = OpcodeTable::new();
}


#[cfg(test)]
mod tests {
  use std::str::FromStr;

  use super::*;

  #[test]
  fn forward_and_reverse(){
    assert_eq!(OPCODES.name_to_code("INIT_SEED"), Some(0xA1));
    assert_eq!(OPCODES.name_to_code("STORE_UHFS"), Some(0xFF));
    assert_eq!(OPCODES.name_to_code("BOGUS_OP"), None);
    assert_eq!(OPCODES.code_to_name(0xA1), "INIT_SEED");
    assert_eq!(OPCODES.code_to_name(0xF6), "CRAID_CHECK");
  }

  #[test]
  fn reverse_is_total(){
    for code in 0u8..=255 {
      let name = OPCODES.code_to_name(code);
      match OPCODES.name_to_code(&name) {
        Some(mapped) => assert_eq!(mapped, code),
        None         => assert_eq!(name, format!("UNKNOWN_0x{:02X}", code))
      }
    }
  }

  #[test]
  fn definition_order(){
    let names: Vec<&str> = OPCODES.iter().map(|(name, _)| name).collect();
    assert_eq!(
      names,
      vec!["INIT_SEED", "PHI_ALLOC", "PI_CYCLE", "LES_ANALYZE",
           "GKF_EVOLVE", "CRAID_CHECK", "STORE_UHFS"]
    );
  }

  #[test]
  fn name_parses_to_operation(){
    assert_eq!(Operation::from_str("GKF_EVOLVE"), Ok(Operation::GkfEvolve));
    assert!(Operation::from_str("gkf_evolve").is_err());
    assert_eq!(Operation::GkfEvolve.to_string(), "GKF_EVOLVE");
  }

  #[test]
  fn byte_converts_to_operation(){
    use std::convert::TryFrom;
    assert_eq!(Operation::try_from(0xB2u8).ok(), Some(Operation::PhiAlloc));
    assert_eq!(Operation::try_from(0x00u8).ok(), None);
    assert_eq!(Operation::PhiAlloc.code(), 0xB2);
  }
}
