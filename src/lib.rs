/*!

  `fc496` encodes human-written instruction lines into the FC-496 binary format, one
  fixed 64-byte atom per recognized instruction, and decodes such atoms back into
  (opcode name, argument text, validity), recomputing the CRAID integrity checksum.
  Atoms concatenate into a `.496` stream with no container framing; see the `atom`
  module documentation for the exact record layout.

  ```rust
  use fc496::{assemble, decode_atom};

  let atoms = assemble("INIT_SEED   MyFirstProgram\nSTORE_UHFS  /output/result");
  assert_eq!(atoms.len(), 2);

  let decoded = decode_atom(atoms[0].as_ref());
  assert_eq!(decoded.name, "INIT_SEED");
  assert_eq!(decoded.args, "MyFirstProgram");
  assert!(decoded.valid);
  ```

*/

#[macro_use] extern crate lazy_static;

mod atom;

pub use atom::{assemble, craid_checksum, decode_atom, encode_atom, parse_line,
               parse_source, Atom, DecodeFault, DecodedAtom, EncodeError, OpcodeTable,
               Operation, ParsedLineSyntax, ARGUMENT_SIZE, ATOM_HEADER, ATOM_SIZE,
               CHECKSUM_SIZE, HEADER_SIZE, OPCODES, PAYLOAD_SIZE, PHI};
