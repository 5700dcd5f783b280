/*!

  An atom is the unit record of the FC-496 format: a fixed 64-byte block holding one
  encoded instruction. Every atom has the same shape, and atoms are concatenated with no
  container header, count field, or end marker, so the length of a `.496` stream is
  externally a multiple of 64 bytes. The sizes of the atom's fields are as follows:

    Header fingerprint:  8 bytes, big-endian, the low 64 bits of ⌊φ × 10^16⌋
    Opcode:              1 byte
    Argument:           53 bytes, UTF-8, zero-padded on the right
    CRAID checksum:      2 bytes, big-endian, over opcode + padded argument

  The header fingerprint identifies the format, not the record: it is identical in every
  atom ever produced. The checksum covers only the 54-byte payload (opcode + argument),
  never the header.

  One design decision that needed to be made is whether an `Atom` should store its decoded
  components (operation, argument string) or its wire bytes. Since an atom is immutable
  once constructed and its only consumers are storage, transport, and the disassembler,
  storing anything but the 64 wire bytes would duplicate state that the decoder can
  recover on demand. An `Atom` is therefore just a `[u8; 64]` with the layout above, and
  the decoder is the single source of truth for reading one.

*/

mod assembly;
mod binary;
mod checksum;
mod opcode;

pub use assembly::{assemble, parse_line, parse_source, ParsedLineSyntax};
pub use binary::{decode_atom, encode_atom, Atom, DecodeFault, DecodedAtom, EncodeError,
                 ATOM_HEADER, ATOM_SIZE};
pub use checksum::craid_checksum;
pub use opcode::{OpcodeTable, Operation, OPCODES};

/// The golden ratio, source of both the header fingerprint and the checksum weighting.
pub const PHI: f64 = 1.618033988749895;

/// Size in bytes of the header fingerprint field.
pub const HEADER_SIZE: usize = 8;
/// Maximum size in bytes of the UTF-8 argument field.
pub const ARGUMENT_SIZE: usize = 53;
/// Size in bytes of the checksummed region: one opcode byte plus the padded argument.
pub const PAYLOAD_SIZE: usize = 1 + ARGUMENT_SIZE;
/// Size in bytes of the CRAID checksum field.
pub const CHECKSUM_SIZE: usize = 2;
