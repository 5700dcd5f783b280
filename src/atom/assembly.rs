/*!
  The human readable textual form of an atom stream is one instruction per line: an
  opcode name, whitespace, then raw argument text running to the end of the line. This
  module parses that form and drives the encoder over it, one atom per surviving line.
*/

use std::fmt::{Display, Formatter};
use std::str::FromStr;

use log::warn;
use nom::{
  bytes::complete::take_till1,
  character::complete::space0,
  error::ErrorKind,
  sequence::pair,
  IResult
};

use super::binary::Atom;
use super::opcode::Operation;

/// A line starting with either marker (after trimming) is a comment and is skipped.
const COMMENT_MARKERS: [&str; 2] = ["//", "#"];

/// One surviving source line: either an instruction ready to encode, or a reportable,
/// non-fatal problem carrying enough context for a per-line warning.
pub enum ParsedLineSyntax<'a> {
  Instruction{
    line      : u32,
    operation : Operation,
    args      : &'a str
  },
  NotAnOperation{
    line : u32,
    name : &'a str
  }
}
// Abbreviated name internally
use ParsedLineSyntax as Syntax;

impl<'a> Display for ParsedLineSyntax<'a>{
  fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
    match self{
      Syntax::Instruction{ operation, args, .. } => {
        write!(f, "{} {}", operation, args)
      }
      Syntax::NotAnOperation{ line, name } => {
        write!(f, "Warning on line {}: {} is not an operation.", line, name)
      }
    }
  }
}

/**
  Splits one source line into its instruction token and raw argument text. Surrounding
  whitespace is trimmed; a line that is then empty or starts with a comment marker gives
  `None`. The split is on the first whitespace run, and the remainder is the argument
  text verbatim. No validation of the instruction name happens here.
*/
pub fn parse_line(line: &str) -> Option<(&str, &str)> {
  let line = line.trim();
  if line.is_empty() || COMMENT_MARKERS.iter().any(|marker| line.starts_with(marker)) {
    return None;
  }

  let split: IResult<&str, (&str, &str), (&str, ErrorKind)> =
    pair(take_till1(|c: char| c.is_whitespace()), space0)(line);
  match split {
    Ok((args, (instruction, _space))) => Some((instruction, args)),
    // Unreachable for a nonempty trimmed line, but the parser reports rather than panics.
    Err(_) => None
  }
}

/**
  Parses a whole source text into per-line syntax, one entry per surviving line. Blank
  and comment lines vanish; unrecognized instruction names are surfaced as
  `NotAnOperation` rather than silently dropped, so the caller decides how to report
  them. Line numbers are 1-based and count the skipped lines too.
*/
pub fn parse_source(text: &str) -> Vec<ParsedLineSyntax> {
  text.lines()
      .enumerate()
      .filter_map(|(index, raw)| {
        parse_line(raw).map(|(instruction, args)| {
          let line = index as u32 + 1;
          match Operation::from_str(instruction) {
            Ok(operation) => Syntax::Instruction{ line, operation, args },
            Err(_)        => Syntax::NotAnOperation{ line, name: instruction }
          }
        })
      })
      .collect()
}

/**
  Assembles a whole source text into its atom sequence, preserving line order. An
  unknown instruction is a per-line warning, never an abort: the line is skipped and the
  rest of the batch continues.
*/
pub fn assemble(text: &str) -> Vec<Atom> {
  let mut atoms = Vec::new();
  for syntax in parse_source(text) {
    match syntax {
      Syntax::Instruction{ operation, args, .. } => {
        atoms.push(Atom::new(operation, args));
      }
      Syntax::NotAnOperation{ line, name } => {
        warn!("line {}: skipping unknown opcode '{}'", line, name);
      }
    }
  }
  atoms
}


#[cfg(test)]
mod tests {
  use super::super::{decode_atom, ATOM_SIZE};
  use super::*;

  #[test]
  fn skips_blanks_and_comments(){
    assert_eq!(parse_line(""), None);
    assert_eq!(parse_line("   \t "), None);
    assert_eq!(parse_line("# a comment"), None);
    assert_eq!(parse_line("  // also a comment"), None);
  }

  #[test]
  fn splits_instruction_and_args(){
    assert_eq!(
      parse_line("INIT_SEED MyFirstProgram"),
      Some(("INIT_SEED", "MyFirstProgram"))
    );
    assert_eq!(
      parse_line("  PHI_ALLOC \t Buffer_1024  "),
      Some(("PHI_ALLOC", "Buffer_1024"))
    );
    assert_eq!(parse_line("CRAID_CHECK"), Some(("CRAID_CHECK", "")));
    // Only the first whitespace run splits; the remainder is verbatim.
    assert_eq!(parse_line("STORE_UHFS /out/a b c"), Some(("STORE_UHFS", "/out/a b c")));
  }

  #[test]
  fn surfaces_unknown_instructions(){
    let source = "INIT_SEED Alpha\nRobert 2\n\n# note\nSTORE_UHFS /output/alpha";
    let parsed = parse_source(source);
    assert_eq!(parsed.len(), 3);
    assert!(matches!(
      parsed[0],
      Syntax::Instruction{ line: 1, operation: Operation::InitSeed, .. }
    ));
    assert!(matches!(parsed[1], Syntax::NotAnOperation{ line: 2, name: "Robert" }));
    assert!(matches!(parsed[2], Syntax::Instruction{ line: 5, .. }));
  }

  #[test]
  fn assembles_in_line_order(){
    let source = "
      INIT_SEED        MyFirstProgram
      PHI_ALLOC        Buffer_1024
      FROBNICATE       Nothing
      STORE_UHFS       /output/result
    ";
    let atoms = assemble(source);
    assert_eq!(atoms.len(), 3);

    let names: Vec<String> =
      atoms.iter().map(|atom| decode_atom(atom.as_ref()).name).collect();
    assert_eq!(names, vec!["INIT_SEED", "PHI_ALLOC", "STORE_UHFS"]);

    // Concatenated, the sequence is a flat stream whose length is a multiple of 64.
    let stream: Vec<u8> =
      atoms.iter().flat_map(|atom| atom.as_ref().iter().copied()).collect();
    assert_eq!(stream.len(), atoms.len() * ATOM_SIZE);
  }
}
