/*!
  A demonstration driver: assembles a built-in sample program and prints its disassembly
  as a table. The source text deliberately contains comment lines, a blank line, and an
  unknown opcode to exercise the skip paths.
*/

#[macro_use] extern crate lazy_static;
#[macro_use] extern crate prettytable;

use env_logger::Env;
use prettytable::{format as TableFormat, Table};

use fc496::{assemble, decode_atom, ATOM_SIZE, OPCODES};

lazy_static! {
  static ref TABLE_DISPLAY_FORMAT: TableFormat::TableFormat =
    TableFormat::FormatBuilder::new()
      .column_separator('│')
      .borders(' ')
      .separator(
        TableFormat::LinePosition::Title,
        TableFormat::LineSeparator::new('─', '┼', ' ', ' ')
      )
      .separator(
        TableFormat::LinePosition::Bottom,
        TableFormat::LineSeparator::new('─', '┴', ' ', ' ')
      )
      .padding(1, 1)
      .build();
}

fn main() {
  env_logger::Builder::from_env(Env::default().default_filter_or("warn")).init();

  let text = "INIT_SEED        MyFirstProgram
PHI_ALLOC        Buffer_1024
PI_CYCLE         StartTime
# timing starts above
LES_ANALYZE      EntropyCheck
GKF_EVOLVE       MutationRate_0.618
Robert           2

// finally persist
STORE_UHFS       /output/result
";

  println!("Opcodes:");
  for (name, code) in OPCODES.iter(){
    println!("  {:<12} 0x{:02X}", name, code);
  }
  println!();

  let atoms = assemble(text);

  let mut table = Table::new();
  table.set_format(*TABLE_DISPLAY_FORMAT);
  table.set_titles(row![ub->"Atom", ub->"Opcode", ub->"Argument", ub->"CRAID"]);

  for (index, atom) in atoms.iter().enumerate(){
    let decoded = decode_atom(atom.as_ref());
    let status = match decoded.valid {
      true  => "ok",
      false => "BAD"
    };
    table.add_row(row![r->format!("{}", index + 1), decoded.name, decoded.args, status]);
  }
  table.printstd();

  println!("{} atoms, {} bytes.", atoms.len(), atoms.len() * ATOM_SIZE);
}
