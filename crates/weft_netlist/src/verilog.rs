//! Verilog-2001 output for generated modules.
//!
//! Buses are declared `[0:width-1]` so that the leftmost character of a
//! binary literal is bit 0. That keeps case patterns readable: in `4'b0100`
//! memory bit 1 is set.

use crate::desc::{Body, CaseTable, Instance, ModuleDef};
use crate::ids::ModuleId;
use crate::module::PortRole;
use crate::registry::ModuleRegistry;
use std::io::{self, Write};
use weft_common::logic::verilog_literal;

const RULE: &str = "//-------------------------------------------";

/// Writes the banner at the top of a generated file.
pub fn write_file_header<W: Write>(f: &mut W, description: &str) -> io::Result<()> {
    writeln!(f, "{RULE}")?;
    writeln!(f, "//  Weft generated Verilog netlist")?;
    writeln!(f, "//  Description: {description}")?;
    writeln!(f, "{RULE}")?;
    writeln!(f, "`timescale 1ns / 1ps")?;
    writeln!(f)
}

/// Writes an `` `include `` of the fabric's preprocessor defines.
pub fn write_include<W: Write>(f: &mut W, path: &str) -> io::Result<()> {
    writeln!(f, "`include \"{path}\"")?;
    writeln!(f)
}

/// Writes a module definition.
///
/// Every child instance is recorded in `registry` right after its text is
/// written, so instance names (`<child>_<n>_`) count the instances already
/// printed in this parent.
pub fn write_module<W: Write>(
    f: &mut W,
    registry: &mut ModuleRegistry,
    def: &ModuleDef,
) -> io::Result<()> {
    writeln!(f, "//----- Verilog module for {} -----", def.name)?;
    writeln!(f, "module {}(", def.name)?;
    for (idx, mp) in def.ports.iter().enumerate() {
        let direction = match mp.role {
            PortRole::Global | PortRole::Input => "input",
            PortRole::Output => "output",
        };
        write!(f, "\t{direction} [0:{}] {}", mp.port.width.saturating_sub(1), mp.port.name)?;
        if idx + 1 == def.ports.len() {
            writeln!(f)?;
        } else {
            writeln!(f, ",")?;
        }
    }
    writeln!(f, ");")?;

    match &def.body {
        Body::Structural(instances) => {
            writeln!(f, "\t//----- Structure-level description -----")?;
            for instance in instances {
                write_instance(f, registry, def.id, instance)?;
            }
        }
        Body::Behavioral(table) => write_case_table(f, table)?,
    }

    writeln!(f, "endmodule")?;
    writeln!(f, "//----- END Verilog module for {} -----", def.name)?;
    writeln!(f)
}

fn write_instance<W: Write>(
    f: &mut W,
    registry: &mut ModuleRegistry,
    parent: ModuleId,
    instance: &Instance,
) -> io::Result<()> {
    let count = registry.num_instances(parent, instance.child);
    write!(f, "\t{} {}_{}_ (", instance.child_name, instance.child_name, count)?;
    for (idx, conn) in instance.connections.iter().enumerate() {
        if idx > 0 {
            write!(f, ", ")?;
        }
        if instance.explicit_port_map {
            write!(f, ".{}({})", conn.port, conn.net)?;
        } else {
            write!(f, "{}", conn.net)?;
        }
    }
    writeln!(f, ");")?;
    registry.add_child_module(parent, instance.child);
    Ok(())
}

fn write_case_table<W: Write>(f: &mut W, table: &CaseTable) -> io::Result<()> {
    writeln!(f, "\t//----- Behavioral-level description -----")?;
    writeln!(f, "\treg [0:{}] out_reg;", table.output_width.saturating_sub(1))?;
    writeln!(f, "\talways @({}, {})", table.input, table.select)?;
    writeln!(f, "\tcase ({})", table.select)?;
    for arm in &table.arms {
        writeln!(
            f,
            "\t\t{}: out_reg <= {}[{}];",
            verilog_literal(&arm.pattern),
            table.input,
            arm.input
        )?;
    }
    writeln!(f, "\t\tdefault: out_reg <= {};", verilog_literal(&table.default))?;
    writeln!(f, "\tendcase")?;
    writeln!(f, "\tassign {} = out_reg;", table.output)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::desc::{CaseArm, Connection};
    use crate::module::{ModulePort, Port};
    use weft_common::Logic;

    fn port(name: &str, width: usize, role: PortRole) -> ModulePort {
        ModulePort {
            port: Port::new(name, width),
            role,
        }
    }

    fn render(registry: &mut ModuleRegistry, def: &ModuleDef) -> String {
        let mut buf = Vec::new();
        write_module(&mut buf, registry, def).unwrap();
        String::from_utf8(buf).unwrap()
    }

    #[test]
    fn behavioral_module_text() {
        let mut reg = ModuleRegistry::new();
        let id = reg.add_module("mux_size2_basis_size2");
        let def = ModuleDef {
            id,
            name: "mux_size2_basis_size2".into(),
            ports: vec![
                port("in", 2, PortRole::Input),
                port("out", 1, PortRole::Output),
                port("mem", 1, PortRole::Input),
                port("mem_inv", 1, PortRole::Input),
            ],
            body: Body::Behavioral(CaseTable {
                input: "in".into(),
                output: "out".into(),
                select: "mem".into(),
                output_width: 1,
                arms: vec![
                    CaseArm {
                        pattern: vec![Logic::One],
                        input: 0,
                    },
                    CaseArm {
                        pattern: vec![Logic::Zero],
                        input: 1,
                    },
                ],
                default: vec![Logic::Z],
            }),
        };
        let text = render(&mut reg, &def);
        let expected = "\
//----- Verilog module for mux_size2_basis_size2 -----
module mux_size2_basis_size2(
\tinput [0:1] in,
\toutput [0:0] out,
\tinput [0:0] mem,
\tinput [0:0] mem_inv
);
\t//----- Behavioral-level description -----
\treg [0:0] out_reg;
\talways @(in, mem)
\tcase (mem)
\t\t1'b1: out_reg <= in[0];
\t\t1'b0: out_reg <= in[1];
\t\tdefault: out_reg <= 1'bz;
\tendcase
\tassign out = out_reg;
endmodule
//----- END Verilog module for mux_size2_basis_size2 -----

";
        assert_eq!(text, expected);
    }

    fn structural_def(reg: &mut ModuleRegistry, explicit: bool) -> ModuleDef {
        let id = reg.add_module("basis");
        let tgate = reg.add_module("tgate");
        let inst = |bit: usize| Instance {
            child: tgate,
            child_name: "tgate".into(),
            connections: vec![
                Connection {
                    port: "in".into(),
                    net: Port::new("in", 2).bit(bit),
                },
                Connection {
                    port: "out".into(),
                    net: Port::new("out", 1).bit(0),
                },
            ],
            explicit_port_map: explicit,
        };
        ModuleDef {
            id,
            name: "basis".into(),
            ports: vec![port("in", 2, PortRole::Input), port("out", 1, PortRole::Output)],
            body: Body::Structural(vec![inst(0), inst(1)]),
        }
    }

    #[test]
    fn structural_instances_are_numbered_and_registered() {
        let mut reg = ModuleRegistry::new();
        let def = structural_def(&mut reg, false);
        let text = render(&mut reg, &def);
        assert!(text.contains("\ttgate tgate_0_ (in[0], out[0]);\n"));
        assert!(text.contains("\ttgate tgate_1_ (in[1], out[0]);\n"));
        let tgate = reg.find_module("tgate").unwrap();
        assert_eq!(reg.num_instances(def.id, tgate), 2);
    }

    #[test]
    fn explicit_port_map_names_ports() {
        let mut reg = ModuleRegistry::new();
        let def = structural_def(&mut reg, true);
        let text = render(&mut reg, &def);
        assert!(text.contains("\ttgate tgate_0_ (.in(in[0]), .out(out[0]));\n"));
    }

    #[test]
    fn header_and_include() {
        let mut buf = Vec::new();
        write_file_header(&mut buf, "Multiplexers").unwrap();
        write_include(&mut buf, "fpga_defines.v").unwrap();
        let text = String::from_utf8(buf).unwrap();
        assert!(text.starts_with(RULE));
        assert!(text.contains("//  Description: Multiplexers\n"));
        assert!(text.contains("`include \"fpga_defines.v\"\n"));
    }
}
