//! End-to-end tests: fabric description in, `muxes.v` out.

use weft_circuit::CircuitLibrary;
use weft_config::{load_config_from_str, resolve_mux_usages, SramOrganizationKind};
use weft_diagnostics::{DiagnosticSink, Severity};
use weft_mux::MuxLibrary;
use weft_netlist::{
    generate_mux_submodules, register_primitive_modules, write_mux_submodules, GenError,
    ModuleRegistry, MuxSubmoduleOptions, MuxSubmoduleReport, PortRole, SramOrganization,
};

const TGATE: &str = r#"
[[circuit_model]]
name = "tgate"
kind = "pass_gate"

[[circuit_model.port]]
name = "in"
kind = "input"

[[circuit_model.port]]
name = "sel"
kind = "input"

[[circuit_model.port]]
name = "selb"
kind = "input"

[[circuit_model.port]]
name = "out"
kind = "output"
"#;

fn mux_model(name: &str, extra: &str) -> String {
    format!(
        r#"
[[circuit_model]]
name = "{name}"
kind = "mux"
pass_gate = "tgate"
{extra}

[[circuit_model.port]]
name = "sram"
kind = "sram"
size = 4
"#
    )
}

struct Run {
    text: String,
    report: MuxSubmoduleReport,
    registry: ModuleRegistry,
    sink: DiagnosticSink,
}

fn run(toml: &str, options: &MuxSubmoduleOptions) -> Result<Run, GenError> {
    let config = load_config_from_str(toml).unwrap();
    let catalog = CircuitLibrary::from_config(&config).unwrap();
    let usages = resolve_mux_usages(&config).unwrap();
    let muxes = MuxLibrary::from_usages(&catalog, &usages).unwrap();
    let mut registry = ModuleRegistry::new();
    register_primitive_modules(&mut registry, &catalog);
    let sink = DiagnosticSink::new();
    let mut buf = Vec::new();
    let report = write_mux_submodules(&mut buf, &mut registry, &muxes, &catalog, options, &sink)?;
    Ok(Run {
        text: String::from_utf8(buf).unwrap(),
        report,
        registry,
        sink,
    })
}

#[test]
fn one_level_four_input_behavioral() {
    let toml = format!(
        "{TGATE}{}\n[[fabric.mux]]\nmodel = \"mux_1level\"\nsizes = [4]\n",
        mux_model("mux_1level", "structure = \"one_level\"")
    );
    let run = run(&toml, &MuxSubmoduleOptions::default()).unwrap();
    assert_eq!(run.report.generated, 1);

    let module = run.registry.find_module("mux_1level_size4_basis_size4").unwrap();
    let ports: Vec<(&str, usize, PortRole)> = run
        .registry
        .ports(module)
        .iter()
        .map(|p| (p.port.name.as_str(), p.port.width, p.role))
        .collect();
    assert_eq!(
        ports,
        vec![
            ("in", 4, PortRole::Input),
            ("out", 1, PortRole::Output),
            ("mem", 4, PortRole::Input),
            ("mem_inv", 4, PortRole::Input),
        ]
    );

    let cases: Vec<&str> = run
        .text
        .lines()
        .filter(|l| l.contains("out_reg <="))
        .map(str::trim)
        .collect();
    assert_eq!(
        cases,
        vec![
            "4'b1000: out_reg <= in[0];",
            "4'b0100: out_reg <= in[1];",
            "4'b0010: out_reg <= in[2];",
            "4'b0001: out_reg <= in[3];",
            "default: out_reg <= 1'bz;",
        ]
    );
    assert!(run.text.contains("\tassign out = out_reg;\n"));
}

#[test]
fn tree_structural_instances_match_edges() {
    let toml = format!(
        "{TGATE}{}\n[[fabric.mux]]\nmodel = \"mux_tree\"\nsizes = [8]\n",
        mux_model("mux_tree", "structural_verilog = true")
    );
    let run = run(&toml, &MuxSubmoduleOptions::default()).unwrap();
    assert_eq!(run.report.generated, 1);
    assert!(run.text.contains("\ttgate tgate_0_ (in[0], mem[0], mem_inv[0], out[0]);\n"));
    assert!(run.text.contains("\ttgate tgate_1_ (in[1], mem_inv[0], mem[0], out[0]);\n"));

    let basis = run.registry.find_module("mux_tree_size8_basis_size2").unwrap();
    let tgate = run.registry.find_module("tgate").unwrap();
    assert_eq!(run.registry.num_instances(basis, tgate), 2);
    let mem_width = run.registry.ports(basis)[2].port.width;
    let mem_inv_width = run.registry.ports(basis)[3].port.width;
    assert_eq!((mem_width, mem_inv_width), (1, 1));
}

#[test]
fn shared_branches_are_written_once_per_mux() {
    let toml = format!(
        "{TGATE}{}\n[[fabric.mux]]\nmodel = \"mux_ml\"\nsizes = [5, 9, 5]\n",
        mux_model("mux_ml", "structure = \"multi_level\"\nnum_levels = 2")
    );
    let run = run(&toml, &MuxSubmoduleOptions::default()).unwrap();
    // size 5 splits into 2- and 3-input branches, size 9 into 3-input ones.
    assert_eq!(run.report.generated, 3);
    for name in [
        "mux_ml_size5_basis_size2",
        "mux_ml_size5_basis_size3",
        "mux_ml_size9_basis_size3",
    ] {
        assert_eq!(run.text.matches(&format!("module {name}(")).count(), 1, "{name}");
    }
}

#[test]
fn output_is_deterministic() {
    let toml = format!(
        "{TGATE}{}{}\n[[fabric.mux]]\nmodel = \"mux_tree\"\nsizes = [4, 12]\n\n[[fabric.mux]]\nmodel = \"mux_ml\"\nsizes = [16]\n",
        mux_model("mux_tree", ""),
        mux_model("mux_ml", "structure = \"multi_level\"\nnum_levels = 2")
    );
    let first = run(&toml, &MuxSubmoduleOptions::default()).unwrap();
    let second = run(&toml, &MuxSubmoduleOptions::default()).unwrap();
    assert_eq!(first.text, second.text);
    assert_eq!(first.report, second.report);
}

#[test]
fn header_and_defines_precede_modules() {
    let toml = format!(
        "{TGATE}{}\n[[fabric.mux]]\nmodel = \"mux_tree\"\nsizes = [2]\n",
        mux_model("mux_tree", "")
    );
    let options = MuxSubmoduleOptions {
        defines_file: Some("SRC/fpga_defines.v".into()),
        ..Default::default()
    };
    let run = run(&toml, &options).unwrap();
    let include = run.text.find("`include \"SRC/fpga_defines.v\"").unwrap();
    let module = run.text.find("module ").unwrap();
    assert!(run.text.starts_with("//----"));
    assert!(include < module);
}

#[test]
fn rram_mux_warns_and_writes_nothing() {
    let toml = format!(
        "{TGATE}{}\n[[fabric.mux]]\nmodel = \"mux_rram\"\nsizes = [4, 8]\n",
        mux_model("mux_rram", "design_technology = \"rram\"")
    );
    let run = run(&toml, &MuxSubmoduleOptions::default()).unwrap();
    assert_eq!(run.report.generated, 0);
    assert_eq!(run.report.not_implemented, 2);
    assert!(!run.text.contains("module "));
    let diags = run.sink.take_all();
    assert_eq!(diags.len(), 2);
    assert!(diags.iter().all(|d| d.severity == Severity::Warning));
    assert_eq!(diags[0].code.to_string(), "W101");
}

#[test]
fn unknown_technology_aborts() {
    let toml = format!(
        "{TGATE}{}\n[[fabric.mux]]\nmodel = \"mux_x\"\nsizes = [4]\n",
        mux_model("mux_x", "design_technology = \"fefet\"")
    );
    let err = run(&toml, &MuxSubmoduleOptions::default()).err().unwrap();
    assert_eq!(err.to_diagnostic().code.to_string(), "E101");
}

#[test]
fn mux2_cell_branches_are_essential() {
    let toml = r#"
[[circuit_model]]
name = "mux2"
kind = "gate"
gate_type = "mux2"

[[circuit_model]]
name = "mux_cells"
kind = "mux"
pass_gate = "mux2"

[[circuit_model.port]]
name = "sram"
kind = "sram"

[[fabric.mux]]
model = "mux_cells"
sizes = [8]
"#;
    let run = run(toml, &MuxSubmoduleOptions::default()).unwrap();
    assert_eq!(run.report.essential, 1);
    assert_eq!(run.report.generated, 0);
}

#[test]
fn rerun_on_same_registry_skips() {
    let toml = format!(
        "{TGATE}{}\n[[fabric.mux]]\nmodel = \"mux_tree\"\nsizes = [4]\n",
        mux_model("mux_tree", "")
    );
    let config = load_config_from_str(&toml).unwrap();
    let catalog = CircuitLibrary::from_config(&config).unwrap();
    let muxes = MuxLibrary::from_usages(&catalog, &resolve_mux_usages(&config).unwrap()).unwrap();
    let mut registry = ModuleRegistry::new();
    register_primitive_modules(&mut registry, &catalog);
    let sink = DiagnosticSink::new();
    let options = MuxSubmoduleOptions::default();

    let mut buf = Vec::new();
    let first =
        write_mux_submodules(&mut buf, &mut registry, &muxes, &catalog, &options, &sink).unwrap();
    let mut buf = Vec::new();
    let second =
        write_mux_submodules(&mut buf, &mut registry, &muxes, &catalog, &options, &sink).unwrap();
    assert_eq!(first.generated, 1);
    assert_eq!(second.generated, 0);
    assert_eq!(second.skipped, 1);
}

#[test]
fn generate_writes_file_and_reserves_lines() {
    let toml = format!(
        "{TGATE}{}\n[[fabric.mux]]\nmodel = \"mux_tree\"\nsizes = [4, 10]\n",
        mux_model("mux_tree", "")
    );
    let config = load_config_from_str(&toml).unwrap();
    let catalog = CircuitLibrary::from_config(&config).unwrap();
    let muxes = MuxLibrary::from_usages(&catalog, &resolve_mux_usages(&config).unwrap()).unwrap();
    let mut registry = ModuleRegistry::new();
    register_primitive_modules(&mut registry, &catalog);
    let mut sram = SramOrganization::new(SramOrganizationKind::MemoryBank);
    let sink = DiagnosticSink::new();

    let dir = tempfile::tempdir().unwrap();
    let out_dir = dir.path().join("sub_module");
    let (path, report) = generate_mux_submodules(
        &out_dir,
        &mut registry,
        &muxes,
        &catalog,
        &MuxSubmoduleOptions::default(),
        &mut sram,
        &sink,
    )
    .unwrap();

    assert_eq!(path, out_dir.join("muxes.v"));
    let text = std::fs::read_to_string(&path).unwrap();
    assert_eq!(text.matches("endmodule").count(), report.generated);
    assert_eq!(report.generated, 2);
    assert_eq!((sram.reserved_bl(), sram.reserved_wl()), (10, 10));
}

#[test]
fn unwritable_output_is_reported_before_generation() {
    let dir = tempfile::tempdir().unwrap();
    let blocker = dir.path().join("file");
    std::fs::write(&blocker, "").unwrap();

    let catalog = CircuitLibrary::new();
    let muxes = MuxLibrary::new();
    let mut registry = ModuleRegistry::new();
    let mut sram = SramOrganization::new(SramOrganizationKind::MemoryBank);
    let err = generate_mux_submodules(
        &blocker.join("sub"),
        &mut registry,
        &muxes,
        &catalog,
        &MuxSubmoduleOptions::default(),
        &mut sram,
        &DiagnosticSink::new(),
    )
    .unwrap_err();
    assert!(matches!(err, GenError::Output { .. }));
    assert_eq!(sram.reserved_bl(), 0);
}
