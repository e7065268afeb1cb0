//! `weft generate`: multiplexer submodule netlists.
//!
//! 1. Locate and load `weft.toml`
//! 2. Build the circuit model catalog
//! 3. Collect the distinct multiplexers the fabric uses
//! 4. Register primitive cells
//! 5. Write `muxes.v` and update the SRAM organization
//! 6. Render diagnostics and the summary

use std::path::PathBuf;

use serde::Serialize;
use weft_circuit::CircuitLibrary;
use weft_config::resolve_mux_usages;
use weft_diagnostics::{Diagnostic, DiagnosticRenderer, DiagnosticSink, TerminalRenderer};
use weft_mux::MuxLibrary;
use weft_netlist::{
    generate_mux_submodules, register_primitive_modules, ModuleRegistry, MuxSubmoduleOptions,
    MuxSubmoduleReport, SramOrganization,
};

use crate::project::resolve_config;
use crate::{GenerateArgs, GlobalArgs, ReportFormat};

/// JSON document printed by `--format json`.
#[derive(Serialize)]
struct JsonReport<'a> {
    output: Option<String>,
    report: Option<MuxSubmoduleReport>,
    reserved_bl: usize,
    reserved_wl: usize,
    diagnostics: &'a [Diagnostic],
}

/// Runs the `weft generate` command.
///
/// Configuration problems are returned as errors. Generation problems are
/// reported as diagnostics; the exit code is 1 if any error was reported.
pub fn run(args: &GenerateArgs, global: &GlobalArgs) -> Result<i32, Box<dyn std::error::Error>> {
    let (config_path, project_dir) = resolve_config(global)?;
    let config = weft_config::load_config(&config_path)?;
    tracing::info!(config = %config_path.display(), "loaded fabric description");

    let catalog = CircuitLibrary::from_config(&config)?;
    let usages = resolve_mux_usages(&config)?;
    let mux_lib = MuxLibrary::from_usages(&catalog, &usages)?;

    if !global.quiet && args.format == ReportFormat::Text {
        eprintln!(
            "   Generating {} multiplexer(s) from {} circuit model(s)",
            mux_lib.len(),
            catalog.len()
        );
    }

    let mut registry = ModuleRegistry::new();
    let primitives = register_primitive_modules(&mut registry, &catalog);
    tracing::debug!(primitives, "registered primitive modules");

    let output_dir = args.output_dir.clone().unwrap_or_else(|| {
        project_dir
            .join(&config.output.directory)
            .join(&config.output.submodule_dir)
    });
    let options = MuxSubmoduleOptions {
        force_structural: args.structural || config.output.force_structural,
        defines_file: config.output.defines_file.clone(),
    };
    let mut sram = SramOrganization::new(config.sram.organization);
    let sink = DiagnosticSink::new();

    let outcome: Option<(PathBuf, MuxSubmoduleReport)> = match generate_mux_submodules(
        &output_dir,
        &mut registry,
        &mux_lib,
        &catalog,
        &options,
        &mut sram,
        &sink,
    ) {
        Ok(outcome) => Some(outcome),
        Err(err) => {
            sink.emit(err.to_diagnostic());
            None
        }
    };

    let diagnostics = sink.diagnostics();
    match args.format {
        ReportFormat::Text => {
            let renderer = TerminalRenderer::new(global.color);
            for diag in &diagnostics {
                eprint!("{}", renderer.render(diag));
            }
            if !global.quiet {
                if let Some((path, report)) = &outcome {
                    eprintln!(
                        "   Wrote {} module(s) to {} ({} reused, {} essential gate(s), {} not implemented)",
                        report.generated,
                        path.display(),
                        report.skipped,
                        report.essential,
                        report.not_implemented
                    );
                }
                eprintln!(
                    "   Result: {} error(s), {} warning(s)",
                    sink.error_count(),
                    sink.warning_count()
                );
            }
        }
        ReportFormat::Json => {
            let json = JsonReport {
                output: outcome.as_ref().map(|(path, _)| path.display().to_string()),
                report: outcome.as_ref().map(|(_, report)| *report),
                reserved_bl: sram.reserved_bl(),
                reserved_wl: sram.reserved_wl(),
                diagnostics: &diagnostics,
            };
            println!("{}", serde_json::to_string_pretty(&json)?);
        }
    }

    Ok(if sink.has_errors() { 1 } else { 0 })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    const FABRIC: &str = r#"
[output]
directory = "verilog"
defines_file = "fpga_defines.v"

[sram]
organization = "memory_bank"

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

[[circuit_model]]
name = "mux_tree"
kind = "mux"
pass_gate = "tgate"

[[circuit_model.port]]
name = "sram"
kind = "sram"

[[fabric.mux]]
model = "mux_tree"
sizes = [4, 8]
"#;

    fn project(fabric: &str) -> (TempDir, GlobalArgs) {
        let tmp = TempDir::new().unwrap();
        fs::write(tmp.path().join("weft.toml"), fabric).unwrap();
        let global = GlobalArgs {
            quiet: true,
            color: false,
            config: Some(tmp.path().display().to_string()),
        };
        (tmp, global)
    }

    fn args(format: ReportFormat) -> GenerateArgs {
        GenerateArgs {
            output_dir: None,
            structural: false,
            format,
        }
    }

    #[test]
    fn generate_end_to_end() {
        let (tmp, global) = project(FABRIC);
        let code = run(&args(ReportFormat::Text), &global).unwrap();
        assert_eq!(code, 0);

        let muxes = tmp.path().join("verilog").join("sub_module").join("muxes.v");
        let text = fs::read_to_string(muxes).unwrap();
        assert!(text.contains("`include \"fpga_defines.v\""));
        assert!(text.contains("module mux_tree_size4_basis_size2("));
        assert!(text.contains("module mux_tree_size8_basis_size2("));
    }

    #[test]
    fn output_dir_flag_overrides_config() {
        let (tmp, global) = project(FABRIC);
        let out = tmp.path().join("custom");
        let args = GenerateArgs {
            output_dir: Some(out.clone()),
            structural: true,
            format: ReportFormat::Json,
        };
        assert_eq!(run(&args, &global).unwrap(), 0);
        let text = fs::read_to_string(out.join("muxes.v")).unwrap();
        assert!(text.contains("tgate tgate_0_ ("));
        assert!(!text.contains("out_reg"));
    }

    #[test]
    fn unknown_technology_exits_with_error() {
        let fabric = FABRIC.replace(
            "pass_gate = \"tgate\"",
            "pass_gate = \"tgate\"\ndesign_technology = \"fefet\"",
        );
        let (_tmp, global) = project(&fabric);
        assert_eq!(run(&args(ReportFormat::Json), &global).unwrap(), 1);
    }

    #[test]
    fn rram_only_warns() {
        let fabric = FABRIC.replace(
            "pass_gate = \"tgate\"",
            "pass_gate = \"tgate\"\ndesign_technology = \"rram\"",
        );
        let (_tmp, global) = project(&fabric);
        assert_eq!(run(&args(ReportFormat::Text), &global).unwrap(), 0);
    }

    #[test]
    fn invalid_config_is_an_error() {
        let (_tmp, global) = project("[[circuit_model]]\nname = \"m\"\nkind = \"mux\"\n");
        let err = run(&args(ReportFormat::Text), &global).unwrap_err();
        assert!(err.to_string().contains("pass_gate"));
    }

    #[test]
    fn unknown_fabric_model_is_an_error() {
        let fabric = FABRIC.replace("model = \"mux_tree\"", "model = \"mux_missing\"");
        let (_tmp, global) = project(&fabric);
        assert!(run(&args(ReportFormat::Text), &global).is_err());
    }
}
