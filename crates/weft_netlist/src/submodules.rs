//! Multiplexer submodule generation for a whole fabric.
//!
//! Every distinct multiplexer of the [`MuxLibrary`] is split into basis
//! graphs and each basis becomes one module in `muxes.v`. Branches shared by
//! several multiplexers are written once: the registry remembers every module
//! name already emitted.

use crate::error::GenError;
use crate::generator::mux::{BranchOutcome, GenerationEngine};
use crate::registry::ModuleRegistry;
use crate::sram::SramOrganization;
use crate::verilog;
use serde::Serialize;
use std::collections::hash_map::Entry;
use std::collections::HashMap;
use std::fs::{self, File};
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};
use weft_circuit::CircuitLibrary;
use weft_common::ContentHash;
use weft_diagnostics::{Category, Diagnostic, DiagnosticCode, DiagnosticSink};
use weft_mux::{MuxGraph, MuxLibrary};

/// File the multiplexer submodules are written to.
pub const MUXES_FILE_NAME: &str = "muxes.v";

/// Options for multiplexer submodule generation.
#[derive(Debug, Clone, Default)]
pub struct MuxSubmoduleOptions {
    /// Emit structural bodies regardless of each model's setting.
    pub force_structural: bool,
    /// Preprocessor defines file to `` `include `` at the top of the output.
    pub defines_file: Option<String>,
}

/// What a submodule run produced.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct MuxSubmoduleReport {
    /// Modules written.
    pub generated: usize,
    /// Branches whose module was already registered.
    pub skipped: usize,
    /// Branches implemented by a MUX2 standard cell.
    pub essential: usize,
    /// Branches whose design technology has no generator.
    pub not_implemented: usize,
}

/// Writes every basis module of `mux_lib` to `out`.
///
/// Decompositions are computed once per distinct graph. A multiplexer whose
/// technology is not implemented yields one `W101` warning in `sink`.
pub fn write_mux_submodules<W: Write>(
    out: &mut W,
    registry: &mut ModuleRegistry,
    mux_lib: &MuxLibrary,
    catalog: &CircuitLibrary,
    options: &MuxSubmoduleOptions,
    sink: &DiagnosticSink,
) -> Result<MuxSubmoduleReport, GenError> {
    verilog::write_file_header(out, "Multiplexers")?;
    if let Some(defines) = &options.defines_file {
        verilog::write_include(out, defines)?;
    }

    let engine = GenerationEngine::new().force_structural(options.force_structural);
    let mut decompositions: HashMap<ContentHash, Vec<MuxGraph>> = HashMap::new();
    let mut report = MuxSubmoduleReport::default();

    for mux in mux_lib.muxes() {
        let graph = mux_lib.mux_graph(mux);
        let model = mux_lib.mux_circuit_model(mux);
        let mux_size = mux_lib.mux_size(mux);

        let branches = match decompositions.entry(graph.fingerprint()) {
            Entry::Occupied(cached) => cached.into_mut(),
            Entry::Vacant(slot) => slot.insert(graph.decompose()?),
        };
        tracing::debug!(
            model = catalog.model_name(model),
            mux_size,
            branches = branches.len(),
            "decomposed multiplexer"
        );

        let mut warned = false;
        for basis in branches.iter() {
            match engine.build_mux_branch_module(registry, catalog, model, mux_size, basis)? {
                BranchOutcome::Generated(def) => {
                    verilog::write_module(out, registry, &def)?;
                    tracing::trace!(module = %def.name, "wrote branch module");
                    report.generated += 1;
                }
                BranchOutcome::AlreadyDefined { module } => {
                    tracing::trace!(module = registry.module_name(module), "branch already defined");
                    report.skipped += 1;
                }
                BranchOutcome::EssentialGate => report.essential += 1,
                BranchOutcome::NotImplemented { model: name } => {
                    report.not_implemented += 1;
                    if !warned {
                        warned = true;
                        sink.emit(
                            Diagnostic::warning(
                                DiagnosticCode::new(Category::Warning, 101),
                                format!(
                                    "multiplexer '{name}' of size {mux_size} was not generated"
                                ),
                            )
                            .with_subject(name)
                            .with_note("only CMOS multiplexer branches can be generated"),
                        );
                    }
                }
            }
        }
    }

    out.flush()?;
    Ok(report)
}

/// Generates `muxes.v` in `dir` and reserves memory-bank lines for the
/// largest multiplexer.
///
/// The output file is created before any module is generated. Returns the
/// path written and the run's report.
pub fn generate_mux_submodules(
    dir: &Path,
    registry: &mut ModuleRegistry,
    mux_lib: &MuxLibrary,
    catalog: &CircuitLibrary,
    options: &MuxSubmoduleOptions,
    sram: &mut SramOrganization,
    sink: &DiagnosticSink,
) -> Result<(PathBuf, MuxSubmoduleReport), GenError> {
    let path = dir.join(MUXES_FILE_NAME);
    let output_error = |source: std::io::Error| GenError::Output {
        path: path.clone(),
        source,
    };

    fs::create_dir_all(dir).map_err(output_error)?;
    let file = File::create(&path).map_err(output_error)?;
    tracing::info!(path = %path.display(), "writing multiplexer netlists");

    let mut out = BufWriter::new(file);
    let report = match write_mux_submodules(&mut out, registry, mux_lib, catalog, options, sink) {
        Ok(report) => report,
        Err(GenError::Io(source)) => return Err(output_error(source)),
        Err(err) => return Err(err),
    };

    sram.try_update_reserved_blwl(mux_lib.max_mux_size(), mux_lib.max_mux_size());
    tracing::info!(
        generated = report.generated,
        skipped = report.skipped,
        essential = report.essential,
        not_implemented = report.not_implemented,
        "multiplexer netlists done"
    );
    Ok((path, report))
}
