//! Configuration types deserialized from `weft.toml`.

use serde::Deserialize;
use std::path::PathBuf;

/// The top-level fabric description parsed from `weft.toml`.
#[derive(Debug, Deserialize)]
pub struct FabricConfig {
    /// Where and how generated netlists are written.
    #[serde(default)]
    pub output: OutputConfig,
    /// Configuration memory organization of the fabric.
    #[serde(default)]
    pub sram: SramConfig,
    /// The circuit model catalog.
    #[serde(default, rename = "circuit_model")]
    pub circuit_models: Vec<CircuitModelConfig>,
    /// Which multiplexers the fabric instantiates.
    #[serde(default)]
    pub fabric: FabricUsage,
}

/// Output settings for generated netlists.
#[derive(Debug, Deserialize)]
pub struct OutputConfig {
    /// Root directory for generated Verilog.
    #[serde(default = "default_output_dir")]
    pub directory: PathBuf,
    /// Sub-directory (relative to `directory`) that holds submodule netlists.
    #[serde(default = "default_submodule_dir")]
    pub submodule_dir: PathBuf,
    /// Optional defines file that every generated netlist `include`s.
    #[serde(default)]
    pub defines_file: Option<String>,
    /// Forces structural bodies for every multiplexer regardless of the model flag.
    #[serde(default)]
    pub force_structural: bool,
}

fn default_output_dir() -> PathBuf {
    PathBuf::from("verilog")
}

fn default_submodule_dir() -> PathBuf {
    PathBuf::from("sub_module")
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            directory: default_output_dir(),
            submodule_dir: default_submodule_dir(),
            defines_file: None,
            force_structural: false,
        }
    }
}

/// Configuration memory organization settings.
#[derive(Debug, Default, Deserialize)]
pub struct SramConfig {
    /// How configuration bits are organized.
    #[serde(default)]
    pub organization: SramOrganizationKind,
}

/// How configuration memory is organized across the fabric.
#[derive(Debug, Default, Clone, Copy, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum SramOrganizationKind {
    /// Configuration bits are shifted in through a scan chain (default).
    #[default]
    ScanChain,
    /// Configuration bits are addressed through bit lines and word lines.
    MemoryBank,
    /// Every configuration bit is a top-level port.
    Standalone,
}

/// One entry of the circuit model catalog.
#[derive(Debug, Clone, Deserialize)]
pub struct CircuitModelConfig {
    /// Unique model name, also used as the Verilog module name.
    pub name: String,
    /// What the model is.
    pub kind: CircuitModelKindConfig,
    /// Gate function, required when `kind = "gate"`.
    #[serde(default)]
    pub gate_type: Option<GateTypeConfig>,
    /// Design technology tag, e.g. `"cmos"` or `"rram"`.
    #[serde(default = "default_design_technology")]
    pub design_technology: String,
    /// Multiplexer topology, only meaningful for `kind = "mux"`.
    #[serde(default)]
    pub structure: MuxStructureConfig,
    /// Number of levels for `structure = "multi_level"`.
    #[serde(default)]
    pub num_levels: Option<usize>,
    /// Emit structural (instance based) Verilog instead of behavioral.
    #[serde(default)]
    pub structural_verilog: bool,
    /// Instantiate this model with named (`.port(net)`) connections.
    #[serde(default)]
    pub explicit_port_map: bool,
    /// Name of the pass-gate model that implements one path of a multiplexer.
    #[serde(default)]
    pub pass_gate: Option<String>,
    /// Model ports in declaration order.
    #[serde(default, rename = "port")]
    pub ports: Vec<CircuitPortConfig>,
}

fn default_design_technology() -> String {
    "cmos".to_string()
}

/// The kind of a circuit model.
#[derive(Debug, Clone, Copy, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum CircuitModelKindConfig {
    /// A routing multiplexer.
    Mux,
    /// A pass gate (transmission gate or pass transistor).
    PassGate,
    /// A logic gate.
    Gate,
}

/// The function of a gate model.
#[derive(Debug, Clone, Copy, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum GateTypeConfig {
    /// Two-input AND.
    And,
    /// Two-input OR.
    Or,
    /// Two-input multiplexer standard cell.
    Mux2,
}

/// Multiplexer topology.
#[derive(Debug, Default, Clone, Copy, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum MuxStructureConfig {
    /// Binary tree of 2:1 branches (default).
    #[default]
    Tree,
    /// A single N:1 level with one-hot memory.
    OneLevel,
    /// `num_levels` levels of equally sized branches.
    MultiLevel,
}

/// One port of a circuit model.
#[derive(Debug, Clone, Deserialize)]
pub struct CircuitPortConfig {
    /// Port name as it appears on the Verilog module.
    pub name: String,
    /// Port kind.
    pub kind: CircuitPortKindConfig,
    /// Port width in bits.
    #[serde(default = "default_port_size")]
    pub size: usize,
    /// Default value driven into configuration ports.
    #[serde(default)]
    pub default_value: u32,
    /// Marks SRAM ports that select an operating mode rather than a path.
    #[serde(default)]
    pub mode_select: bool,
    /// Marks ports wired to a fabric-wide global net.
    #[serde(default)]
    pub global: bool,
}

fn default_port_size() -> usize {
    1
}

/// The kind of a circuit model port.
#[derive(Debug, Clone, Copy, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum CircuitPortKindConfig {
    /// Signal input.
    Input,
    /// Signal output.
    Output,
    /// Configuration memory input.
    Sram,
    /// Clock input.
    Clock,
}

/// The multiplexers a fabric instantiates.
#[derive(Debug, Default, Deserialize)]
pub struct FabricUsage {
    /// Multiplexer usages, grouped per model.
    #[serde(default, rename = "mux")]
    pub muxes: Vec<MuxUsageConfig>,
}

/// A set of multiplexer sizes built from one circuit model.
#[derive(Debug, Clone, Deserialize)]
pub struct MuxUsageConfig {
    /// Name of a `kind = "mux"` circuit model.
    pub model: String,
    /// Every input count this model is instantiated with.
    pub sizes: Vec<usize>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::loader::load_config_from_str;

    #[test]
    fn output_defaults() {
        let config = load_config_from_str("").unwrap();
        assert_eq!(config.output.directory, PathBuf::from("verilog"));
        assert_eq!(config.output.submodule_dir, PathBuf::from("sub_module"));
        assert!(config.output.defines_file.is_none());
        assert!(!config.output.force_structural);
    }

    #[test]
    fn sram_organization_all_variants() {
        for (input, expected) in [
            ("scan_chain", SramOrganizationKind::ScanChain),
            ("memory_bank", SramOrganizationKind::MemoryBank),
            ("standalone", SramOrganizationKind::Standalone),
        ] {
            let toml = format!("[sram]\norganization = \"{input}\"\n");
            let config = load_config_from_str(&toml).unwrap();
            assert_eq!(config.sram.organization, expected);
        }
    }

    #[test]
    fn structure_all_variants() {
        for (input, expected) in [
            ("tree", MuxStructureConfig::Tree),
            ("one_level", MuxStructureConfig::OneLevel),
            ("multi_level", MuxStructureConfig::MultiLevel),
        ] {
            let levels = if expected == MuxStructureConfig::MultiLevel {
                "num_levels = 2\n"
            } else {
                ""
            };
            let toml = format!(
                r#"
[[circuit_model]]
name = "tgate"
kind = "pass_gate"

[[circuit_model]]
name = "mux"
kind = "mux"
structure = "{input}"
{levels}pass_gate = "tgate"
"#
            );
            let config = load_config_from_str(&toml).unwrap();
            assert_eq!(config.circuit_models[1].structure, expected);
        }
    }

    #[test]
    fn port_defaults() {
        let toml = r#"
[[circuit_model]]
name = "tgate"
kind = "pass_gate"

[[circuit_model.port]]
name = "in"
kind = "input"
"#;
        let config = load_config_from_str(toml).unwrap();
        let port = &config.circuit_models[0].ports[0];
        assert_eq!(port.size, 1);
        assert_eq!(port.default_value, 0);
        assert!(!port.mode_select);
        assert!(!port.global);
    }

    #[test]
    fn design_technology_defaults_to_cmos() {
        let toml = r#"
[[circuit_model]]
name = "tgate"
kind = "pass_gate"
"#;
        let config = load_config_from_str(toml).unwrap();
        assert_eq!(config.circuit_models[0].design_technology, "cmos");
    }
}
