//! Errors raised while generating netlists.

use std::path::PathBuf;
use weft_common::InternalError;
use weft_diagnostics::{Category, Diagnostic, DiagnosticCode};

/// Errors from the generation engine and the submodule driver.
#[derive(Debug, thiserror::Error)]
pub enum GenError {
    /// A multiplexer model names a design technology the generator does not
    /// know.
    #[error("invalid design technology '{technology}' of multiplexer '{model}'")]
    UnsupportedDesignTechnology {
        /// The multiplexer circuit model.
        model: String,
        /// The technology tag as written.
        technology: String,
    },

    /// A primitive was instantiated before its module was registered.
    #[error("primitive module '{name}' is not registered")]
    MissingPrimitiveModule {
        /// The primitive's module name.
        name: String,
    },

    /// A multiplexer graph broke a structural invariant.
    #[error(transparent)]
    StructuralInvariant(#[from] InternalError),

    /// A pass gate or gate model has the wrong shape for its use.
    #[error("circuit model '{model}' cannot be used as a pass gate: {reason}")]
    InvalidPrimitive {
        /// The offending circuit model.
        model: String,
        /// What is wrong with it.
        reason: String,
    },

    /// The configuration memory default of a multiplexer is unusable.
    #[error("invalid SRAM default of multiplexer '{model}': {reason}")]
    InvalidSramDefault {
        /// The multiplexer circuit model.
        model: String,
        /// What is wrong with it.
        reason: String,
    },

    /// The output file could not be created or written.
    #[error("failed to write '{}': {source}", path.display())]
    Output {
        /// The output file.
        path: PathBuf,
        /// The underlying I/O error.
        #[source]
        source: std::io::Error,
    },

    /// The output stream failed.
    #[error("write failed: {0}")]
    Io(#[from] std::io::Error),
}

impl GenError {
    /// Returns the diagnostic code of this error.
    pub fn code(&self) -> DiagnosticCode {
        let number = match self {
            GenError::UnsupportedDesignTechnology { .. } => 101,
            GenError::MissingPrimitiveModule { .. } => 102,
            GenError::StructuralInvariant(_) => 103,
            GenError::InvalidPrimitive { .. } => 104,
            GenError::InvalidSramDefault { .. } => 105,
            GenError::Output { .. } | GenError::Io(_) => 106,
        };
        DiagnosticCode::new(Category::Error, number)
    }

    /// Converts the error into a diagnostic for the user.
    pub fn to_diagnostic(&self) -> Diagnostic {
        let diag = Diagnostic::error(self.code(), self.to_string());
        match self {
            GenError::UnsupportedDesignTechnology { model, .. } => diag
                .with_subject(model.clone())
                .with_help("supported design technologies are \"cmos\" and \"rram\""),
            GenError::MissingPrimitiveModule { name } => diag
                .with_subject(name.clone())
                .with_note("primitive modules are registered from the circuit model catalog"),
            GenError::StructuralInvariant(_) => {
                diag.with_note("this is a bug in the multiplexer graph builder")
            }
            GenError::InvalidPrimitive { model, .. } => diag.with_subject(model.clone()),
            GenError::InvalidSramDefault { model, .. } => diag
                .with_subject(model.clone())
                .with_help("set `default_value` of the multiplexer's SRAM port to 0 or 1"),
            GenError::Output { path, .. } => diag.with_subject(path.display().to_string()),
            GenError::Io(_) => diag,
        }
    }
}
