//! Errors raised while reading a fabric description.

/// Why a `weft.toml` could not be turned into a usable configuration.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// The file could not be read.
    #[error("cannot read fabric description: {0}")]
    Read(#[from] std::io::Error),

    /// The file is not valid TOML or does not match the schema.
    #[error("malformed fabric description: {0}")]
    Parse(String),

    /// A name refers to no `[[circuit_model]]` entry.
    #[error("unknown circuit model '{0}'")]
    UnknownModel(String),

    /// A field required by the model's kind is absent.
    #[error("missing required field: {0}")]
    MissingField(String),

    /// A value is present but unusable.
    #[error("invalid fabric description: {0}")]
    Invalid(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unknown_model_names_the_model() {
        let err = ConfigError::UnknownModel("mux_tree".to_string());
        assert_eq!(err.to_string(), "unknown circuit model 'mux_tree'");
    }

    #[test]
    fn missing_field_carries_its_path() {
        let err = ConfigError::MissingField("circuit_model[2].pass_gate".to_string());
        assert!(err.to_string().ends_with("circuit_model[2].pass_gate"));
    }

    #[test]
    fn io_errors_convert() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "weft.toml");
        let err: ConfigError = io_err.into();
        assert!(matches!(err, ConfigError::Read(_)));
        assert!(err.to_string().starts_with("cannot read fabric description"));
    }
}
