use thiserror::Error;

/// CLI-level error categories mapped to exit codes.
#[derive(Debug, Error)]
pub enum CliError {
    #[error(transparent)]
    Config(#[from] tickerlens_core::ConfigError),

    #[error(transparent)]
    Load(#[from] tickerlens_core::LoadError),

    #[error("command error: {0}")]
    Command(String),

    #[error(transparent)]
    Serialization(#[from] serde_json::Error),

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

impl CliError {
    pub const fn exit_code(&self) -> u8 {
        match self {
            Self::Config(_) => 2,
            Self::Command(_) => 2,
            Self::Load(_) => 3,
            Self::Serialization(_) => 4,
            Self::Io(_) => 10,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn config_errors_are_usage_failures() {
        let error = CliError::from(tickerlens_core::ConfigError::InvalidHeader {
            value: String::from("nonsense"),
        });
        assert_eq!(error.exit_code(), 2);
    }

    #[test]
    fn load_errors_exit_with_upstream_code() {
        let error = CliError::from(tickerlens_core::LoadError::Status { status: 503 });
        assert_eq!(error.exit_code(), 3);
        assert_eq!(error.to_string(), "ticker directory returned status 503");
    }
}
