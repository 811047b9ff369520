use thiserror::Error;

/// Result alias with [`AbiError`] as the default error type.
pub type Result<T, E = AbiError> = std::result::Result<T, E>;

/// Errors produced while working with contract ABIs.
#[derive(Error, Debug)]
pub enum AbiError {
    /// The requested function name (or selector) is not part of the ABI.
    #[error("no function named `{0}` in the ABI")]
    UnknownFunction(String),

    /// Supplied arguments do not match the function's parameter list.
    #[error("argument mismatch: {0}")]
    ArgumentMismatch(String),

    /// The raw argument text is not a valid JSON argument array.
    #[error("malformed argument input: {0}")]
    MalformedArgumentInput(#[from] serde_json::Error),

    /// An ABI type string could not be parsed.
    #[error("invalid ABI type `{0}`")]
    InvalidType(String),

    /// Encoded data could not be decoded against the ABI.
    #[error("decoding error: {0}")]
    Decode(String),
}
