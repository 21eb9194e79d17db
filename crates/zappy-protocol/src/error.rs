use thiserror::Error;

/// Parse-time failures for a single line of either protocol. These are
/// never fatal: every caller converts a `ProtocolError` into the
/// appropriate `ko`/`suc`/`sbp` reply rather than propagating it (§7).
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ProtocolError {
    #[error("unknown command verb: {0}")]
    UnknownVerb(String),
    #[error("missing argument for {0}")]
    MissingArgument(&'static str),
    #[error("argument is not a valid integer: {0}")]
    InvalidInteger(String),
    #[error("argument is not a valid resource name: {0}")]
    InvalidResource(String),
    #[error("empty broadcast text")]
    EmptyBroadcastText,
}
