//! Errors surfaced at the host boundary.
//!
//! Bindings themselves never fail; these only describe registry lookups,
//! lifecycle misuse by the host, and connection installation.

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum FxError {
    #[error("no binding registered for kind {kind:?}")]
    UnknownBinding { kind: String },

    #[error("binding {kind:?} already mounted")]
    AlreadyMounted { kind: String },

    #[error("binding {kind:?} updated before mount")]
    NotMounted { kind: String },

    #[error("live connection already installed")]
    ConnectionAlreadyInstalled,
}
