//! This module holds typed parameters for various endpoint inputs.
//!
//! By using typed parameters, request bodies are validated (by type) and correctly
//! formatted before they reach the analysis logic.

pub(crate) mod analysis;
