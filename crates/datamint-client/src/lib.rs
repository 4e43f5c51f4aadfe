//! Transport to the data-generation backend.

pub mod backend;
pub mod error;
pub mod http;
pub mod wire;

pub use backend::GenerationBackend;
pub use error::{Result, TransportError};
pub use http::{DEFAULT_BACKEND_URL, HttpBackend};
pub use wire::{decode_generate, decode_health, decode_schemas, normalize_data};
