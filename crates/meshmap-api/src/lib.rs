// meshmap-api: Async fail-soft client for a Meshtastic node map backend

pub mod client;
pub mod endpoints;
pub mod error;
pub mod transport;

pub use client::MeshApiClient;
pub use endpoints::Endpoints;
pub use error::Error;
pub use transport::{TlsMode, TransportConfig};
