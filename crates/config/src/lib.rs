// Configuration loading

pub mod docmap;
pub mod session;
pub mod settings;

pub use docmap::{DocumentEntry, DocumentMap};
pub use session::Session;
pub use settings::{ConfigError, EndpointSet, WebhookConfig, DEFAULT_PORT};
