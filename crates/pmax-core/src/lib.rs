//! pmax-core - Core Unisphere for PowerMax types and errors.

pub mod credentials;
pub mod error;
pub mod resources;
pub mod types;

pub use credentials::Credentials;
pub use error::Error;
pub use resources::job::{Job, JobIdList, JobStatus};
pub use resources::iterator::{VolumeIterator, VolumeResultList};
pub use types::{EndpointUrl, SymId};

/// Result type alias using the crate's Error type.
pub type Result<T> = std::result::Result<T, Error>;
