//! pmax-rest - REST-backed Unisphere for PowerMax client.
//!
//! All authenticated operations flow through a [`Client`] built from a
//! [`ConfigConnect`]. Mutations the array executes asynchronously return a
//! job which the client polls to completion; large listings come back as a
//! server-side iterator which the client drains page by page.
//!
//! # Example
//!
//! ```no_run
//! use pmax_core::{Credentials, EndpointUrl, SymId};
//! use pmax_rest::{Client, ConfigConnect};
//!
//! # async fn example() -> pmax_core::Result<()> {
//! let endpoint = EndpointUrl::new("https://unisphere.example.com:8443")?;
//! let config = ConfigConnect::new(endpoint, Credentials::new("smc", "smc"));
//! let client = Client::new(config)?;
//! client.authenticate().await?;
//!
//! let sym = SymId::new("000197900046")?;
//! for volume_id in client.get_volume_id_list(&sym, "", false).await? {
//!     println!("{volume_id}");
//! }
//! # Ok(())
//! # }
//! ```

mod client;
mod config;
mod host;
mod masking;
mod rest;
mod snapshot;
mod storage_group;
mod system;
mod volume;

pub use client::Client;
pub use config::ConfigConnect;
pub use storage_group::{
    add_volumes_payload, create_volume_in_sg_payload, remove_volumes_payload,
};
