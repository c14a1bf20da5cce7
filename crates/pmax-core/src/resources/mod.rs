//! Wire types for Unisphere resources and request payloads.

pub mod host;
pub mod initiator;
pub mod iterator;
pub mod job;
pub mod masking_view;
pub mod port_group;
pub mod snapshot;
pub mod storage_group;
pub mod symmetrix;
pub mod volume;
