//! OVHcloud gateway for nimbus
//!
//! Implements [`nimbus_cloud::CloudGateway`] against the OVH public API
//! (`/cloud/project/...`) using the first-party application signature
//! scheme: every signed request carries an application key, a consumer
//! key, a drift-corrected timestamp and a SHA-1 signature over the
//! request. Provider error bodies are forwarded untouched.

mod client;
mod gateway;

pub use client::{Credentials, OvhClient};
