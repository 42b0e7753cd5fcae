//! Downstream service access

mod client;

pub use client::{Service, ServiceClient, ServiceUrls};
