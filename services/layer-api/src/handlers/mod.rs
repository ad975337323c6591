//! HTTP handlers.

pub mod health;
pub mod layers;
pub mod proxy;
