//! HTTP request handlers.

pub mod auth_proxy;
pub mod domain;
pub mod health;
