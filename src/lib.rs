//! kgmode - prompt-mode control for knowledge-graph extraction
//!
//! A small HTTP service owns which extraction profile is active (general
//! knowledge graphs or engineering standards) and the entity types that come
//! with it. A native settings panel and the CLI read and switch it.
//!
//! ## Components
//!
//! 1. **Service** ([`server`]): `GET/POST /prompt-mode` and friends on localhost.
//!
//! 2. **Panel** ([`gui`]): palette dropdown with language, theme and the
//!    prompt-mode toggle, kept in step with the service by [`sync`].

pub mod client;
pub mod config;
pub mod domain;
pub mod gui;
pub mod server;
pub mod store;
pub mod sync;

pub use domain::*;
