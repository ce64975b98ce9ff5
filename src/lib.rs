//! Login Autofill - remembers the last selected login identity
//!
//! Core modules:
//! - `controller`: restore-on-load and persist-on-submit
//! - `storage`: key-value store capability (LocalStorage on web)
//! - `ready`: document readiness gate
//! - `platform`: browser/headless document bindings
//! - `config`: storage key and element ids

pub mod config;
pub mod controller;
pub mod error;
pub mod platform;
pub mod ready;
pub mod storage;

pub use config::AutofillConfig;
pub use controller::{AutofillController, SelectControl, SubmitSource};
pub use error::{AutofillError, Result};
pub use storage::{KeyValueStore, MemoryStore};
