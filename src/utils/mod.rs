//! The `utils` module provides shared utilities used across the `roomcast`
//! application: the error taxonomy and logging setup.

pub mod error;
pub mod logging;
