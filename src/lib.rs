#![warn(clippy::pedantic, clippy::all, clippy::nursery)]
#![allow(clippy::module_name_repetitions)]

#[macro_use]
extern crate tracing;

pub mod config;
pub mod data;
pub mod error;

pub use config::FormConfig;
pub use data::student::{FormStudent, Student, StudentBuilder};
pub use error::{SkdError, SkdResult};
