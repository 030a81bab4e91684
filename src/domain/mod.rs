//! Domain models for CMS Core

pub mod access;
pub mod account;
pub mod common;
pub mod group;

pub use access::*;
pub use account::*;
pub use common::*;
pub use group::*;
