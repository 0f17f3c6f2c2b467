//! Client for the upstream species catalog, plus the rules that flatten its
//! records into the shapes this service hands out.

mod client;
mod error;
mod identifier;
mod model;
pub mod normalize;

pub use client::*;
pub use error::*;
pub use identifier::*;
pub use model::*;
