//! Support types that generated code links against.
//!
//! Emitted code refers to everything here through a fully qualified path
//! (`::plotly_schema_rs::runtime` by default), including the re-exported
//! `serde` and `serde_json`, so a crate embedding generated types only needs a
//! dependency on `plotly-schema-rs`.

mod anything;
mod color_scale;
mod data;
mod flags;
mod polymorphic;
mod subplot;

pub use anything::Anything;
pub use color_scale::ColorScale;
pub use data::{Data, DataArray, Numeric};
pub use flags::{join_flags, split_flags};
pub use polymorphic::{Delegated, DelegatedSeq, Encode, Trace, Transform};
pub use subplot::{SubplotId, Subplots};

pub use serde;
pub use serde_json;
