//! Row data model

mod identity;
mod row;
mod value;

pub use identity::*;
pub use row::*;
pub use value::*;
