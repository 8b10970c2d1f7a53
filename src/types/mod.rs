mod attributes;
mod catalogue;
mod document;
mod enums;
mod node;
mod position;

pub use attributes::*;
pub use catalogue::*;
pub use document::*;
pub use enums::*;
pub use node::*;
pub use position::*;
