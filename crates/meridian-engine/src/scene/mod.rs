//! Retained draw stream rebuilt by the clock layer every frame.
//!
//! Commands carry no GPU state. Paint order is z-index, then insertion order;
//! each command keeps the clip rect that was active when it was pushed.

mod cmd;
mod list;
mod z_index;

pub mod shapes;

pub use cmd::DrawCmd;
pub use list::{DrawItem, DrawList, SortKey};
pub use shapes::Border;
pub use z_index::ZIndex;
