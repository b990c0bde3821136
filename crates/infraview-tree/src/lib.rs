//! Flattened, paginated tree rows for virtualized list renderers.

pub mod expand;
pub mod flatten;
pub mod limits;
pub mod reveal;
pub mod row;
pub mod viewport;

pub use expand::ExpandState;
pub use flatten::{TreeFlattener, flatten};
pub use limits::{DisplayLimit, DisplayLimits, Pagination};
pub use reveal::reveal;
pub use row::{FlattenedRow, RowKind};
pub use viewport::{ROW_HEIGHT, RowWindow, Viewport, sticky_ancestors};
