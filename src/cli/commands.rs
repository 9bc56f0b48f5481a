pub mod categories;
pub mod predict;
pub mod serve;

pub use categories::list_categories;
pub use predict::predict;
pub use serve::serve;
