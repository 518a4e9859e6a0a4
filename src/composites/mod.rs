mod composite;
mod polygon;
mod rect;
mod rope;

pub use composite::Composite;
pub use polygon::Polygon;
pub use rect::Rect;
pub use rope::Rope;
