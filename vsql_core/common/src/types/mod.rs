pub mod entity;
pub mod schema;

pub use entity::*;
pub use schema::*;
