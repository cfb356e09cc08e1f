pub mod gesture;
pub mod grid;
pub mod markers;
pub mod models;
pub mod render;
pub mod viewport;
