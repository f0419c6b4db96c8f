pub mod markers;
pub mod registry;
pub mod screen_model;
