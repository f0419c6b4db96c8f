pub mod navigator;
pub mod scroll;
pub mod tabs;
