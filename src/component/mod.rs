pub mod component_model;
pub mod dynamic;
pub mod tab;
