pub mod flow_model;
pub mod runner;
