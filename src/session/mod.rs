pub mod driver;
pub mod http;
pub mod remote;
pub mod scripted;
pub mod session;
