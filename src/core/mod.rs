pub mod log;
pub mod navigation;
pub mod planning;
pub mod service;
pub mod validation;
