pub mod donations;
pub mod members;
