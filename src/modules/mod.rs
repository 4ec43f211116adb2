pub mod edit;
pub mod image;
pub mod manager;
pub mod presenter;
pub mod render;
pub mod serialize;
pub mod types;
pub mod validation;
