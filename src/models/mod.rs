pub mod common;
pub mod month;
pub mod subscription;
