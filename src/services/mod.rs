pub mod aggregator;
pub mod database;
#[cfg(test)]
pub mod memory;
pub mod repository;
pub mod subscription;
pub mod validation;
