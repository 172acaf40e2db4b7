pub mod repository;
pub mod scheduler;
pub mod transport;
