// Library for tests and the sampler binary

pub mod clock;
pub mod config;
pub mod displays;
pub mod edid;
pub mod line_source;
pub mod memory_repo;
pub mod models;
pub mod worker;
