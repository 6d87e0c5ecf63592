// Library for tests to access modules

pub mod config;
pub mod display;
pub mod metrics_repo;
pub mod models;
pub mod worker;
