pub mod config;
pub mod logging;

pub mod auth;
pub mod batch;
pub mod descriptor;
pub mod endpoints;
pub mod http;
pub mod report;
pub mod retry;
pub mod scan;
pub mod snapshots;
