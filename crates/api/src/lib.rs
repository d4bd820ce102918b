//! Cart HTTP API: route table, dispatcher, authorization gate and the Axum
//! binding that serves them.

pub mod app;
pub mod authz;
pub mod config;
pub mod context;
pub mod dispatch;
pub mod routing;
