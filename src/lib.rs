pub mod config;
pub mod constants;
pub mod error;
pub mod fetch;
pub mod logging;
pub mod parser;
pub mod pipeline;
pub mod regions;
pub mod request;
pub mod types;
pub mod writer;
