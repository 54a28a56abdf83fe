pub mod cli;
pub mod data;
pub mod engine;
pub mod parallel;
pub mod server;
pub mod sim;
