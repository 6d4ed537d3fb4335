pub mod browser;
pub mod commands;
pub mod config;
pub mod error;
pub mod git;
pub mod links;
pub mod output;
pub mod resolve;
