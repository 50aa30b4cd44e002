pub mod app;
pub mod board;
pub mod cli;
pub mod config;
pub mod filter;
pub mod model;
pub mod output;
pub mod sales;
pub mod session;
pub mod state;
pub mod store;
pub mod utils;

#[cfg(test)]
mod tests;
