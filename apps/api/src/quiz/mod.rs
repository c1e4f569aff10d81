pub mod catalog;
pub mod generator;
pub mod handlers;
pub mod models;
pub mod prompts;
pub mod session;
pub mod storage;
