pub mod database;
pub mod engine;
pub mod expr;
pub mod extension;
pub mod functions;
pub mod logical;
