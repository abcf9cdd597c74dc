pub mod ast;
pub mod keywords;
pub mod parser;
pub mod statement;
pub mod tokens;
