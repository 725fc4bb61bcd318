pub mod audit;
pub mod config;
pub mod filename;
pub mod index;
pub mod paths;
pub mod render;
pub mod scanner;
pub mod warn;
