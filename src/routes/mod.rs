pub mod import;
pub mod main;
