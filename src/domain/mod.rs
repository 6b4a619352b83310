pub mod listing;
pub mod product;
pub mod settings;
pub mod types;
pub mod update_policy;
