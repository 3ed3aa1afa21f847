pub mod answer;
pub mod export;
pub mod schema;
pub mod show;
