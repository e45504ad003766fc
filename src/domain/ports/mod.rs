mod chat_model;
mod country_database;

pub use chat_model::{ChatError, ChatModel};
pub use country_database::{CountryDatabase, LookupError};
