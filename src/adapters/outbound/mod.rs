mod maxmind_country_db;
mod openai_chat_client;

pub use maxmind_country_db::MaxMindCountryDb;
pub use openai_chat_client::{OpenAiChatClient, OpenAiConfig};
