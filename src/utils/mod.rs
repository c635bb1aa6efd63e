pub mod crypto;
pub mod time;
pub mod token;
