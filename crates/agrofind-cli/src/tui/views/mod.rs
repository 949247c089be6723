pub mod login;
pub mod search;
pub mod upload;
