pub mod client;
pub mod firebase;
pub mod manager;
pub mod message;
pub mod report;
