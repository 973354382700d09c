// Dreambook services

pub mod ai;
pub mod client;
