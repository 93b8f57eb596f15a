pub mod attack;
pub mod payloads;
pub mod tables;
