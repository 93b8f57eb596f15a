pub mod attack;
pub mod stats;
pub mod webapp;
