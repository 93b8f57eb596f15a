pub mod feed;
pub mod server;
