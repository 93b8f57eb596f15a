pub mod auth;
pub mod routes;
pub mod server;
pub mod websocket;
