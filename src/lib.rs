pub mod config;
pub mod error;
pub mod message;
pub mod session;
pub mod terminal;
pub mod transport;
pub mod view;
pub mod widget;
