pub mod auth;
pub mod check;
pub mod cli;
pub mod error;
pub mod logging;
pub mod lookup;
pub mod resolve;
