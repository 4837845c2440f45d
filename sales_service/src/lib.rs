pub mod cfg;
pub mod constant;
pub mod db;
pub mod error;
pub mod logging;
pub mod mdw;
pub mod product;
pub mod resp;
pub mod sale;
pub mod server;
pub mod svc;
pub mod utils;
