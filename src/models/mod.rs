pub mod booking;
pub mod common;
pub mod service;
pub mod user;

pub use booking::*;
pub use common::*;
pub use service::*;
pub use user::*;
