pub mod alert;
pub mod strategy;
pub mod user;

pub use alert::AlertEvent;
pub use strategy::{ActiveStrategy, Strategy};
pub use user::User;
