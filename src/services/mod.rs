pub mod health;
pub mod messaging;
pub mod reminder;
