pub mod calendar_entry;
pub mod configuration;
pub mod setting;

pub use calendar_entry::*;
pub use configuration::*;
pub use setting::*;
