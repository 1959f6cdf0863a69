pub mod config;
pub mod date_key;
pub mod month;
pub mod store;
pub mod task;

pub use config::*;
pub use date_key::*;
pub use month::*;
pub use store::*;
pub use task::*;
