mod bus;
mod models;

pub use models::{EventBus, StorageEvent};
