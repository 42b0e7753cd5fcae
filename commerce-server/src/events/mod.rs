//! In-process event bus

mod bus;

pub use bus::{EventBus, PublishError};
