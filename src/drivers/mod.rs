//! Status indicator driver and the blink pattern scheduler.

pub mod blink;
pub mod indicator;
