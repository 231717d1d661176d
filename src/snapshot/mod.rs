pub mod dispatch;
pub mod v1;
pub mod v2;

pub use dispatch::{restore, RestoredVersion};
