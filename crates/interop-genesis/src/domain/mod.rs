pub mod commitment;
pub mod keys;
pub mod time;
pub mod validators;

pub use commitment::*;
pub use keys::*;
pub use time::*;
pub use validators::*;
