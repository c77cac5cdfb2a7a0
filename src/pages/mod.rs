//! Page components for Teach & Tell.

mod portal;
mod teach;
mod tell;

pub use portal::Portal;
pub use teach::Teach;
pub use tell::Tell;
