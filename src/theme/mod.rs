//! Theme for Teach & Tell.

mod styles;

pub use styles::GLOBAL_STYLES;
