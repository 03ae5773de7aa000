pub mod date_util;

pub use date_util::{DateTime, DateUtil};
