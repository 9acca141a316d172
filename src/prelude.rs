//! Prelude module for convenient imports
//!
//! ```
//! use safe_decode::prelude::*;
//!
//! #[safe_decode]
//! #[repr(i64)]
//! enum Priority {
//!     Low = 1,
//!     High = 2,
//! }
//!
//! assert_eq!(Priority::from_raw_value(2).map(|p| p.raw_value()), Some(2));
//! ```

pub use crate::{safe_decode, RawRepresentable};
