//! Authentication state machine
//!
//! The link starts unauthenticated and becomes authenticated exactly once,
//! when the host grants access. There is no way back: only a device reset
//! clears the flag.

pub mod events;
pub mod machine;
pub mod session;

pub use events::Event;
pub use machine::LinkState;
pub use session::{Action, Session};
