//! Nullable infrastructure for deterministic testing.
//!
//! Every external collaborator of the engine (directory, notifier,
//! platform, code generation) sits behind a trait. The implementations
//! here are fully in-memory and programmable: scripted codes, a fixed
//! roster, a notifier that records what it "sent", and a platform whose
//! grant behavior is a knob. Tests swap them in for the real ones.

pub mod codes;
pub mod directory;
pub mod notifier;
pub mod platform;

pub use codes::NullCodes;
pub use directory::NullDirectory;
pub use notifier::{NullNotifier, SentMessage};
pub use platform::{GrantBehavior, NullPlatform};
