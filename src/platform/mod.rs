//! Platform abstraction layer
//!
//! Everything the game needs from the outside world, behind small traits:
//! - Time/ticks ([`Clock`])
//! - Input events ([`InputSource`])
//! - Name entry for the hall of fame ([`NameInput`])
//! - Asset checks at startup

pub mod assets;
pub mod clock;
pub mod input;

pub use assets::require_assets;
pub use clock::{Clock, FixedStepClock, SystemClock};
pub use input::{Autopilot, FixedName, InputEvent, InputSource, Key, NameInput, ScriptedInput, StdinNameInput};
