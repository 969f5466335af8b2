//! Platform-independent animation core.
//!
//! Nothing in here touches the DOM. The browser modules feed events in and
//! read per-frame state out; the tests drive the same types on the host.

pub mod cursor;
pub mod fade;
pub mod float;
pub mod loading;
pub mod progress;
pub mod rain;
pub mod reel;
pub mod scene;
pub mod squish;
pub mod stage;
pub mod viewport;

pub use cursor::*;
pub use fade::*;
pub use float::*;
pub use loading::*;
pub use progress::*;
pub use rain::*;
pub use reel::*;
pub use scene::*;
pub use squish::*;
pub use stage::*;
pub use viewport::*;
