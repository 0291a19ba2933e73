//! Domain modules split by discipline so teams can work independently.
//! - `controls`: keyboard sampling and game flow toggles.
//! - `presentation`: HUD panels, banners, and UX overlays.
//! - `simulation`: combat, economy, and authoritative match state.

pub mod controls;
pub mod presentation;
pub mod simulation;

pub use controls::InputPlugin;
pub use presentation::UiPlugin;
pub use simulation::SimPlugin;
