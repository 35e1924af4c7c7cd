//! Application module: the playlist controller and the view model fed by it.
//!
//! `PlaylistController` owns the playlist and the cursor and drives a
//! `MediaEngine`; the presentation layer subscribes to its notifications
//! and keeps a `ViewState` for rendering.

mod controller;
mod events;
mod view;

pub use controller::PlaylistController;
pub use events::PlaylistEvent;
pub use view::{InputMode, Theme, ViewState};

#[cfg(test)]
mod tests;
