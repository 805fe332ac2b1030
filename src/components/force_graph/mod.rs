//! Force-directed interest graph.
//!
//! Renders the logged-in user's graph on an HTML canvas with:
//! - Physics-based node positioning via force simulation
//! - Pan, zoom, and node dragging interactions
//! - Smooth highlight transitions on hover, with labels for interests and
//!   places and a phone-number tooltip for people
//! - Configurable theming and visual scaling
//!
//! # Example
//!
//! ```ignore
//! view! { <ForceGraphCanvas data=graph current_user="alice" /> }
//! ```

mod component;
mod render;
pub mod scale;
mod state;
pub mod theme;
mod types;

pub use component::ForceGraphCanvas;
pub use state::{ForceGraphState, Tooltip};
pub use theme::Theme;
pub use types::{GraphInput, NodeRole};
