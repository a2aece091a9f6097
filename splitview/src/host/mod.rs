mod pane;
mod state;

use pane::{Pane, PaneContent, PaneId};
pub use state::PaneHost;
