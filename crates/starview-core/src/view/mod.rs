pub mod coords;
pub mod state;
pub mod zoom;

pub use coords::{rotate_pt, window_center, CoordTransformer, ViewGeometry};
pub use state::{SubscriptionId, ViewEvent, ViewState};
