//! Pure data structures shared by the store, the repository and the controllers.

pub mod order;
pub mod status;
pub mod view_state;

pub use order::*;
pub use status::*;
pub use view_state::*;
