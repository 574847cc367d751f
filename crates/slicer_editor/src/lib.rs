mod handle;
mod session;
mod viewport;

pub use handle::*;
pub use session::*;
pub use viewport::*;
