mod containment;
mod regions;
mod source;

pub use containment::*;
pub use regions::*;
pub use source::*;
