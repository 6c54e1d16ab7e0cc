pub mod gate;
pub mod gates;
pub mod pipeline;

pub use gate::*;
pub use gates::*;
pub use pipeline::*;
