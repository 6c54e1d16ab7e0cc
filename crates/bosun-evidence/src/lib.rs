pub mod bundle;
pub mod store;
pub mod util;

pub use bundle::*;
pub use store::*;
pub use util::*;
