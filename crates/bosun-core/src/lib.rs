pub mod ids;
pub mod model;
pub mod mutation;
pub mod record;
pub mod report;

pub use ids::*;
pub use model::*;
pub use mutation::*;
pub use record::*;
pub use report::*;
