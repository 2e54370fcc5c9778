// HTTP routes
pub mod availability;
pub mod input_schema;
pub mod start_job;
pub mod status;

pub use availability::*;
pub use input_schema::*;
pub use start_job::*;
pub use status::*;
