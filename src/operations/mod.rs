pub mod cut;
pub mod modification;
pub mod offset;
pub mod query;
pub mod sampling;
