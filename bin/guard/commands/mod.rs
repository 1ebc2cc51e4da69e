pub mod check;
pub mod compare;
pub mod query;
