#![allow(unused_imports)]
#![allow(dead_code)]
pub mod providers;
pub mod test_db;

pub use providers::*;
pub use test_db::*;
