//
// mod.rs
//
// @date Oct 19 2026
//

pub mod check;
pub mod compile;
pub mod mapping;
