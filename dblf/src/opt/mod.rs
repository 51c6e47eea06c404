pub mod dblf_optimizer;
pub mod search;
