pub mod issue;
pub mod prd;
