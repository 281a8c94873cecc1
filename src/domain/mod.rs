pub mod entities;
pub mod identity;
pub mod use_cases;
pub mod validation;
