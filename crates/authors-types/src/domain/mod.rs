pub mod author;
pub mod validation;
