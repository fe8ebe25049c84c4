pub mod company;
pub mod document;
