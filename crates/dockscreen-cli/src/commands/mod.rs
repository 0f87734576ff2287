pub mod parse;
pub mod screen;
