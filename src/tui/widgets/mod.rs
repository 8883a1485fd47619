pub mod meter;
pub mod text_field;
