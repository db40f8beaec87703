pub mod image_record;
pub mod sentiment;
pub mod submitted_text;
pub mod text_record;
