pub mod file_size;
pub mod folder;
pub mod mime;
