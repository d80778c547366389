pub mod category;
pub mod file;
pub mod meta;
pub mod product;
pub mod time;
pub mod upload;
pub mod user;
