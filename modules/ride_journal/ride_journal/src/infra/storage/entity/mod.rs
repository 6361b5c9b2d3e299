pub mod comment;
pub mod event;
pub mod image;
pub mod like;
pub mod user;
pub mod vehicle;
