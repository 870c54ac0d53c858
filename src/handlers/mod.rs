pub mod admin;
pub mod auth;
pub mod content;
pub mod image_link;
pub mod middleware;
pub mod news;
pub mod notion;
pub mod upload;
