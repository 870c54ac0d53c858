pub mod access;
pub mod advertisement;
pub mod breaking_news;
pub mod cache;
pub mod doctor;
pub mod document;
pub mod error;
pub mod jwt;
pub mod media;
pub mod news;
pub mod obituary;
pub mod settings;
pub mod video;
