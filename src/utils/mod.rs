pub mod config;
pub mod hash_password;
pub mod image_link;
pub mod jwt_encode;
pub mod pagination;
pub mod rate_limiter;
pub mod slug;
pub mod state;
