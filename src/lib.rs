//! Backend for the Gramika Malayalam news portal: CMS proxy endpoints, the
//! token-guarded admin API and the client-state library used by the site.

pub mod cms;
pub mod handlers;
pub mod models;
pub mod portal;
pub mod routes;
pub mod services;
pub mod utils;
