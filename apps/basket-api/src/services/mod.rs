//! Application services sitting between the routes and the database.

pub mod cart_service;

pub use cart_service::CartService;
