//! # Repository Module
//!
//! Database repository implementations for Basket.
//!
//! ## Repository Pattern
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Repository Pattern                                   │
//! │                                                                         │
//! │  Cart service                                                          │
//! │       │                                                                 │
//! │       │  db.carts().find_by_id(&id)                                    │
//! │       ▼                                                                 │
//! │  CartRepository                                                        │
//! │  ├── create(&self, cart)                                               │
//! │  ├── find_by_id / find_all / find_by_customer                          │
//! │  ├── update(&self, id, cart)                                           │
//! │  └── remove / remove_by_id                                             │
//! │       │                                                                 │
//! │       │  SQL + JSON document                                           │
//! │       ▼                                                                 │
//! │  SQLite Database                                                       │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Available Repositories
//!
//! - [`cart::CartRepository`] - Cart document CRUD

pub mod cart;
