//! # Repository Module
//!
//! Database repository implementations for Shoe Lab.
//!
//! ## Repository Pattern
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Repository Pattern                                   │
//! │                                                                         │
//! │  HTTP handler                                                          │
//! │       │                                                                 │
//! │       │  db.shoes().get_by_id(7)                                        │
//! │       ▼                                                                 │
//! │  ShoeRepository                                                        │
//! │  ├── list / get_by_id / count                                          │
//! │  ├── insert(&NewShoe)                                                  │
//! │  ├── update(id, &ShoeConfig)   (only provided fields)                  │
//! │  ├── delete(id)                                                        │
//! │  └── seed_if_empty / reset                                             │
//! │       │                                                                 │
//! │       │  SQL Query                                                      │
//! │       ▼                                                                 │
//! │  SQLite Database                                                       │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Available Repositories
//!
//! - [`ShoeRepository`](shoe::ShoeRepository) - Saved shoe configurations

pub mod shoe;
