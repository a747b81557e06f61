//! The `todolist-api` library crate.
//!
//! Holds the domain models, authentication (bcrypt + JWT), routing, error
//! handling, and configuration for the todo-list API. The binary in
//! `main.rs` wires these into an actix-web server.

pub mod auth;
pub mod config;
pub mod error;
pub mod models;
pub mod routes;
