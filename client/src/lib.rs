//! # Phonebook client
//!
//! Terminal client for the contact service. The contact list lives here as
//! an in-memory cache owned by the view layer; all mutations round-trip
//! through the REST API and the cache is corrected from the outcome, so it
//! converges with the store even when another client got there first.

pub mod api;
pub mod app;
pub mod notification;
pub mod service;
pub mod ui;
