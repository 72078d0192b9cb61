//! HTTP handlers for customers and their addresses.

pub mod addresses;
pub mod customers;
