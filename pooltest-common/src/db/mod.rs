//! Database initialization for the relational store

pub mod init;

pub use init::*;
