// Configuration loading and parsing
//
// This module handles loading server configuration from the environment.

pub mod server;

pub use server::ServerConfig;
