// Workshops Control Plane Library
// Decision: Shared library for binaries (API server, OpenAPI export) and integration tests

// API routes and types (shared for OpenAPI generation)
pub mod api;

// Environment-driven configuration
pub mod config;

// OpenAPI spec generation
pub mod openapi;

// Router assembly
pub mod router;
pub use router::build_app;

// Services layer
pub mod services;
pub use services::WorkshopService;

// Storage layer
pub mod storage;
