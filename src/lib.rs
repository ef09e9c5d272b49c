//! Storyboard: content planning board client.
//!
//! This crate provides the client-side core of a content calendar: a
//! five-column Kanban board of social media content with drag-and-drop
//! status changes, optimistic updates and server reconciliation, plus the
//! REST adapters and session handling needed to drive it from a backend.
//!
//! # Architecture
//!
//! Storyboard follows hexagonal architecture principles:
//!
//! - **Domain**: Pure board logic with no infrastructure dependencies
//! - **Ports**: Abstract trait interfaces for the backend and notifications
//! - **Adapters**: Concrete implementations of ports (REST, in-memory)
//!
//! # Modules
//!
//! - [`board`]: Columns, drag state machine and the board controller
//! - [`session`]: Login, logout and token storage
//! - [`http`]: Shared REST client
//! - [`config`]: Client configuration loading
//! - [`telemetry`]: Log subscriber setup

pub mod board;
pub mod config;
pub mod http;
pub mod session;
pub mod telemetry;
