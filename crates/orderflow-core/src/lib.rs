//! Order lifecycle core.
//!
//! Keeps a collection of orders addressable by identifier and moves each one
//! through `CREATED -> PAID -> DELIVERED -> RECEIVED` safely under concurrent
//! callers. Each order carries its own lock, so transitions on one order are
//! strictly serialized while transitions on different orders never contend.
//!
//! The [`OrderService`] is the entry point; it composes the [`OrderRegistry`]
//! and the [`TransitionEngine`] and is cheap to clone into every task that
//! needs it.

pub mod engine;
pub mod error;
pub mod event_bus;
pub mod record;
pub mod registry;
pub mod service;

pub use engine::TransitionEngine;
pub use error::OrderError;
pub use event_bus::EventBus;
pub use record::OrderRecord;
pub use registry::OrderRegistry;
pub use service::OrderService;
