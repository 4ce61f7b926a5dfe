//! # packboard-plugin
//!
//! The producer half of packboard: an instrumentation adapter a build
//! pipeline drives through its lifecycle hooks. Each hook emits a batch
//! of protocol messages; a successful build additionally kicks off the
//! metrics engine, whose results stream out as they resolve.
//!
//! Messages flow through a `MessageSink`. Until a consumer connects the
//! sink is a no-op; once connected, batches travel as JSON lines over TCP
//! and the sink tracks how many are still awaiting acknowledgment so
//! shutdown never races in-flight frames.

mod reporter;
mod sink;

pub use reporter::{is_production_env, BuildReporter};
pub use sink::{MessageSink, NoopSink, SocketSink};
