//! Client SDK for the Tailor resume/cover-letter pipeline backend.
//!
//! Three layers: a typed REST client ([`api::ApiClient`]), a live SSE
//! subscription ([`stream::StreamClient`]) feeding a single-writer
//! [`store::SnapshotStore`], and pure status derivations ([`projector`])
//! computed fresh from whatever snapshot the store currently holds.

pub mod api;
pub mod config;
pub mod errors;
pub mod live;
pub mod models;
pub mod projector;
pub mod store;
pub mod stream;

pub use api::applications::{Page, StartGenerationRequest};
pub use api::ApiClient;
pub use config::Config;
pub use errors::{ApiError, StreamError};
pub use live::{AutoAdvance, LiveStatus, PhaseTracker};
pub use models::{ApplicationEvent, GenerationStatus, JobApplicationSnapshot};
pub use projector::{Phase, PhaseStatus};
pub use store::{SnapshotStore, StoreReader, StoreState, StreamFault};
pub use stream::StreamClient;
