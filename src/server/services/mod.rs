//! Orchestration services for server publication.

mod publish;

pub use publish::{PublishError, PublishErrorKind, PublishResult, PublishService};
