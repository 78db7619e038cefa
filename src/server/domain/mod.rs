//! Domain model for server descriptors and their publication records.
//!
//! Everything here is plain data plus pure functions. Validation rules that
//! combine these types live in [`crate::server::validation`].

mod argument;
mod descriptor;
mod error;
mod name;
mod package;
mod record;
mod registry;
mod transport;
mod version;

pub use argument::{Argument, ArgumentType, Input, KeyValueInput};
pub use descriptor::{Repository, RepositorySource, ServerDescriptor};
pub use error::{DescriptorError, DescriptorErrorKind, WebsiteUrlProblem};
pub use name::{ServerName, publisher_domain};
pub use package::Package;
pub use record::{PublishedServer, ServerRecordId};
pub use registry::RegistryType;
pub use transport::{Transport, TransportType};
pub use version::{VersionClass, classify};
