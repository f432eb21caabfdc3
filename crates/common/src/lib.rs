pub mod domain;
pub mod garde;
pub mod in_memory;
pub mod telemetry;
pub mod wiki;

pub use domain::*;

// Re-export mocks when testing feature is enabled
#[cfg(any(test, feature = "testing"))]
pub use domain::MockDocumentExistenceOracle;
#[cfg(any(test, feature = "testing"))]
pub use domain::MockWikiClient;
#[cfg(any(test, feature = "testing"))]
pub use domain::MockWikiSpaceRepository;
