mod backend;
mod backends;
mod registry;
mod result;
mod vocabulary;

pub use backend::DetectorBackend;
pub use backends::StubBackend;
pub use registry::BackendRegistry;
pub use result::{BoundingBox, Detection};
pub use vocabulary::ClassVocabulary;
