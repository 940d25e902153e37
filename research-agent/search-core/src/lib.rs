/// Search core: research documents and the sources that produce them.
///
/// The pipeline only sees [`DocumentSource`]; the two sources here generate
/// documents locally and never touch the network.

pub mod academic;
pub mod corpus;
pub mod document;
pub mod source;

pub use academic::MockAcademicSearch;
pub use corpus::GeneratedCorpus;
pub use document::{title_case, ResearchDocument};
pub use source::{DocumentSource, SearchRequest};
