pub mod catalog;
pub mod key;
pub mod vocab;

pub use catalog::{LocationProviders, ProviderCatalog, SCHEMA_VERSION, SchemaError, SurveySchema};
pub use key::{ItemKey, KeyParseError, ParamKey, QuestionKey, ScopedPart};
pub use vocab::{Capability, Category, FlatQuestion, Location, MetaField, Provider};
