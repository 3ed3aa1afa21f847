#![allow(missing_docs)]

pub mod answer;
pub mod export;
pub mod link;
pub mod onboarding;
pub mod progress;
pub mod reducer;
pub mod schema;
pub mod side_channel;
pub mod state;
pub mod store;
pub mod visibility;

pub use answer::{Answer, AnswerInput, AnswerParseError};
pub use export::{
    CollectedAnswers, EmailDraft, ExportError, JSON_FILENAME, check_export_ready, collect,
    csv_filename, to_csv, to_json,
};
pub use link::{SensitiveFields, decode, encode, query_of, share_url};
pub use onboarding::{CapabilityOnboarding, PLACEHOLDER, Stat, StatBand, compute_onboarding_stats};
pub use progress::{Progress, compute_progress};
pub use reducer::{Event, ITEM_SEPARATOR, apply, apply_all};
pub use schema::{
    Capability, Category, FlatQuestion, ItemKey, KeyParseError, Location, MetaField, ParamKey,
    Provider, QuestionKey, SchemaError, ScopedPart, SurveySchema,
};
pub use side_channel::{DisabledSideChannel, MemorySideChannel, SideChannel, SideChannelError};
pub use state::SurveyState;
pub use store::{AnswerStore, StoreError};
pub use visibility::{VisibilityMap, resolve_drilldowns};
