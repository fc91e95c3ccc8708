pub mod fixtures;
pub mod mocks;

#[allow(unused_imports)]
pub use fixtures::{TestRepository, doc, entries, ext_id, owner_ids, wiki};
#[allow(unused_imports)]
pub use mocks::FailingStore;
