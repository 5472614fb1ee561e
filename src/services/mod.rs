//! Validated operation layer over the journal model. Services are
//! stateless; the user aggregate and storage collaborator are passed in
//! explicitly.

pub mod entry_service;
pub mod summary_service;

pub use entry_service::EntryService;
pub use summary_service::SummaryService;
