//! Service layer for library-cli
//!
//! The service layer provides business logic on top of the storage layer:
//! validation, uniqueness and referential-integrity checks, the borrow/return
//! state transitions, persistence and audit logging.

pub mod book;
pub mod circulation;
pub mod integrity;
pub mod member;

pub use book::BookService;
pub use circulation::{CirculationService, LoanView};
pub use integrity::IntegrityIssue;
pub use member::MemberService;
