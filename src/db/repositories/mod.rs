//! Database repositories
//!
//! Repositories handle all direct database interactions.

pub mod result_repo;
pub mod runner_repo;
pub mod user_repo;

pub use result_repo::ResultRepository;
pub use runner_repo::RunnerRepository;
pub use user_repo::UserRepository;
