pub mod repo;

pub use repo::{AuthorCommit, GitRepo};
