mod fixtures;
mod password;
mod token;

pub use fixtures::{CheckFixturesParams, check_fixtures};
pub use password::{HashPasswordParams, hash_password};
pub use token::{InspectTokenParams, IssueTokenParams, inspect_token, issue_token};
