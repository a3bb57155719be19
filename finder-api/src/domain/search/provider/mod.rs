mod github;
#[cfg(test)]
mod mock;

pub use github::GithubUserSearchProvider;
#[cfg(test)]
pub use mock::MockUserSearchProvider;
