//! Identity wrappers addressing issues and pull requests on GitHub.

use std::fmt;

use super::error::TrackerError;

/// Repository owner wrapper to avoid stringly typed parameters.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RepositoryOwner(String);

impl RepositoryOwner {
    /// Validates that the owner is non-empty.
    ///
    /// # Errors
    ///
    /// Returns [`TrackerError::InvalidIssueReference`] for a blank owner.
    pub fn new(value: &str) -> Result<Self, TrackerError> {
        if value.is_empty() {
            return Err(TrackerError::InvalidIssueReference {
                message: "repository owner is empty".to_owned(),
            });
        }
        Ok(Self(value.to_owned()))
    }

    /// Borrow the owner value.
    #[must_use]
    pub const fn as_str(&self) -> &str {
        self.0.as_str()
    }
}

/// Repository name wrapper to prevent parameter mix-ups.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RepositoryName(String);

impl RepositoryName {
    /// Validates that the repository name is non-empty.
    ///
    /// # Errors
    ///
    /// Returns [`TrackerError::InvalidIssueReference`] for a blank name.
    pub fn new(value: &str) -> Result<Self, TrackerError> {
        if value.is_empty() {
            return Err(TrackerError::InvalidIssueReference {
                message: "repository name is empty".to_owned(),
            });
        }
        Ok(Self(value.to_owned()))
    }

    /// Borrow the repository name.
    #[must_use]
    pub const fn as_str(&self) -> &str {
        self.0.as_str()
    }
}

/// Issue or pull request number.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct IssueNumber(u64);

impl IssueNumber {
    /// Validates that the number is positive.
    ///
    /// # Errors
    ///
    /// Returns [`TrackerError::InvalidIssueReference`] for zero.
    pub fn new(value: u64) -> Result<Self, TrackerError> {
        if value == 0 {
            return Err(TrackerError::InvalidIssueReference {
                message: "issue number must be positive".to_owned(),
            });
        }
        Ok(Self(value))
    }

    /// Returns the numeric value.
    #[must_use]
    pub const fn get(self) -> u64 {
        self.0
    }
}

impl fmt::Display for IssueNumber {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Personal access token wrapper enforcing presence.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PersonalAccessToken(String);

impl PersonalAccessToken {
    /// Validates that the token is non-empty and trims whitespace.
    ///
    /// # Errors
    ///
    /// Returns `TrackerError::MissingToken` when the supplied string is blank.
    pub fn new(token: impl AsRef<str>) -> Result<Self, TrackerError> {
        let trimmed = token.as_ref().trim();
        if trimmed.is_empty() {
            return Err(TrackerError::MissingToken);
        }
        Ok(Self(trimmed.to_owned()))
    }

    /// Borrow the token value.
    #[must_use]
    pub const fn value(&self) -> &str {
        self.0.as_str()
    }
}

impl AsRef<str> for PersonalAccessToken {
    fn as_ref(&self) -> &str {
        self.value()
    }
}

/// Owner, repository, and number of one issue or pull request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IssueLocator {
    owner: RepositoryOwner,
    repository: RepositoryName,
    number: IssueNumber,
}

impl IssueLocator {
    /// Builds a locator from raw parts.
    ///
    /// # Errors
    ///
    /// Returns [`TrackerError::InvalidIssueReference`] when the owner or
    /// repository is blank or the number is zero.
    pub fn new(owner: &str, repository: &str, number: u64) -> Result<Self, TrackerError> {
        Ok(Self {
            owner: RepositoryOwner::new(owner)?,
            repository: RepositoryName::new(repository)?,
            number: IssueNumber::new(number)?,
        })
    }

    /// Locator for another issue in the same repository.
    #[must_use]
    pub fn with_number(&self, number: IssueNumber) -> Self {
        Self {
            owner: self.owner.clone(),
            repository: self.repository.clone(),
            number,
        }
    }

    /// Repository owner.
    #[must_use]
    pub const fn owner(&self) -> &RepositoryOwner {
        &self.owner
    }

    /// Repository name.
    #[must_use]
    pub const fn repository(&self) -> &RepositoryName {
        &self.repository
    }

    /// Issue number.
    #[must_use]
    pub const fn number(&self) -> IssueNumber {
        self.number
    }

    fn issue_path(&self) -> String {
        format!(
            "/repos/{}/{}/issues/{}",
            self.owner.as_str(),
            self.repository.as_str(),
            self.number.get()
        )
    }

    pub(crate) fn labels_path(&self) -> String {
        format!("{}/labels", self.issue_path())
    }

    pub(crate) fn label_path(&self, label: &str) -> String {
        format!("{}/labels/{}", self.issue_path(), urlencoding::encode(label))
    }

    pub(crate) fn comments_path(&self) -> String {
        format!("{}/comments", self.issue_path())
    }

    pub(crate) fn comment_path(&self, comment_id: u64) -> String {
        format!(
            "/repos/{}/{}/issues/comments/{comment_id}",
            self.owner.as_str(),
            self.repository.as_str()
        )
    }
}

impl fmt::Display for IssueLocator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}/{}{}",
            self.owner.as_str(),
            self.repository.as_str(),
            self.number
        )
    }
}
