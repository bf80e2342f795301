//! Fetch state shared by the feature stores.

use crate::domain::DomainError;

/// Phase of a store's list.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum FetchState {
    /// Nothing requested yet.
    #[default]
    Idle,
    /// A request is in flight.
    Loading,
    /// The last request succeeded.
    Loaded,
    /// The last request failed.
    Failed(DomainError),
}

/// A list together with the state of the request that fills it.
///
/// The list always holds the result of the last successful fetch, so callers
/// can keep showing it while a refetch is loading or after one failed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Resource<T> {
    items: Vec<T>,
    state: FetchState,
    loaded_once: bool,
}

impl<T> Default for Resource<T> {
    fn default() -> Self {
        Self {
            items: Vec::new(),
            state: FetchState::Idle,
            loaded_once: false,
        }
    }
}

impl<T> Resource<T> {
    /// Current list.
    pub fn items(&self) -> &[T] {
        &self.items
    }

    /// Current phase.
    pub fn state(&self) -> &FetchState {
        &self.state
    }

    /// Whether a request is in flight.
    pub fn is_loading(&self) -> bool {
        matches!(self.state, FetchState::Loading)
    }

    /// Failure of the last request, if it failed.
    pub fn error(&self) -> Option<&DomainError> {
        match &self.state {
            FetchState::Failed(error) => Some(error),
            _ => None,
        }
    }

    /// Drop a recorded failure.
    pub fn clear_error(&mut self) {
        if self.error().is_some() {
            self.settle();
        }
    }

    pub(crate) fn begin(&mut self) {
        self.state = FetchState::Loading;
    }

    /// Replace the list with a fresh fetch result.
    pub(crate) fn replace(&mut self, items: Vec<T>) {
        self.items = items;
        self.state = FetchState::Loaded;
        self.loaded_once = true;
    }

    pub(crate) fn fail(&mut self, error: DomainError) {
        self.state = FetchState::Failed(error);
    }

    /// Leave `Loading` after a confirmed mutation without refetching.
    pub(crate) fn settle(&mut self) {
        self.state = if self.loaded_once {
            FetchState::Loaded
        } else {
            FetchState::Idle
        };
    }

    pub(crate) fn items_mut(&mut self) -> &mut Vec<T> {
        &mut self.items
    }
}

/// Outcome of the last submission (transfer, bill payment, scheduling).
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum Submission {
    /// Nothing submitted, or the outcome was acknowledged.
    #[default]
    Idle,
    /// The backend accepted the submission.
    Succeeded {
        /// Confirmation shown to the user.
        message: String,
    },
    /// The submission was refused or never reached the backend.
    Failed(DomainError),
}

impl Submission {
    /// Whether the last submission succeeded.
    pub fn is_success(&self) -> bool {
        matches!(self, Self::Succeeded { .. })
    }

    /// Confirmation text of a successful submission.
    pub fn message(&self) -> Option<&str> {
        match self {
            Self::Succeeded { message } => Some(message),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    //! Regression coverage for this module.
    use super::*;

    #[test]
    fn failed_refetch_keeps_last_list() {
        let mut resource = Resource::default();
        resource.begin();
        resource.replace(vec![1, 2]);

        resource.begin();
        assert!(resource.is_loading());
        assert_eq!(resource.items(), &[1, 2]);

        resource.fail(DomainError::network("Failed to fetch accounts"));
        assert_eq!(resource.items(), &[1, 2]);
        assert_eq!(
            resource.error().map(DomainError::message),
            Some("Failed to fetch accounts")
        );

        resource.clear_error();
        assert_eq!(resource.state(), &FetchState::Loaded);
    }

    #[test]
    fn settling_before_any_fetch_returns_to_idle() {
        let mut resource: Resource<u8> = Resource::default();
        resource.begin();
        resource.settle();
        assert_eq!(resource.state(), &FetchState::Idle);
    }
}
