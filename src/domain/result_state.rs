// src/domain/result_state.rs

use serde::Serialize;

/// Three-way outcome of one logical query.
///
/// Every observable the coordinator exposes carries exactly this shape.
/// Consumers must handle all three variants; treating an unhandled variant
/// as success is a defect.
///
/// `Error` intentionally carries no payload. Consumers only branch on the
/// variant; the failure cause is logged at the coordinator boundary.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "state", content = "value", rename_all = "snake_case")]
pub enum ResultState<T> {
    Loading,
    Success(T),
    Error,
}

impl<T> ResultState<T> {
    pub fn is_loading(&self) -> bool {
        matches!(self, ResultState::Loading)
    }

    pub fn is_success(&self) -> bool {
        matches!(self, ResultState::Success(_))
    }

    pub fn is_error(&self) -> bool {
        matches!(self, ResultState::Error)
    }

    /// The success value, when this state is terminal and successful
    pub fn success(&self) -> Option<&T> {
        match self {
            ResultState::Success(value) => Some(value),
            _ => None,
        }
    }

    pub fn into_success(self) -> Option<T> {
        match self {
            ResultState::Success(value) => Some(value),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_variant_inspection() {
        let loading: ResultState<i32> = ResultState::Loading;
        assert!(loading.is_loading());
        assert!(!loading.is_success());
        assert!(!loading.is_error());

        let success = ResultState::Success(7);
        assert!(success.is_success());
        assert_eq!(success.success(), Some(&7));

        let error: ResultState<i32> = ResultState::Error;
        assert!(error.is_error());
        assert_eq!(error.success(), None);
    }

    #[test]
    fn test_into_success() {
        assert_eq!(ResultState::Success(vec![1, 2]).into_success(), Some(vec![1, 2]));
        assert_eq!(ResultState::<Vec<i32>>::Loading.into_success(), None);
        assert_eq!(ResultState::<Vec<i32>>::Error.into_success(), None);
    }
}
