use std::error::Error;

use crate::traits::Transformer;

/// A set of hyperparameters whose values have not been checked for validity. A reference to the
/// checked hyperparameters can only be obtained after checking has completed. If the
/// `Transformer` trait has been implemented on the checked hyperparameters, it is also
/// implemented on the unchecked hyperparameters through [`TransformGuard`], with the checking
/// step done automatically.
///
/// The hyperparameter validation done in `check_ref()` and `check()` should be identical.
pub trait ParamGuard {
    /// The checked hyperparameters
    type Checked;
    /// Error type resulting from failed hyperparameter checking
    type Error: Error;

    /// Checks the hyperparameters and returns a reference to the checked hyperparameters if
    /// successful
    fn check_ref(&self) -> Result<&Self::Checked, Self::Error>;

    /// Checks the hyperparameters and returns the checked hyperparameters if successful
    fn check(self) -> Result<Self::Checked, Self::Error>;

    /// Calls `check()` and unwraps the result
    fn check_unwrap(self) -> Self::Checked
    where
        Self: Sized,
    {
        self.check().unwrap()
    }
}

/// Unchecked hyperparameters that should be checked before transforming.
///
/// Implementing this marker on a `ParamGuard` whose checked version is a `Transformer`
/// returning `Result<T, E>` makes the unchecked version a `Transformer` as well. Checking
/// errors are converted into `E`.
pub trait TransformGuard: ParamGuard {}

impl<R, T, E, P> Transformer<R, Result<T, E>> for P
where
    P: TransformGuard,
    P::Checked: Transformer<R, Result<T, E>>,
    E: From<P::Error>,
{
    fn transform(&self, x: R) -> Result<T, E> {
        self.check_ref()?.transform(x)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use thiserror::Error;

    #[derive(Debug, Error)]
    #[error("offset must be positive")]
    struct OffsetError;

    #[derive(Debug)]
    struct ValidOffset(i32);

    struct Offset(ValidOffset);

    impl ParamGuard for Offset {
        type Checked = ValidOffset;
        type Error = OffsetError;

        fn check_ref(&self) -> Result<&ValidOffset, OffsetError> {
            if self.0 .0 > 0 {
                Ok(&self.0)
            } else {
                Err(OffsetError)
            }
        }

        fn check(self) -> Result<ValidOffset, OffsetError> {
            self.check_ref()?;
            Ok(self.0)
        }
    }

    impl TransformGuard for Offset {}

    impl Transformer<i32, Result<i32, OffsetError>> for ValidOffset {
        fn transform(&self, x: i32) -> Result<i32, OffsetError> {
            Ok(x + self.0)
        }
    }

    #[test]
    fn unchecked_params_transform_after_checking() {
        assert_eq!(Offset(ValidOffset(2)).transform(3).unwrap(), 5);
        assert!(Offset(ValidOffset(-1)).transform(3).is_err());
    }

    #[test]
    fn check_consumes_into_valid_params() {
        assert_eq!(Offset(ValidOffset(4)).check_unwrap().0, 4);
        assert!(Offset(ValidOffset(0)).check().is_err());
    }
}
