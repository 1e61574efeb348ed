//! Outbound boundary into the component framework.

use async_trait::async_trait;
use ravel_core::{Error, EventArgs, EventBinding, Result};
use std::num::NonZeroU64;
use tokio_util::sync::CancellationToken;

/// Entry point the component framework exposes for input events.
///
/// Handler ids are non-zero by construction, so an unbound binding can never
/// reach an implementation.
#[async_trait]
pub trait EventDispatcher: Send + Sync {
    async fn dispatch(
        &self,
        handler_id: NonZeroU64,
        args: EventArgs,
        cancel: &CancellationToken,
    ) -> Result<()>;
}

/// Handler id of `binding`, or an invalid-dispatch error for id 0
pub fn handler_id(binding: &EventBinding) -> Result<NonZeroU64> {
    NonZeroU64::new(binding.handler_id).ok_or_else(|| {
        Error::invalid_dispatch(format!("'{}' is bound to handler id 0", binding.name))
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_zero_handler_is_rejected() {
        let err = handler_id(&EventBinding::new("onclick", 0)).unwrap_err();
        assert!(matches!(err, Error::InvalidDispatch { .. }));
        assert_eq!(handler_id(&EventBinding::new("onclick", 7)).unwrap().get(), 7);
    }
}
