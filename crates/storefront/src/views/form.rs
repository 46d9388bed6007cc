//! Product creation form.

use catalog_core::{Product, ProductDraft, ValidationErrors};
use tracing::{info, warn};

use crate::api::ProductApi;
use crate::gateway::ProductGateway;

/// Message shown after a successful submission.
pub const CREATED_MESSAGE: &str = "Product created successfully!";

/// Result of submitting the form.
#[derive(Debug, Clone, PartialEq)]
pub enum FormOutcome {
    /// Validation failed; nothing was sent and no state changed.
    Invalid(ValidationErrors),
    /// The product was created and appended to the product list.
    Created { product: Product, message: String },
    /// The request failed; `message` is the classified error text.
    Failed { message: String },
}

impl FormOutcome {
    /// Whether the form should be reset.
    #[must_use]
    pub const fn is_created(&self) -> bool {
        matches!(self, Self::Created { .. })
    }
}

/// Validate `draft` and, if valid, create the product.
pub async fn submit<A: ProductApi>(gateway: &ProductGateway<A>, draft: &ProductDraft) -> FormOutcome {
    let new_product = match draft.validate() {
        Ok(new_product) => new_product,
        Err(errors) => return FormOutcome::Invalid(errors),
    };

    match gateway.create_product(&new_product).await {
        Ok(product) => {
            info!(id = %product.id, "Product created successfully");
            FormOutcome::Created {
                product,
                message: CREATED_MESSAGE.to_string(),
            }
        }
        Err(e) => {
            warn!(error = %e, "Error creating product");
            FormOutcome::Failed {
                message: e.to_string(),
            }
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use std::sync::Arc;

    use super::*;
    use crate::cart_store::CartStore;
    use crate::error::TransportError;
    use crate::state::StateContainer;
    use crate::storage::MemoryStore;
    use crate::testing::StubApi;

    fn gateway(api: StubApi) -> ProductGateway<StubApi> {
        ProductGateway::new(
            api,
            StateContainer::new(),
            CartStore::new(Arc::new(MemoryStore::new())),
        )
    }

    fn draft() -> ProductDraft {
        ProductDraft {
            name: "Smartwatch".to_string(),
            description: "Fitness tracking smartwatch with heart rate monitor.".to_string(),
            price: "149.99".to_string(),
            image_url: "https://example.com/watch.jpg".to_string(),
            ..ProductDraft::default()
        }
    }

    #[tokio::test]
    async fn test_invalid_draft_sends_nothing() {
        let gateway = gateway(StubApi::default());
        let before = gateway.state().current_state();

        let outcome = submit(
            &gateway,
            &ProductDraft {
                price: "10".to_string(),
                ..draft()
            },
        )
        .await;

        let FormOutcome::Invalid(errors) = outcome else {
            panic!("expected validation failure, got {outcome:?}");
        };
        assert_eq!(errors.message_for("price"), Some("price must be at least 50"));
        assert!(gateway.api().created().is_empty());
        assert!(Arc::ptr_eq(&before, &gateway.state().current_state()));
    }

    #[tokio::test]
    async fn test_valid_draft_creates_product() {
        let gateway = gateway(StubApi::default());

        let outcome = submit(&gateway, &draft()).await;

        assert!(outcome.is_created());
        let FormOutcome::Created { product, message } = outcome else {
            unreachable!();
        };
        assert_eq!(message, CREATED_MESSAGE);
        assert_eq!(gateway.state().products(), vec![product]);
        assert_eq!(gateway.api().created()[0].name, "Smartwatch");
    }

    #[tokio::test]
    async fn test_failed_request_carries_classified_message() {
        let gateway = gateway(StubApi::default().failing(TransportError::Status {
            status: 500,
            message: "boom".to_string(),
        }));

        let outcome = submit(&gateway, &draft()).await;

        assert_eq!(
            outcome,
            FormOutcome::Failed {
                message: "Internal server error. Please try again later.".to_string()
            }
        );
    }
}
