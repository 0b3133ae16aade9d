//! Confirmation-gated destructive actions.
//!
//! Destructive requests are returned to the host as a [`ConfirmRequest`]
//! instead of blocking. The host asks the user however it likes and hands
//! the answer back through `Session::resolve`.

use crate::catalog::ProductView;
use crate::layers::LayerId;

/// A destructive action awaiting a yes/no answer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfirmAction {
    /// Remove one layer from a bucket.
    DeleteLayer { key: ProductView, id: LayerId },
    /// Remove every layer from a bucket.
    ClearView(ProductView),
}

/// A pending confirmation prompt.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ConfirmRequest {
    pub action: ConfirmAction,
}

impl ConfirmRequest {
    pub fn delete_layer(key: ProductView, id: LayerId) -> Self {
        Self {
            action: ConfirmAction::DeleteLayer { key, id },
        }
    }

    pub fn clear_view(key: ProductView) -> Self {
        Self {
            action: ConfirmAction::ClearView(key),
        }
    }

    /// Bucket the request applies to.
    pub fn key(&self) -> ProductView {
        match self.action {
            ConfirmAction::DeleteLayer { key, .. } | ConfirmAction::ClearView(key) => key,
        }
    }

    /// Question to show the user.
    pub fn prompt(&self) -> &'static str {
        match self.action {
            ConfirmAction::DeleteLayer { .. } => "Remove this element?",
            ConfirmAction::ClearView(_) => "Clear all customizations on this view?",
        }
    }
}

/// Answers confirmation prompts.
pub trait Confirmer {
    fn confirm(&mut self, request: &ConfirmRequest) -> bool;
}

/// Gives the same answer to every prompt.
#[derive(Debug, Clone, Copy)]
pub struct FixedAnswer(pub bool);

impl Confirmer for FixedAnswer {
    fn confirm(&mut self, _request: &ConfirmRequest) -> bool {
        self.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use uuid::Uuid;

    #[test]
    fn test_prompts() {
        let key = ProductView::default();
        assert_eq!(ConfirmRequest::clear_view(key).prompt(), "Clear all customizations on this view?");
        assert_eq!(
            ConfirmRequest::delete_layer(key, Uuid::new_v4()).prompt(),
            "Remove this element?"
        );
    }

    #[test]
    fn test_fixed_answer() {
        let request = ConfirmRequest::clear_view(ProductView::default());
        assert!(FixedAnswer(true).confirm(&request));
        assert!(!FixedAnswer(false).confirm(&request));
    }
}
