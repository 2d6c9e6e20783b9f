use std::cell::RefCell;
use std::marker::PhantomData;
use std::sync::Arc;

use sqlsyntax_core::{Error, Result};
use tracing::trace;

use crate::provider::SyntaxProvider;

thread_local! {
    static ACTIVE: RefCell<Option<Arc<dyn SyntaxProvider>>> = const { RefCell::new(None) };
}

/// The currently selected syntax provider.
///
/// The slot is per thread: a provider activated on one thread is never
/// observed by another. Prefer [`SyntaxContext::scoped`], which restores the
/// previous provider when the guard drops.
#[derive(Debug)]
pub struct SyntaxContext;

impl SyntaxContext {
    /// Activate `provider`, returning the one it replaced.
    pub fn set(provider: Arc<dyn SyntaxProvider>) -> Option<Arc<dyn SyntaxProvider>> {
        trace!(dialect = %provider.dialect(), "activating syntax provider");
        ACTIVE.with(|slot| slot.borrow_mut().replace(provider))
    }

    /// Empty the slot, returning the provider that was active.
    pub fn clear() -> Option<Arc<dyn SyntaxProvider>> {
        trace!("clearing syntax provider");
        ACTIVE.with(|slot| slot.borrow_mut().take())
    }

    pub fn current() -> Result<Arc<dyn SyntaxProvider>> {
        ACTIVE
            .with(|slot| slot.borrow().clone())
            .ok_or(Error::NoActiveProvider)
    }

    pub fn is_active() -> bool {
        ACTIVE.with(|slot| slot.borrow().is_some())
    }

    /// Activate `provider` until the returned guard is dropped.
    pub fn scoped(provider: Arc<dyn SyntaxProvider>) -> ProviderGuard {
        let previous = Self::set(provider);
        ProviderGuard {
            previous,
            _not_send: PhantomData,
        }
    }
}

/// Restores the previously active provider on drop.
#[derive(Debug)]
#[must_use = "the provider is deactivated as soon as the guard is dropped"]
pub struct ProviderGuard {
    previous: Option<Arc<dyn SyntaxProvider>>,
    // The guard restores a thread-local slot and must stay on its thread.
    _not_send: PhantomData<*const ()>,
}

impl Drop for ProviderGuard {
    fn drop(&mut self) {
        match self.previous.take() {
            Some(previous) => {
                SyntaxContext::set(previous);
            }
            None => {
                SyntaxContext::clear();
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::provider::Dialect;

    #[test]
    fn empty_slot_reports_no_active_provider() {
        SyntaxContext::clear();
        assert!(!SyntaxContext::is_active());
        assert!(matches!(
            SyntaxContext::current(),
            Err(Error::NoActiveProvider)
        ));
    }

    #[test]
    fn scoped_guard_restores_previous_provider() {
        SyntaxContext::set(Dialect::SqlCe.provider());
        {
            let _guard = SyntaxContext::scoped(Dialect::SqlServer.provider());
            let active = SyntaxContext::current().expect("provider inside scope");
            assert_eq!(active.dialect(), Dialect::SqlServer);
        }
        let restored = SyntaxContext::current().expect("provider after scope");
        assert_eq!(restored.dialect(), Dialect::SqlCe);

        SyntaxContext::clear();
        {
            let _guard = SyntaxContext::scoped(Dialect::SqlServer.provider());
            assert!(SyntaxContext::is_active());
        }
        assert!(!SyntaxContext::is_active());
    }

    #[test]
    fn slot_is_not_shared_across_threads() {
        SyntaxContext::set(Dialect::SqlServer.provider());
        let seen_on_other_thread = std::thread::spawn(SyntaxContext::is_active)
            .join()
            .expect("join thread");
        assert!(!seen_on_other_thread);
        SyntaxContext::clear();
    }
}
