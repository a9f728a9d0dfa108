//! services/client/src/inspector.rs
//!
//! The shared funnel every failed action reports to. Interceptors look at the
//! originating action and the error and ask for a reaction; the actions layer
//! carries out the strongest one requested.

use std::sync::Arc;

use dnada_core::ports::PortError;
use tracing::debug;

/// What the actions layer should do after a failure.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Reaction {
    Ignore,
    /// Drop the session and route to the login page.
    ForceLogout,
}

pub trait ErrorInterceptor: Send + Sync {
    fn inspect(&self, action: &str, error: &PortError) -> Reaction;
}

/// Any matching closure can be registered directly.
impl<F> ErrorInterceptor for F
where
    F: Fn(&str, &PortError) -> Reaction + Send + Sync,
{
    fn inspect(&self, action: &str, error: &PortError) -> Reaction {
        self(action, error)
    }
}

/// Forces a logout whenever the backend answers 401.
#[derive(Debug, Clone, Copy, Default)]
pub struct LogoutOnUnauthorized;

impl ErrorInterceptor for LogoutOnUnauthorized {
    fn inspect(&self, _action: &str, error: &PortError) -> Reaction {
        if error.status() == Some(401) {
            Reaction::ForceLogout
        } else {
            Reaction::Ignore
        }
    }
}

/// The registry of interceptors. Empty by default, which makes every failure a no-op.
#[derive(Clone, Default)]
pub struct ErrorInspector {
    interceptors: Vec<Arc<dyn ErrorInterceptor>>,
}

impl ErrorInspector {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn register(&mut self, interceptor: impl ErrorInterceptor + 'static) {
        self.interceptors.push(Arc::new(interceptor));
    }

    /// Builder form of [`ErrorInspector::register`].
    pub fn with(mut self, interceptor: impl ErrorInterceptor + 'static) -> Self {
        self.register(interceptor);
        self
    }

    pub fn len(&self) -> usize {
        self.interceptors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.interceptors.is_empty()
    }

    /// Asks every interceptor and returns the strongest reaction.
    pub fn inspect(&self, action: &str, error: &PortError) -> Reaction {
        let reaction = self
            .interceptors
            .iter()
            .map(|interceptor| interceptor.inspect(action, error))
            .max()
            .unwrap_or(Reaction::Ignore);
        debug!(action, status = ?error.status(), ?reaction, "Inspected action failure");
        reaction
    }
}
