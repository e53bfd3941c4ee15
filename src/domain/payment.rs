use super::ports::{PaymentBackend, PaymentConfirmer};
use crate::error::Result;

/// Opaque single-use authorization handle from the payment backend.
/// Exists only between intent creation and confirmation.
#[derive(Clone, PartialEq, Eq)]
pub struct ClientSecret(String);

impl ClientSecret {
    pub fn new(secret: impl Into<String>) -> Self {
        Self(secret.into())
    }

    pub fn expose(&self) -> &str {
        &self.0
    }
}

// The secret must not leak into logs or error chains.
impl std::fmt::Debug for ClientSecret {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("ClientSecret(..)")
    }
}

/// Where the session stands with the payment provider.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GateState {
    /// No intent requested yet.
    Uninitiated,
    /// An intent exists and awaits the user's confirmation. At most one
    /// secret is ever outstanding.
    Authorizing(ClientSecret),
    /// Payment went through. Terminal for the session.
    Authorized,
}

/// The payment gate in front of the processing dispatcher.
///
/// `Uninitiated -> Authorizing -> Authorized`, authorization being
/// monotonic: once a session has paid, every later attempt passes the
/// gate without touching the backend or the provider again.
pub struct PaymentGate {
    state: GateState,
    amount_minor_units: u32,
}

impl PaymentGate {
    pub fn new(amount_minor_units: u32) -> Self {
        Self {
            state: GateState::Uninitiated,
            amount_minor_units,
        }
    }

    pub fn state(&self) -> &GateState {
        &self.state
    }

    pub fn is_authorized(&self) -> bool {
        self.state == GateState::Authorized
    }

    /// Drives the gate until it is `Authorized`, or fails.
    ///
    /// - `Authorized`: returns immediately, no collaborator calls.
    /// - `Uninitiated`: requests one intent, then asks for confirmation.
    ///   If intent creation fails the gate stays `Uninitiated` (no secret
    ///   was issued) and the next attempt requests a fresh intent.
    /// - `Authorizing`: re-submits the outstanding secret for
    ///   confirmation without creating a second intent. A declined
    ///   confirmation keeps the secret so the user can retry without
    ///   re-staging anything.
    pub async fn pass(
        &mut self,
        backend: &dyn PaymentBackend,
        confirmer: &dyn PaymentConfirmer,
    ) -> Result<()> {
        let secret = match &self.state {
            GateState::Authorized => return Ok(()),
            GateState::Authorizing(secret) => secret.clone(),
            GateState::Uninitiated => {
                let secret = backend.create_intent(self.amount_minor_units).await?;
                tracing::info!(amount = self.amount_minor_units, "payment intent created");
                self.state = GateState::Authorizing(secret.clone());
                secret
            }
        };

        confirmer.confirm(&secret).await?;
        self.state = GateState::Authorized;
        tracing::info!("payment authorized for the session");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::WorkflowError;
    use crate::infrastructure::in_memory::{
        AutoConfirmer, DecliningConfirmer, FailingPaymentBackend, RecordingPaymentBackend,
    };

    #[tokio::test]
    async fn test_gate_authorizes_once_and_stays_authorized() {
        let backend = RecordingPaymentBackend::new();
        let confirmer = AutoConfirmer::new();
        let mut gate = PaymentGate::new(500);

        gate.pass(&backend, &confirmer).await.unwrap();
        assert!(gate.is_authorized());
        assert_eq!(backend.intents_created(), 1);
        assert_eq!(backend.amounts(), vec![500]);

        // Later attempts never touch the collaborators again.
        gate.pass(&backend, &confirmer).await.unwrap();
        gate.pass(&backend, &confirmer).await.unwrap();
        assert_eq!(backend.intents_created(), 1);
        assert_eq!(confirmer.confirmations(), 1);
    }

    #[tokio::test]
    async fn test_declined_confirmation_keeps_the_same_secret() {
        let backend = RecordingPaymentBackend::new();
        let confirmer = DecliningConfirmer::new("Your card was declined.");
        let mut gate = PaymentGate::new(500);

        let err = gate.pass(&backend, &confirmer).await.unwrap_err();
        assert_eq!(err.to_string(), "Your card was declined.");
        let GateState::Authorizing(first) = gate.state().clone() else {
            panic!("gate should be authorizing");
        };

        // Retrying re-submits the outstanding secret; no second intent.
        let _ = gate.pass(&backend, &confirmer).await.unwrap_err();
        assert_eq!(backend.intents_created(), 1);
        assert_eq!(gate.state(), &GateState::Authorizing(first));
    }

    #[tokio::test]
    async fn test_intent_failure_leaves_gate_uninitiated() {
        let backend = FailingPaymentBackend::new("backend unreachable");
        let confirmer = AutoConfirmer::new();
        let mut gate = PaymentGate::new(500);

        let err = gate.pass(&backend, &confirmer).await.unwrap_err();
        assert!(matches!(err, WorkflowError::PaymentIntent(_)));
        assert_eq!(gate.state(), &GateState::Uninitiated);
        assert_eq!(confirmer.confirmations(), 0);
    }

    #[test]
    fn test_client_secret_debug_is_redacted() {
        let secret = ClientSecret::new("pi_12345_secret_67890");
        assert_eq!(format!("{secret:?}"), "ClientSecret(..)");
    }
}
