//! Boundary to the external account-linking flow.

use shared::domain::Identity;
use tokio::sync::mpsc;
use tracing::{info, warn};

/// Receives the identity of a freshly signed-up user. The onboarding core has
/// no responsibility past this call.
pub trait LinkingHandoff: Send + Sync {
    fn on_authenticated(&self, identity: &Identity);
}

pub struct LoggingLinkHandoff;

impl LinkingHandoff for LoggingLinkHandoff {
    fn on_authenticated(&self, identity: &Identity) {
        info!(user_id = %identity.id, "identity ready for account linking");
    }
}

/// Forwards the identity to a task that drives the link provider.
pub struct ChannelLinkHandoff {
    tx: mpsc::UnboundedSender<Identity>,
}

impl ChannelLinkHandoff {
    pub fn new() -> (Self, mpsc::UnboundedReceiver<Identity>) {
        let (tx, rx) = mpsc::unbounded_channel();
        (Self { tx }, rx)
    }
}

impl LinkingHandoff for ChannelLinkHandoff {
    fn on_authenticated(&self, identity: &Identity) {
        if self.tx.send(identity.clone()).is_err() {
            warn!(
                user_id = %identity.id,
                "account-linking receiver dropped before handoff"
            );
        }
    }
}
