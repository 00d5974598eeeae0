//! In-memory session: who is shopping and what they bought this visit
use crate::identity::Identity;
use std::collections::BTreeSet;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ShopSession {
    identity: Option<Identity>,
    purchased: BTreeSet<u32>,
}

impl ShopSession {
    #[must_use]
    pub const fn identity(&self) -> Option<&Identity> {
        self.identity.as_ref()
    }

    pub fn sign_in(&mut self, identity: Identity) {
        self.identity = Some(identity);
    }

    /// Dismissing the sign-in prompt leaves the visitor shopping as a guest.
    pub fn continue_as_guest(&mut self) {
        self.identity = Some(Identity::guest());
    }

    #[must_use]
    pub fn username(&self) -> &str {
        self.identity
            .as_ref()
            .map_or(crate::identity::GUEST_NAME, |id| id.username.as_str())
    }

    #[must_use]
    pub fn is_admin(&self) -> bool {
        self.identity.as_ref().is_some_and(|id| id.is_admin)
    }

    pub fn mark_purchased(&mut self, item_id: u32) {
        self.purchased.insert(item_id);
    }

    #[must_use]
    pub fn is_purchased(&self, item_id: u32) -> bool {
        self.purchased.contains(&item_id)
    }

    #[must_use]
    pub const fn purchased(&self) -> &BTreeSet<u32> {
        &self.purchased
    }
}
