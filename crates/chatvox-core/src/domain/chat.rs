//! Chat events as handed over by the chat source.

use std::sync::atomic::{AtomicI64, Ordering};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Author name used when the chat source supplies none.
const ANONYMOUS_AUTHOR: &str = "anonymous";

/// Last fallback id handed out, in epoch milliseconds.
static LAST_FALLBACK_ID: AtomicI64 = AtomicI64::new(0);

/// Role badges of a chat author.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RoleFlags {
    /// Author is a channel moderator.
    pub moderator: bool,
    /// Author holds the VIP badge.
    pub vip: bool,
}

impl RoleFlags {
    /// Flags for an author without any badge.
    pub const NONE: Self = Self {
        moderator: false,
        vip: false,
    };

    /// Flags for a moderator.
    pub const MODERATOR: Self = Self {
        moderator: true,
        vip: false,
    };

    /// Flags for a VIP.
    pub const VIP: Self = Self {
        moderator: false,
        vip: true,
    };
}

/// A single chat message observed on the stream.
///
/// Immutable once built. The id is unique per message; when the source does
/// not provide one, a monotonic value derived from the receipt time is used.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ChatEvent {
    id: String,
    author: String,
    text: String,
    roles: RoleFlags,
}

impl ChatEvent {
    /// Build an event received now.
    ///
    /// Empty ids and author names are treated as absent.
    pub fn new(
        id: Option<String>,
        author: impl Into<String>,
        text: impl Into<String>,
        roles: RoleFlags,
    ) -> Self {
        Self::with_receipt_time(id, author, text, roles, Utc::now())
    }

    /// Build an event with an explicit receipt time.
    ///
    /// The receipt time only seeds the fallback id.
    pub fn with_receipt_time(
        id: Option<String>,
        author: impl Into<String>,
        text: impl Into<String>,
        roles: RoleFlags,
        received_at: DateTime<Utc>,
    ) -> Self {
        let id = id
            .filter(|id| !id.trim().is_empty())
            .unwrap_or_else(|| fallback_id(received_at));

        let author = author.into();
        let author = if author.trim().is_empty() {
            ANONYMOUS_AUTHOR.to_string()
        } else {
            author
        };

        Self {
            id,
            author,
            text: text.into(),
            roles,
        }
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn author(&self) -> &str {
        &self.author
    }

    /// Raw message text, exactly as received.
    pub fn text(&self) -> &str {
        &self.text
    }

    pub const fn roles(&self) -> RoleFlags {
        self.roles
    }
}

/// Derive a unique id from the receipt time.
///
/// Strictly increasing across the process even when several messages arrive
/// within the same millisecond.
fn fallback_id(received_at: DateTime<Utc>) -> String {
    let millis = received_at.timestamp_millis();
    let mut prev = LAST_FALLBACK_ID.load(Ordering::SeqCst);
    loop {
        let next = millis.max(prev + 1);
        match LAST_FALLBACK_ID.compare_exchange_weak(prev, next, Ordering::SeqCst, Ordering::SeqCst)
        {
            Ok(_) => return next.to_string(),
            Err(actual) => prev = actual,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn keeps_source_id() {
        let event = ChatEvent::new(Some("abc-1".into()), "alice", "hi", RoleFlags::NONE);
        assert_eq!(event.id(), "abc-1");
        assert_eq!(event.author(), "alice");
        assert_eq!(event.text(), "hi");
    }

    #[test]
    fn fallback_ids_are_unique_within_same_instant() {
        let now = Utc::now();
        let a = ChatEvent::with_receipt_time(None, "a", "x", RoleFlags::NONE, now);
        let b = ChatEvent::with_receipt_time(Some(String::new()), "b", "y", RoleFlags::NONE, now);
        assert_ne!(a.id(), b.id());

        let a_num: i64 = a.id().parse().unwrap();
        let b_num: i64 = b.id().parse().unwrap();
        assert!(b_num > a_num);
    }

    #[test]
    fn blank_author_becomes_anonymous() {
        let event = ChatEvent::new(None, "  ", "hi", RoleFlags::VIP);
        assert_eq!(event.author(), "anonymous");
        assert!(event.roles().vip);
    }
}
