//! Authority expansion: raw grants to effective capabilities.
//!
//! Raw grant strings are opaque everywhere else in the subsystem; this
//! module is the single place that interprets them. Expansion is a pure
//! set-to-set function with no error conditions, so callers can apply it
//! anywhere in the reconciliation pipeline without changing outcomes.

use serde_json::Value;
use std::collections::{BTreeMap, BTreeSet};

/// Role grant that implies the full resolution capability set.
pub const ROLE_ADMIN: &str = "ROLE_ADMIN";

/// Capability to read resolutions.
pub const RESOLUTION_READ: &str = "resolution:read";

/// Capability to create and mutate resolutions.
pub const RESOLUTION_WRITE: &str = "resolution:write";

/// Capability to share a resolution; derived, never granted directly.
pub const RESOLUTION_SHARE: &str = "resolution:share";

/// Identity attribute consulted by the premium rule.
pub const SUBSCRIPTION_ATTRIBUTE: &str = "subscription";

/// Subscription tier that unlocks sharing.
pub const PREMIUM_TIER: &str = "premium";

/// Expands raw granted authorities into the effective capability set.
///
/// Three rules, applied in order:
///
/// 1. every raw grant is kept verbatim — unknown grants pass through so
///    new authority strings deploy without touching this function;
/// 2. `ROLE_ADMIN` additionally yields `resolution:read` and
///    `resolution:write`;
/// 3. if the set now holds `resolution:write` and the identity's
///    `subscription` attribute is `"premium"`, `resolution:share` is
///    added on top.
///
/// Output is a set, so the function is deterministic and independent of
/// input order.
pub fn expand(
    raw_grants: &BTreeSet<String>,
    attributes: &BTreeMap<String, Value>,
) -> BTreeSet<String> {
    let mut effective: BTreeSet<String> = raw_grants.iter().cloned().collect();

    if raw_grants.contains(ROLE_ADMIN) {
        effective.insert(RESOLUTION_READ.to_string());
        effective.insert(RESOLUTION_WRITE.to_string());
    }

    let premium = attributes
        .get(SUBSCRIPTION_ATTRIBUTE)
        .and_then(Value::as_str)
        == Some(PREMIUM_TIER);
    if premium && effective.contains(RESOLUTION_WRITE) {
        effective.insert(RESOLUTION_SHARE.to_string());
    }

    effective
}
