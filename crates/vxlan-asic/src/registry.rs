//! Process-wide capability-provider registry.
//!
//! A dataplane plugin registers its [`VxlanAsicOps`] implementation under a
//! (name, major, minor) triple at startup; consumers resolve a handle by the
//! same triple. Resolution requires an exact major match and a registered
//! minor at least as new as requested.

use std::collections::HashMap;
use std::sync::{Arc, RwLock};

use once_cell::sync::Lazy;
use tracing::{info, warn};

use crate::error::{AsicError, AsicResult};
use crate::provider::VxlanAsicOps;

struct Registration {
    minor: u32,
    ops: Arc<dyn VxlanAsicOps>,
}

/// Registered providers keyed by (name, major).
static PROVIDERS: Lazy<RwLock<HashMap<(String, u32), Registration>>> =
    Lazy::new(|| RwLock::new(HashMap::new()));

/// Registers a provider under the given name and interface version.
///
/// A second registration for the same (name, major) is rejected; ship a new
/// major version instead of mutating a live registration.
pub fn register_provider(
    name: &str,
    major: u32,
    minor: u32,
    ops: Arc<dyn VxlanAsicOps>,
) -> AsicResult<()> {
    let mut providers = PROVIDERS.write().expect("provider registry poisoned");

    let key = (name.to_string(), major);
    if providers.contains_key(&key) {
        warn!("Provider '{}' (major {}) already registered", name, major);
        return Err(AsicError::already_registered(name, major));
    }

    providers.insert(key, Registration { minor, ops });
    info!("Registered ASIC provider '{}' (v{}.{})", name, major, minor);
    Ok(())
}

/// Resolves a provider handle by name and interface version.
///
/// The major version must match exactly; the registered minor must be at
/// least the requested minor.
pub fn find_provider(name: &str, major: u32, minor: u32) -> AsicResult<Arc<dyn VxlanAsicOps>> {
    let providers = PROVIDERS.read().expect("provider registry poisoned");

    match providers.get(&(name.to_string(), major)) {
        Some(reg) if reg.minor >= minor => Ok(Arc::clone(&reg.ops)),
        _ => Err(AsicError::provider_not_found(name, major, minor)),
    }
}
