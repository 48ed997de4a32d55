use crate::platform::{Platform, PlatformProfile};

/// Read-only catalog of platform profiles, built once and shared by every
/// concurrent search task.
#[derive(Debug, Clone)]
pub struct PlatformRegistry {
    profiles: Vec<PlatformProfile>,
}

impl PlatformRegistry {
    #[must_use]
    pub fn new() -> Self {
        Self {
            profiles: Platform::ALL.into_iter().map(Platform::profile).collect(),
        }
    }

    /// Looks up a profile by display name or slug.
    #[must_use]
    pub fn profile_for(&self, name: &str) -> Option<&PlatformProfile> {
        Platform::from_name(name).map(|p| self.profile(p))
    }

    /// # Panics
    ///
    /// Does not panic: the registry holds one profile per [`Platform`]
    /// variant, in declaration order.
    #[must_use]
    pub fn profile(&self, platform: Platform) -> &PlatformProfile {
        &self.profiles[platform as usize]
    }

    /// Every registered platform, in declaration order.
    pub fn platforms(&self) -> impl Iterator<Item = Platform> + '_ {
        self.profiles.iter().map(|p| p.platform)
    }

    pub fn profiles(&self) -> impl Iterator<Item = &PlatformProfile> {
        self.profiles.iter()
    }

    /// Maps requested names to platforms, keeping request order. Unknown
    /// names and repeats are dropped.
    #[must_use]
    pub fn select<S: AsRef<str>>(&self, names: &[S]) -> Vec<Platform> {
        let mut selected = Vec::with_capacity(names.len());
        for name in names {
            if let Some(p) = Platform::from_name(name.as_ref()) {
                if !selected.contains(&p) {
                    selected.push(p);
                }
            }
        }
        selected
    }
}

impl Default for PlatformRegistry {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn registry_indexes_profiles_by_variant() {
        let registry = PlatformRegistry::new();
        for platform in Platform::ALL {
            assert_eq!(registry.profile(platform).platform, platform);
        }
    }

    #[test]
    fn profile_for_unknown_name_is_none() {
        let registry = PlatformRegistry::new();
        assert!(registry.profile_for("Walmart").is_none());
        assert_eq!(
            registry.profile_for("Target").map(|p| p.search_domain),
            Some("target.com")
        );
    }

    #[test]
    fn select_drops_unknown_and_duplicate_names() {
        let registry = PlatformRegistry::new();
        let selected = registry.select(&["StockX", "Walmart", "ebay", "stockx"]);
        assert_eq!(selected, vec![Platform::StockX, Platform::Ebay]);
    }

    #[test]
    fn platforms_lists_all_five() {
        let registry = PlatformRegistry::new();
        assert_eq!(registry.platforms().count(), 5);
    }
}
