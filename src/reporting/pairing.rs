//! Pairing of base algorithms with their `sfs+` boosted variants.

use std::collections::{BTreeMap, BTreeSet};

use crate::core::constants::algorithms::BOOSTER_PREFIX;

/// Base name to boosted name mapping and its inverse, derived once from the
/// set of algorithm names.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct BoosterPairs {
    boosted_by_base: BTreeMap<String, String>,
    base_by_boosted: BTreeMap<String, String>,
    unpaired: Vec<String>,
}

impl BoosterPairs {
    /// Pair every `sfs+<name>` with `<name>` when both are present.
    ///
    /// # Examples
    /// ```
    /// use sfs_stats::reporting::BoosterPairs;
    ///
    /// let pairs = BoosterPairs::from_names(["xz", "sfs+xz", "sfs+zstd", "raw"]);
    /// assert_eq!(pairs.boosted_of("xz"), Some("sfs+xz"));
    /// assert_eq!(pairs.base_of("sfs+xz"), Some("xz"));
    /// assert_eq!(pairs.unpaired(), ["sfs+zstd"]);
    /// ```
    pub fn from_names<'a, I>(names: I) -> Self
    where
        I: IntoIterator<Item = &'a str>,
    {
        let names: BTreeSet<&str> = names.into_iter().collect();
        let mut pairs = Self::default();

        for name in &names {
            let Some(base) = name.strip_prefix(BOOSTER_PREFIX) else {
                continue;
            };
            if !base.is_empty() && names.contains(base) {
                pairs
                    .boosted_by_base
                    .insert(base.to_string(), name.to_string());
                pairs
                    .base_by_boosted
                    .insert(name.to_string(), base.to_string());
            } else {
                pairs.unpaired.push(name.to_string());
            }
        }

        pairs
    }

    pub fn boosted_of(&self, base: &str) -> Option<&str> {
        self.boosted_by_base.get(base).map(String::as_str)
    }

    pub fn base_of(&self, boosted: &str) -> Option<&str> {
        self.base_by_boosted.get(boosted).map(String::as_str)
    }

    /// `(base, boosted)` pairs in base name order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.boosted_by_base
            .iter()
            .map(|(base, boosted)| (base.as_str(), boosted.as_str()))
    }

    /// Boosted names whose base algorithm is absent.
    pub fn unpaired(&self) -> &[String] {
        &self.unpaired
    }

    pub fn len(&self) -> usize {
        self.boosted_by_base.len()
    }

    pub fn is_empty(&self) -> bool {
        self.boosted_by_base.is_empty()
    }
}
