//! Shared cache of compiled masks.
//!
//! Compiling a format is far more expensive than applying it, and a field
//! re-selects its mask on every keystroke, so compiled masks are kept here
//! keyed by format, notations and direction. The cache is an explicit value:
//! share it between fields with an `Arc<MaskCache>`.

use std::collections::HashMap;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use crate::format::FormatError;
use crate::mask::{Mask, TextDirection};
use crate::model::Notation;
use crate::rtl::mirror_format;

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
struct MaskKey {
    /// Mirrored for right-to-left masks
    format: String,
    custom_notations: Vec<Notation>,
    direction: TextDirection,
}

impl MaskKey {
    fn new(format: &str, custom_notations: &[Notation], direction: TextDirection) -> Self {
        let format = match direction {
            TextDirection::LeftToRight => format.to_string(),
            TextDirection::RightToLeft => mirror_format(format),
        };
        Self {
            format,
            custom_notations: custom_notations.to_vec(),
            direction,
        }
    }
}

/// Thread-safe map from format to compiled [`Mask`].
#[derive(Debug, Default)]
pub struct MaskCache {
    masks: Mutex<HashMap<MaskKey, Arc<Mask>>>,
}

impl MaskCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Return the cached mask for `format`, compiling it on first use.
    ///
    /// Failed compilations are not cached.
    pub fn get_or_create(
        &self,
        format: &str,
        custom_notations: &[Notation],
        right_to_left: bool,
    ) -> Result<Arc<Mask>, FormatError> {
        let direction = TextDirection::from_right_to_left(right_to_left);
        let key = MaskKey::new(format, custom_notations, direction);

        let mut masks = self.lock();
        if let Some(mask) = masks.get(&key) {
            tracing::debug!(format, ?direction, "mask cache hit");
            return Ok(Arc::clone(mask));
        }

        let mask = Arc::new(Mask::with_direction(format, custom_notations, direction)?);
        masks.insert(key, Arc::clone(&mask));
        tracing::debug!(
            format,
            ?direction,
            cached = masks.len(),
            "mask cache miss, compiled"
        );
        Ok(mask)
    }

    /// Whether `format` compiles; a valid format is cached as a side effect.
    pub fn is_valid(&self, format: &str, custom_notations: &[Notation]) -> bool {
        match self.get_or_create(format, custom_notations, false) {
            Ok(_) => true,
            Err(e) => {
                tracing::debug!(format, error = %e, "format rejected");
                false
            }
        }
    }

    pub fn len(&self) -> usize {
        self.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.lock().is_empty()
    }

    pub fn clear(&self) {
        self.lock().clear();
    }

    fn lock(&self) -> MutexGuard<'_, HashMap<MaskKey, Arc<Mask>>> {
        self.masks.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_same_format_returns_same_mask() {
        let cache = MaskCache::new();
        let a = cache.get_or_create("[00]", &[], false).unwrap();
        let b = cache.get_or_create("[00]", &[], false).unwrap();
        assert!(Arc::ptr_eq(&a, &b));
        assert_eq!(cache.len(), 1);
    }

    #[test]
    fn test_direction_and_notations_are_part_of_key() {
        let cache = MaskCache::new();
        let ltr = cache.get_or_create("[00]-[0]", &[], false).unwrap();
        let rtl = cache.get_or_create("[00]-[0]", &[], true).unwrap();
        assert!(!Arc::ptr_eq(&ltr, &rtl));

        let notations = vec![Notation::mandatory('X', "xyz")];
        cache.get_or_create("[00]-[0]", &notations, false).unwrap();
        assert_eq!(cache.len(), 3);
    }

    #[test]
    fn test_invalid_format_is_not_cached() {
        let cache = MaskCache::new();
        assert!(cache.get_or_create("[00", &[], false).is_err());
        assert!(!cache.is_valid("[0X]", &[]));
        assert!(cache.is_empty());
        assert!(cache.is_valid("[0]", &[]));
        assert_eq!(cache.len(), 1);
        cache.clear();
        assert!(cache.is_empty());
    }

    #[test]
    fn test_concurrent_lookups_share_one_mask() {
        let cache = MaskCache::new();
        let masks: Vec<Arc<Mask>> = std::thread::scope(|scope| {
            let handles: Vec<_> = (0..8)
                .map(|_| scope.spawn(|| cache.get_or_create("[000]-[00]", &[], false).unwrap()))
                .collect();
            handles.into_iter().map(|h| h.join().unwrap()).collect()
        });
        assert!(masks.windows(2).all(|pair| Arc::ptr_eq(&pair[0], &pair[1])));
        assert_eq!(cache.len(), 1);
    }
}
