//! Request types for updating models.

use crate::error::{Result, TimelineError};
use crate::schedule::MIN_ACTIVITY_MINUTES;

/// Field patch applied to a single activity by the timeline mutator.
///
/// Every field is optional; `None` leaves the stored value untouched.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ActivityPatch {
    pub title: Option<String>,
    pub duration_minutes: Option<i64>,
    pub notes: Option<String>,
    pub assigned_to: Option<Vec<String>>,
    pub is_highlight: Option<bool>,
}

impl ActivityPatch {
    /// Whether the patch changes anything at all.
    pub fn is_empty(&self) -> bool {
        self.title.is_none()
            && self.duration_minutes.is_none()
            && self.notes.is_none()
            && self.assigned_to.is_none()
            && self.is_highlight.is_none()
    }

    /// Validate the patch and return it with the duration floor applied.
    ///
    /// An empty (all-whitespace) title is rejected; a duration below the
    /// floor is clamped up to [`MIN_ACTIVITY_MINUTES`], not rejected.
    ///
    /// # Errors
    ///
    /// * `TimelineError::InvalidInput` - when the new title is empty after
    ///   trimming
    pub fn validated(mut self) -> Result<Self> {
        if let Some(title) = &self.title {
            let trimmed = title.trim();
            if trimmed.is_empty() {
                return Err(TimelineError::invalid_input(
                    "title",
                    "Title must not be empty",
                ));
            }
            self.title = Some(trimmed.to_string());
        }
        if let Some(duration) = self.duration_minutes {
            self.duration_minutes = Some(duration.max(MIN_ACTIVITY_MINUTES));
        }
        Ok(self)
    }
}

impl TryFrom<crate::params::UpdateActivity> for ActivityPatch {
    type Error = TimelineError;

    /// Convert update parameters into a validated patch.
    fn try_from(params: crate::params::UpdateActivity) -> Result<Self> {
        ActivityPatch {
            title: params.title,
            duration_minutes: params.duration_minutes,
            notes: params.notes,
            assigned_to: params.assigned_to,
            is_highlight: params.is_highlight,
        }
        .validated()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_patch_clamps_duration_floor() {
        let patch = ActivityPatch {
            duration_minutes: Some(2),
            ..Default::default()
        };
        let validated = patch.validated().expect("patch should validate");
        assert_eq!(validated.duration_minutes, Some(MIN_ACTIVITY_MINUTES));
    }

    #[test]
    fn test_patch_keeps_valid_duration() {
        let patch = ActivityPatch {
            duration_minutes: Some(45),
            ..Default::default()
        };
        let validated = patch.validated().expect("patch should validate");
        assert_eq!(validated.duration_minutes, Some(45));
    }

    #[test]
    fn test_patch_rejects_blank_title() {
        let patch = ActivityPatch {
            title: Some("   ".to_string()),
            ..Default::default()
        };
        let result = patch.validated();
        assert!(matches!(
            result,
            Err(TimelineError::InvalidInput { ref field, .. }) if field == "title"
        ));
    }

    #[test]
    fn test_patch_trims_title() {
        let patch = ActivityPatch {
            title: Some("  Premier regard  ".to_string()),
            ..Default::default()
        };
        let validated = patch.validated().expect("patch should validate");
        assert_eq!(validated.title, Some("Premier regard".to_string()));
    }

    #[test]
    fn test_empty_patch() {
        assert!(ActivityPatch::default().is_empty());
        let patch = ActivityPatch {
            notes: Some("bring the rings".to_string()),
            ..Default::default()
        };
        assert!(!patch.is_empty());
    }
}
