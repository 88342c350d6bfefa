//! View Notification Events
//!
//! The owning window talks to its plot views through this small closed set of
//! notifications, dispatched synchronously on the UI thread. Views decide per
//! variant whether a full recompute or only a re-derive of the displayed
//! curve is needed.

/// What changed, from a view's perspective.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ViewEvent {
    /// Presentation parameters changed (sample rate, range mode, axis unit);
    /// re-derive the displayed curve from the cached response
    ViewChanged,
    /// Filter coefficients changed; recompute the response
    DataChanged,
    /// Toolbar home: recompute and reset the plot axes to the default span
    Home,
    /// Plot views were enabled or disabled
    EnabledChanged(bool),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_events_are_comparable() {
        assert_eq!(ViewEvent::Home, ViewEvent::Home);
        assert_ne!(ViewEvent::ViewChanged, ViewEvent::DataChanged);
        assert_ne!(
            ViewEvent::EnabledChanged(true),
            ViewEvent::EnabledChanged(false)
        );
    }
}
