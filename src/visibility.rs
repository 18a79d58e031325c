//! Browser-side capabilities the forms read, kept behind traits so the form
//! logic runs without a browser.

use url::Url;

/// Reports how much of a form's container is inside the viewport.
pub trait ViewportObserver {
    /// Fraction of the container currently visible, in `0.0..=1.0`.
    fn intersection_ratio(&self) -> f32;
}

/// Flips once when the container first becomes visible and stays flipped.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct VisibilityTrigger {
    threshold: f32,
    visible: bool,
}

impl Default for VisibilityTrigger {
    fn default() -> Self {
        Self::new(0.1)
    }
}

impl VisibilityTrigger {
    pub fn new(threshold: f32) -> Self {
        Self {
            threshold: threshold.clamp(0.0, 1.0),
            visible: false,
        }
    }

    pub fn is_visible(&self) -> bool {
        self.visible
    }

    /// Returns true only on the call that latches the trigger.
    pub fn poll(&mut self, observer: &dyn ViewportObserver) -> bool {
        if self.visible {
            return false;
        }
        let ratio = observer.intersection_ratio();
        if ratio > 0.0 && ratio >= self.threshold {
            self.visible = true;
            return true;
        }
        false
    }
}

pub trait CurrentUrlProvider {
    fn current_url(&self) -> String;
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StaticUrl(pub String);

impl CurrentUrlProvider for StaticUrl {
    fn current_url(&self) -> String {
        self.0.clone()
    }
}

/// Project id from a `/projects/<id>` page address.
pub fn project_id_from_url(provider: &dyn CurrentUrlProvider) -> Option<String> {
    let url = Url::parse(&provider.current_url()).ok()?;
    let mut segments = url.path_segments()?.filter(|segment| !segment.is_empty());

    while let Some(segment) = segments.next() {
        if segment == "projects" {
            return segments.next().map(str::to_string);
        }
    }
    None
}
