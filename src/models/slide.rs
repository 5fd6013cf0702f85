use serde::{Deserialize, Serialize};

/// One hero slide: background image plus the caption shown over it.
///
/// Slides are defined once at startup (from `Hero Config.yaml` or
/// [`default_slides`]) and never mutated afterwards.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SlideDescriptor {
    #[serde(rename = "image")]
    pub image_ref: String,
    pub title: String,
    pub subtitle: String,
}

impl SlideDescriptor {
    pub fn new(
        image_ref: impl Into<String>,
        title: impl Into<String>,
        subtitle: impl Into<String>,
    ) -> Self {
        Self {
            image_ref: image_ref.into(),
            title: title.into(),
            subtitle: subtitle.into(),
        }
    }
}

/// The three slides shipped on the homepage.
pub fn default_slides() -> Vec<SlideDescriptor> {
    vec![
        SlideDescriptor::new(
            "/homeheroslide1.jpg",
            "Expert Medical Care",
            "Connect with qualified doctors anytime",
        ),
        SlideDescriptor::new(
            "/bloodtest.jpg",
            "Comprehensive Blood Tests",
            "Accurate results with fast turnaround",
        ),
        SlideDescriptor::new(
            "/advancedray.jpg",
            "Advanced X-Ray Services",
            "State-of-the-art imaging technology",
        ),
    ]
}
