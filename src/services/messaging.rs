use crate::metrics::Metrics;
use anyhow::Result;
use indexmap::IndexMap;
use std::sync::Arc;
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum MessagingError {
    #[error("Unknown specialty: {0}")]
    UnknownSpecialty(String),
}

/// Opens a link in a new browsing context. Fire-and-forget.
pub trait LinkOpener: Send + Sync {
    fn open(&self, url: &str) -> Result<()>;
}

/// Opener for hosts without a browser: the link is logged for the user to follow.
#[derive(Debug, Default, Clone, Copy)]
pub struct LogLinkOpener;

impl LinkOpener for LogLinkOpener {
    fn open(&self, url: &str) -> Result<()> {
        tracing::info!("Opening chat link: {}", url);
        Ok(())
    }
}

/// Builds prefilled `wa.me` chat links for the specialty grid.
#[derive(Clone)]
pub struct MessagingLinkBuilder {
    number: String,
    specialties: IndexMap<String, String>,
    opener: Arc<dyn LinkOpener>,
    metrics: Arc<Metrics>,
}

impl MessagingLinkBuilder {
    pub fn new(
        number: impl Into<String>,
        specialties: IndexMap<String, String>,
        opener: Arc<dyn LinkOpener>,
        metrics: Arc<Metrics>,
    ) -> Self {
        Self {
            number: number.into(),
            specialties,
            opener,
            metrics,
        }
    }

    /// `https://wa.me/<number>?text=<percent-encoded message>`
    pub fn build_link(&self, message: &str) -> String {
        format!(
            "https://wa.me/{}?text={}",
            self.number,
            urlencoding::encode(message)
        )
    }

    /// Specialty names in grid order.
    pub fn specialties(&self) -> impl Iterator<Item = &str> {
        self.specialties.keys().map(String::as_str)
    }

    pub fn specialty_at(&self, index: usize) -> Option<&str> {
        self.specialties.get_index(index).map(|(name, _)| name.as_str())
    }

    /// Build the link for `specialty` and hand it to the opener.
    ///
    /// Returns the link that was opened.
    pub fn contact(&self, specialty: &str) -> Result<String> {
        let message = self
            .specialties
            .get(specialty)
            .ok_or_else(|| MessagingError::UnknownSpecialty(specialty.to_string()))?;

        let link = self.build_link(message);
        self.opener.open(&link)?;
        self.metrics.record_link_opened();

        tracing::debug!("Chat link opened for {}", specialty);
        Ok(link)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::config::default_specialties;
    use std::sync::Mutex;

    #[derive(Default)]
    struct RecordingOpener {
        opened: Mutex<Vec<String>>,
    }

    impl LinkOpener for RecordingOpener {
        fn open(&self, url: &str) -> Result<()> {
            self.opened.lock().unwrap().push(url.to_string());
            Ok(())
        }
    }

    fn builder(opener: Arc<dyn LinkOpener>) -> MessagingLinkBuilder {
        MessagingLinkBuilder::new(
            "919693245941",
            default_specialties(),
            opener,
            Arc::new(Metrics::new()),
        )
    }

    #[test]
    fn test_build_link_encodes_message() {
        let builder = builder(Arc::new(LogLinkOpener));
        let link = builder.build_link("Hello, I need help?");
        assert_eq!(
            link,
            "https://wa.me/919693245941?text=Hello%2C%20I%20need%20help%3F"
        );
    }

    #[test]
    fn test_contact_opens_specialty_link() {
        let opener = Arc::new(RecordingOpener::default());
        let builder = builder(opener.clone());

        let link = builder.contact("ENT").unwrap();

        assert!(link.starts_with("https://wa.me/919693245941?text=Hello%2C%20I%20have%20ENT"));
        assert_eq!(opener.opened.lock().unwrap().as_slice(), &[link]);
    }

    #[test]
    fn test_contact_unknown_specialty() {
        let opener = Arc::new(RecordingOpener::default());
        let builder = builder(opener.clone());

        let err = builder.contact("Astrology").unwrap_err();

        assert_eq!(
            err.downcast_ref::<MessagingError>(),
            Some(&MessagingError::UnknownSpecialty("Astrology".to_string()))
        );
        assert!(opener.opened.lock().unwrap().is_empty());
    }

    #[test]
    fn test_specialty_order() {
        let builder = builder(Arc::new(LogLinkOpener));
        assert_eq!(builder.specialty_at(0), Some("General Physician"));
        assert_eq!(builder.specialties().count(), 10);
        assert_eq!(builder.specialty_at(10), None);
    }
}
