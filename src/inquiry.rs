//! Purchase and commission inquiries.
//!
//! The crate's only job here is to assemble a correct [`InquiryDraft`] from the
//! artwork being viewed, the selected edition (if any), and the contact form,
//! then hand it to an [`InquirySink`]. What happens after submission (status
//! changes, replies, fulfilment) belongs to the sink.

use crate::catalog::{Artwork, ArtworkId, ArtworkStatus, Edition, EditionId};
use serde::{Deserialize, Serialize};
use std::cell::RefCell;
use thiserror::Error;
use tracing::info;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum InquiryError {
    #[error("name is required")]
    MissingName,
    #[error("email is required")]
    MissingEmail,
    #[error("invalid email address: {0}")]
    InvalidEmail(String),
    #[error("artwork {0} is not available")]
    NotAvailable(ArtworkId),
    #[error("edition {edition} does not belong to artwork {artwork}")]
    EditionNotOwned {
        edition: EditionId,
        artwork: ArtworkId,
    },
    #[error("submission failed: {0}")]
    Submit(String),
}

/// Raw contents of the inquiry form.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ContactForm {
    pub name: String,
    pub email: String,
    pub country: String,
    pub message: String,
}

/// The record handed to the inquiry sink. Lifecycle status and timestamps
/// are the sink's to assign.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InquiryDraft {
    pub artwork_id: ArtworkId,
    pub edition_id: Option<EditionId>,
    pub name: String,
    pub email: String,
    pub country: Option<String>,
    pub message: String,
}

impl InquiryDraft {
    /// Assemble a draft for `artwork`, optionally for one of its editions.
    ///
    /// Name and email are required; country is dropped when blank; the
    /// message may be empty.
    pub fn assemble(
        artwork: &Artwork,
        edition: Option<&Edition>,
        form: &ContactForm,
    ) -> Result<Self, InquiryError> {
        if artwork.status != ArtworkStatus::Available {
            return Err(InquiryError::NotAvailable(artwork.id.clone()));
        }
        if let Some(ed) = edition.filter(|ed| ed.artwork_id != artwork.id) {
            return Err(InquiryError::EditionNotOwned {
                edition: ed.id.clone(),
                artwork: artwork.id.clone(),
            });
        }

        let name = form.name.trim();
        if name.is_empty() {
            return Err(InquiryError::MissingName);
        }
        let email = form.email.trim();
        if email.is_empty() {
            return Err(InquiryError::MissingEmail);
        }
        if !looks_like_email(email) {
            return Err(InquiryError::InvalidEmail(email.to_string()));
        }
        let country = form.country.trim();

        Ok(Self {
            artwork_id: artwork.id.clone(),
            edition_id: edition.map(|e| e.id.clone()),
            name: name.to_string(),
            email: email.to_string(),
            country: (!country.is_empty()).then(|| country.to_string()),
            message: form.message.clone(),
        })
    }
}

/// `local@domain.tld`, nothing stricter.
fn looks_like_email(email: &str) -> bool {
    let Some((local, domain)) = email.split_once('@') else {
        return false;
    };
    !local.is_empty()
        && !domain.contains('@')
        && domain
            .split_once('.')
            .is_some_and(|(host, tld)| !host.is_empty() && !tld.is_empty())
        && !email.chars().any(char::is_whitespace)
}

/// Where submitted inquiries go.
pub trait InquirySink {
    fn submit(&self, draft: &InquiryDraft) -> Result<(), InquiryError>;
}

/// Sink that keeps submissions in memory.
#[derive(Debug, Default)]
pub struct InquiryOutbox {
    submitted: RefCell<Vec<InquiryDraft>>,
}

impl InquiryOutbox {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn submitted(&self) -> Vec<InquiryDraft> {
        self.submitted.borrow().clone()
    }
}

impl InquirySink for InquiryOutbox {
    fn submit(&self, draft: &InquiryDraft) -> Result<(), InquiryError> {
        self.submitted.borrow_mut().push(draft.clone());
        Ok(())
    }
}

/// Assemble and submit in one step.
pub fn submit_inquiry(
    sink: &dyn InquirySink,
    artwork: &Artwork,
    edition: Option<&Edition>,
    form: &ContactForm,
) -> Result<InquiryDraft, InquiryError> {
    let draft = InquiryDraft::assemble(artwork, edition, form)?;
    sink.submit(&draft)?;
    info!(
        artwork = %draft.artwork_id,
        edition = draft.edition_id.as_ref().map(|e| e.0.as_str()).unwrap_or("-"),
        "inquiry submitted"
    );
    Ok(draft)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_helpers::*;

    fn form() -> ContactForm {
        ContactForm {
            name: "  Ada Collector ".into(),
            email: "ada@example.org".into(),
            country: "".into(),
            message: "Is it framed?".into(),
        }
    }

    #[test]
    fn assembles_original_without_edition() {
        let art = artwork("a1", "harbour", "Harbour");
        let draft = InquiryDraft::assemble(&art, None, &form()).unwrap();
        assert_eq!(draft.artwork_id, ArtworkId::from("a1"));
        assert_eq!(draft.edition_id, None);
        assert_eq!(draft.name, "Ada Collector");
        assert_eq!(draft.country, None);
    }

    #[test]
    fn carries_selected_edition() {
        let mut art = artwork("a2", "tide", "Tide");
        art.kind = crate::catalog::ArtworkType::Print;
        let ed = edition("e1", "a2", "A3", 50, 10, 15_000);
        let mut f = form();
        f.country = "Portugal".into();
        let draft = InquiryDraft::assemble(&art, Some(&ed), &f).unwrap();
        assert_eq!(draft.edition_id, Some(EditionId::from("e1")));
        assert_eq!(draft.country.as_deref(), Some("Portugal"));
    }

    #[test]
    fn rejects_edition_of_other_artwork() {
        let art = artwork("a2", "tide", "Tide");
        let ed = edition("e1", "a9", "A3", 50, 10, 15_000);
        let err = InquiryDraft::assemble(&art, Some(&ed), &form()).unwrap_err();
        assert!(matches!(err, InquiryError::EditionNotOwned { .. }));
    }

    #[test]
    fn requires_name_and_email() {
        let art = artwork("a1", "harbour", "Harbour");
        let mut f = form();
        f.name = "   ".into();
        assert_eq!(
            InquiryDraft::assemble(&art, None, &f),
            Err(InquiryError::MissingName)
        );
        let mut f = form();
        f.email = "".into();
        assert_eq!(
            InquiryDraft::assemble(&art, None, &f),
            Err(InquiryError::MissingEmail)
        );
    }

    #[test]
    fn rejects_malformed_email() {
        let art = artwork("a1", "harbour", "Harbour");
        for bad in ["ada", "ada@", "@example.org", "ada@example", "a b@example.org"] {
            let mut f = form();
            f.email = bad.into();
            assert!(
                matches!(
                    InquiryDraft::assemble(&art, None, &f),
                    Err(InquiryError::InvalidEmail(_))
                ),
                "{bad} accepted"
            );
        }
    }

    #[test]
    fn sold_artwork_cannot_be_inquired() {
        let mut art = artwork("a1", "harbour", "Harbour");
        art.status = ArtworkStatus::Sold;
        assert!(matches!(
            InquiryDraft::assemble(&art, None, &form()),
            Err(InquiryError::NotAvailable(_))
        ));
    }

    #[test]
    fn submit_hands_draft_to_sink() {
        let outbox = InquiryOutbox::new();
        let art = artwork("a1", "harbour", "Harbour");
        let draft = submit_inquiry(&outbox, &art, None, &form()).unwrap();
        assert_eq!(outbox.submitted(), vec![draft]);
    }

    #[test]
    fn invalid_form_never_reaches_sink() {
        let outbox = InquiryOutbox::new();
        let art = artwork("a1", "harbour", "Harbour");
        let mut f = form();
        f.name.clear();
        assert!(submit_inquiry(&outbox, &art, None, &f).is_err());
        assert!(outbox.submitted().is_empty());
    }

    #[test]
    fn draft_serializes_without_lifecycle_fields() {
        let art = artwork("a1", "harbour", "Harbour");
        let draft = InquiryDraft::assemble(&art, None, &form()).unwrap();
        let json = serde_json::to_value(&draft).unwrap();
        assert_eq!(json["edition_id"], serde_json::Value::Null);
        assert_eq!(json["name"], "Ada Collector");
        assert!(json.get("status").is_none());
        assert!(json.get("created_at").is_none());
    }
}
