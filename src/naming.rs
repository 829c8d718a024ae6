//! Artifact filename convention.
//!
//! Every exported artifact is named after the recipient:
//! `birthday-wishes-{recipientName}.{ext}`. The recipient name is used
//! exactly as entered (already trimmed by validation); non-ASCII names stay
//! non-ASCII.
//!
//! - `Asha`, document → `birthday-wishes-Asha.pdf`
//! - `Asha`, image → `birthday-wishes-Asha.png`
//! - `આશા પટેલ`, image → `birthday-wishes-આશા પટેલ.png`
//!
//! Making a name safe for a particular filesystem is the job of whatever
//! saves the artifact (see [`crate::export::DirectorySink`]), not of this
//! module.

/// Common prefix of every artifact name.
pub const ARTIFACT_PREFIX: &str = "birthday-wishes-";

/// The two export paths.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ArtifactKind {
    /// Multi-page PDF.
    Document,
    /// Single lossless PNG.
    Image,
}

impl ArtifactKind {
    pub fn extension(self) -> &'static str {
        match self {
            ArtifactKind::Document => "pdf",
            ArtifactKind::Image => "png",
        }
    }
}

/// Filename without extension, also used as the PDF title.
pub fn artifact_stem(recipient_name: &str) -> String {
    format!("{ARTIFACT_PREFIX}{recipient_name}")
}

/// Full artifact filename for `recipient_name`.
pub fn artifact_filename(recipient_name: &str, kind: ArtifactKind) -> String {
    format!("{}.{}", artifact_stem(recipient_name), kind.extension())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn document_name() {
        assert_eq!(
            artifact_filename("Asha", ArtifactKind::Document),
            "birthday-wishes-Asha.pdf"
        );
    }

    #[test]
    fn image_name() {
        assert_eq!(
            artifact_filename("Asha", ArtifactKind::Image),
            "birthday-wishes-Asha.png"
        );
    }

    #[test]
    fn name_kept_verbatim() {
        assert_eq!(
            artifact_filename("આશા પટેલ", ArtifactKind::Image),
            "birthday-wishes-આશા પટેલ.png"
        );
        assert_eq!(
            artifact_filename("R. K. Shah", ArtifactKind::Document),
            "birthday-wishes-R. K. Shah.pdf"
        );
    }

    #[test]
    fn stem_has_no_extension() {
        assert_eq!(artifact_stem("Asha"), "birthday-wishes-Asha");
    }
}
