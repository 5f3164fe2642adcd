//! Applicant pipeline stages shown on the club applicants board.
//!
//! Only the stages and their display order are defined. Which moves between
//! stages are legal has never been settled, so there is deliberately no
//! transition function here.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ApplicantStage {
  New,
  Reviewed,
  Shortlisted,
  Interview,
  Offer,
  Closed,
}

impl ApplicantStage {
  /// Every stage in board order.
  pub const ALL: [ApplicantStage; 6] = [
    Self::New,
    Self::Reviewed,
    Self::Shortlisted,
    Self::Interview,
    Self::Offer,
    Self::Closed,
  ];

  pub fn label(self) -> &'static str {
    match self {
      Self::New => "New",
      Self::Reviewed => "Reviewed",
      Self::Shortlisted => "Shortlisted",
      Self::Interview => "Interview",
      Self::Offer => "Offer",
      Self::Closed => "Closed",
    }
  }
}
