//! Read-only reference data: permission rows and pipeline stages.

use serde::Serialize;
use touchline_core::{
  Role,
  permission::{self, PermissionRow},
  pipeline::ApplicantStage,
};

use crate::extract::{Json, Path};

/// `GET /permissions/{role}`. An unknown role gets the empty row rather
/// than an error.
pub async fn for_role(Path(role): Path<String>) -> Json<PermissionRow> {
  Json(permission::permissions(Role::parse_lossy(&role)).clone())
}

#[derive(Debug, Serialize)]
pub struct StageEntry {
  pub stage: ApplicantStage,
  pub label: &'static str,
}

/// `GET /pipeline/stages`: applicant board columns in order.
pub async fn pipeline_stages() -> Json<Vec<StageEntry>> {
  Json(
    ApplicantStage::ALL
      .into_iter()
      .map(|stage| StageEntry { stage, label: stage.label() })
      .collect(),
  )
}
