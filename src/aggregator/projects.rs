//! Project list enrichment.
//!
//! Replaces every `{id}` reference in a user's `projects` array with the
//! full project payload. Lookups run concurrently and are joined before the
//! record is handed back; a failed lookup only affects its own slot.

use futures_util::future::join_all;
use serde_json::{Map, Value};

use crate::observability::metrics;
use crate::upstream::ProjectLookup;

/// Field holding the project references on a user record.
pub const PROJECTS_FIELD: &str = "projects";

/// Field added to a reference whose details could not be loaded.
pub const DETAILS_ERROR_FIELD: &str = "detailsError";

const MISSING_ID: &str = "missing project id";

/// Enrich `user.projects` in place of the references it carries.
///
/// Records without a `projects` array are returned untouched. The output
/// array always has the same length and order as the input.
pub async fn enrich_projects<L>(lookup: &L, mut user: Value) -> Value
where
    L: ProjectLookup,
{
    let Some(projects) = user
        .get_mut(PROJECTS_FIELD)
        .and_then(Value::as_array_mut)
    else {
        return user;
    };

    let references = std::mem::take(projects);
    let total = references.len();

    let enriched = join_all(references.into_iter().map(|reference| resolve(lookup, reference))).await;

    let failed = enriched
        .iter()
        .filter(|p| p.get(DETAILS_ERROR_FIELD).is_some())
        .count();
    tracing::debug!(total, failed, "Project enrichment finished");

    *projects = enriched;
    user
}

async fn resolve<L>(lookup: &L, reference: Value) -> Value
where
    L: ProjectLookup,
{
    let Value::Object(fields) = reference else {
        return reference;
    };

    let Some(id) = project_id(&fields) else {
        tracing::warn!("Project reference has no usable id");
        return with_error(fields, MISSING_ID.to_string());
    };

    match lookup.project(&id).await {
        Ok(detail) => {
            metrics::record_project_lookup(true);
            detail
        }
        Err(e) => {
            metrics::record_project_lookup(false);
            tracing::warn!(project_id = %id, error = %e, "Project fetch failed");
            with_error(fields, e.marker())
        }
    }
}

fn project_id(fields: &Map<String, Value>) -> Option<String> {
    match fields.get("id")? {
        Value::String(s) if !s.is_empty() => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    }
}

fn with_error(mut fields: Map<String, Value>, reason: String) -> Value {
    fields.insert(DETAILS_ERROR_FIELD.to_string(), Value::String(reason));
    Value::Object(fields)
}
