//! Navigation API endpoint.

use std::sync::Arc;

use axum::Json;
use axum::extract::{Query, State};
use serde::{Deserialize, Serialize};
use shelf_nav::{ExpandState, NavItemState, NodeId};

use crate::error::ServerError;
use crate::state::{AppState, blocking};

/// Query for GET /api/navigation.
#[derive(Debug, Default, Deserialize)]
pub(crate) struct NavigationQuery {
    /// Current page URL path.
    #[serde(default)]
    path: Option<String>,
    /// Comma-separated ids of groups the reader expanded.
    #[serde(default)]
    expanded: Option<String>,
    /// Comma-separated ids of groups the reader collapsed.
    #[serde(default)]
    collapsed: Option<String>,
}

/// Response for GET /api/navigation.
#[derive(Serialize)]
pub(crate) struct NavigationResponse {
    items: Vec<NavItemState>,
}

/// Handle GET /api/navigation.
pub(crate) async fn get_navigation(
    State(state): State<Arc<AppState>>,
    Query(query): Query<NavigationQuery>,
) -> Result<Json<NavigationResponse>, ServerError> {
    let expand = ExpandState::from_toggles(
        parse_ids(query.expanded.as_deref())?,
        parse_ids(query.collapsed.as_deref())?,
    );
    let path = query
        .path
        .unwrap_or_else(|| state.site.options().route_prefix.clone());

    let site = Arc::clone(&state.site);
    let items = blocking(move || Ok(site.navigation(&path, &expand)?)).await?;
    Ok(Json(NavigationResponse { items }))
}

fn parse_ids(list: Option<&str>) -> Result<Vec<NodeId>, ServerError> {
    list.unwrap_or_default()
        .split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(|s| {
            s.parse()
                .map_err(|_| ServerError::BadRequest(format!("Invalid navigation id '{s}'")))
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_ids() {
        let ids = parse_ids(Some("0, 1.2,")).unwrap();

        assert_eq!(ids, vec![NodeId::new(vec![0]), NodeId::new(vec![1, 2])]);
        assert!(parse_ids(None).unwrap().is_empty());
        assert!(parse_ids(Some("a.b")).is_err());
    }
}
