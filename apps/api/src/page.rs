use axum::Json;
use axum::http::Uri;
use serde::Serialize;
use serde_json::{Map, Value};
use warden_core::{AppError, AppResult};

use crate::dto::{AuthUserResponse, PageAuthPayload, PageResponse};
use crate::middleware::AuthContext;

/// Prop key reserved for the authorization context.
const AUTH_PROP: &str = "auth";

/// Builder for a page payload rendered by the frontend view `component`.
#[derive(Debug)]
pub struct Page {
    component: &'static str,
    props: Map<String, Value>,
}

impl Page {
    pub fn new(component: &'static str) -> Self {
        Self {
            component,
            props: Map::new(),
        }
    }

    pub fn with_prop<T>(mut self, name: &str, value: &T) -> AppResult<Self>
    where
        T: Serialize + ?Sized,
    {
        let value = serde_json::to_value(value).map_err(|error| {
            AppError::Internal(format!("failed to serialize page prop '{name}': {error}"))
        })?;
        self.props.insert(name.to_owned(), value);
        Ok(self)
    }

    /// Attaches the acting user and their effective permissions under
    /// `props.auth`, overriding any prop of the same name.
    pub fn render(mut self, auth: &AuthContext, uri: &Uri) -> AppResult<Json<PageResponse>> {
        let payload = PageAuthPayload {
            user: AuthUserResponse::from(&auth.identity),
            permissions: auth.permissions.to_sorted_vec(),
        };
        let payload = serde_json::to_value(payload).map_err(|error| {
            AppError::Internal(format!("failed to serialize page auth payload: {error}"))
        })?;
        self.props.insert(AUTH_PROP.to_owned(), payload);

        Ok(Json(PageResponse {
            component: self.component.to_owned(),
            props: Value::Object(self.props),
            url: uri
                .path_and_query()
                .map(|path| path.as_str().to_owned())
                .unwrap_or_else(|| uri.path().to_owned()),
        }))
    }
}
