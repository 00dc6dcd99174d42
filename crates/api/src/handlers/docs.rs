use axum::response::Redirect;
use axum::Json;
use serde::Serialize;

use crate::response::DataResponse;

/// One entry in the endpoint listing.
#[derive(Debug, Serialize)]
pub struct EndpointDoc {
    pub method: &'static str,
    pub path: &'static str,
    pub description: &'static str,
}

const ENDPOINTS: &[EndpointDoc] = &[
    EndpointDoc {
        method: "GET",
        path: "/stats",
        description: "Minimum, maximum and average altitude over the last 5 minutes",
    },
    EndpointDoc {
        method: "GET",
        path: "/health",
        description: "Altitude health message for the last minute",
    },
    EndpointDoc {
        method: "GET",
        path: "/docs",
        description: "This endpoint listing",
    },
];

/// GET / -- redirect to the endpoint listing.
pub async fn root() -> Redirect {
    Redirect::temporary("/docs")
}

/// GET /docs
pub async fn list_endpoints() -> Json<DataResponse<&'static [EndpointDoc]>> {
    Json(DataResponse { data: ENDPOINTS })
}
