use std::sync::Arc;

use axum::extract::State;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::routing::{get, post};
use axum::{Json, Router};
use serde::{Deserialize, Serialize};
use token_wizard_core::request::{GovernanceContractRequest, UtilityContractRequest};
use token_wizard_core::{ContractSource, ContractWizard, WizardError};
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;
use tracing::error;

/// Shared handler state.
#[derive(Clone)]
pub struct AppState {
    pub wizard: Arc<ContractWizard>,
}

/// Successful generation response.
#[derive(Debug, Serialize, Deserialize)]
pub struct ContractResponse {
    pub contract: String,
}

impl From<ContractSource> for ContractResponse {
    fn from(source: ContractSource) -> Self {
        Self {
            contract: source.into_string(),
        }
    }
}

/// Generation failure. The cause is logged, never sent to the client.
struct ApiError {
    route: &'static str,
    source: WizardError,
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = match self.source {
            WizardError::InvalidParams(_)
            | WizardError::MissingOption(_)
            | WizardError::InvalidAmount { .. }
            | WizardError::InvalidAddress(_) => StatusCode::UNPROCESSABLE_ENTITY,
            _ => StatusCode::NOT_IMPLEMENTED,
        };
        error!(route = self.route, status = status.as_u16(), error = %self.source, "contract generation failed");
        status.into_response()
    }
}

/// Build the gateway router with CORS and request tracing.
pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/", get(index))
        .route("/secret-path", get(secret_path))
        .route("/ut-contract", post(utility_contract))
        .route("/gt-contract", post(governance_contract))
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

async fn index() -> &'static str {
    "Hello"
}

async fn secret_path() -> &'static str {
    "You are at the right place!"
}

async fn utility_contract(
    State(state): State<AppState>,
    Json(request): Json<UtilityContractRequest>,
) -> Result<Json<ContractResponse>, ApiError> {
    let with_route = |source| ApiError {
        route: "/ut-contract",
        source,
    };
    let (params, rewards) = request.into_parts().map_err(with_route)?;
    let contract = state
        .wizard
        .generate_utility(&params, rewards)
        .map_err(with_route)?;
    Ok(Json(contract.into()))
}

async fn governance_contract(
    State(state): State<AppState>,
    Json(request): Json<GovernanceContractRequest>,
) -> Result<Json<ContractResponse>, ApiError> {
    let with_route = |source| ApiError {
        route: "/gt-contract",
        source,
    };
    let (params, options) = request.into_parts().map_err(with_route)?;
    let contract = state
        .wizard
        .generate_governance(&params, &options)
        .map_err(with_route)?;
    Ok(Json(contract.into()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::{to_bytes, Body};
    use axum::http::{header, Request};
    use serde_json::json;
    use tower::ServiceExt;

    fn app() -> Router {
        router(AppState {
            wizard: Arc::new(ContractWizard::new()),
        })
    }

    async fn post_json(uri: &str, body: serde_json::Value) -> Response {
        app()
            .oneshot(
                Request::builder()
                    .method("POST")
                    .uri(uri)
                    .header(header::CONTENT_TYPE, "application/json")
                    .body(Body::from(body.to_string()))
                    .unwrap(),
            )
            .await
            .unwrap()
    }

    async fn body_string(response: Response) -> String {
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        String::from_utf8(bytes.to_vec()).unwrap()
    }

    async fn contract_of(response: Response) -> String {
        let body: ContractResponse = serde_json::from_str(&body_string(response).await).unwrap();
        body.contract
    }

    #[tokio::test]
    async fn test_liveness() {
        let response = app()
            .oneshot(Request::builder().uri("/").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(body_string(response).await, "Hello");
    }

    #[tokio::test]
    async fn test_secret_path() {
        let response = app()
            .oneshot(Request::builder().uri("/secret-path").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(body_string(response).await, "You are at the right place!");
    }

    #[tokio::test]
    async fn test_utility_contract() {
        let response = post_json(
            "/ut-contract",
            json!({ "name": "Util", "symbol": "UTL", "access": false, "rewards": true }),
        )
        .await;
        assert_eq!(response.status(), StatusCode::OK);

        let contract = contract_of(response).await;
        assert!(contract.contains("contract Util is ERC20 {"));
        assert!(contract.contains("function transferFrom(address from, address to, uint256 amount)"));
    }

    #[tokio::test]
    async fn test_governance_contract() {
        let response = post_json(
            "/gt-contract",
            json!({
                "name": "Gov",
                "symbol": "GOV",
                "staking": true,
                "rewards": true,
                "minStakingDuration": 172800,
                "rewardsMultiplier": 10,
                "votingThreshold": 1000,
            }),
        )
        .await;
        assert_eq!(response.status(), StatusCode::OK);

        let contract = contract_of(response).await;
        assert!(contract.contains("MIN_STAKING_DURATION = 172800;"));
        assert!(contract.contains("VOTING_THRESHOLD = 1000;"));
        assert!(contract.contains("REWARD_MULTIPLIER = 10;"));
        assert!(contract.contains("function transfer(address to, uint256 amount, address utAddr) public {"));
    }

    #[tokio::test]
    async fn test_missing_option_is_unprocessable() {
        let response = post_json(
            "/gt-contract",
            json!({ "name": "Gov", "symbol": "GOV", "rewards": true }),
        )
        .await;
        assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
        assert!(body_string(response).await.is_empty());
    }

    #[tokio::test]
    async fn test_empty_name_is_unprocessable() {
        let response = post_json("/ut-contract", json!({ "name": "", "symbol": "UTL" })).await;
        assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
    }

    #[tokio::test]
    async fn test_malformed_json_rejected() {
        let response = app()
            .oneshot(
                Request::builder()
                    .method("POST")
                    .uri("/ut-contract")
                    .header(header::CONTENT_TYPE, "application/json")
                    .body(Body::from("{ \"name\": "))
                    .unwrap(),
            )
            .await
            .unwrap();
        assert!(response.status().is_client_error());
    }

    #[test]
    fn test_composition_failure_is_not_implemented() {
        let error = ApiError {
            route: "/ut-contract",
            source: WizardError::MissingAnchor("contract declaration"),
        };
        assert_eq!(error.into_response().status(), StatusCode::NOT_IMPLEMENTED);
    }

    #[tokio::test]
    async fn test_cors_allows_any_origin() {
        let response = app()
            .oneshot(
                Request::builder()
                    .uri("/")
                    .header(header::ORIGIN, "https://example.com")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(
            response.headers().get(header::ACCESS_CONTROL_ALLOW_ORIGIN).unwrap(),
            "*"
        );
    }
}
