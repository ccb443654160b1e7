// API Integration Tests
//
// Purpose: Exercise every endpoint against an in-memory scorer
// Run with: cargo test --features api --test api_integration_tests

#[cfg(feature = "api")]
mod api_tests {
    use axum::{
        body::Body,
        http::{Request, StatusCode},
    };
    use farm_risk_scorer::{
        create_router, AppState, ConstantModel, FeatureOrder, ModelError, ProbabilityModel,
        RiskPolicy, RiskScorer,
    };
    use serde_json::{json, Value};
    use tower::ServiceExt; // for oneshot

    struct OfflineModel;

    impl ProbabilityModel for OfflineModel {
        fn probability(&self, _features: &[f64]) -> Result<f64, ModelError> {
            Err(ModelError::Invocation("model offline".to_string()))
        }

        fn name(&self) -> &str {
            "offline"
        }
    }

    // Helper: Router around a fixed model
    fn create_test_app(model: Box<dyn ProbabilityModel>) -> axum::Router {
        let scorer = RiskScorer::new(RiskPolicy::default(), model, FeatureOrder::default())
            .expect("Failed to build scorer");
        create_router(AppState::from_scorer(scorer))
    }

    fn post_json(uri: &str, body: &Value) -> Request<Body> {
        Request::builder()
            .method("POST")
            .uri(uri)
            .header("content-type", "application/json")
            .body(Body::from(body.to_string()))
            .unwrap()
    }

    // Helper: Parse JSON response
    async fn json_response(response: axum::response::Response) -> Value {
        let body = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .expect("Failed to read response body");
        serde_json::from_slice(&body).expect("Failed to parse JSON")
    }

    // =========================================================================
    // Section 1: Health Check
    // =========================================================================

    #[tokio::test]
    async fn test_health_check() {
        let app = create_test_app(Box::new(ConstantModel(10.0)));

        let response = app
            .oneshot(
                Request::builder()
                    .uri("/health")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);

        let body = json_response(response).await;
        assert_eq!(body["status"], "healthy");
        assert_eq!(body["model"], "constant");
        assert!(body["timestamp"].is_string());
    }

    // =========================================================================
    // Section 2: Single prediction
    // =========================================================================

    #[tokio::test]
    async fn test_predict_high_risk_farm() {
        let app = create_test_app(Box::new(ConstantModel(80.0)));
        let farm = json!({
            "Rainfall_Deviation": 50,
            "Region": "Coastal",
            "Water_Source": "Rainfed",
            "Insurance": "No",
            "Season": "Monsoon",
            "Crop_Type": "grapes"
        });

        let response = app.oneshot(post_json("/predict", &farm)).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        let body = json_response(response).await;
        assert_eq!(body["risk_score"], 81.3);
        assert_eq!(body["risk_level"], "HIGH");
        assert_eq!(body["season"], "MONSOON");
        assert_eq!(body["breakdown"]["weather"], 100.0);
        assert_eq!(body["alerts"][0]["title"], "High Distress Risk");
        assert!(body["recommendations"].as_array().unwrap().len() > 3);
    }

    #[tokio::test]
    async fn test_predict_accepts_strings_and_nulls() {
        let app = create_test_app(Box::new(ConstantModel(20.0)));
        let farm = json!({
            "Rainfall_Deviation": "12.5",
            "Market_Volatility": null,
            "Loan_Amount": "",
            "Storage_Access": true,
            "Water_Source": "Borewell",
            "Season": "harvest"
        });

        let response = app.oneshot(post_json("/predict", &farm)).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        let body = json_response(response).await;
        assert_eq!(body["season"], "HARVEST");
        assert_eq!(body["breakdown"]["weather"], 25.0);
    }

    #[tokio::test]
    async fn test_predict_model_failure_is_500() {
        let app = create_test_app(Box::new(OfflineModel));

        let response = app
            .oneshot(post_json("/predict", &json!({})))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);

        let body = json_response(response).await;
        assert!(body["error"].as_str().unwrap().contains("model offline"));
    }

    #[tokio::test]
    async fn test_predict_out_of_range_probability_is_500() {
        let app = create_test_app(Box::new(ConstantModel(250.0)));

        let response = app
            .oneshot(post_json("/predict", &json!({"Season": "Normal"})))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);

        let body = json_response(response).await;
        assert!(body["error"].is_string());
    }

    // =========================================================================
    // Section 3: Batch prediction
    // =========================================================================

    #[tokio::test]
    async fn test_batch_preserves_order() {
        let app = create_test_app(Box::new(ConstantModel(10.0)));
        let farms = json!([
            {"Rainfall_Deviation": 0, "Water_Source": "Canal", "Insurance": "Yes"},
            {"Rainfall_Deviation": 45, "Water_Source": "Canal"}
        ]);

        let response = app
            .oneshot(post_json("/predict/batch", &farms))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        let body = json_response(response).await;
        let entries = body.as_array().unwrap();
        assert_eq!(entries.len(), 2);
        assert_eq!(entries[0]["ok"]["breakdown"]["weather"], 5.0);
        assert_eq!(entries[1]["ok"]["breakdown"]["weather"], 85.5);
    }

    #[tokio::test]
    async fn test_batch_reports_per_farm_errors() {
        let app = create_test_app(Box::new(OfflineModel));

        let response = app
            .oneshot(post_json("/predict/batch", &json!([{}, {}])))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        let body = json_response(response).await;
        let entries = body.as_array().unwrap();
        assert_eq!(entries.len(), 2);
        assert!(entries
            .iter()
            .all(|e| e["error"].as_str().unwrap().contains("model offline")));
    }
}
