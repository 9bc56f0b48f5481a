#[cfg(test)]
mod integration_tests {
    use crate::schemas::{ApiResponse, CategoryResponse, ErrorResponse, HealthResponse, LocationResponse, PredictForm};
    use crate::test_utils::test_utils::setup_test_app;
    use axum::http::{header, HeaderValue, StatusCode};
    use axum_test::TestServer;

    fn form(month: &str, day: &str, category: &str) -> PredictForm {
        PredictForm {
            month: month.to_string(),
            day: day.to_string(),
            category: category.to_string(),
        }
    }

    #[tokio::test]
    async fn test_health_check() {
        let (app, _guard) = setup_test_app();
        let server = TestServer::new(app).unwrap();

        let response = server.get("/health").await;

        response.assert_status(StatusCode::OK);
        let body: HealthResponse = response.json();
        assert_eq!(body.status, "healthy");
        assert_eq!(body.records, 38);
        assert_eq!(body.categories, 2);
    }

    #[tokio::test]
    async fn test_index_serves_input_form() {
        let (app, _guard) = setup_test_app();
        let server = TestServer::new(app).unwrap();

        let response = server.get("/").await;

        response.assert_status(StatusCode::OK);
        let page = response.text();
        assert!(page.contains("<form"));
        assert!(page.contains(r#"<option value="Burglary">Burglary</option>"#));
        assert!(page.contains(r#"<option value="Theft">Theft</option>"#));
    }

    #[tokio::test]
    async fn test_predict_returns_chart_fragment() {
        let (app, _guard) = setup_test_app();
        let server = TestServer::new(app).unwrap();

        let response = server.post("/predict").form(&form("3", "10", "Theft")).await;

        response.assert_status(StatusCode::OK);
        let html = response.text();
        assert!(html.contains("<h1>Prediction Result</h1>"));
        assert!(html.contains(r#"<img src="data:image/svg+xml;base64,"#));
        assert!(html.contains(r#"alt="Crime Distribution""#));
        assert!(!html.contains("notice"));
    }

    #[tokio::test]
    async fn test_predict_accepts_padded_integers() {
        let (app, _guard) = setup_test_app();
        let server = TestServer::new(app).unwrap();

        let response = server.post("/predict").form(&form(" 03 ", "10", "Theft")).await;

        response.assert_status(StatusCode::OK);
    }

    #[tokio::test]
    async fn test_predict_is_deterministic() {
        let (app, _guard) = setup_test_app();
        let server = TestServer::new(app).unwrap();

        let first = server.post("/predict").form(&form("3", "10", "Theft")).await.text();
        let second = server.post("/predict").form(&form("3", "10", "Theft")).await.text();

        assert_eq!(first, second);
    }

    #[tokio::test]
    async fn test_predict_unknown_category_returns_notice() {
        let (app, _guard) = setup_test_app();
        let server = TestServer::new(app).unwrap();

        let response = server.post("/predict").form(&form("3", "10", "Piracy")).await;

        response.assert_status(StatusCode::OK);
        let html = response.text();
        assert!(html.contains(r#"class="notice""#));
        assert!(html.contains("data:image/svg+xml;base64,"));
    }

    #[tokio::test]
    async fn test_predict_category_is_case_sensitive() {
        let (app, _guard) = setup_test_app();
        let server = TestServer::new(app).unwrap();

        let response = server.post("/predict").form(&form("3", "10", "theft")).await;

        response.assert_status(StatusCode::OK);
        assert!(response.text().contains(r#"class="notice""#));
    }

    #[tokio::test]
    async fn test_predict_out_of_range_date_is_not_an_error() {
        let (app, _guard) = setup_test_app();
        let server = TestServer::new(app).unwrap();

        let response = server.post("/predict").form(&form("13", "32", "Theft")).await;

        response.assert_status(StatusCode::OK);
        assert!(!response.text().contains("notice"));
    }

    #[tokio::test]
    async fn test_predict_non_integer_month() {
        let (app, _guard) = setup_test_app();
        let server = TestServer::new(app).unwrap();

        let response = server.post("/predict").form(&form("abc", "10", "Theft")).await;

        response.assert_status(StatusCode::BAD_REQUEST);
        let html = response.text();
        assert!(html.contains("Prediction Failed"));
        assert!(html.contains("month"));
    }

    #[tokio::test]
    async fn test_predict_missing_day() {
        let (app, _guard) = setup_test_app();
        let server = TestServer::new(app).unwrap();

        let response = server.post("/predict").form(&[("month", "3"), ("category", "Theft")]).await;

        response.assert_status(StatusCode::BAD_REQUEST);
        assert!(response.text().contains("day"));
    }

    #[tokio::test]
    async fn test_predict_too_few_years_for_trend() {
        let (app, _guard) = setup_test_app();
        let server = TestServer::new(app).unwrap();

        let response = server.post("/predict").form(&form("7", "4", "Burglary")).await;

        response.assert_status(StatusCode::UNPROCESSABLE_ENTITY);
        assert!(response.text().contains("Insufficient data"));
    }

    #[tokio::test]
    async fn test_predict_allows_cross_origin_requests() {
        let (app, _guard) = setup_test_app();
        let server = TestServer::new(app).unwrap();

        let response = server
            .post("/predict")
            .add_header(header::ORIGIN, HeaderValue::from_static("http://localhost:3000"))
            .form(&form("3", "10", "Theft"))
            .await;

        response.assert_status(StatusCode::OK);
        let allowed = response
            .headers()
            .get(header::ACCESS_CONTROL_ALLOW_ORIGIN)
            .expect("CORS header should be present");
        assert_eq!(allowed, "*");
    }

    #[tokio::test]
    async fn test_get_categories() {
        let (app, _guard) = setup_test_app();
        let server = TestServer::new(app).unwrap();

        let response = server.get("/api/v1/categories").await;

        response.assert_status(StatusCode::OK);
        let body: ApiResponse<Vec<CategoryResponse>> = response.json();
        assert!(body.success);
        assert_eq!(body.message, "Categories retrieved successfully");
        assert_eq!(
            body.data,
            vec![
                CategoryResponse { name: "Burglary".to_string(), records: 2 },
                CategoryResponse { name: "Theft".to_string(), records: 36 },
            ]
        );
    }

    #[tokio::test]
    async fn test_test_subscriber_stays_installed() {
        let (_app, _guard) = setup_test_app();
        assert!(tracing::enabled!(tracing::Level::ERROR));
    }

    #[tokio::test]
    async fn test_get_locations_aggregates_by_place_and_year() {
        let (app, _guard) = setup_test_app();
        let server = TestServer::new(app).unwrap();

        let response = server.get("/api/v1/locations").add_query_param("category", "RIOTS").await;

        response.assert_status(StatusCode::OK);
        let body: ApiResponse<Vec<LocationResponse>> = response.json();
        assert!(body.success);
        assert_eq!(
            body.data,
            vec![
                LocationResponse {
                    place: "Hubballi, India".to_string(),
                    year: 2019,
                    count: 5,
                    radius_m: 1_500,
                },
                LocationResponse {
                    place: "Mysuru, India".to_string(),
                    year: 2020,
                    count: 1,
                    radius_m: 1_100,
                },
            ]
        );
    }

    #[tokio::test]
    async fn test_get_locations_filters_by_year() {
        let (app, _guard) = setup_test_app();
        let server = TestServer::new(app).unwrap();

        let response = server
            .get("/api/v1/locations")
            .add_query_param("category", "RIOTS")
            .add_query_param("year", 2020)
            .await;

        response.assert_status(StatusCode::OK);
        let body: ApiResponse<Vec<LocationResponse>> = response.json();
        assert_eq!(body.data.len(), 1);
        assert_eq!(body.data[0].place, "Mysuru, India");
    }

    #[tokio::test]
    async fn test_get_locations_unknown_category() {
        let (app, _guard) = setup_test_app();
        let server = TestServer::new(app).unwrap();

        let response = server.get("/api/v1/locations").add_query_param("category", "Theft").await;

        response.assert_status(StatusCode::NOT_FOUND);
        let body: ErrorResponse = response.json();
        assert!(!body.success);
        assert_eq!(body.code, "LOCATIONS_NOT_FOUND");
    }

    #[tokio::test]
    async fn test_get_locations_requires_category() {
        let (app, _guard) = setup_test_app();
        let server = TestServer::new(app).unwrap();

        let response = server.get("/api/v1/locations").await;

        response.assert_status(StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_get_location_categories() {
        let (app, _guard) = setup_test_app();
        let server = TestServer::new(app).unwrap();

        let response = server.get("/api/v1/locations/categories").await;

        response.assert_status(StatusCode::OK);
        let body: ApiResponse<Vec<String>> = response.json();
        assert_eq!(body.data, vec!["RIOTS".to_string()]);
    }

    #[tokio::test]
    async fn test_openapi_document_is_served() {
        let (app, _guard) = setup_test_app();
        let server = TestServer::new(app).unwrap();

        let response = server.get("/api-docs/openapi.json").await;

        response.assert_status(StatusCode::OK);
        let body: serde_json::Value = response.json();
        assert_eq!(body["info"]["title"], "Crimecast API");
        assert!(body["paths"]["/predict"]["post"].is_object());
        assert!(body["paths"]["/api/v1/locations"]["get"].is_object());
    }

    #[tokio::test]
    async fn test_unknown_route() {
        let (app, _guard) = setup_test_app();
        let server = TestServer::new(app).unwrap();

        let response = server.get("/api/v1/unknown").await;

        response.assert_status(StatusCode::NOT_FOUND);
    }
}
