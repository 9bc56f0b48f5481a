#[cfg(test)]
mod tests {
    use crate::schemas::ApiDoc;
    use utoipa::OpenApi;

    #[test]
    fn test_openapi_schema_generation() {
        let openapi = ApiDoc::openapi();

        assert!(openapi.components.is_some());
        let components = openapi.components.as_ref().unwrap();

        assert!(components.schemas.contains_key("HealthResponse"));
        assert!(components.schemas.contains_key("CategoryResponse"));
        assert!(components.schemas.contains_key("PredictForm"));
        assert!(components.schemas.contains_key("LocationResponse"));
        assert!(components.schemas.contains_key("ErrorResponse"));

        let json_result = serde_json::to_string(&openapi);
        assert!(json_result.is_ok());
    }

    #[test]
    fn test_predict_form_schema_structure() {
        let openapi = ApiDoc::openapi();
        let components = openapi.components.as_ref().unwrap();
        let form_schema = components.schemas.get("PredictForm").unwrap();

        if let utoipa::openapi::RefOr::T(utoipa::openapi::schema::Schema::Object(obj)) = form_schema {
            let properties = &obj.properties;
            assert!(properties.contains_key("month"));
            assert!(properties.contains_key("day"));
            assert!(properties.contains_key("category"));
        } else {
            panic!("PredictForm should be an object schema");
        }
    }

    #[test]
    fn test_openapi_paths_contain_predict_endpoint() {
        let openapi = ApiDoc::openapi();

        let predict_path = openapi.paths.paths.get("/predict").unwrap();
        let predict_post = predict_path
            .operations
            .get(&utoipa::openapi::PathItemType::Post)
            .expect("POST /predict should be documented");

        let responses = &predict_post.responses;
        assert!(responses.responses.contains_key("200"));
        assert!(responses.responses.contains_key("400"));
        assert!(responses.responses.contains_key("422"));
    }

    #[test]
    fn test_openapi_paths_contain_health_and_categories() {
        let openapi = ApiDoc::openapi();
        assert!(openapi.paths.paths.contains_key("/health"));
        assert!(openapi.paths.paths.contains_key("/api/v1/categories"));
        assert!(openapi.paths.paths.contains_key("/api/v1/locations"));
        assert!(openapi.paths.paths.contains_key("/api/v1/locations/categories"));
    }
}
