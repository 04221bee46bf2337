use healthtrack_core::domain::intake::questionnaire::{Questionnaire, questionnaire_steps};

use crate::application::http::server::api_entities::response::Response;

#[utoipa::path(
    get,
    path = "/questionnaire",
    tag = "assessment",
    summary = "Get the questionnaire wizard",
    description = "Steps of the intake form: basic metrics with their ranges, the four tongue questions with their options, the optional photo step.",
    responses(
        (status = 200, body = Questionnaire)
    )
)]
pub async fn get_questionnaire() -> Response<Questionnaire> {
    Response::OK(questionnaire_steps())
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::{Router, routing::get};
    use axum_test::TestServer;

    #[tokio::test]
    async fn serves_wizard_steps() {
        let server =
            TestServer::new(Router::new().route("/questionnaire", get(get_questionnaire))).unwrap();

        let response = server.get("/questionnaire").await;
        response.assert_status_ok();

        let body: serde_json::Value = response.json();
        assert_eq!(body["data"]["total_steps"], 8);
        assert_eq!(body["data"]["steps"][2]["key"], "tongueBodyColor");
    }
}
