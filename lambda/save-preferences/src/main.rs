use aws_lambda_events::event::apigw::{ApiGatewayV2httpRequest, ApiGatewayV2httpResponse};
use lambda_runtime::{run, service_fn, Error, LambdaEvent};
use tracing::{error, info};

use preferences_shared::{
    failure_response, json_response, save_preferences, DirectoryClient, DirectoryCredentials,
    PreferencesError, PreferencesResult, PreferencesSubmission, SaveOutcome,
};

#[tokio::main]
async fn main() -> Result<(), Error> {
    tracing_subscriber::fmt()
        .with_max_level(tracing::Level::INFO)
        .with_target(true)
        .without_time()
        .init();

    info!("Starting save-preferences Lambda");

    run(service_fn(function_handler)).await
}

async fn function_handler(
    event: LambdaEvent<ApiGatewayV2httpRequest>,
) -> Result<ApiGatewayV2httpResponse, Error> {
    let (request, _context) = event.into_parts();

    let response = match handle_submission(request.body.as_deref()).await {
        Ok(outcome) => {
            info!("Preferences saved - Outcome: {:?}", outcome);
            json_response(200, &serde_json::json!({ "message": outcome.message() }))
        }
        Err(err) => {
            error!("Failed to save preferences: {}", err);
            failure_response(&err)
        }
    };

    Ok(response)
}

async fn handle_submission(body: Option<&str>) -> PreferencesResult<SaveOutcome> {
    let body = body
        .ok_or_else(|| PreferencesError::InvalidRequest("No payload provided".to_string()))?;

    // Rejected before any directory call is made
    let submission: PreferencesSubmission = serde_json::from_str(body)
        .map_err(|err| PreferencesError::InvalidRequest(format!("Unparseable payload: {}", err)))?;

    info!(
        "Saving preferences - Email: {}, Account: {:?}, Contact: {:?}, Lists: {}",
        submission.email,
        submission.account(),
        submission.contact_id(),
        submission.list_ids.len()
    );

    let credentials = DirectoryCredentials::from_env()?;
    let client = DirectoryClient::for_account(&credentials, submission.account());

    save_preferences(&client, &submission).await
}
