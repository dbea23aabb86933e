use aws_lambda_events::event::apigw::{ApiGatewayV2httpRequest, ApiGatewayV2httpResponse};
use lambda_runtime::{run, service_fn, Error, LambdaEvent};
use tracing::{error, info};

use preferences_shared::{
    failure_response, get_preferences, json_response, AccountSelector, DirectoryClient,
    DirectoryCredentials, PreferencesResult, PreferencesView,
};

#[tokio::main]
async fn main() -> Result<(), Error> {
    tracing_subscriber::fmt()
        .with_max_level(tracing::Level::INFO)
        .with_target(true)
        .without_time()
        .init();

    info!("Starting get-preferences Lambda");

    run(service_fn(function_handler)).await
}

async fn function_handler(
    event: LambdaEvent<ApiGatewayV2httpRequest>,
) -> Result<ApiGatewayV2httpResponse, Error> {
    let (request, _context) = event.into_parts();

    let params = &request.query_string_parameters;
    let email = params.first("email").unwrap_or("").to_string();
    let account = AccountSelector::parse(params.first("account"));

    info!("Loading preferences - Email: {}, Account: {:?}", email, account);

    let response = match load_preferences(&email, account).await {
        Ok(view) => {
            info!(
                "Loaded preferences - Contact: {:?}, Lists: {}",
                view.contact_id,
                view.lists.len()
            );
            json_response(200, &view)
        }
        Err(err) => {
            error!("Failed to load preferences for {}: {}", email, err);
            failure_response(&err)
        }
    };

    Ok(response)
}

async fn load_preferences(
    email: &str,
    account: AccountSelector,
) -> PreferencesResult<PreferencesView> {
    let credentials = DirectoryCredentials::from_env()?;
    let client = DirectoryClient::for_account(&credentials, account);

    get_preferences(&client, email).await
}

#[cfg(test)]
mod tests {
    use preferences_shared::AccountSelector;

    #[test]
    fn test_account_param_parsing() {
        assert_eq!(AccountSelector::parse(Some("media")), AccountSelector::Media);
        // Absent or unknown account params route to the default tenant
        assert_eq!(AccountSelector::parse(None), AccountSelector::Visitors);
        assert_eq!(AccountSelector::parse(Some("bogus")), AccountSelector::Visitors);
    }
}
