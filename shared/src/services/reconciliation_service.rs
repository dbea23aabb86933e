use std::collections::HashSet;

use futures::future::join_all;

use crate::{DirectoryClient, PreferencesResult, PreferencesSubmission, SaveOutcome};

/// Bring the directory in line with the submitted desired list set. The
/// submission shape picks the path, first match wins:
///
/// 1. existing contact + non-empty list set: remove stale memberships, then
///    upsert (UPDATE)
/// 2. existing contact + empty list set: delete the contact outright; an
///    explicit empty selection is full withdrawal (DELETE)
/// 3. no contact id: upsert a new record (CREATE)
pub async fn save_preferences(
    client: &DirectoryClient,
    submission: &PreferencesSubmission,
) -> PreferencesResult<SaveOutcome> {
    match submission.contact_id() {
        Some(contact_id) if !submission.list_ids.is_empty() => {
            // Membership is re-read from the directory rather than trusted
            // from the form, which may be acting on stale state.
            let current = client.contact_list_ids(contact_id).await?;
            let to_remove = removal_set(&current, &submission.list_ids);

            remove_best_effort(client, contact_id, &to_remove).await;
            upsert(client, submission).await?;
            Ok(SaveOutcome::Updated)
        }
        Some(contact_id) => {
            client.delete_contact(contact_id).await?;
            Ok(SaveOutcome::Unsubscribed)
        }
        None => {
            upsert(client, submission).await?;
            Ok(SaveOutcome::Created)
        }
    }
}

/// `current − desired`, independent of input ordering.
pub fn removal_set(current: &[String], desired: &[String]) -> Vec<String> {
    let desired: HashSet<&str> = desired.iter().map(String::as_str).collect();
    current
        .iter()
        .filter(|id| !desired.contains(id.as_str()))
        .cloned()
        .collect()
}

/// Fan the removals out concurrently and wait for all of them to settle. A
/// single failed removal is logged and swallowed; it aborts neither the other
/// removals nor the upsert that follows.
async fn remove_best_effort(client: &DirectoryClient, contact_id: &str, list_ids: &[String]) {
    let removals = list_ids.iter().map(|list_id| async move {
        if let Err(err) = client.remove_contact_from_list(contact_id, list_id).await {
            tracing::warn!(
                "Failed to remove contact {} from list {}: {}",
                contact_id,
                list_id,
                err
            );
        }
    });

    join_all(removals).await;
}

async fn upsert(
    client: &DirectoryClient,
    submission: &PreferencesSubmission,
) -> PreferencesResult<()> {
    client
        .upsert_contact(
            &submission.email,
            submission.first_name.as_deref(),
            submission.last_name.as_deref(),
            &submission.list_ids,
        )
        .await
}
