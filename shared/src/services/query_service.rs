use crate::{
    display_name, has_visibility_tag, Contact, DirectoryClient, DirectoryList, MailingList,
    PreferencesResult, PreferencesView,
};

/// Build the view the form renders: the contact's profile plus every visible
/// list annotated with subscription state, sorted by display name.
pub async fn get_preferences(
    client: &DirectoryClient,
    email: &str,
) -> PreferencesResult<PreferencesView> {
    let contact = match client.search_contact(email).await? {
        Some(contact) => contact,
        None => Contact::placeholder(email),
    };

    let lists = client.all_lists().await?;
    let mut lists = annotate_lists(lists, &contact);
    lists.sort_by(|a, b| a.name.cmp(&b.name));

    Ok(PreferencesView {
        contact_id: contact.id,
        email: contact.email,
        first_name: contact.first_name,
        last_name: contact.last_name,
        lists,
    })
}

/// Fold the contact's membership into each list, drop tagged lists the
/// contact is not subscribed to, and strip tags for display. An active tagged
/// subscription stays visible so the contact can still opt out of it.
fn annotate_lists(lists: Vec<DirectoryList>, contact: &Contact) -> Vec<MailingList> {
    lists
        .into_iter()
        .filter_map(|list| {
            let is_subscribed = contact.is_subscribed_to(&list.id);
            if has_visibility_tag(&list.name) && !is_subscribed {
                return None;
            }
            Some(MailingList {
                name: display_name(&list.name).to_string(),
                id: list.id,
                is_subscribed,
            })
        })
        .collect()
}
