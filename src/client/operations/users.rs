use crate::client::client::Client;
use crate::client::operations::endpoints;
use crate::client::types::{
    User, UserDetailsUpdateRequestInput, UserEmailAddressUpdateInput, UsernameUpdateInput,
};

impl Client {
    endpoints! {
        /// Fetches the account the request is authenticated as.
        read GET get_self[] -> User = "/api/v1/users/self";

        read GET get_user[user_id] -> User = "/api/v1/users/{user_id}";
        list get_users[] -> User = "/api/v1/users";
        search search_for_users[] -> User = "/api/v1/users/search";
        act DELETE archive_user[user_id] = "/api/v1/users/{user_id}";

        apply PUT update_user_username[](UsernameUpdateInput) = "/api/v1/users/username";
        apply PUT update_user_details[](UserDetailsUpdateRequestInput) = "/api/v1/users/details";
        apply PUT update_user_email_address[](UserEmailAddressUpdateInput) = "/api/v1/users/email_address";
    }
}
