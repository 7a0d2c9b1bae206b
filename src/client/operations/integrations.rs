//! OAuth2 clients, webhooks, user notifications, and service settings.

use crate::client::client::Client;
use crate::client::operations::endpoints;
use crate::client::types::{
    OAuth2Client, OAuth2ClientCreationRequestInput, OAuth2ClientCreationResponse, ServiceSetting,
    ServiceSettingCreationRequestInput, UserNotification, UserNotificationCreationRequestInput,
    UserNotificationUpdateRequestInput, Webhook, WebhookCreationRequestInput,
};

impl Client {
    endpoints! {
        read GET get_oauth2_client[oauth2_client_id] -> OAuth2Client = "/api/v1/oauth2_clients/{oauth2_client_id}";
        list get_oauth2_clients[] -> OAuth2Client = "/api/v1/oauth2_clients";

        /// Registers an OAuth2 client. The response is the only place the
        /// client secret is ever returned.
        write POST create_oauth2_client[](OAuth2ClientCreationRequestInput) -> OAuth2ClientCreationResponse =
            "/api/v1/oauth2_clients";

        act DELETE archive_oauth2_client[oauth2_client_id] = "/api/v1/oauth2_clients/{oauth2_client_id}";
    }

    endpoints! {
        read GET get_webhook[webhook_id] -> Webhook = "/api/v1/webhooks/{webhook_id}";
        list get_webhooks[] -> Webhook = "/api/v1/webhooks";
        write POST create_webhook[](WebhookCreationRequestInput) -> Webhook = "/api/v1/webhooks";
        act DELETE archive_webhook[webhook_id] = "/api/v1/webhooks/{webhook_id}";
    }

    endpoints! {
        read GET get_user_notification[user_notification_id] -> UserNotification =
            "/api/v1/user_notifications/{user_notification_id}";
        list get_user_notifications[] -> UserNotification = "/api/v1/user_notifications";
        write POST create_user_notification[](UserNotificationCreationRequestInput) -> UserNotification =
            "/api/v1/user_notifications";
        write PATCH update_user_notification[user_notification_id](UserNotificationUpdateRequestInput)
            -> UserNotification = "/api/v1/user_notifications/{user_notification_id}";
    }

    endpoints! {
        read GET get_service_setting[service_setting_id] -> ServiceSetting = "/api/v1/settings/{service_setting_id}";
        list get_service_settings[] -> ServiceSetting = "/api/v1/settings";
        search search_for_service_settings[] -> ServiceSetting = "/api/v1/settings/search";
        write POST create_service_setting[](ServiceSettingCreationRequestInput) -> ServiceSetting = "/api/v1/settings";
        act DELETE archive_service_setting[service_setting_id] = "/api/v1/settings/{service_setting_id}";
    }
}
