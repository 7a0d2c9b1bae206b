use crate::client::client::Client;
use crate::client::operations::endpoints;
use crate::client::types::{
    Household, HouseholdCreationRequestInput, HouseholdInvitation,
    HouseholdInvitationCreationRequestInput, HouseholdInvitationUpdateRequestInput,
    HouseholdOwnershipTransferInput, HouseholdUpdateRequestInput, ModifyUserPermissionsInput,
    UserPermissionsResponse,
};

impl Client {
    endpoints! {
        read GET get_household[household_id] -> Household = "/api/v1/households/{household_id}";
        exists household_exists[household_id] = "/api/v1/households/{household_id}";

        /// Fetches the household the caller is currently acting in.
        read GET get_active_household[] -> Household = "/api/v1/households/current";

        list get_households[] -> Household = "/api/v1/households";
        write POST create_household[](HouseholdCreationRequestInput) -> Household = "/api/v1/households";
        write PUT update_household[household_id](HouseholdUpdateRequestInput) -> Household =
            "/api/v1/households/{household_id}";
        act DELETE archive_household[household_id] = "/api/v1/households/{household_id}";

        /// Makes `household_id` the caller's default household.
        act POST set_default_household[household_id] = "/api/v1/households/{household_id}/default";

        write POST transfer_household_ownership[household_id](HouseholdOwnershipTransferInput) -> Household =
            "/api/v1/households/{household_id}/transfer";

        /// Changes a member's role. This is the only partial update the API exposes.
        write PATCH update_household_member_permissions[household_id, user_id](ModifyUserPermissionsInput)
            -> UserPermissionsResponse = "/api/v1/households/{household_id}/members/{user_id}/permissions";

        act DELETE archive_user_membership[household_id, user_id] =
            "/api/v1/households/{household_id}/members/{user_id}";
    }

    // Invitations
    endpoints! {
        write POST create_household_invitation[household_id](HouseholdInvitationCreationRequestInput)
            -> HouseholdInvitation = "/api/v1/households/{household_id}/invite";
        read GET get_household_invitation[household_invitation_id] -> HouseholdInvitation =
            "/api/v1/household_invitations/{household_invitation_id}";
        read GET get_household_invitation_by_id[household_id, household_invitation_id] -> HouseholdInvitation =
            "/api/v1/households/{household_id}/invitations/{household_invitation_id}";
        list get_sent_household_invitations[] -> HouseholdInvitation = "/api/v1/household_invitations/sent";
        list get_received_household_invitations[] -> HouseholdInvitation =
            "/api/v1/household_invitations/received";

        /// Accepts an invitation addressed to the caller. The body carries the
        /// invitation token.
        apply PUT accept_household_invitation[household_invitation_id](HouseholdInvitationUpdateRequestInput) =
            "/api/v1/household_invitations/{household_invitation_id}/accept";
        apply PUT cancel_household_invitation[household_invitation_id](HouseholdInvitationUpdateRequestInput) =
            "/api/v1/household_invitations/{household_invitation_id}/cancel";
        apply PUT reject_household_invitation[household_invitation_id](HouseholdInvitationUpdateRequestInput) =
            "/api/v1/household_invitations/{household_invitation_id}/reject";
    }
}
