//! Administrative operations, worker triggers, and data privacy requests.

use crate::client::client::Client;
use crate::client::operations::endpoints;
use crate::client::types::{
    CreateMealPlanTasksRequest, CreateMealPlanTasksResponse, DataDeletionResponse,
    FinalizeMealPlansRequest, FinalizeMealPlansResponse, InitializeMealPlanGroceryListRequest,
    InitializeMealPlanGroceryListResponse, UserAccountStatusUpdateInput, UserDataCollection,
    UserDataCollectionResponse, UserStatusResponse,
};

impl Client {
    endpoints! {
        /// Bans, unbans, or otherwise changes a user's account status.
        write POST update_user_account_status[](UserAccountStatusUpdateInput) -> UserStatusResponse =
            "/api/v1/admin/users/status";
    }

    // Workers run on a schedule server side. These trigger a run immediately.
    endpoints! {
        write POST run_finalize_meal_plans_worker[](FinalizeMealPlansRequest) -> FinalizeMealPlansResponse =
            "/api/v1/workers/finalize_meal_plans";
        write POST run_meal_plan_grocery_list_initializer_worker[](InitializeMealPlanGroceryListRequest)
            -> InitializeMealPlanGroceryListResponse = "/api/v1/workers/meal_plan_grocery_list_init";
        write POST run_meal_plan_task_creator_worker[](CreateMealPlanTasksRequest) -> CreateMealPlanTasksResponse =
            "/api/v1/workers/meal_plan_tasks";
    }

    endpoints! {
        /// Asks the server to collect everything it holds about the caller.
        /// The report is fetched later by ID.
        read POST aggregate_user_data_report[] -> UserDataCollectionResponse = "/api/v1/data_privacy/disclose";

        read GET fetch_user_data_report[user_data_aggregation_report_id] -> UserDataCollection =
            "/api/v1/data_privacy/reports/{user_data_aggregation_report_id}";

        read DELETE destroy_all_user_data[] -> DataDeletionResponse = "/api/v1/data_privacy/destroy";
    }
}
